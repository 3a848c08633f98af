use photowatch_core::{CoreError, DatabaseError, Query};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};


const LAST_RESULT_ID_KEY: &str = "last_result_id";
const SEARCH_QUERY_KEY: &str = "search_query";

/// Durable key-value store backed by SQLite. Holds the poller's two
/// persistent slots: the stored search query and the last result id.
pub struct Database {
    connection_string: String,
    pool: Option<SqlitePool>,
}

impl Database {
    pub fn new(connection_string: String) -> Self {
        Self {
            connection_string,
            pool: None,
        }
    }

    pub async fn connect(&mut self) -> Result<(), CoreError> {
        let options = SqliteConnectOptions::from_str(&self.connection_string)
            .map_err(|e| DatabaseError::ConnectionFailed {
                reason: e.to_string(),
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed {
                reason: e.to_string(),
            })?;

        info!("Connected to database: {}", self.connection_string);
        self.pool = Some(pool);
        Ok(())
    }

    pub async fn run_migrations(&self) -> Result<(), CoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
        )
        .execute(self.pool()?)
        .await
        .map_err(|e| {
            tracing::error!("Migration failed: {}", e);
            DatabaseError::MigrationFailed {
                migration: "create settings table".to_string(),
            }
        })?;

        debug!("Database migrations complete");
        Ok(())
    }

    fn pool(&self) -> Result<&SqlitePool, CoreError> {
        self.pool.as_ref().ok_or_else(|| {
            CoreError::Database(DatabaseError::ConnectionFailed {
                reason: "connect() has not been called".to_string(),
            })
        })
    }

    pub async fn save_setting(&self, key: &str, value: &str) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().timestamp())
        .execute(self.pool()?)
        .await
        .map_err(|e| query_failed("save_setting", e))?;

        Ok(())
    }

    pub async fn get_setting(&self, key: &str) -> Result<Option<String>, CoreError> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
                .bind(key)
                .fetch_optional(self.pool()?)
                .await
                .map_err(|e| query_failed("get_setting", e))?;

        Ok(value)
    }

    /// Identifier of the newest photo seen by the poller. Absent until
    /// the first successful non-empty fetch.
    pub async fn last_result_id(&self) -> Result<Option<String>, CoreError> {
        self.get_setting(LAST_RESULT_ID_KEY).await
    }

    pub async fn set_last_result_id(&self, id: &str) -> Result<(), CoreError> {
        self.save_setting(LAST_RESULT_ID_KEY, id).await
    }

    /// Stored search query; empty text selects the interestingness feed.
    pub async fn stored_query(&self) -> Result<Query, CoreError> {
        let text = self.get_setting(SEARCH_QUERY_KEY).await?.unwrap_or_default();
        Ok(Query::new(text))
    }

    pub async fn set_stored_query(&self, text: &str) -> Result<(), CoreError> {
        self.save_setting(SEARCH_QUERY_KEY, text).await
    }
}

fn query_failed(query: &str, e: sqlx::Error) -> DatabaseError {
    tracing::error!("Query {} failed: {}", query, e);
    DatabaseError::QueryFailed {
        query: query.to_string(),
    }
}
