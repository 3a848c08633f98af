use background_service::{DesktopNotifier, PollService};
use database::Database;
use flickr_client::FlickrApiClient;
use photowatch_core::{AppConfig, CoreError, ErrorExt};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    tracing_subscriber::fmt()
        .with_env_filter("photowatch=debug,background_service=debug,flickr_client=debug,database=debug")
        .init();

    tracing::info!("Starting Photowatch - Flickr photo poller");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("photowatch.toml"));
    let config = load_config(&config_path)?;
    config.validate().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        e
    })?;
    let api_key = config.api_key()?.to_string();

    let mut database = Database::new(config.database_url.clone());
    database.connect().await?;
    database.run_migrations().await?;

    // Seed the stored query from config on first run only; later edits
    // to the stored slot win over the config file.
    if !config.search_query.is_empty() && database.stored_query().await?.text.is_empty() {
        tracing::info!("Seeding stored query: {}", config.search_query);
        database.set_stored_query(&config.search_query).await?;
    }

    let fetcher = FlickrApiClient::new(api_key)?;
    let notifier = DesktopNotifier::new();

    let service = PollService::new(fetcher, notifier, database, config.polling_interval_minutes)
        .with_notifications_enabled(config.notifications_enabled);

    service.start().await.map_err(|e| {
        e.log_error();
        e
    })
}

fn load_config(path: &Path) -> Result<AppConfig, CoreError> {
    if path.exists() {
        tracing::info!("Loading configuration from {}", path.display());
        Ok(AppConfig::load(path)?)
    } else {
        tracing::info!(
            "No configuration file at {}, using environment and defaults",
            path.display()
        );
        Ok(AppConfig::from_env())
    }
}
