use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

const API_KEY_ENV_VAR: &str = "FLICKR_API_KEY";

fn default_polling_interval() -> u64 {
    15
}

fn default_database_url() -> String {
    "sqlite://photowatch.db".to_string()
}

fn default_notifications_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub flickr_api_key: Option<String>,
    #[serde(default = "default_polling_interval")]
    pub polling_interval_minutes: u64,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default)]
    pub search_query: String,
    #[serde(default = "default_notifications_enabled")]
    pub notifications_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            flickr_api_key: None,
            polling_interval_minutes: default_polling_interval(),
            database_url: default_database_url(),
            search_query: String::new(),
            notifications_enabled: default_notifications_enabled(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, then apply environment
    /// overrides (FLICKR_API_KEY).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: AppConfig = toml::from_str(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Build configuration from environment and defaults when no config
    /// file is present.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
            if !key.trim().is_empty() {
                self.flickr_api_key = Some(key);
            }
        }
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        match self.flickr_api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingEnvironmentVariable {
                var_name: API_KEY_ENV_VAR.to_string(),
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_key()?;
        if self.polling_interval_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "polling_interval_minutes".to_string(),
                value: "0".to_string(),
            });
        }
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database_url".to_string(),
            });
        }
        Ok(())
    }
}
