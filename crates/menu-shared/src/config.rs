//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EVENT_CAPACITY, DEFAULT_LOCALE};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
    pub events: EventSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub default_locale: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Which adapter backs the menu item repository.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub backend: StorageBackend,
    #[serde(default)]
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
    /// Daily-rolling log files go here when set; stdout otherwise.
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EventSettings {
    pub capacity: usize,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.events.capacity == 0 {
            return Err(ConfigError::Message(
                "events.capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder preloaded with every default; sources added on top override them.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "menu-server")?
            .set_default("app.default_locale", DEFAULT_LOCALE)?
            .set_default("database.backend", "postgres")?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 3)?
            .set_default("database.run_migrations", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", true)?
            .set_default("events.capacity", DEFAULT_EVENT_CAPACITY as i64)
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults_deserialize() {
        let config: AppConfig = AppConfig::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.port, 8080);
        assert_eq!(config.app.default_locale, "en");
        assert_eq!(config.database.backend, StorageBackend::Postgres);
        assert!(config.app.allowed_origins.is_empty());
        assert!(config.logging.directory.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let toml = r#"
            [app]
            env = "production"
            default_locale = "id"

            [database]
            backend = "memory"
        "#;

        let config: AppConfig = AppConfig::defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.default_locale, "id");
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.database.max_connections, 10);
        assert!(config.is_production());
    }

    #[test]
    fn test_zero_event_capacity_is_rejected() {
        let config: AppConfig = AppConfig::defaults()
            .unwrap()
            .add_source(File::from_str("[events]\ncapacity = 0", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("events.capacity"));
    }
}
