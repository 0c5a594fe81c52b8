//! # Configuration
//!
//! Layered application settings.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. Optional `quote-board.toml` (or the file named by `QUOTE_BOARD_CONFIG`)
//! 3. Environment variables such as `QUOTE_BOARD__SERVER__PORT=9000`
//! 4. `DATABASE_URL`, if set
//!
//! A `.env` file is loaded into the environment before any of this.
//!
//! # Examples
//!
//! ```ignore
//! use quote_board::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! println!("listening on {}", config.server.bind_address());
//! ```

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Default configuration file name, without extension.
pub const DEFAULT_CONFIG_FILE: &str = "quote-board";

/// Environment variable overriding the configuration file name.
pub const CONFIG_FILE_ENV: &str = "QUOTE_BOARD_CONFIG";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "QUOTE_BOARD";

/// Default remote search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://api.quotable.io/search/quotes";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// A value was read but is not acceptable.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// The `.env` file exists but could not be read or parsed.
    #[error("failed to load .env: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// External search settings.
    pub search: SearchConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl ServerConfig {
    /// Returns `host:port`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx SQLite URL.
    pub url: String,
    /// Pool size.
    pub max_connections: u32,
}

/// External search settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Search endpoint.
    pub url: String,
    /// Per-attempt timeout in seconds.
    pub timeout_secs: u64,
    /// PEM bundle used after a certificate failure.
    #[serde(default)]
    pub ca_bundle: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, overridden by `RUST_LOG`.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl AppConfig {
    /// Loads configuration from `.env`, the optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        ignore_missing_dotenv(dotenvy::dotenv())?;

        let file = env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let config = Self::builder()?
            .add_source(File::with_name(&file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize::<Self>()?;

        config.validate()?;
        Ok(config)
    }

    /// Builds configuration from defaults only.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the defaults cannot be deserialized.
    pub fn defaults() -> Result<Self, ConfigError> {
        let config = Self::builder()?.build()?.try_deserialize::<Self>()?;
        config.validate()?;
        Ok(config)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("database.url", "sqlite://./sql_app.db")?
            .set_default("database.max_connections", 5)?
            .set_default("search.url", DEFAULT_SEARCH_URL)?
            .set_default("search.timeout_secs", 10)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?)
    }

    /// Checks values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "search.timeout_secs must be positive".to_string(),
            ));
        }
        let url = reqwest::Url::parse(&self.search.url)
            .map_err(|e| ConfigError::Invalid(format!("search.url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "search.url must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be positive".to_string(),
            ));
        }
        if !self.database.url.starts_with("sqlite:") {
            return Err(ConfigError::Invalid(
                "database.url must be a sqlite: URL".to_string(),
            ));
        }
        Ok(())
    }
}

/// Accepts a missing `.env` and rejects any other failure.
fn ignore_missing_dotenv<T>(loaded: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::defaults().unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.search.timeout_secs, 10);
        assert_eq!(config.search.url, DEFAULT_SEARCH_URL);
        assert!(config.search.ca_bundle.is_none());
        assert!(!config.logging.json);
    }

    #[test]
    fn missing_dotenv_is_fine() {
        let missing = dotenvy::Error::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(ignore_missing_dotenv::<()>(Err(missing)).is_ok());
    }

    #[test]
    fn malformed_dotenv_is_an_error() {
        let malformed = dotenvy::Error::LineParse("NOT VALID".to_string(), 4);
        let err = ignore_missing_dotenv::<()>(Err(malformed)).unwrap_err();
        assert!(matches!(err, ConfigError::Dotenv(_)));

        let unreadable = dotenvy::Error::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(ignore_missing_dotenv::<()>(Err(unreadable)).is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = AppConfig::defaults().unwrap();
        config.search.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn non_http_search_url_is_rejected() {
        let mut config = AppConfig::defaults().unwrap();
        config.search.url = "ftp://example.com/quotes".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn non_sqlite_database_is_rejected() {
        let mut config = AppConfig::defaults().unwrap();
        config.database.url = "postgres://localhost/quotes".to_string();
        assert!(config.validate().is_err());
    }
}
