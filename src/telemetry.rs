//! # Telemetry
//!
//! tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the configured level.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Error returned when the subscriber cannot be installed.
pub type TelemetryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the configured filter is invalid or a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}
