//! quote-board server entry point.

use anyhow::{Context, Result};
use quote_board::config::AppConfig;
use quote_board::{server, telemetry};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    telemetry::init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    info!("quote-board v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = server::run(config).await {
        error!("server failed: {e:#}");
        return Err(e);
    }
    Ok(())
}
