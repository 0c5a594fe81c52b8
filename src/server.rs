//! # Server Bootstrap
//!
//! Wires configuration into repositories, services and the router, and runs
//! the HTTP server until a shutdown signal arrives.
//!
//! Startup order: connect the database, create the schema, build the search
//! aggregator, bind. The pool is closed after the server stops.

use crate::api::rest::{AppState, create_router};
use crate::application::services::{QuoteCatalog, QuoteSearchAggregator};
use crate::config::AppConfig;
use crate::infrastructure::persistence::sqlite::SqliteQuoteRepository;
use crate::infrastructure::search::{DefaultRootBundle, ReqwestSearchTransport};
use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Builds the search aggregator described by `config`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_search(config: &AppConfig) -> anyhow::Result<QuoteSearchAggregator> {
    let transport = ReqwestSearchTransport::new(&config.search.url, config.search.timeout_secs)
        .context("failed to build search transport")?;
    let roots = DefaultRootBundle::new(config.search.ca_bundle.clone());
    Ok(QuoteSearchAggregator::new(Arc::new(transport), Arc::new(roots)))
}

/// Runs the server until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the database, the listener or the server fails.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!(url = %config.database.url, "opening database");
    let repository = SqliteQuoteRepository::connect(
        &config.database.url,
        config.database.max_connections,
    )
    .await
    .context("failed to open database")?;
    repository
        .migrate()
        .await
        .context("failed to prepare database schema")?;

    let state = Arc::new(AppState {
        catalog: QuoteCatalog::new(Arc::new(repository.clone())),
        search: build_search(&config)?,
    });
    let router = create_router(state);

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(%address, search_url = %config.search.url, "server running");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped, closing database");
    repository.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down");
        } else {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
