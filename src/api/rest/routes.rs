//! # REST Routes
//!
//! Router construction. The JSON API under `/api/v1` allows cross-origin
//! `GET` requests; the HTML pages do not.

use crate::api::rest::handlers::{self, AppState};
use axum::Router;
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::routing::get;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/random-quote", get(handlers::random_quote))
        .route(
            "/add-quote",
            get(handlers::add_quote_form).post(handlers::add_quote),
        )
        .route("/quotes/{id}", get(handlers::quote_detail))
        .route("/search", get(handlers::search_page))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/search", get(handlers::search_json))
        .route("/health", get(handlers::health))
        .layer(cors)
}
