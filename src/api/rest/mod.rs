//! # REST API
//!
//! HTML front-end and a small JSON API using axum.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /` - Local quotes, `?q=` filters by text or author
//! - `GET /random-quote` - A random local quote
//! - `GET /add-quote` - Add-quote form
//! - `POST /add-quote` - Store a quote, 303 redirect to `/`
//! - `GET /quotes/{id}` - One local quote
//! - `GET /search` - External search, `?query=`
//!
//! ## JSON
//! - `GET /api/v1/search` - External search outcome
//! - `GET /api/v1/health` - Health check
//!
//! # Usage
//!
//! ```ignore
//! use quote_board::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let router = create_router(Arc::new(AppState { catalog, search }));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;
pub mod views;

pub use handlers::{AddQuoteForm, ApiError, AppState, HealthResponse, IndexParams, SearchParams};
pub use routes::create_router;
