//! # REST Handlers
//!
//! axum handlers for the HTML pages and the small JSON API.

use crate::api::rest::views;
use crate::application::error::ApplicationError;
use crate::application::services::{QuoteCatalog, QuoteSearchAggregator, SearchOutcome};
use crate::domain::value_objects::QuoteId;
use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Local quote collection.
    pub catalog: QuoteCatalog,
    /// External search.
    pub search: QuoteSearchAggregator,
}

/// Error returned by page handlers, rendered as an HTML error page.
#[derive(Debug)]
pub struct ApiError(ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self.0 {
            e if e.is_not_found() => (StatusCode::NOT_FOUND, "Not found", e.to_string()),
            e if e.is_validation() => (StatusCode::BAD_REQUEST, "Invalid request", e.to_string()),
            e => {
                error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    "The request could not be completed. Please try again later.".to_string(),
                )
            }
        };
        (status, Html(views::error_page(title, &message))).into_response()
    }
}

/// Query parameters for the home page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    /// Optional local filter.
    pub q: Option<String>,
}

/// Query parameters for the external search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text query.
    pub query: Option<String>,
}

/// Add-quote form body.
#[derive(Debug, Deserialize)]
pub struct AddQuoteForm {
    /// Quote text.
    #[serde(default)]
    pub text: String,
    /// Author, optional.
    #[serde(default)]
    pub author: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// `GET /` - local quotes, optionally filtered with `?q=`.
///
/// # Errors
///
/// Returns an error page if storage fails.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IndexParams>,
) -> Result<Html<String>, ApiError> {
    let filter = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let quotes = match filter {
        Some(filter) => state.catalog.search_local(filter).await?,
        None => state.catalog.list_quotes().await?,
    };
    Ok(Html(views::index_page(&quotes, filter)))
}

/// `GET /random-quote` - one random local quote.
///
/// # Errors
///
/// Returns an error page if storage fails.
pub async fn random_quote(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let quote = state.catalog.random_quote().await?;
    Ok(Html(views::quote_page("Random quote", quote.as_ref())))
}

/// `GET /add-quote` - the add-quote form.
pub async fn add_quote_form() -> Html<String> {
    Html(views::add_quote_page(None, "", ""))
}

/// `POST /add-quote` - stores a quote and redirects home with 303.
///
/// Rejected input re-renders the form with status 400.
///
/// # Errors
///
/// Returns an error page if storage fails.
pub async fn add_quote(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddQuoteForm>,
) -> Result<Response, ApiError> {
    match state.catalog.add_quote(&form.text, &form.author).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(e) if e.is_validation() => {
            let page = views::add_quote_page(Some(&e.to_string()), &form.text, &form.author);
            Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// `GET /quotes/{id}` - one local quote.
///
/// # Errors
///
/// Returns a 400 page for a non-numeric identifier and a 404 page for an
/// unknown one.
pub async fn quote_detail(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, ApiError> {
    let Path(id) = id.map_err(|e| {
        ApplicationError::validation(format!("invalid quote id: {}", e.body_text()))
    })?;
    let quote = state.catalog.get_quote(QuoteId::new(id)).await?;
    Ok(Html(views::quote_page(&format!("Quote #{id}"), Some(&quote))))
}

/// `GET /search` - external search page. Always renders.
pub async fn search_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let outcome = state.search.search(params.query.as_deref()).await;
    Html(views::search_page(params.query.as_deref(), &outcome))
}

/// `GET /api/v1/search` - external search as JSON. Always 200.
pub async fn search_json(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchOutcome> {
    Json(state.search.search(params.query.as_deref()).await)
}

/// `GET /api/v1/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
