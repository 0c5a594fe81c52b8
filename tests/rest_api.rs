//! Router-level tests: pages, the add-quote form and the external search.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use quote_board::api::rest::{AppState, HealthResponse, create_router};
use quote_board::application::services::{QuoteCatalog, QuoteSearchAggregator};
use quote_board::infrastructure::persistence::in_memory::InMemoryQuoteRepository;
use quote_board::infrastructure::search::{NoRootBundle, ReqwestSearchTransport};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestApp {
    router: Router,
    catalog: QuoteCatalog,
    _search_server: MockServer,
}

async fn app() -> TestApp {
    let search_server = MockServer::start().await;
    let transport =
        ReqwestSearchTransport::new(format!("{}/search/quotes", search_server.uri()), 5).unwrap();
    let catalog = QuoteCatalog::new(Arc::new(InMemoryQuoteRepository::new()));
    let state = Arc::new(AppState {
        catalog: catalog.clone(),
        search: QuoteSearchAggregator::new(Arc::new(transport), Arc::new(NoRootBundle)),
    });

    TestApp {
        router: create_router(state),
        catalog,
        _search_server: search_server,
    }
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_form(router: &Router, uri: &str, form: &str) -> axum::response::Response {
    router
        .clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn read_main() {
    let app = app().await;
    let (status, body) = get(&app.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No quotes yet"));
}

#[tokio::test]
async fn random_quote_page() {
    let app = app().await;
    let (status, body) = get(&app.router, "/random-quote").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No quotes yet"));

    app.catalog.add_quote("Only one", "Solo").await.unwrap();
    let (status, body) = get(&app.router, "/random-quote").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Only one"));
}

#[tokio::test]
async fn add_quote_form() {
    let app = app().await;
    let (status, body) = get(&app.router, "/add-quote").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"action="/add-quote""#));
}

#[tokio::test]
async fn add_quote_redirects_home() {
    let app = app().await;
    let response = post_form(&app.router, "/add-quote", "text=Test+quote&author=Test+author").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let (_, body) = get(&app.router, "/").await;
    assert!(body.contains("Test quote"));
    assert!(body.contains("Test author"));
}

#[tokio::test]
async fn add_quote_without_text_is_rejected() {
    let app = app().await;
    let response = post_form(&app.router, "/add-quote", "text=+&author=Someone").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("must not be empty"));
    assert!(body.contains("Someone"));
}

#[tokio::test]
async fn quote_detail_and_missing_quote() {
    let app = app().await;
    let stored = app.catalog.add_quote("Look closer", "Ann").await.unwrap();
    let id = stored.id().unwrap();

    let (status, body) = get(&app.router, &format!("/quotes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Look closer"));

    let (status, _) = get(&app.router, "/quotes/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn index_filters_locally() {
    let app = app().await;
    app.catalog.add_quote("Know thyself", "Socrates").await.unwrap();
    app.catalog.add_quote("Less is more", "Mies").await.unwrap();

    let (status, body) = get(&app.router, "/?q=socrates").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Know thyself"));
    assert!(!body.contains("Less is more"));
}

#[tokio::test]
async fn search_page_renders_remote_results() {
    let app = app().await;
    Mock::given(method("GET"))
        .and(path("/search/quotes"))
        .and(query_param("query", "courage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"content": "Courage is grace under pressure.", "author": "Ernest Hemingway"},
                {"content": "Fortune favors the bold."}
            ]
        })))
        .expect(1)
        .mount(&app._search_server)
        .await;

    let (status, body) = get(&app.router, "/search?query=courage").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Courage is grace under pressure."));
    assert!(body.contains("Ernest Hemingway"));
    assert!(body.contains("Unknown"));
    assert!(!body.contains(r#"class="notice"#));
}

#[tokio::test]
async fn search_page_without_query_makes_no_request() {
    let app = app().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app._search_server)
        .await;

    let (status, body) = get(&app.router, "/search").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"name="query""#));
}

#[tokio::test]
async fn search_json_reports_network_errors() {
    let app = app().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&app._search_server)
        .await;

    let (status, body) = get(&app.router, "/api/v1/search?query=anything").await;
    assert_eq!(status, StatusCode::OK);

    let outcome: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(outcome["quotes"], json!([]));
    assert!(
        outcome["diagnostic"]
            .as_str()
            .unwrap()
            .starts_with("Network error")
    );
    assert_eq!(outcome["severity"], "error");
}

#[tokio::test]
async fn health_check() {
    let app = app().await;
    let (status, body) = get(&app.router, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);

    let health: HealthResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn json_api_allows_cross_origin_reads() {
    let app = app().await;
    let response = app
        .router
        .clone()
        .oneshot(
            Request::get("/api/v1/health")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn non_numeric_quote_id_renders_error_page() {
    let app = app().await;
    let (status, body) = get(&app.router, "/quotes/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("invalid quote id"));
}
