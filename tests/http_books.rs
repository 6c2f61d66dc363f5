//! HTTP Book Endpoint Tests
//!
//! Drives the full router (CORS + tracing layers included) with
//! `tower::ServiceExt::oneshot`, one request at a time.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use bookshelf::books::{BookStore, SequentialIds};
use bookshelf::http_server::{AppState, HttpServer, HttpServerConfig};
use bookshelf::observability::MetricsRegistry;
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn router_for(state: Arc<AppState>) -> Router {
    HttpServer::with_state(HttpServerConfig::default(), state).router()
}

fn setup() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::seeded());
    let router = router_for(Arc::clone(&state));
    (router, state)
}

fn setup_with_sequential_ids(start: u64) -> (Router, Arc<AppState>) {
    let store = BookStore::seeded().with_id_generator(SequentialIds::starting_at(start));
    let state = Arc::new(AppState::new(store, Arc::new(MetricsRegistry::new())));
    let router = router_for(Arc::clone(&state));
    (router, state)
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Option<String>, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, content_type, value)
}

fn ids(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect()
}

// =============================================================================
// GET
// =============================================================================

#[tokio::test]
async fn test_list_seeded_books() {
    let (router, _) = setup();
    let (status, content_type, body) = send(&router, Method::GET, "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        json!([
            {"id": "1", "title": "Война и мир", "author": {"firstName": "Толстой", "lastName": "Лев"}},
            {"id": "2", "title": "Отцы и дети", "author": {"firstName": "Тургенев", "lastName": "Иван"}}
        ])
    );
}

#[tokio::test]
async fn test_get_existing_book() {
    let (router, _) = setup();
    let (status, _, body) = send(&router, Method::GET, "/books/2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "2");
    assert_eq!(body["author"]["lastName"], "Иван");
}

#[tokio::test]
async fn test_get_unknown_book_is_zero_valued() {
    let (router, state) = setup();
    let (status, _, body) = send(&router, Method::GET, "/books/42", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "", "title": "", "author": null}));
    assert_eq!(state.metrics.snapshot().lookups_missed, 1);
}

// =============================================================================
// POST
// =============================================================================

#[tokio::test]
async fn test_create_assigns_id() {
    let (router, state) = setup();
    let (status, _, body) =
        send(&router, Method::POST, "/books", Some(r#"{"title":"Dune"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap();
    assert!(!id.is_empty());
    assert_ne!(id, "1");
    assert_ne!(id, "2");
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["author"], Value::Null);

    let (_, _, list) = send(&router, Method::GET, "/books", None).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
    assert_eq!(state.store.count().unwrap(), 3);
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let (router, _) = setup_with_sequential_ids(50);
    let (_, _, body) = send(
        &router,
        Method::POST,
        "/books",
        Some(r#"{"id":"1","title":"Dune","author":{"firstName":"Frank","lastName":"Herbert"}}"#),
    )
    .await;

    assert_eq!(body["id"], "50");
    assert_eq!(body["author"]["firstName"], "Frank");

    let (_, _, original) = send(&router, Method::GET, "/books/1", None).await;
    assert_eq!(original["title"], "Война и мир");
}

#[tokio::test]
async fn test_create_with_malformed_body_stores_empty_book() {
    let (router, state) = setup_with_sequential_ids(7);
    let (status, _, body) = send(&router, Method::POST, "/books", Some("{title: oops")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "7", "title": "", "author": null}));
    assert_eq!(state.metrics.snapshot().malformed_bodies, 1);
}

#[tokio::test]
async fn test_create_keeps_fields_that_decode() {
    let (router, state) = setup_with_sequential_ids(20);
    let body = r#"{"Title":"Dune","author":"Herbert"}
{"title":"ignored"}"#;
    let (status, _, created) = send(&router, Method::POST, "/books", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created, json!({"id": "20", "title": "Dune", "author": null}));
    assert_eq!(state.metrics.snapshot().malformed_bodies, 1);
}

// =============================================================================
// PUT
// =============================================================================

#[tokio::test]
async fn test_replace_existing_moves_to_tail() {
    let (router, _) = setup();
    let (status, _, body) = send(
        &router,
        Method::PUT,
        "/books/1",
        Some(r#"{"id":"x","title":"Анна Каренина"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "1", "title": "Анна Каренина", "author": null}));

    let (_, _, list) = send(&router, Method::GET, "/books", None).await;
    assert_eq!(ids(&list), vec!["2", "1"]);

    let (_, _, fetched) = send(&router, Method::GET, "/books/1", None).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_replace_unknown_returns_full_list() {
    let (router, state) = setup();
    let (_, _, before) = send(&router, Method::GET, "/books", None).await;

    let (status, _, body) =
        send(&router, Method::PUT, "/books/99", Some(r#"{"title":"Dune"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, before);

    let (_, _, after) = send(&router, Method::GET, "/books", None).await;
    assert_eq!(after, before);
    assert_eq!(state.metrics.snapshot().replace_misses, 1);
}

// =============================================================================
// DELETE
// =============================================================================

#[tokio::test]
async fn test_delete_existing() {
    let (router, _) = setup();
    let (status, _, body) = send(&router, Method::DELETE, "/books/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["2"]);

    let (_, _, fetched) = send(&router, Method::GET, "/books/1", None).await;
    assert_eq!(fetched["id"], "");
}

#[tokio::test]
async fn test_delete_unknown_returns_list() {
    let (router, state) = setup();
    let (status, _, body) = send(&router, Method::DELETE, "/books/99", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["1", "2"]);
    assert_eq!(state.metrics.snapshot().delete_misses, 1);
}

// =============================================================================
// Routing & Observability
// =============================================================================

#[tokio::test]
async fn test_unsupported_method_is_rejected() {
    let (router, _) = setup();
    let (status, _, _) = send(&router, Method::PATCH, "/books/1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health() {
    let (router, _) = setup();
    let (status, _, body) = send(&router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_metrics_reflect_requests() {
    let (router, _) = setup();
    send(&router, Method::GET, "/books", None).await;
    send(&router, Method::POST, "/books", Some(r#"{"title":"Dune"}"#)).await;
    send(&router, Method::GET, "/books/1", None).await;

    let (status, _, body) = send(&router, Method::GET, "/observability/metrics", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books_listed"], 1);
    assert_eq!(body["books_created"], 1);
    assert_eq!(body["books_fetched"], 1);
}
