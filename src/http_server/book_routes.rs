//! Book HTTP Routes
//!
//! CRUD endpoints over the shared [`BookStore`]. Every success path answers
//! 200 with a JSON body; unknown ids are answered with data, not errors.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::books::{Book, BookError, BookStore, ReplaceOutcome};
use crate::observability::MetricsRegistry;

// ==================
// Shared State
// ==================

/// State shared across book handlers
pub struct AppState {
    pub store: BookStore,
    pub metrics: Arc<MetricsRegistry>,
}

impl AppState {
    pub fn new(store: BookStore, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    /// Seeded store with fresh metrics
    pub fn seeded() -> Self {
        Self::new(BookStore::seeded(), Arc::new(MetricsRegistry::new()))
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn store_error(e: BookError) -> ApiError {
    tracing::error!(code = e.code(), error = %e, "book store operation failed");
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            code: status.as_u16(),
        }),
    )
}

// ==================
// Book Routes
// ==================

/// Create book routes
pub fn book_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/books", get(list_books_handler).post(create_book_handler))
        .route(
            "/books/:id",
            get(get_book_handler)
                .put(replace_book_handler)
                .delete(delete_book_handler),
        )
        .with_state(state)
}

/// Decode a request body leniently.
///
/// Only the first JSON value in the body is read; anything after it is
/// ignored. Fields are filled one by one (see [`Book::from_json_lenient`]),
/// so a bad field does not discard the good ones. An empty or unparseable
/// body yields the zero-valued book. Clients never see an error; problems
/// are only logged and counted.
fn decode_book(body: &[u8], metrics: &MetricsRegistry) -> Book {
    let first = serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next();

    let value = match first {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            tracing::debug!(error = %e, "ignoring undecodable book body");
            metrics.increment_malformed_bodies();
            return Book::default();
        }
        None => {
            tracing::debug!("empty book body");
            metrics.increment_malformed_bodies();
            return Book::default();
        }
    };

    let (book, clean) = Book::from_json_lenient(&value);
    if !clean {
        tracing::debug!("book body had fields of the wrong type, skipped them");
        metrics.increment_malformed_bodies();
    }
    book
}

// ==================
// Handlers
// ==================

async fn list_books_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.store.list().map_err(store_error)?;
    state.metrics.increment_listed();
    Ok(Json(books))
}

async fn get_book_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let found = state.store.get(&id).map_err(store_error)?;
    state.metrics.record_lookup(found.is_some());
    Ok(Json(found.unwrap_or_default()))
}

async fn create_book_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Book>, ApiError> {
    let candidate = decode_book(&body, &state.metrics);
    let book = state.store.create(candidate).map_err(store_error)?;
    state.metrics.increment_created();
    tracing::info!(id = %book.id, "book created");
    Ok(Json(book))
}

async fn replace_book_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ReplaceOutcome>, ApiError> {
    let candidate = decode_book(&body, &state.metrics);
    let outcome = state.store.replace(&id, candidate).map_err(store_error)?;
    state.metrics.record_replace(outcome.is_replaced());
    if outcome.is_replaced() {
        tracing::info!(id = %id, "book replaced");
    } else {
        tracing::debug!(id = %id, "replace for unknown book, returning list");
    }
    Ok(Json(outcome))
}

async fn delete_book_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let outcome = state.store.delete(&id).map_err(store_error)?;
    state.metrics.record_delete(outcome.removed.is_some());
    if outcome.removed.is_some() {
        tracing::info!(id = %id, "book deleted");
    }
    Ok(Json(outcome.remaining))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_book_swallows_garbage() {
        let metrics = MetricsRegistry::new();

        assert_eq!(decode_book(b"{not json", &metrics), Book::default());
        assert_eq!(decode_book(b"", &metrics), Book::default());
        assert_eq!(metrics.snapshot().malformed_bodies, 2);

        let book = decode_book(br#"{"id":"7","title":"Dune"}"#, &metrics);
        assert_eq!(book.title, "Dune");
        assert_eq!(metrics.snapshot().malformed_bodies, 2);
    }

    #[test]
    fn test_decode_book_keeps_good_fields_on_type_mismatch() {
        let metrics = MetricsRegistry::new();
        let book = decode_book(br#"{"title":"Dune","author":"Herbert"}"#, &metrics);

        assert_eq!(book, Book::new("", "Dune", None));
        assert_eq!(metrics.snapshot().malformed_bodies, 1);
    }

    #[test]
    fn test_decode_book_matches_keys_case_insensitively() {
        let metrics = MetricsRegistry::new();
        let book = decode_book(br#"{"Title":"Dune"}"#, &metrics);

        assert_eq!(book.title, "Dune");
        assert_eq!(metrics.snapshot().malformed_bodies, 0);
    }

    #[test]
    fn test_decode_book_reads_only_first_value() {
        let metrics = MetricsRegistry::new();
        let book = decode_book(b"{\"title\":\"Dune\"}\n{\"x\":1}", &metrics);
        assert_eq!(book.title, "Dune");

        let book = decode_book(b"{\"title\":\"Dune\"} trailing garbage", &metrics);
        assert_eq!(book.title, "Dune");
        assert_eq!(metrics.snapshot().malformed_bodies, 0);
    }

    #[test]
    fn test_store_error_maps_to_500() {
        let (status, Json(body)) = store_error(BookError::LockPoisoned);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, 500);
    }

    #[test]
    fn test_seeded_state() {
        let state = AppState::seeded();
        assert_eq!(state.store.count().unwrap(), 2);
        assert_eq!(state.metrics.snapshot().books_listed, 0);
    }
}
