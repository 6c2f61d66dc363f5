//! # HTTP Server Module
//!
//! Axum server exposing the book catalogue.
//!
//! # Endpoints
//!
//! - `GET /books`, `POST /books`
//! - `GET|PUT|DELETE /books/:id`
//! - `/health` - Health check
//! - `/observability/*` - Health and metrics

pub mod book_routes;
pub mod config;
pub mod observability_routes;
pub mod server;

pub use book_routes::AppState;
pub use config::HttpServerConfig;
pub use server::HttpServer;
