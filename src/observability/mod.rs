//! Observability for the book service
//!
//! - Structured logging through `tracing` (text or JSON lines)
//! - Operation counters exposed at `/observability/metrics`
//!
//! # Usage
//!
//! ```ignore
//! use bookshelf::observability::{init_logging, LoggingConfig, MetricsRegistry};
//!
//! init_logging(&LoggingConfig::default());
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_created();
//! ```

mod logging;
mod metrics;

pub use logging::{init_logging, LoggingConfig};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
