//! Metrics registry for the book service
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operation counters shared by all request handlers
///
/// All counters use Relaxed atomics; exact cross-counter consistency is not
/// required.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// List requests served
    books_listed: AtomicU64,
    /// Get requests that found a record
    books_fetched: AtomicU64,
    /// Get requests for unknown ids
    lookups_missed: AtomicU64,
    /// Books created
    books_created: AtomicU64,
    /// Books replaced
    books_replaced: AtomicU64,
    /// Replace requests for unknown ids
    replace_misses: AtomicU64,
    /// Books deleted
    books_deleted: AtomicU64,
    /// Delete requests for unknown ids
    delete_misses: AtomicU64,
    /// Request bodies that failed to decode
    malformed_bodies: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_listed(&self) {
        self.books_listed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a get; `found` selects hit or miss
    pub fn record_lookup(&self, found: bool) {
        if found {
            self.books_fetched.fetch_add(1, Ordering::Relaxed);
        } else {
            self.lookups_missed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn increment_created(&self) {
        self.books_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a replace; `found` selects hit or miss
    pub fn record_replace(&self, found: bool) {
        if found {
            self.books_replaced.fetch_add(1, Ordering::Relaxed);
        } else {
            self.replace_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a delete; `removed` selects hit or miss
    pub fn record_delete(&self, removed: bool) {
        if removed {
            self.books_deleted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.delete_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn increment_malformed_bodies(&self) {
        self.malformed_bodies.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            books_listed: self.books_listed.load(Ordering::Relaxed),
            books_fetched: self.books_fetched.load(Ordering::Relaxed),
            lookups_missed: self.lookups_missed.load(Ordering::Relaxed),
            books_created: self.books_created.load(Ordering::Relaxed),
            books_replaced: self.books_replaced.load(Ordering::Relaxed),
            replace_misses: self.replace_misses.load(Ordering::Relaxed),
            books_deleted: self.books_deleted.load(Ordering::Relaxed),
            delete_misses: self.delete_misses.load(Ordering::Relaxed),
            malformed_bodies: self.malformed_bodies.load(Ordering::Relaxed),
        }
    }

    /// Current snapshot rendered as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or_default()
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub books_listed: u64,
    pub books_fetched: u64,
    pub lookups_missed: u64,
    pub books_created: u64,
    pub books_replaced: u64,
    pub replace_misses: u64,
    pub books_deleted: u64,
    pub delete_misses: u64,
    pub malformed_bodies: u64,
}
