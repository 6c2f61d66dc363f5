//! # Books
//!
//! The in-memory book catalogue and the five operations exposed over HTTP.
//!
//! # Ordering
//!
//! The store is an ordered sequence. New records are appended, a replaced
//! record moves to the tail, and deletion keeps the relative order of the
//! remaining records. `list()` reports exactly that order.
//!
//! # Not found
//!
//! A missing ID is never an error at this layer: `get` returns `None`,
//! `replace` returns the current list, `delete` is a no-op. The HTTP layer
//! turns `None` into a zero-valued [`Book`].

mod errors;
mod ids;
mod model;
mod store;

pub use errors::{BookError, BookResult};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use model::{Author, Book};
pub use store::{BookStore, DeleteOutcome, ReplaceOutcome};
