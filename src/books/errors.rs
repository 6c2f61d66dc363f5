//! # Book Store Errors

use thiserror::Error;

/// Result type for book store operations
pub type BookResult<T> = Result<T, BookError>;

/// Book store errors
///
/// Unknown IDs are not represented here; they are normal outcomes of
/// `get`, `replace` and `delete`.
#[derive(Debug, Clone, Error)]
pub enum BookError {
    /// A writer panicked while holding the store lock
    #[error("Book store lock poisoned")]
    LockPoisoned,

    /// The id generator kept returning empty or live ids
    #[error("No unused book id after {0} attempts")]
    IdsExhausted(usize),
}

impl BookError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            BookError::LockPoisoned => 500,
            BookError::IdsExhausted(_) => 500,
        }
    }

    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            BookError::LockPoisoned => "BOOKS_LOCK_POISONED",
            BookError::IdsExhausted(_) => "BOOKS_IDS_EXHAUSTED",
        }
    }
}
