//! In-memory ordered book store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use super::errors::{BookError, BookResult};
use super::ids::{IdGenerator, UuidGenerator};
use super::model::{Author, Book};

/// Draws allowed per create before giving up on the id generator
const MAX_ID_DRAWS: usize = 16;

/// Result of [`BookStore::replace`].
///
/// Serialises untagged: a single book when the record existed, otherwise the
/// full list as it stood when the replace was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReplaceOutcome {
    Replaced(Book),
    NotFound(Vec<Book>),
}

impl ReplaceOutcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, ReplaceOutcome::Replaced(_))
    }
}

/// Result of [`BookStore::delete`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// The removed record, if the id was known
    pub removed: Option<Book>,
    /// Store contents after the attempt
    pub remaining: Vec<Book>,
}

/// Ordered collection of books guarded by a single lock.
///
/// Reads share the lock, mutations take it exclusively. Each operation
/// acquires it once, so every operation is atomic to concurrent callers.
pub struct BookStore {
    books: RwLock<Vec<Book>>,
    ids: Box<dyn IdGenerator>,
}

impl BookStore {
    /// Empty store issuing UUID identifiers
    pub fn new() -> Self {
        Self::with_books(Vec::new())
    }

    /// Store pre-populated with `books`, in order
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
            ids: Box::new(UuidGenerator),
        }
    }

    /// Store holding the two catalogue records every fresh process starts with
    pub fn seeded() -> Self {
        Self::with_books(seed_books())
    }

    /// Replace the identifier source
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    fn read(&self) -> BookResult<RwLockReadGuard<'_, Vec<Book>>> {
        self.books.read().map_err(|_| BookError::LockPoisoned)
    }

    fn write(&self) -> BookResult<RwLockWriteGuard<'_, Vec<Book>>> {
        self.books.write().map_err(|_| BookError::LockPoisoned)
    }

    /// All books in store order
    pub fn list(&self) -> BookResult<Vec<Book>> {
        Ok(self.read()?.clone())
    }

    /// First book whose id equals `id`
    pub fn get(&self, id: &str) -> BookResult<Option<Book>> {
        Ok(self.read()?.iter().find(|b| b.id == id).cloned())
    }

    /// Append `candidate` under a freshly generated id.
    ///
    /// Any id on the candidate is discarded. Empty or live ids from the
    /// generator are redrawn, at most `MAX_ID_DRAWS` times in total.
    pub fn create(&self, candidate: Book) -> BookResult<Book> {
        let mut books = self.write()?;

        for _ in 0..MAX_ID_DRAWS {
            let id = self.ids.next_id();
            if id.is_empty() || books.iter().any(|b| b.id == id) {
                tracing::debug!(id = %id, "generated book id unusable, drawing another");
                continue;
            }

            let book = candidate.with_id(id);
            books.push(book.clone());
            return Ok(book);
        }

        Err(BookError::IdsExhausted(MAX_ID_DRAWS))
    }

    /// Remove the book with `id` and append `candidate` (carrying `id`) at the tail.
    ///
    /// Nothing changes when `id` is unknown.
    pub fn replace(&self, id: &str, candidate: Book) -> BookResult<ReplaceOutcome> {
        let mut books = self.write()?;

        let Some(index) = books.iter().position(|b| b.id == id) else {
            return Ok(ReplaceOutcome::NotFound(books.clone()));
        };

        books.remove(index);
        let book = candidate.with_id(id);
        books.push(book.clone());
        Ok(ReplaceOutcome::Replaced(book))
    }

    /// Remove the first book with `id`, keeping the order of the rest.
    ///
    /// The remaining list is reported whether or not anything was removed.
    pub fn delete(&self, id: &str) -> BookResult<DeleteOutcome> {
        let mut books = self.write()?;

        let position = books.iter().position(|b| b.id == id);
        let removed = position.map(|index| books.remove(index));
        Ok(DeleteOutcome {
            removed,
            remaining: books.clone(),
        })
    }

    /// Number of live books
    pub fn count(&self) -> BookResult<usize> {
        Ok(self.read()?.len())
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_books() -> Vec<Book> {
    vec![
        Book::new("1", "Война и мир", Some(Author::new("Толстой", "Лев"))),
        Book::new("2", "Отцы и дети", Some(Author::new("Тургенев", "Иван"))),
    ]
}
