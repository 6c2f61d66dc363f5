//! Book and Author records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A catalogue entry.
///
/// `Book::default()` is the zero-valued record returned for unknown IDs:
/// `{"id":"","title":"","author":null}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: Option<Author>,
}

/// Author of a book. Has no identity of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Book {
    pub fn new(id: impl Into<String>, title: impl Into<String>, author: Option<Author>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author,
        }
    }

    /// Copy of this book carrying `id` instead of its own
    pub fn with_id(self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self
        }
    }

    /// Build a book from loosely typed JSON.
    ///
    /// Keys match case-insensitively, unknown keys are ignored and a known
    /// field whose value has the wrong type stays zero-valued while the rest
    /// still apply. A non-object value yields the zero-valued book. The flag
    /// is false when anything had to be skipped.
    pub fn from_json_lenient(value: &Value) -> (Self, bool) {
        let mut book = Book::default();
        let Some(fields) = value.as_object() else {
            return (book, value.is_null());
        };

        let mut clean = true;
        for (key, value) in fields {
            if key.eq_ignore_ascii_case("id") {
                clean &= assign_string(&mut book.id, value);
            } else if key.eq_ignore_ascii_case("title") {
                clean &= assign_string(&mut book.title, value);
            } else if key.eq_ignore_ascii_case("author") {
                match value {
                    Value::Null => book.author = None,
                    Value::Object(_) => {
                        let (author, ok) = Author::from_json_lenient(value);
                        book.author = Some(author);
                        clean &= ok;
                    }
                    _ => clean = false,
                }
            }
        }
        (book, clean)
    }
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Lenient counterpart of deserialisation, see [`Book::from_json_lenient`]
    pub fn from_json_lenient(value: &Value) -> (Self, bool) {
        let mut author = Author::default();
        let Some(fields) = value.as_object() else {
            return (author, value.is_null());
        };

        let mut clean = true;
        for (key, value) in fields {
            if key.eq_ignore_ascii_case("firstName") {
                clean &= assign_string(&mut author.first_name, value);
            } else if key.eq_ignore_ascii_case("lastName") {
                clean &= assign_string(&mut author.last_name, value);
            }
        }
        (author, clean)
    }
}

/// Store a JSON string into `slot`; null leaves it untouched, other types are rejected
fn assign_string(slot: &mut String, value: &Value) -> bool {
    match value {
        Value::String(s) => {
            *slot = s.clone();
            true
        }
        Value::Null => true,
        _ => false,
    }
}
