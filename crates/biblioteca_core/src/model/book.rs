//! Book records.

use super::author::AuthorId;
use super::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned book key (`book.id_book`).
pub type BookId = i64;

/// One row of the `book` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author_id: AuthorId,
}

/// Display read model: a book joined with its author's name.
///
/// Produced by an inner join, so a book whose author row is missing never
/// appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookWithAuthor {
    pub id: BookId,
    pub title: String,
    pub author_name: String,
    pub author_id: AuthorId,
}

impl BookWithAuthor {
    /// Drops the joined author name.
    pub fn into_book(self) -> Book {
        Book {
            id: self.id,
            title: self.title,
            author_id: self.author_id,
        }
    }
}

/// Rejects blank book titles.
pub fn validate_book_title(title: &str) -> Result<(), ValidationError> {
    require_text("title", title)
}
