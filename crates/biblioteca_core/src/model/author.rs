//! Author record.

use super::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned author key (`author.id_author`).
pub type AuthorId = i64;

/// One row of the `author` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    /// Unique across all authors, compared case-sensitively by the store.
    pub name: String,
}

/// Rejects blank author names.
pub fn validate_author_name(name: &str) -> Result<(), ValidationError> {
    require_text("name", name)
}
