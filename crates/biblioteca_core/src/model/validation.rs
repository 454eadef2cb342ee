//! Required-field checks shared by the repositories.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input rejected before any SQL runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty or whitespace only.
    EmptyField(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "`{field}` cannot be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Fails with `EmptyField(field)` when `value` has no visible characters.
///
/// The value itself is not modified; trimming is the caller's job.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}
