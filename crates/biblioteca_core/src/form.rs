//! Selection-driven form state for record editing screens.
//!
//! # Responsibility
//! - Track whether a row is selected and which form actions that allows.
//! - Normalize required text input at the caller boundary.
//!
//! # Invariants
//! - `Add` is only available while nothing is selected.
//! - `Update`/`Delete` are only available while a row is selected.
//! - `Clear` is always available and returns the form to `Idle`.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Buttons a record form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Add,
    Update,
    Delete,
    Clear,
}

impl Display for FormAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Update => f.write_str("update"),
            Self::Delete => f.write_str("delete"),
            Self::Clear => f.write_str("clear"),
        }
    }
}

/// Reason a form action was blocked before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Update/Delete attempted with no row selected.
    NoSelection,
    /// Action not offered in the current state (e.g. Add while a row is selected).
    Unavailable(FormAction),
    /// A required input was blank after trimming.
    RequiredField(&'static str),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSelection => f.write_str("no record selected"),
            Self::Unavailable(action) => {
                write!(f, "`{action}` is not available while a record is selected")
            }
            Self::RequiredField(label) => write!(f, "{label} cannot be empty"),
        }
    }
}

impl Error for FormError {}

/// Two-state selection machine: nothing selected, or one row selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState<Id> {
    Idle,
    Selected(Id),
}

impl<Id> Default for FormState<Id> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<Id: Copy> FormState<Id> {
    pub fn from_selection(selection: Option<Id>) -> Self {
        match selection {
            Some(id) => Self::Selected(id),
            None => Self::Idle,
        }
    }

    pub fn select(&mut self, id: Id) {
        *self = Self::Selected(id);
    }

    pub fn clear(&mut self) {
        *self = Self::Idle;
    }

    pub fn selected(&self) -> Option<Id> {
        match self {
            Self::Idle => None,
            Self::Selected(id) => Some(*id),
        }
    }

    pub fn is_enabled(&self, action: FormAction) -> bool {
        match action {
            FormAction::Add => matches!(self, Self::Idle),
            FormAction::Update | FormAction::Delete => matches!(self, Self::Selected(_)),
            FormAction::Clear => true,
        }
    }

    /// Checks `action` against the current state.
    ///
    /// Returns the selected id for `Update`/`Delete`, `None` otherwise.
    /// `Clear` also resets the state to `Idle`.
    pub fn begin(&mut self, action: FormAction) -> Result<Option<Id>, FormError> {
        if action == FormAction::Clear {
            self.clear();
            return Ok(None);
        }
        if self.is_enabled(action) {
            return Ok(self.selected());
        }
        match action {
            FormAction::Update | FormAction::Delete => Err(FormError::NoSelection),
            other => Err(FormError::Unavailable(other)),
        }
    }
}

/// Trims `value` and rejects it when nothing remains.
pub fn required_field(label: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::RequiredField(label));
    }
    Ok(trimmed.to_string())
}
