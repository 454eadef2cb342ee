//! User-facing failure messages for CLI actions.
//!
//! # Responsibility
//! - Carry every failure a command can hit in one error type.
//! - Name the likely cause (duplicate name, author has books, missing
//!   selection, ...) instead of a bare "operation failed".

use biblioteca_core::{DbError, FormError, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CliError {
    /// Blocked by form rules before reaching the store.
    Form(FormError),
    /// A store operation failed; `action` describes what was attempted.
    Repo {
        action: &'static str,
        source: RepoError,
    },
    /// The store could not be opened or initialized for this session.
    Store(DbError),
    /// `--author-name` did not match any author.
    UnknownAuthorName(String),
    /// A `show` lookup found nothing.
    Missing { entity: &'static str, id: i64 },
    /// A delete was requested without `--yes`.
    ConfirmationRequired(String),
    Logging(String),
    Output(serde_json::Error),
}

impl CliError {
    pub fn repo(action: &'static str, source: RepoError) -> Self {
        Self::Repo { action, source }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form(FormError::NoSelection) => {
                f.write_str("no record selected; pass --id to choose one")
            }
            Self::Form(err) => write!(f, "{err}"),
            Self::Repo { action, source } => {
                write!(f, "could not {action}: {}", likely_cause(source))
            }
            Self::Store(err) => write!(f, "store unavailable for this session: {err}"),
            Self::UnknownAuthorName(name) => write!(f, "no author named `{name}`"),
            Self::Missing { entity, id } => write!(f, "{entity} {id} not found"),
            Self::ConfirmationRequired(subject) => {
                write!(f, "refusing to delete {subject} without --yes")
            }
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Output(err) => write!(f, "failed to render output: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::Repo { source, .. } => Some(source),
            Self::Store(err) => Some(err),
            Self::Output(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormError> for CliError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

/// Short explanation of why a repository call failed.
pub fn likely_cause(err: &RepoError) -> String {
    match err {
        RepoError::DuplicateAuthorName(name) => {
            format!("an author named `{name}` already exists")
        }
        RepoError::AuthorHasBooks(_) => {
            "the author still has books; delete or reassign them first".to_string()
        }
        RepoError::AuthorNotFound(id) => format!("author {id} does not exist"),
        RepoError::NotFound { entity, id } => format!("{entity} {id} does not exist"),
        RepoError::Validation(err) => err.to_string(),
        RepoError::Db(DbError::Connection { .. }) => "the store could not be opened".to_string(),
        RepoError::Db(_) => "unexpected store error (see logs)".to_string(),
    }
}
