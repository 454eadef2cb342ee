//! Repository error taxonomy and SQLite constraint classification.

use crate::db::DbError;
use crate::model::author::AuthorId;
use crate::model::validation::ValidationError;
use rusqlite::ffi;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Which table a not-found id was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Author,
    Book,
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Author => f.write_str("author"),
            Self::Book => f.write_str("book"),
        }
    }
}

/// Errors from author/book repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// Required field was blank; nothing was written.
    Validation(ValidationError),
    /// Another author already uses this name.
    DuplicateAuthorName(String),
    /// A book write referenced an author id that does not exist.
    AuthorNotFound(AuthorId),
    /// The author is still referenced by at least one book.
    AuthorHasBooks(AuthorId),
    /// Update/delete matched no row.
    NotFound { entity: Entity, id: i64 },
    /// Connection, schema or unclassified SQLite failure.
    Db(DbError),
}

/// Coarse failure category used by callers to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connection,
    Validation,
    Uniqueness,
    ReferentialIntegrity,
    NotFound,
    Store,
}

impl RepoError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::Validation,
            Self::DuplicateAuthorName(_) => FailureKind::Uniqueness,
            Self::AuthorNotFound(_) | Self::AuthorHasBooks(_) => FailureKind::ReferentialIntegrity,
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::Db(DbError::Connection { .. }) => FailureKind::Connection,
            Self::Db(_) => FailureKind::Store,
        }
    }

    /// Whether this failure is one of the expected, recoverable outcomes.
    pub fn is_expected(&self) -> bool {
        !matches!(self.kind(), FailureKind::Connection | FailureKind::Store)
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateAuthorName(name) => write!(f, "author name already exists: `{name}`"),
            Self::AuthorNotFound(id) => write!(f, "referenced author does not exist: {id}"),
            Self::AuthorHasBooks(id) => write!(f, "author {id} still has books"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateAuthorName(_)
            | Self::AuthorNotFound(_)
            | Self::AuthorHasBooks(_)
            | Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Constraint family behind a failed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constraint {
    Unique,
    ForeignKey,
    NotNull,
    Other,
}

/// Returns the violated constraint, or `None` for non-constraint errors.
pub(crate) fn violated_constraint(err: &rusqlite::Error) -> Option<Constraint> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            Some(match failure.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    Constraint::Unique
                }
                // RESTRICT actions fail with the trigger code, not the FK code.
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY | ffi::SQLITE_CONSTRAINT_TRIGGER => {
                    Constraint::ForeignKey
                }
                ffi::SQLITE_CONSTRAINT_NOTNULL => Constraint::NotNull,
                _ => Constraint::Other,
            })
        }
        _ => None,
    }
}
