//! SQLite store connector and schema bootstrap.
//!
//! # Responsibility
//! - Open one short-lived SQLite connection per operation.
//! - Ensure the `author`/`book` schema exists before data access.
//!
//! # Invariants
//! - Every connection handed out has `foreign_keys=ON`.
//! - No connection outlives the operation that opened it.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod schema;
mod store;

pub use schema::{ensure_schema, schema_ready};
pub use store::Store;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// The store file could not be opened or configured.
    Connection {
        path: PathBuf,
        source: rusqlite::Error,
    },
    /// Table creation failed; the store is unusable for this session.
    Schema(rusqlite::Error),
    /// Any other SQLite failure.
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection { path, source } => {
                write!(f, "cannot open store `{}`: {source}", path.display())
            }
            Self::Schema(err) => write!(f, "schema initialization failed: {err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection { source, .. } => Some(source),
            Self::Schema(err) => Some(err),
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
