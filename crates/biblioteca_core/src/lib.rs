//! Core persistence and validation for the Biblioteca catalog.
//! Authors and books live in one local SQLite file; this crate owns every
//! rule about them (unique author names, books bound to existing authors).

pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{StoreConfig, DEFAULT_DB_FILE_NAME};
pub use db::{ensure_schema, schema_ready, DbError, DbResult, Store};
pub use form::{required_field, FormAction, FormError, FormState};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::{Author, AuthorId};
pub use model::book::{Book, BookId, BookWithAuthor};
pub use model::validation::ValidationError;
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::{Entity, FailureKind, RepoError, RepoResult};
pub use service::library_service::{LibraryService, SqliteLibraryService};

/// Application name shown by presentation layers.
pub const APP_NAME: &str = "Biblioteca";

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
