//! Store configuration passed explicitly to the connector.

use std::path::PathBuf;

/// File name used when no database path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "biblioteca.db";

/// Location of the backing SQLite file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_FILE_NAME)
    }
}
