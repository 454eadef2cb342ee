//! Per-operation connection handling for the SQLite store.
//!
//! # Responsibility
//! - Open file-backed connections from explicit configuration.
//! - Run one unit of work per connection and close it on every exit path.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - `with_transaction` commits only when the unit of work returns `Ok`;
//!   any `Err` drops the transaction, which rolls it back.

use super::{DbError, DbResult};
use crate::config::StoreConfig;
use log::{debug, error, info, warn};
use rusqlite::{Connection, Transaction};
use std::fmt::Display;
use std::path::Path;
use std::time::Instant;

/// Handle to the backing store. Holds configuration only, never a connection.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Shorthand for a store backed by the file at `path`.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self::new(StoreConfig::new(path.as_ref()))
    }

    pub fn path(&self) -> &Path {
        self.config.db_path.as_path()
    }

    /// Opens a fresh connection with foreign-key enforcement enabled.
    ///
    /// The connection closes when dropped.
    ///
    /// # Errors
    /// - `DbError::Connection` when the file cannot be opened or configured.
    pub fn connect(&self) -> DbResult<Connection> {
        let started_at = Instant::now();
        let path = self.path();

        let conn = Connection::open(path).map_err(|err| {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            DbError::Connection {
                path: path.to_path_buf(),
                source: err,
            }
        })?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|err| {
                error!(
                    "event=db_open module=db status=error duration_ms={} error_code=db_pragma_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                DbError::Connection {
                    path: path.to_path_buf(),
                    source: err,
                }
            })?;

        debug!(
            "event=db_open module=db status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(conn)
    }

    /// Runs a read-only unit of work on a fresh connection.
    pub fn with_connection<T, E, F>(&self, operation: &'static str, work: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<DbError> + Display,
    {
        let started_at = Instant::now();
        let conn = self.connect()?;
        let result = work(&conn);
        drop(conn);
        log_outcome(operation, started_at, &result);
        result
    }

    /// Runs a unit of work inside a transaction on a fresh connection.
    ///
    /// # Errors
    /// - Whatever `work` returns; the transaction is rolled back.
    /// - `DbError` when opening, beginning or committing fails.
    pub fn with_transaction<T, E, F>(&self, operation: &'static str, work: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<DbError> + Display,
    {
        let started_at = Instant::now();
        let mut conn = self.connect()?;
        let result = run_in_transaction(&mut conn, work);
        drop(conn);
        log_outcome(operation, started_at, &result);
        result
    }
}

fn run_in_transaction<T, E, F>(conn: &mut Connection, work: F) -> Result<T, E>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    E: From<DbError>,
{
    let tx = conn.transaction().map_err(DbError::Sqlite)?;
    let value = work(&tx)?;
    tx.commit().map_err(DbError::Sqlite)?;
    Ok(value)
}

fn log_outcome<T, E: Display>(operation: &str, started_at: Instant, result: &Result<T, E>) {
    match result {
        Ok(_) => info!(
            "event=store_op module=db op={} status=ok duration_ms={}",
            operation,
            started_at.elapsed().as_millis()
        ),
        Err(err) => warn!(
            "event=store_op module=db op={} status=error duration_ms={} error={}",
            operation,
            started_at.elapsed().as_millis(),
            err
        ),
    }
}
