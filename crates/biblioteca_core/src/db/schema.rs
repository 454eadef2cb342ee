//! Idempotent schema initializer for the catalog tables.
//!
//! # Invariants
//! - `book.id_author` references `author.id_author` with
//!   `ON DELETE RESTRICT ON UPDATE CASCADE`.
//! - Running `ensure_schema` on an initialized store is a no-op.

use super::{DbError, DbResult, Store};
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Tables every repository relies on.
pub const REQUIRED_TABLES: [&str; 2] = ["author", "book"];

/// Creates the `author` and `book` tables when absent.
///
/// Safe to call on every startup.
///
/// # Errors
/// - `DbError::Connection` when the store cannot be opened.
/// - `DbError::Schema` when table creation fails; callers should treat the
///   store as unusable for the session.
pub fn ensure_schema(store: &Store) -> DbResult<()> {
    let started_at = Instant::now();
    info!("event=schema_init module=db status=start");

    let mut conn = store.connect()?;
    match create_tables(&mut conn) {
        Ok(()) => {
            info!(
                "event=schema_init module=db status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=schema_init module=db status=error duration_ms={} error_code=schema_create_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(DbError::Schema(err))
        }
    }
}

/// Returns whether every table in [`REQUIRED_TABLES`] exists.
pub fn schema_ready(store: &Store) -> DbResult<bool> {
    let conn = store.connect()?;
    for table in REQUIRED_TABLES {
        if !table_exists(&conn, table)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn create_tables(conn: &mut Connection) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.commit()
}

fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
