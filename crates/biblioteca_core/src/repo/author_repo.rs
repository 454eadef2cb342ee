//! Author repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `author` table.
//! - Translate unique/restrict constraint failures into semantic errors.
//!
//! # Invariants
//! - Author names are unique; the store's UNIQUE constraint is the judge.
//! - An author referenced by any book cannot be deleted.
//! - `list` is ordered by `name ASC` using the store's default collation.

use super::error::{violated_constraint, Constraint, Entity, RepoError, RepoResult};
use crate::db::Store;
use crate::model::author::{validate_author_name, Author, AuthorId};
use crate::model::validation::ValidationError;
use rusqlite::{params, Connection, OptionalExtension, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT id_author, name FROM author";

/// Repository interface for author CRUD operations.
pub trait AuthorRepository {
    /// Inserts a new author and returns the store-assigned id.
    fn add(&self, name: &str) -> RepoResult<AuthorId>;
    /// Lists every author ordered by name.
    fn list(&self) -> RepoResult<Vec<Author>>;
    /// Renames one author.
    fn update(&self, id: AuthorId, new_name: &str) -> RepoResult<()>;
    /// Deletes one author that has no books.
    fn delete(&self, id: AuthorId) -> RepoResult<()>;
    fn find_by_id(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Exact, case-sensitive name lookup.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
}

/// SQLite-backed author repository. Opens one connection per call.
pub struct SqliteAuthorRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteAuthorRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn add(&self, name: &str) -> RepoResult<AuthorId> {
        validate_author_name(name)?;

        self.store.with_transaction("author_add", |tx| {
            tx.execute("INSERT INTO author (name) VALUES (?1);", [name])
                .map_err(|err| classify_name_write(err, name))?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn list(&self) -> RepoResult<Vec<Author>> {
        self.store.with_connection("author_list", |conn| {
            let mut stmt = conn.prepare(&format!("{AUTHOR_SELECT_SQL} ORDER BY name ASC;"))?;
            let authors = stmt
                .query_map([], parse_author_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(authors)
        })
    }

    fn update(&self, id: AuthorId, new_name: &str) -> RepoResult<()> {
        validate_author_name(new_name)?;

        self.store.with_transaction("author_update", |tx| {
            let changed = tx
                .execute(
                    "UPDATE author SET name = ?1 WHERE id_author = ?2;",
                    params![new_name, id],
                )
                .map_err(|err| classify_name_write(err, new_name))?;

            if changed == 0 {
                return Err(RepoError::NotFound {
                    entity: Entity::Author,
                    id,
                });
            }
            Ok(())
        })
    }

    fn delete(&self, id: AuthorId) -> RepoResult<()> {
        self.store.with_transaction("author_delete", |tx| {
            if has_books(tx, id)? {
                return Err(RepoError::AuthorHasBooks(id));
            }

            let changed = tx
                .execute("DELETE FROM author WHERE id_author = ?1;", [id])
                .map_err(|err| match violated_constraint(&err) {
                    Some(Constraint::ForeignKey) => RepoError::AuthorHasBooks(id),
                    _ => RepoError::from(err),
                })?;

            if changed == 0 {
                return Err(RepoError::NotFound {
                    entity: Entity::Author,
                    id,
                });
            }
            Ok(())
        })
    }

    fn find_by_id(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.store.with_connection("author_find", |conn| {
            find_one(conn, &format!("{AUTHOR_SELECT_SQL} WHERE id_author = ?1;"), id)
        })
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.store.with_connection("author_find_by_name", |conn| {
            find_one(conn, &format!("{AUTHOR_SELECT_SQL} WHERE name = ?1;"), name)
        })
    }
}

fn find_one(
    conn: &Connection,
    sql: &str,
    key: impl rusqlite::ToSql,
) -> RepoResult<Option<Author>> {
    let author = conn
        .query_row(sql, [key], parse_author_row)
        .optional()?;
    Ok(author)
}

fn has_books(conn: &Connection, id: AuthorId) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM book WHERE id_author = ?1);",
        [id],
        |row| row.get(0),
    )
}

fn classify_name_write(err: rusqlite::Error, name: &str) -> RepoError {
    match violated_constraint(&err) {
        Some(Constraint::Unique) => RepoError::DuplicateAuthorName(name.to_string()),
        Some(Constraint::NotNull) => RepoError::Validation(ValidationError::EmptyField("name")),
        _ => RepoError::from(err),
    }
}

fn parse_author_row(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author {
        id: row.get("id_author")?,
        name: row.get("name")?,
    })
}
