//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `book` table.
//! - Join `author` for display reads.
//!
//! # Invariants
//! - Every write references an existing author (foreign key enforced).
//! - Display reads use an inner join ordered by `title ASC, id_book ASC`.
//! - `update` writes title and author together or not at all.

use super::error::{violated_constraint, Constraint, Entity, RepoError, RepoResult};
use crate::db::Store;
use crate::model::author::AuthorId;
use crate::model::book::{validate_book_title, BookId, BookWithAuthor};
use crate::model::validation::ValidationError;
use rusqlite::{params, OptionalExtension, Row};

const BOOK_WITH_AUTHOR_SELECT_SQL: &str = "SELECT
    b.id_book AS id_book,
    b.title AS title,
    a.name AS author_name,
    b.id_author AS id_author
FROM book b
INNER JOIN author a ON b.id_author = a.id_author";

/// Repository interface for book CRUD operations.
pub trait BookRepository {
    /// Inserts a book for an existing author and returns its id.
    fn add(&self, title: &str, author_id: AuthorId) -> RepoResult<BookId>;
    /// Lists every book with its author's name, ordered by title.
    fn list_with_author(&self) -> RepoResult<Vec<BookWithAuthor>>;
    /// Replaces title and author of one book.
    fn update(&self, id: BookId, new_title: &str, new_author_id: AuthorId) -> RepoResult<()>;
    fn delete(&self, id: BookId) -> RepoResult<()>;
    fn find_by_id(&self, id: BookId) -> RepoResult<Option<BookWithAuthor>>;
}

/// SQLite-backed book repository. Opens one connection per call.
pub struct SqliteBookRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteBookRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn add(&self, title: &str, author_id: AuthorId) -> RepoResult<BookId> {
        validate_book_title(title)?;

        self.store.with_transaction("book_add", |tx| {
            tx.execute(
                "INSERT INTO book (title, id_author) VALUES (?1, ?2);",
                params![title, author_id],
            )
            .map_err(|err| classify_book_write(err, author_id))?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn list_with_author(&self) -> RepoResult<Vec<BookWithAuthor>> {
        self.store.with_connection("book_list", |conn| {
            let mut stmt = conn.prepare(&format!(
                "{BOOK_WITH_AUTHOR_SELECT_SQL} ORDER BY b.title ASC, b.id_book ASC;"
            ))?;
            let books = stmt
                .query_map([], parse_book_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(books)
        })
    }

    fn update(&self, id: BookId, new_title: &str, new_author_id: AuthorId) -> RepoResult<()> {
        validate_book_title(new_title)?;

        self.store.with_transaction("book_update", |tx| {
            let changed = tx
                .execute(
                    "UPDATE book SET title = ?1, id_author = ?2 WHERE id_book = ?3;",
                    params![new_title, new_author_id, id],
                )
                .map_err(|err| classify_book_write(err, new_author_id))?;

            if changed == 0 {
                return Err(RepoError::NotFound {
                    entity: Entity::Book,
                    id,
                });
            }
            Ok(())
        })
    }

    fn delete(&self, id: BookId) -> RepoResult<()> {
        self.store.with_transaction("book_delete", |tx| {
            let changed = tx.execute("DELETE FROM book WHERE id_book = ?1;", [id])?;
            if changed == 0 {
                return Err(RepoError::NotFound {
                    entity: Entity::Book,
                    id,
                });
            }
            Ok(())
        })
    }

    fn find_by_id(&self, id: BookId) -> RepoResult<Option<BookWithAuthor>> {
        self.store.with_connection("book_find", |conn| {
            let book = conn
                .query_row(
                    &format!("{BOOK_WITH_AUTHOR_SELECT_SQL} WHERE b.id_book = ?1;"),
                    [id],
                    parse_book_row,
                )
                .optional()?;
            Ok(book)
        })
    }
}

fn classify_book_write(err: rusqlite::Error, author_id: AuthorId) -> RepoError {
    match violated_constraint(&err) {
        Some(Constraint::ForeignKey) => RepoError::AuthorNotFound(author_id),
        Some(Constraint::NotNull) => RepoError::Validation(ValidationError::EmptyField("title")),
        _ => RepoError::from(err),
    }
}

fn parse_book_row(row: &Row<'_>) -> rusqlite::Result<BookWithAuthor> {
    Ok(BookWithAuthor {
        id: row.get("id_book")?,
        title: row.get("title")?,
        author_name: row.get("author_name")?,
        author_id: row.get("id_author")?,
    })
}
