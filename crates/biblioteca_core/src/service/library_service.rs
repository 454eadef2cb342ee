//! Library use-case service.
//!
//! # Responsibility
//! - Expose every author/book operation as a success value or an
//!   absent/`false` failure signal.
//! - Log the cause of each failure, since the signal itself carries none.
//!
//! # Invariants
//! - No expected failure escapes as an error or panic.
//! - Reads return an empty list on failure.

use crate::db::Store;
use crate::model::author::{Author, AuthorId};
use crate::model::book::{BookId, BookWithAuthor};
use crate::repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
use crate::repo::book_repo::{BookRepository, SqliteBookRepository};
use crate::repo::{RepoError, RepoResult};
use log::{error, warn};

/// Service over the two repositories.
pub struct LibraryService<A: AuthorRepository, B: BookRepository> {
    authors: A,
    books: B,
}

/// Service wired to the SQLite repositories of one store.
pub type SqliteLibraryService<'store> =
    LibraryService<SqliteAuthorRepository<'store>, SqliteBookRepository<'store>>;

impl<'store> SqliteLibraryService<'store> {
    pub fn for_store(store: &'store Store) -> Self {
        Self::new(
            SqliteAuthorRepository::new(store),
            SqliteBookRepository::new(store),
        )
    }
}

impl<A: AuthorRepository, B: BookRepository> LibraryService<A, B> {
    pub fn new(authors: A, books: B) -> Self {
        Self { authors, books }
    }

    /// Returns the new author id, or `None` on duplicate/blank name or store failure.
    pub fn add_author(&self, name: &str) -> Option<AuthorId> {
        settle("add_author", self.authors.add(name))
    }

    pub fn list_authors(&self) -> Vec<Author> {
        settle("list_authors", self.authors.list()).unwrap_or_default()
    }

    /// `true` only when exactly one author was renamed.
    pub fn update_author(&self, id: AuthorId, new_name: &str) -> bool {
        settle("update_author", self.authors.update(id, new_name)).is_some()
    }

    /// `false` when the author is unknown or still has books.
    pub fn delete_author(&self, id: AuthorId) -> bool {
        settle("delete_author", self.authors.delete(id)).is_some()
    }

    pub fn find_author(&self, id: AuthorId) -> Option<Author> {
        settle("find_author", self.authors.find_by_id(id)).flatten()
    }

    /// Returns the new book id, or `None` when the author is missing,
    /// the title is blank, or the store fails.
    pub fn add_book(&self, title: &str, author_id: AuthorId) -> Option<BookId> {
        settle("add_book", self.books.add(title, author_id))
    }

    pub fn list_books_with_author(&self) -> Vec<BookWithAuthor> {
        settle("list_books_with_author", self.books.list_with_author()).unwrap_or_default()
    }

    pub fn update_book(&self, id: BookId, new_title: &str, new_author_id: AuthorId) -> bool {
        settle(
            "update_book",
            self.books.update(id, new_title, new_author_id),
        )
        .is_some()
    }

    pub fn delete_book(&self, id: BookId) -> bool {
        settle("delete_book", self.books.delete(id)).is_some()
    }

    pub fn find_book(&self, id: BookId) -> Option<BookWithAuthor> {
        settle("find_book", self.books.find_by_id(id)).flatten()
    }
}

fn settle<T>(operation: &'static str, result: RepoResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log_failure(operation, &err);
            None
        }
    }
}

fn log_failure(operation: &str, err: &RepoError) {
    if err.is_expected() {
        warn!(
            "event=library_op module=service op={} status=rejected kind={:?} error={}",
            operation,
            err.kind(),
            err
        );
    } else {
        error!(
            "event=library_op module=service op={} status=error kind={:?} error={}",
            operation,
            err.kind(),
            err
        );
    }
}
