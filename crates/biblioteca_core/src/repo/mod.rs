//! Repository layer for catalog persistence.
//!
//! # Responsibility
//! - Expose CRUD contracts for authors and books.
//! - Keep SQL details and constraint classification inside core.
//!
//! # Invariants
//! - Write paths validate required text before touching the store.
//! - Expected failures (duplicate name, missing reference, unknown id)
//!   surface as typed `RepoError` variants, never as panics.

pub mod author_repo;
pub mod book_repo;
mod error;

pub use error::{Entity, FailureKind, RepoError, RepoResult};
