//! Catalog domain model.
//!
//! # Responsibility
//! - Define the author/book records exchanged with callers.
//! - Validate required text fields before they reach the store.
//!
//! # Invariants
//! - Ids are assigned by the store and never reused or mutated by core.
//! - A book belongs to exactly one author.

pub mod author;
pub mod book;
pub mod validation;
