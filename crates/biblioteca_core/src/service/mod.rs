//! Caller-facing use-case services.
//!
//! # Responsibility
//! - Present repository operations as plain success/failure outcomes.
//! - Keep presentation layers decoupled from storage error details.

pub mod library_service;
