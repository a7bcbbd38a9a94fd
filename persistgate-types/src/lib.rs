//! Core type definitions for persistgate.
//!
//! This crate defines the small set of types every other crate in the
//! workspace agrees on:
//! - Entity identifiers (UUID v7), which double as in-memory instance identity
//! - Session identifiers, one per unit of work
//!
//! Entity types, validators and the event pipeline live in the model and
//! engine crates, not here.

mod ids;

pub use ids::{EntityId, SessionId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An identifier string is not a valid UUID.
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
