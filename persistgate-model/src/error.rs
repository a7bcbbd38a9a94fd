//! Error types for the model layer.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// A name that the mapping layer does not know about.
///
/// These are programmer or configuration errors: they are never turned
/// into a validation failure and always propagate to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No entity type is registered under this name.
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    /// The entity type declares no property with this name.
    #[error("unknown property `{property}` on entity type `{entity_type}`")]
    UnknownProperty {
        entity_type: String,
        property: String,
    },
}

/// Errors that can occur while building or loading a mapping.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Lookup of a type or property failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Mapping document could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Mapping is structurally invalid (e.g. duplicate type names).
    #[error("invalid mapping: {0}")]
    InvalidMapping(String),
}
