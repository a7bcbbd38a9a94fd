//! Error types for the engine.

use crate::EventKind;
use persistgate_model::{LookupError, ValidatorFault};
use persistgate_types::EntityId;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Result type for datastore operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that abort a dispatch or a session write.
///
/// A vetoed write is not an error; it is reported as
/// [`WriteOutcome::Vetoed`](crate::WriteOutcome::Vetoed).
#[derive(Debug, Error)]
pub enum EngineError {
    /// The entity or one of its properties is not mapped.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// A listener failed while handling an event.
    #[error("listener `{listener}` failed on {kind}: {source}")]
    Listener {
        listener: String,
        kind: EventKind,
        #[source]
        source: ListenerError,
    },

    /// A listener was registered without any event kinds.
    #[error("listener `{0}` declares no supported event kinds")]
    NoSupportedKinds(String),

    /// The physical write failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failures a listener may raise from its handler.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The external validator broke while running.
    #[error(transparent)]
    Validator(#[from] ValidatorFault),

    /// The listener touched an unmapped property.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Any other listener-specific failure.
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from a [`Datastore`](crate::Datastore).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Entity not found.
    #[error("entity not found: {0}")]
    NotFound(EntityId),

    /// Insert of an id that is already stored.
    #[error("entity already exists: {0}")]
    AlreadyExists(EntityId),

    /// Lock poisoned by a panicking writer.
    #[error("datastore lock poisoned")]
    LockPoisoned,

    /// Driver-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}
