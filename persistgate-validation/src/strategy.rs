//! What happens to validation errors once a write has been rejected.

use persistgate_engine::Session;
use persistgate_model::{Entity, ValidationResult};
use persistgate_types::EntityId;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// Receives the errors of a rejected validation.
///
/// The listener rejects the write regardless of what the strategy does;
/// the strategy only decides where the errors go.
pub trait ErrorStrategy: Send + Sync {
    fn on_errors(&self, session: &Session, entity: &Entity, errors: ValidationResult);
}

impl<F> ErrorStrategy for F
where
    F: Fn(&Session, &Entity, ValidationResult) + Send + Sync,
{
    fn on_errors(&self, session: &Session, entity: &Entity, errors: ValidationResult) {
        self(session, entity, errors)
    }
}

/// Stores the errors in the session under the instance's identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordInSession;

impl ErrorStrategy for RecordInSession {
    fn on_errors(&self, session: &Session, entity: &Entity, errors: ValidationResult) {
        session.attributes().set_validation_errors(entity.id, errors);
    }
}

/// Logs the errors at warn level, then records them in the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrors;

impl ErrorStrategy for LogErrors {
    fn on_errors(&self, session: &Session, entity: &Entity, errors: ValidationResult) {
        warn!(
            session_id = %session.id(),
            entity_type = %entity.entity_type,
            entity_id = %entity.id,
            error_count = errors.error_count(),
            "Validation failed: {}",
            errors
        );
        RecordInSession.on_errors(session, entity, errors);
    }
}

/// Collects errors from every rejected write into one batch, and also
/// records them in the session.
#[derive(Debug, Clone, Default)]
pub struct CollectErrors {
    batch: Arc<Mutex<Vec<(EntityId, ValidationResult)>>>,
}

impl CollectErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes everything collected so far.
    pub fn drain(&self) -> Vec<(EntityId, ValidationResult)> {
        std::mem::take(&mut *self.batch.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.batch.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorStrategy for CollectErrors {
    fn on_errors(&self, session: &Session, entity: &Entity, errors: ValidationResult) {
        self.batch
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((entity.id, errors.clone()));
        RecordInSession.on_errors(session, entity, errors);
    }
}
