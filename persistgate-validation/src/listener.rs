use crate::{ErrorStrategy, RecordInSession};
use persistgate_engine::{
    AttributeKind, EventKind, ListenerError, PersistenceEvent, PersistenceListener, Session,
};
use persistgate_model::{EntityAccess, ValidatorFault, ValidatorRegistry};
use std::sync::Arc;
use tracing::debug;

const KINDS: &[EventKind] = &[EventKind::PreInsert, EventKind::PreUpdate];

/// How long a skip-validation flag stays in effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkipPolicy {
    /// The flag applies to every write of the instance until the caller
    /// clears it or the session ends.
    #[default]
    Persistent,
    /// The flag is removed the first time it causes validation to be skipped.
    OneShot,
}

/// Vetoes inserts and updates of entities that fail validation.
///
/// Holds no per-call state; everything about an instance lives in the
/// session that raised the event.
pub struct ValidatingListener {
    registry: Arc<ValidatorRegistry>,
    strategy: Box<dyn ErrorStrategy>,
    skip_policy: SkipPolicy,
}

impl ValidatingListener {
    pub const NAME: &'static str = "validating";

    /// Creates a listener that records errors in the session.
    pub fn new(registry: Arc<ValidatorRegistry>) -> Self {
        Self {
            registry,
            strategy: Box::new(RecordInSession),
            skip_policy: SkipPolicy::default(),
        }
    }

    /// Replaces the error strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl ErrorStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    #[must_use]
    pub fn with_skip_policy(mut self, skip_policy: SkipPolicy) -> Self {
        self.skip_policy = skip_policy;
        self
    }

    pub fn skip_policy(&self) -> SkipPolicy {
        self.skip_policy
    }

    /// Returns `Ok(false)` if the entity must not be inserted.
    pub fn before_insert(
        &self,
        session: &Session,
        access: &EntityAccess<'_>,
    ) -> Result<bool, ValidatorFault> {
        self.validate(session, access)
    }

    /// Returns `Ok(false)` if the entity must not be updated.
    pub fn before_update(
        &self,
        session: &Session,
        access: &EntityAccess<'_>,
    ) -> Result<bool, ValidatorFault> {
        self.validate(session, access)
    }

    fn validate(&self, session: &Session, access: &EntityAccess<'_>) -> Result<bool, ValidatorFault> {
        let entity_type = access.entity_type();
        let entity = access.entity();

        let Some(validator) = self.registry.get_validator_for(entity_type) else {
            return Ok(true);
        };

        let attributes = session.attributes();
        if attributes.skip_validation(entity.id) == Some(true) {
            if self.skip_policy == SkipPolicy::OneShot {
                attributes.remove_attribute(entity.id, AttributeKind::SkipValidation);
            }
            debug!(
                entity_type = entity_type.name(),
                entity_id = %entity.id,
                "Validation skipped"
            );
            return Ok(true);
        }

        let result = validator.validate(entity)?;
        if result.has_errors() {
            debug!(
                entity_type = entity_type.name(),
                entity_id = %entity.id,
                error_count = result.error_count(),
                "Validation failed"
            );
            self.strategy.on_errors(session, entity, result);
            return Ok(false);
        }

        attributes.remove_attribute(entity.id, AttributeKind::ValidationErrors);
        Ok(true)
    }
}

impl PersistenceListener for ValidatingListener {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn supported_kinds(&self) -> &[EventKind] {
        KINDS
    }

    fn on_event(&self, event: &mut PersistenceEvent<'_>) -> Result<bool, ListenerError> {
        let session = event.session();
        let accepted = match event.kind() {
            EventKind::PreInsert => self.before_insert(session, event.access())?,
            EventKind::PreUpdate => self.before_update(session, event.access())?,
            _ => true,
        };
        Ok(accepted)
    }
}
