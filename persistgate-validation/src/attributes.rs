use persistgate_engine::{Attribute, AttributeKind, Session};
use persistgate_model::{Entity, ValidationResult};

/// Validation-specific view of a session's attribute store.
pub trait ValidationAttributes {
    /// Sets (or clears, with `false`) the skip-validation flag for `entity`.
    fn set_skip_validation(&self, entity: &Entity, skip: bool);

    fn is_validation_skipped(&self, entity: &Entity) -> bool;

    /// Errors recorded by the last rejected validation of `entity`.
    fn validation_errors(&self, entity: &Entity) -> Option<ValidationResult>;

    fn clear_validation_errors(&self, entity: &Entity) -> Option<ValidationResult>;
}

impl ValidationAttributes for Session {
    fn set_skip_validation(&self, entity: &Entity, skip: bool) {
        self.attributes().set_skip_validation(entity.id, skip);
    }

    fn is_validation_skipped(&self, entity: &Entity) -> bool {
        self.attributes().skip_validation(entity.id) == Some(true)
    }

    fn validation_errors(&self, entity: &Entity) -> Option<ValidationResult> {
        self.attributes().validation_errors(entity.id)
    }

    fn clear_validation_errors(&self, entity: &Entity) -> Option<ValidationResult> {
        match self
            .attributes()
            .remove_attribute(entity.id, AttributeKind::ValidationErrors)
        {
            Some(Attribute::ValidationErrors(errors)) => Some(errors),
            _ => None,
        }
    }
}
