//! Per-session, per-instance attribute side-channel.
//!
//! Entries are keyed by (entity identity, attribute kind). The kind is a
//! closed enum so independent listeners cannot collide on a string key, and
//! each kind carries exactly one value type.

use persistgate_model::ValidationResult;
use persistgate_types::EntityId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

/// The attributes a session can hold for an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Caller asks validation to be skipped for this instance.
    SkipValidation,
    /// Errors recorded by the last failed validation of this instance.
    ValidationErrors,
}

impl AttributeKind {
    /// Namespaced name, used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            AttributeKind::SkipValidation => "persistgate.validation.skip",
            AttributeKind::ValidationErrors => "persistgate.validation.errors",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed attribute value. The variant determines its [`AttributeKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    SkipValidation(bool),
    ValidationErrors(ValidationResult),
}

impl Attribute {
    pub fn kind(&self) -> AttributeKind {
        match self {
            Attribute::SkipValidation(_) => AttributeKind::SkipValidation,
            Attribute::ValidationErrors(_) => AttributeKind::ValidationErrors,
        }
    }
}

/// Attribute storage owned by one [`Session`](crate::Session).
///
/// Uses interior mutability because listeners only see the session through
/// a shared reference carried by the event. A session serves one unit of
/// work at a time, so no locking is done here; the store is `!Sync`.
#[derive(Debug, Default)]
pub struct AttributeStore {
    entries: RefCell<HashMap<(EntityId, AttributeKind), Attribute>>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` for `instance`, replacing any entry of the same kind.
    pub fn set_attribute(&self, instance: EntityId, value: Attribute) -> Option<Attribute> {
        self.entries
            .borrow_mut()
            .insert((instance, value.kind()), value)
    }

    pub fn get_attribute(&self, instance: EntityId, kind: AttributeKind) -> Option<Attribute> {
        self.entries.borrow().get(&(instance, kind)).cloned()
    }

    pub fn remove_attribute(&self, instance: EntityId, kind: AttributeKind) -> Option<Attribute> {
        self.entries.borrow_mut().remove(&(instance, kind))
    }

    pub fn contains(&self, instance: EntityId, kind: AttributeKind) -> bool {
        self.entries.borrow().contains_key(&(instance, kind))
    }

    /// Drops every attribute held for `instance`.
    pub fn clear_instance(&self, instance: EntityId) {
        self.entries.borrow_mut().retain(|(id, _), _| *id != instance);
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    // ── Typed accessors ─────────────────────────────────────────

    pub fn skip_validation(&self, instance: EntityId) -> Option<bool> {
        match self.entries.borrow().get(&(instance, AttributeKind::SkipValidation)) {
            Some(Attribute::SkipValidation(flag)) => Some(*flag),
            _ => None,
        }
    }

    pub fn set_skip_validation(&self, instance: EntityId, skip: bool) {
        self.set_attribute(instance, Attribute::SkipValidation(skip));
    }

    pub fn validation_errors(&self, instance: EntityId) -> Option<ValidationResult> {
        match self.entries.borrow().get(&(instance, AttributeKind::ValidationErrors)) {
            Some(Attribute::ValidationErrors(result)) => Some(result.clone()),
            _ => None,
        }
    }

    pub fn set_validation_errors(&self, instance: EntityId, errors: ValidationResult) {
        self.set_attribute(instance, Attribute::ValidationErrors(errors));
    }
}
