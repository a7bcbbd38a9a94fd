use crate::{EntityType, Validator};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Maps entity type names to their validator.
///
/// A type without a validator is not an error: validation is simply a
/// no-op for it.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Arc<dyn Validator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `validator` for `type_name`, returning any validator it replaces.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        validator: Arc<dyn Validator>,
    ) -> Option<Arc<dyn Validator>> {
        self.validators.insert(type_name.into(), validator)
    }

    pub fn unregister(&mut self, type_name: &str) -> Option<Arc<dyn Validator>> {
        self.validators.remove(type_name)
    }

    /// Resolves the validator for `entity_type`, falling back along its
    /// supertype chain. The nearest registration wins.
    pub fn get_validator_for(&self, entity_type: &EntityType) -> Option<Arc<dyn Validator>> {
        entity_type
            .lineage()
            .find_map(|t| self.validators.get(t.name()))
            .cloned()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.validators.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.validators.keys().collect();
        names.sort();
        f.debug_struct("ValidatorRegistry")
            .field("types", &names)
            .finish()
    }
}
