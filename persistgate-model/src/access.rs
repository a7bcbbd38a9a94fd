use crate::{Entity, EntityType, FieldType, LookupError};
use persistgate_types::EntityId;
use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Read/write view over one entity and its persistent type.
///
/// Bound to a single (type, instance) pair for the lifetime of one event.
/// Writes go straight into the wrapped entity, so they are seen by later
/// listeners and by the physical write that follows.
#[derive(Debug)]
pub struct EntityAccess<'a> {
    entity_type: &'a EntityType,
    entity: &'a mut Entity,
}

impl<'a> EntityAccess<'a> {
    pub fn new(entity_type: &'a EntityType, entity: &'a mut Entity) -> Self {
        Self {
            entity_type,
            entity,
        }
    }

    /// Identity of the wrapped instance.
    pub fn identifier(&self) -> EntityId {
        self.entity.id
    }

    pub fn entity_type(&self) -> &EntityType {
        self.entity_type
    }

    pub fn entity(&self) -> &Entity {
        &*self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut *self.entity
    }

    /// Reads a declared property. A declared property with no value reads as `null`.
    pub fn property(&self, name: &str) -> Result<&Value, LookupError> {
        self.check(name)?;
        Ok(self.entity.data.get(name).unwrap_or(&NULL))
    }

    /// Writes a declared property, turning a non-object payload into an object first.
    pub fn set_property(&mut self, name: &str, value: impl Into<Value>) -> Result<(), LookupError> {
        self.check(name)?;
        if !self.entity.data.is_object() {
            self.entity.data = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.entity.data {
            map.insert(name.to_string(), value.into());
        }
        Ok(())
    }

    pub fn property_type(&self, name: &str) -> Result<FieldType, LookupError> {
        self.entity_type
            .property(name)
            .map(|p| p.field_type)
            .ok_or_else(|| self.unknown(name))
    }

    fn check(&self, name: &str) -> Result<(), LookupError> {
        match self.entity_type.property(name) {
            Some(_) => Ok(()),
            None => Err(self.unknown(name)),
        }
    }

    fn unknown(&self, name: &str) -> LookupError {
        LookupError::UnknownProperty {
            entity_type: self.entity_type.name().to_string(),
            property: name.to_string(),
        }
    }
}
