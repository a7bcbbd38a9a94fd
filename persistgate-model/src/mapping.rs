use crate::{Entity, EntityType, LookupError, ModelError, ModelResult, PropertyDef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Declarative form of an [`EntityType`], as found in a mapping document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTypeDef {
    pub name: String,
    /// Name of the parent type. Must be declared earlier in the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

/// A JSON mapping document: `{"entities": [ ... ]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingDocument {
    pub entities: Vec<EntityTypeDef>,
}

/// Classifies entities into their persistent [`EntityType`].
#[derive(Debug, Clone, Default)]
pub struct MappingContext {
    types: HashMap<String, Arc<EntityType>>,
}

impl MappingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity type. Names must be unique within a context.
    pub fn add(&mut self, entity_type: EntityType) -> ModelResult<Arc<EntityType>> {
        if self.types.contains_key(entity_type.name()) {
            return Err(ModelError::InvalidMapping(format!(
                "entity type `{}` registered twice",
                entity_type.name()
            )));
        }
        let entity_type = Arc::new(entity_type);
        self.types
            .insert(entity_type.name().to_string(), Arc::clone(&entity_type));
        Ok(entity_type)
    }

    /// Registers a type from its declarative form, resolving the parent by name.
    pub fn add_def(&mut self, def: EntityTypeDef) -> ModelResult<Arc<EntityType>> {
        let mut entity_type = EntityType::new(def.name, def.properties);
        if let Some(parent) = def.parent {
            let parent = self
                .types
                .get(&parent)
                .cloned()
                .ok_or(LookupError::UnknownEntityType(parent))?;
            entity_type = entity_type.extending(parent);
        }
        self.add(entity_type)
    }

    /// Builds a context from a JSON mapping document.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let document: MappingDocument = serde_json::from_str(json)?;
        let mut context = Self::new();
        for def in document.entities {
            context.add_def(def)?;
        }
        Ok(context)
    }

    pub fn entity_type(&self, name: &str) -> Option<Arc<EntityType>> {
        self.types.get(name).cloned()
    }

    /// Resolves the persistent type of an entity.
    pub fn entity_type_for(&self, entity: &Entity) -> Result<Arc<EntityType>, LookupError> {
        self.entity_type(&entity.entity_type)
            .ok_or_else(|| LookupError::UnknownEntityType(entity.entity_type.clone()))
    }

    pub fn is_persistent(&self, entity: &Entity) -> bool {
        self.types.contains_key(&entity.entity_type)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
