use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A class of persistable objects.
///
/// Identity is the type name alone: two `EntityType` values with the same
/// name compare equal even if their property lists differ. Properties are
/// inherited from the parent chain.
#[derive(Debug, Clone)]
pub struct EntityType {
    name: String,
    properties: Vec<PropertyDef>,
    parent: Option<Arc<EntityType>>,
}

impl EntityType {
    /// Creates a root entity type.
    pub fn new(name: impl Into<String>, properties: Vec<PropertyDef>) -> Self {
        Self {
            name: name.into(),
            properties,
            parent: None,
        }
    }

    /// Makes this type a subtype of `parent`.
    #[must_use]
    pub fn extending(mut self, parent: Arc<EntityType>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&EntityType> {
        self.parent.as_deref()
    }

    /// Properties declared directly on this type (not inherited ones).
    pub fn declared_properties(&self) -> &[PropertyDef] {
        &self.properties
    }

    /// This type followed by each of its supertypes, nearest first.
    pub fn lineage(&self) -> impl Iterator<Item = &EntityType> {
        std::iter::successors(Some(self), |t| t.parent())
    }

    /// Looks up a property on this type or any supertype.
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.lineage()
            .find_map(|t| t.properties.iter().find(|p| p.name == name))
    }

    /// Returns true if `self` is `other` or one of its subtypes.
    pub fn is_a(&self, other: &str) -> bool {
        self.lineage().any(|t| t.name == other)
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EntityType {}

impl Hash for EntityType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A declared persistent property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub field_type: FieldType,
}

impl PropertyDef {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// Shorthand for a text property.
    pub fn text(name: &str) -> Self {
        Self::new(name, FieldType::Text)
    }

    /// Shorthand for a numeric property.
    pub fn number(name: &str) -> Self {
        Self::new(name, FieldType::Number)
    }

    /// Shorthand for a decimal property.
    pub fn decimal(name: &str) -> Self {
        Self::new(name, FieldType::Decimal)
    }

    /// Shorthand for a boolean property.
    pub fn bool(name: &str) -> Self {
        Self::new(name, FieldType::Bool)
    }

    /// Shorthand for a DateTime property.
    pub fn datetime(name: &str) -> Self {
        Self::new(name, FieldType::DateTime)
    }

    /// Shorthand for a tag array property.
    pub fn tag(name: &str) -> Self {
        Self::new(name, FieldType::Tag)
    }

    /// Shorthand for a relation (entity link) property.
    pub fn relation(name: &str) -> Self {
        Self::new(name, FieldType::Relation)
    }

    /// Shorthand for a JSON blob property.
    pub fn json(name: &str) -> Self {
        Self::new(name, FieldType::Json)
    }
}

/// The data type of a persistent property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Tag,
    DateTime,
    Number,
    Decimal,
    Bool,
    Relation,
    Json,
}
