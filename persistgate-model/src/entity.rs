use persistgate_types::EntityId;
use serde::{Deserialize, Serialize};

/// A generic entity flowing through the write pipeline.
///
/// The `data` field holds arbitrary JSON whose shape is described by the
/// entity's [`EntityType`](crate::EntityType). The `id` is both the storage
/// key and the instance identity used by the session side-channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub entity_type: String,
    pub data: serde_json::Value,
}

impl Entity {
    /// Creates an entity with a fresh identity.
    pub fn new(entity_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self::with_id(EntityId::new(), entity_type, data)
    }

    /// Creates an entity with a known identity (e.g. one loaded from storage).
    pub fn with_id(id: EntityId, entity_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            id,
            entity_type: entity_type.into(),
            data,
        }
    }

    /// Extract a string value from `data` using a JSON pointer (e.g., "/name").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.data.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value from `data` using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.data.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value from `data` using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.data.pointer(pointer).and_then(|v| v.as_f64())
    }
}
