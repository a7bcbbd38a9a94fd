//! The storage driver seam.
//!
//! The engine does not know how entities are physically stored; it calls a
//! [`Datastore`] once the pre-write listeners have accepted.

use crate::{StorageError, StorageResult};
use persistgate_model::Entity;
use persistgate_types::EntityId;
use std::collections::HashMap;
use std::sync::Mutex;

/// Physical storage for entities.
pub trait Datastore: Send + Sync {
    /// Stores a new entity. Fails if the id is already present.
    fn insert(&self, entity: &Entity) -> StorageResult<()>;

    /// Replaces a stored entity. Fails if the id is not present.
    fn update(&self, entity: &Entity) -> StorageResult<()>;

    /// Removes a stored entity. Fails if the id is not present.
    fn delete(&self, id: &EntityId) -> StorageResult<()>;

    fn get(&self, id: &EntityId) -> StorageResult<Option<Entity>>;
}

/// In-process [`Datastore`] backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryDatastore {
    entities: Mutex<HashMap<EntityId, Entity>>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> StorageResult<usize> {
        Ok(self
            .entities
            .lock()
            .map_err(|_| StorageError::LockPoisoned)?
            .len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn contains(&self, id: &EntityId) -> StorageResult<bool> {
        Ok(self
            .entities
            .lock()
            .map_err(|_| StorageError::LockPoisoned)?
            .contains_key(id))
    }
}

impl Datastore for MemoryDatastore {
    fn insert(&self, entity: &Entity) -> StorageResult<()> {
        let mut entities = self.entities.lock().map_err(|_| StorageError::LockPoisoned)?;
        if entities.contains_key(&entity.id) {
            return Err(StorageError::AlreadyExists(entity.id));
        }
        entities.insert(entity.id, entity.clone());
        Ok(())
    }

    fn update(&self, entity: &Entity) -> StorageResult<()> {
        let mut entities = self.entities.lock().map_err(|_| StorageError::LockPoisoned)?;
        match entities.get_mut(&entity.id) {
            Some(stored) => {
                *stored = entity.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound(entity.id)),
        }
    }

    fn delete(&self, id: &EntityId) -> StorageResult<()> {
        let mut entities = self.entities.lock().map_err(|_| StorageError::LockPoisoned)?;
        entities
            .remove(id)
            .map(|_| ())
            .ok_or(StorageError::NotFound(*id))
    }

    fn get(&self, id: &EntityId) -> StorageResult<Option<Entity>> {
        let entities = self.entities.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entities.get(id).cloned())
    }
}
