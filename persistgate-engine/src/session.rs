use crate::{
    AttributeStore, Datastore, Dispatcher, EngineResult, EventKind, PersistenceEvent, Verdict,
};
use persistgate_model::{Entity, EntityAccess, EntityType, MappingContext};
use persistgate_types::{EntityId, SessionId};
use std::sync::Arc;
use tracing::debug;

/// Result of a session write that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The datastore performed the write.
    Written,
    /// A pre-write listener rejected the write; the datastore was not touched.
    Vetoed { listener: String },
}

impl WriteOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Written)
    }
}

#[derive(Debug, Clone, Copy)]
enum WriteOp {
    Insert,
    Update,
    Delete,
}

impl WriteOp {
    fn kinds(self) -> (EventKind, EventKind) {
        match self {
            WriteOp::Insert => (EventKind::PreInsert, EventKind::PostInsert),
            WriteOp::Update => (EventKind::PreUpdate, EventKind::PostUpdate),
            WriteOp::Delete => (EventKind::PreDelete, EventKind::PostDelete),
        }
    }
}

/// A unit of work.
///
/// Owns the attribute store for every instance it touches. The mapping,
/// dispatcher and datastore are shared with other sessions; attributes are
/// not. A session is used by one logical caller at a time.
pub struct Session {
    id: SessionId,
    mapping: Arc<MappingContext>,
    dispatcher: Arc<Dispatcher>,
    datastore: Arc<dyn Datastore>,
    attributes: AttributeStore,
}

impl Session {
    pub fn new(
        mapping: Arc<MappingContext>,
        dispatcher: Arc<Dispatcher>,
        datastore: Arc<dyn Datastore>,
    ) -> Self {
        let id = SessionId::new();
        debug!(session_id = %id, "Session opened");
        Self {
            id,
            mapping,
            dispatcher,
            datastore,
            attributes: AttributeStore::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    pub fn mapping(&self) -> &MappingContext {
        &self.mapping
    }

    /// Inserts a new entity, unless a pre-insert listener vetoes it.
    ///
    /// A post-insert listener error is returned as `Err` after the entity
    /// has already been stored. The same holds for `update` and `delete`.
    pub fn insert(&self, entity: &mut Entity) -> EngineResult<WriteOutcome> {
        self.write(entity, WriteOp::Insert)
    }

    /// Updates a stored entity, unless a pre-update listener vetoes it.
    pub fn update(&self, entity: &mut Entity) -> EngineResult<WriteOutcome> {
        self.write(entity, WriteOp::Update)
    }

    /// Deletes a stored entity, unless a pre-delete listener vetoes it.
    pub fn delete(&self, entity: &mut Entity) -> EngineResult<WriteOutcome> {
        self.write(entity, WriteOp::Delete)
    }

    pub fn get(&self, id: &EntityId) -> EngineResult<Option<Entity>> {
        Ok(self.datastore.get(id)?)
    }

    /// Raises a single event for `entity` without performing any write.
    ///
    /// For storage drivers that bracket their own writes.
    pub fn raise(&self, kind: EventKind, entity: &mut Entity) -> EngineResult<Verdict> {
        let entity_type = self.mapping.entity_type_for(entity)?;
        self.dispatch(kind, &entity_type, entity)
    }

    /// Ends the unit of work, dropping all attributes.
    pub fn close(self) {
        debug!(session_id = %self.id, attributes = self.attributes.len(), "Session closed");
        self.attributes.clear();
    }

    /// Runs one write bracketed by its pre and post events.
    ///
    /// An `Err` from the post event means the datastore write happened.
    fn write(&self, entity: &mut Entity, op: WriteOp) -> EngineResult<WriteOutcome> {
        let entity_type = self.mapping.entity_type_for(entity)?;
        let (pre, post) = op.kinds();

        if let Verdict::Vetoed { listener } = self.dispatch(pre, &entity_type, entity)? {
            return Ok(WriteOutcome::Vetoed { listener });
        }

        match op {
            WriteOp::Insert => self.datastore.insert(entity)?,
            WriteOp::Update => self.datastore.update(entity)?,
            WriteOp::Delete => self.datastore.delete(&entity.id)?,
        }
        debug!(session_id = %self.id, entity_id = %entity.id, op = ?op, "Write performed");

        self.dispatch(post, &entity_type, entity)?;
        Ok(WriteOutcome::Written)
    }

    fn dispatch(
        &self,
        kind: EventKind,
        entity_type: &EntityType,
        entity: &mut Entity,
    ) -> EngineResult<Verdict> {
        let mut event = PersistenceEvent::new(kind, EntityAccess::new(entity_type, entity), self);
        self.dispatcher.dispatch(&mut event)
    }
}
