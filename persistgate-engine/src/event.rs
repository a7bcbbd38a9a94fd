//! Lifecycle events raised around physical writes.
//!
//! Events are created by the [`Session`] immediately before or after a
//! write, dispatched synchronously, and dropped when dispatch returns. They
//! are never stored or queued.

use crate::Session;
use persistgate_model::{Entity, EntityAccess, EntityType};
use persistgate_types::EntityId;
use std::fmt;

/// The lifecycle moment an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PreInsert,
    PreUpdate,
    PreDelete,
    PostInsert,
    PostUpdate,
    PostDelete,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::PreInsert,
        EventKind::PreUpdate,
        EventKind::PreDelete,
        EventKind::PostInsert,
        EventKind::PostUpdate,
        EventKind::PostDelete,
    ];

    /// Pre-write kinds, where a listener may block the write.
    pub const fn is_veto_capable(self) -> bool {
        matches!(
            self,
            EventKind::PreInsert | EventKind::PreUpdate | EventKind::PreDelete
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::PreInsert => "pre-insert",
            EventKind::PreUpdate => "pre-update",
            EventKind::PreDelete => "pre-delete",
            EventKind::PostInsert => "post-insert",
            EventKind::PostUpdate => "post-update",
            EventKind::PostDelete => "post-delete",
        };
        f.write_str(s)
    }
}

/// One lifecycle moment for one entity in one session.
///
/// The [`EntityAccess`] borrows the live entity for the duration of
/// dispatch; the borrow checker keeps listeners from retaining it.
pub struct PersistenceEvent<'a> {
    kind: EventKind,
    access: EntityAccess<'a>,
    session: &'a Session,
}

impl<'a> PersistenceEvent<'a> {
    pub fn new(kind: EventKind, access: EntityAccess<'a>, session: &'a Session) -> Self {
        Self {
            kind,
            access,
            session,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn entity_type(&self) -> &EntityType {
        self.access.entity_type()
    }

    pub fn entity_id(&self) -> EntityId {
        self.access.identifier()
    }

    pub fn entity(&self) -> &Entity {
        self.access.entity()
    }

    pub fn access(&self) -> &EntityAccess<'a> {
        &self.access
    }

    pub fn access_mut(&mut self) -> &mut EntityAccess<'a> {
        &mut self.access
    }

    /// The session that raised this event.
    pub fn session(&self) -> &'a Session {
        self.session
    }
}

impl fmt::Debug for PersistenceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceEvent")
            .field("kind", &self.kind)
            .field("entity_type", &self.entity_type().name())
            .field("entity_id", &self.entity_id())
            .field("session", &self.session.id())
            .finish()
    }
}
