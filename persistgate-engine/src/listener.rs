use crate::{EventKind, ListenerError, PersistenceEvent};

/// A participant in the persistence event pipeline.
///
/// The dispatcher indexes listeners by [`supported_kinds`](Self::supported_kinds)
/// when they are registered, so the set must not change afterwards.
pub trait PersistenceListener: Send + Sync {
    /// Name used in logs and in veto reports.
    fn name(&self) -> &str;

    /// Event kinds this listener wants to receive. Must not be empty.
    fn supported_kinds(&self) -> &[EventKind];

    fn supports(&self, kind: EventKind) -> bool {
        self.supported_kinds().contains(&kind)
    }

    /// Handles an event.
    ///
    /// For pre-write kinds, `Ok(false)` vetoes the write. For post-write
    /// kinds the returned flag is ignored. `Err` aborts the whole operation.
    fn on_event(&self, event: &mut PersistenceEvent<'_>) -> Result<bool, ListenerError>;
}
