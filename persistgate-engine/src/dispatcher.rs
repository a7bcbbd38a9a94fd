//! Routes persistence events to listeners and aggregates their verdicts.

use crate::{EngineError, EngineResult, EventKind, PersistenceEvent, PersistenceListener};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Aggregate decision for one dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The write may go ahead.
    Proceed,
    /// A listener rejected a pre-write event.
    Vetoed { listener: String },
}

impl Verdict {
    pub fn is_proceed(&self) -> bool {
        matches!(self, Verdict::Proceed)
    }

    pub fn is_vetoed(&self) -> bool {
        !self.is_proceed()
    }
}

/// Ordered set of listeners, indexed by the event kinds they declare.
///
/// Listeners fire in registration order. There is no priority mechanism.
#[derive(Default)]
pub struct Dispatcher {
    listeners: Vec<Arc<dyn PersistenceListener>>,
    routes: HashMap<EventKind, Vec<usize>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener. Fails if it declares no event kinds.
    pub fn register(&mut self, listener: Arc<dyn PersistenceListener>) -> EngineResult<()> {
        let kinds = listener.supported_kinds();
        if kinds.is_empty() {
            return Err(EngineError::NoSupportedKinds(listener.name().to_string()));
        }

        let index = self.listeners.len();
        for kind in kinds {
            let route = self.routes.entry(*kind).or_default();
            if route.last() != Some(&index) {
                route.push(index);
            }
        }
        info!(listener = listener.name(), kinds = ?kinds, "Persistence listener registered");
        self.listeners.push(listener);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_listener(mut self, listener: Arc<dyn PersistenceListener>) -> EngineResult<Self> {
        self.register(listener)?;
        Ok(self)
    }

    /// Delivers `event` to every listener registered for its kind.
    ///
    /// On a pre-write kind the first `false` stops dispatch and vetoes the
    /// write, and a listener error aborts dispatch. On a post-write kind
    /// return values are ignored and every listener runs even if an earlier
    /// one failed; the first error is returned once all have been called.
    pub fn dispatch(&self, event: &mut PersistenceEvent<'_>) -> EngineResult<Verdict> {
        let kind = event.kind();
        let Some(route) = self.routes.get(&kind) else {
            debug!(kind = %kind, "No listeners for event kind");
            return Ok(Verdict::Proceed);
        };

        let mut first_error: Option<EngineError> = None;
        for &index in route {
            let listener = &self.listeners[index];
            debug!(
                listener = listener.name(),
                kind = %kind,
                entity_id = %event.entity_id(),
                "Dispatching persistence event"
            );
            let accepted = match listener.on_event(event) {
                Ok(accepted) => accepted,
                Err(source) => {
                    let err = EngineError::Listener {
                        listener: listener.name().to_string(),
                        kind,
                        source,
                    };
                    if kind.is_veto_capable() {
                        return Err(err);
                    }
                    warn!(
                        listener = listener.name(),
                        kind = %kind,
                        entity_id = %event.entity_id(),
                        error = %err,
                        "Post-write listener failed"
                    );
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                    continue;
                }
            };

            if kind.is_veto_capable() && !accepted {
                warn!(
                    listener = listener.name(),
                    kind = %kind,
                    entity_type = event.entity_type().name(),
                    entity_id = %event.entity_id(),
                    "Write vetoed"
                );
                return Ok(Verdict::Vetoed {
                    listener: listener.name().to_string(),
                });
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(Verdict::Proceed),
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Number of listeners that receive `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.routes.get(&kind).map_or(0, Vec::len)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.listeners.iter().map(|l| l.name()).collect();
        f.debug_struct("Dispatcher").field("listeners", &names).finish()
    }
}
