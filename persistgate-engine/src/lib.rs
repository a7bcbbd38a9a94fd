//! Persistence event pipeline for persistgate.
//!
//! A [`Session`] is one unit of work. Every write it performs is bracketed
//! by a pair of [`PersistenceEvent`]s that the [`Dispatcher`] routes to the
//! registered [`PersistenceListener`]s:
//!
//! ```text
//! session.insert(entity)
//!   -> PreInsert  -> listeners (any `false` vetoes, short-circuits)
//!   -> Datastore::insert
//!   -> PostInsert -> listeners (return values ignored)
//! ```
//!
//! Listeners attach per-instance data to the session through its
//! [`AttributeStore`], keyed by entity identity, so nothing leaks into the
//! entity's own fields.

mod attributes;
mod datastore;
mod dispatcher;
mod error;
mod event;
mod listener;
mod session;

pub use attributes::{Attribute, AttributeKind, AttributeStore};
pub use datastore::{Datastore, MemoryDatastore};
pub use dispatcher::{Dispatcher, Verdict};
pub use error::{EngineError, EngineResult, ListenerError, StorageError, StorageResult};
pub use event::{EventKind, PersistenceEvent};
pub use listener::PersistenceListener;
pub use session::{Session, WriteOutcome};
