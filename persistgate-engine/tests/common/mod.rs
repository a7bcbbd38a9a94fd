//! Shared fixtures for engine tests.

#![allow(dead_code)]

use persistgate_engine::{
    Dispatcher, EventKind, ListenerError, MemoryDatastore, PersistenceEvent, PersistenceListener,
    Session,
};
use persistgate_model::{EntityType, MappingContext, PropertyDef};
use std::sync::{Arc, Mutex};

/// Routes engine logs to the test harness when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn account_mapping() -> Arc<MappingContext> {
    let mut mapping = MappingContext::new();
    mapping
        .add(EntityType::new(
            "Account",
            vec![PropertyDef::number("balance"), PropertyDef::text("owner")],
        ))
        .unwrap();
    Arc::new(mapping)
}

pub fn session_with(dispatcher: Dispatcher) -> (Session, Arc<MemoryDatastore>) {
    init_tracing();
    let store = Arc::new(MemoryDatastore::new());
    let session = Session::new(account_mapping(), Arc::new(dispatcher), store.clone());
    (session, store)
}

/// Appends `"<name>:<kind>"` to a shared log and returns a fixed decision.
pub struct Recording {
    pub name: &'static str,
    pub kinds: Vec<EventKind>,
    pub decision: bool,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl Recording {
    pub fn new(
        name: &'static str,
        kinds: &[EventKind],
        decision: bool,
        log: &Arc<Mutex<Vec<String>>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            kinds: kinds.to_vec(),
            decision,
            log: Arc::clone(log),
        })
    }
}

impl PersistenceListener for Recording {
    fn name(&self) -> &str {
        self.name
    }

    fn supported_kinds(&self) -> &[EventKind] {
        &self.kinds
    }

    fn on_event(&self, event: &mut PersistenceEvent<'_>) -> Result<bool, ListenerError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, event.kind()));
        Ok(self.decision)
    }
}

pub fn new_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().unwrap().clone()
}
