//! Shared fixtures for validation tests.

#![allow(dead_code)]

use persistgate_engine::{Dispatcher, MemoryDatastore, Session};
use persistgate_model::{
    Entity, EntityType, MappingContext, PropertyDef, ValidationResult, Validator, ValidatorFault,
    ValidatorRegistry,
};
use persistgate_validation::ValidatingListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `Account` with a `SavingsAccount` subtype, plus an unvalidated `Note`.
pub fn mapping() -> Arc<MappingContext> {
    let mut mapping = MappingContext::new();
    let account = mapping
        .add(EntityType::new(
            "Account",
            vec![PropertyDef::number("balance"), PropertyDef::text("owner")],
        ))
        .unwrap();
    mapping
        .add(EntityType::new("SavingsAccount", vec![PropertyDef::decimal("rate")]).extending(account))
        .unwrap();
    mapping
        .add(EntityType::new("Note", vec![PropertyDef::text("title")]))
        .unwrap();
    Arc::new(mapping)
}

/// Requires `balance >= 0`; counts how often it runs.
#[derive(Default)]
pub struct NonNegativeBalance {
    pub calls: AtomicUsize,
}

impl NonNegativeBalance {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Validator for NonNegativeBalance {
    fn validate(&self, entity: &Entity) -> Result<ValidationResult, ValidatorFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut result = ValidationResult::new();
        if let Some(balance) = entity.get_number("/balance") {
            if balance < 0.0 {
                result.reject("balance", entity.data["balance"].clone(), "must not be negative");
            }
        }
        Ok(result)
    }
}

/// Always faults.
pub struct Broken;

impl Validator for Broken {
    fn validate(&self, _: &Entity) -> Result<ValidationResult, ValidatorFault> {
        Err(ValidatorFault::new("rules service unreachable"))
    }
}

pub struct Harness {
    pub session: Session,
    pub store: Arc<MemoryDatastore>,
    pub validator: Arc<NonNegativeBalance>,
}

/// A session whose dispatcher holds `listener`, with `NonNegativeBalance`
/// registered for `Account` in `registry`.
pub fn harness_with(build: impl FnOnce(Arc<ValidatorRegistry>) -> ValidatingListener) -> Harness {
    init_tracing();
    let validator = Arc::new(NonNegativeBalance::default());
    let mut registry = ValidatorRegistry::new();
    registry.register("Account", validator.clone());

    let listener = build(Arc::new(registry));
    let dispatcher = Dispatcher::new().with_listener(Arc::new(listener)).unwrap();
    let store = Arc::new(MemoryDatastore::new());
    let session = Session::new(mapping(), Arc::new(dispatcher), store.clone());
    Harness {
        session,
        store,
        validator,
    }
}

pub fn harness() -> Harness {
    harness_with(ValidatingListener::new)
}

pub fn account(balance: i64) -> Entity {
    Entity::new("Account", serde_json::json!({"balance": balance, "owner": "alice"}))
}
