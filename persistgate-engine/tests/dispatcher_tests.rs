mod common;

use common::{Recording, entries, new_log, session_with};
use persistgate_engine::{
    Dispatcher, EngineError, EventKind, ListenerError, PersistenceEvent, PersistenceListener,
    Verdict,
};
use persistgate_model::Entity;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

const PRE_INSERT: &[EventKind] = &[EventKind::PreInsert];

// ── EventKind ────────────────────────────────────────────────────

#[test]
fn only_pre_kinds_can_veto() {
    let veto: Vec<_> = EventKind::ALL
        .into_iter()
        .filter(|k| k.is_veto_capable())
        .collect();
    assert_eq!(
        veto,
        vec![EventKind::PreInsert, EventKind::PreUpdate, EventKind::PreDelete]
    );
}

#[test]
fn kind_display() {
    assert_eq!(EventKind::PreInsert.to_string(), "pre-insert");
    assert_eq!(EventKind::PostDelete.to_string(), "post-delete");
}

// ── Registration ─────────────────────────────────────────────────

#[test]
fn register_rejects_listener_without_kinds() {
    let log = new_log();
    let mut dispatcher = Dispatcher::new();
    let err = dispatcher
        .register(Recording::new("mute", &[], true, &log))
        .unwrap_err();
    assert!(matches!(err, EngineError::NoSupportedKinds(ref n) if n == "mute"));
    assert!(dispatcher.is_empty());
}

#[test]
fn register_indexes_by_kind() {
    let log = new_log();
    let dispatcher = Dispatcher::new()
        .with_listener(Recording::new(
            "a",
            &[EventKind::PreInsert, EventKind::PreUpdate],
            true,
            &log,
        ))
        .unwrap()
        .with_listener(Recording::new("b", PRE_INSERT, true, &log))
        .unwrap();

    assert_eq!(dispatcher.len(), 2);
    assert_eq!(dispatcher.listener_count(EventKind::PreInsert), 2);
    assert_eq!(dispatcher.listener_count(EventKind::PreUpdate), 1);
    assert_eq!(dispatcher.listener_count(EventKind::PostDelete), 0);
    assert_eq!(format!("{dispatcher:?}"), r#"Dispatcher { listeners: ["a", "b"] }"#);
}

#[test]
fn duplicate_kinds_route_once() {
    let log = new_log();
    let dispatcher = Dispatcher::new()
        .with_listener(Recording::new(
            "dup",
            &[EventKind::PreInsert, EventKind::PreInsert],
            true,
            &log,
        ))
        .unwrap();
    assert_eq!(dispatcher.listener_count(EventKind::PreInsert), 1);
}

#[test]
fn supports_follows_declared_kinds() {
    let log = new_log();
    let listener = Recording::new("a", PRE_INSERT, true, &log);
    assert!(listener.supports(EventKind::PreInsert));
    assert!(!listener.supports(EventKind::PostInsert));
}

// ── Dispatch ─────────────────────────────────────────────────────

#[test]
fn listeners_fire_in_registration_order() {
    let log = new_log();
    let dispatcher = Dispatcher::new()
        .with_listener(Recording::new("first", PRE_INSERT, true, &log))
        .unwrap()
        .with_listener(Recording::new("second", PRE_INSERT, true, &log))
        .unwrap()
        .with_listener(Recording::new("post-only", &[EventKind::PostInsert], true, &log))
        .unwrap();
    let (session, _) = session_with(dispatcher);

    let mut e = Entity::new("Account", json!({"balance": 1}));
    let verdict = session.raise(EventKind::PreInsert, &mut e).unwrap();

    assert_eq!(verdict, Verdict::Proceed);
    assert_eq!(entries(&log), vec!["first:pre-insert", "second:pre-insert"]);
}

#[test]
fn reject_short_circuits_pre_events() {
    let log = new_log();
    let dispatcher = Dispatcher::new()
        .with_listener(Recording::new("l1", PRE_INSERT, true, &log))
        .unwrap()
        .with_listener(Recording::new("l2", PRE_INSERT, false, &log))
        .unwrap()
        .with_listener(Recording::new("l3", PRE_INSERT, true, &log))
        .unwrap();
    let (session, _) = session_with(dispatcher);

    let mut e = Entity::new("Account", json!({}));
    let verdict = session.raise(EventKind::PreInsert, &mut e).unwrap();

    assert_eq!(verdict, Verdict::Vetoed { listener: "l2".into() });
    assert!(verdict.is_vetoed());
    assert_eq!(entries(&log), vec!["l1:pre-insert", "l2:pre-insert"]);
}

#[test]
fn post_events_ignore_false_and_run_everyone() {
    let log = new_log();
    let post = &[EventKind::PostUpdate];
    let dispatcher = Dispatcher::new()
        .with_listener(Recording::new("l1", post, false, &log))
        .unwrap()
        .with_listener(Recording::new("l2", post, false, &log))
        .unwrap();
    let (session, _) = session_with(dispatcher);

    let mut e = Entity::new("Account", json!({}));
    let verdict = session.raise(EventKind::PostUpdate, &mut e).unwrap();

    assert!(verdict.is_proceed());
    assert_eq!(entries(&log), vec!["l1:post-update", "l2:post-update"]);
}

#[test]
fn no_listeners_means_proceed() {
    let (session, _) = session_with(Dispatcher::new());
    let mut e = Entity::new("Account", json!({}));
    assert!(session.raise(EventKind::PreDelete, &mut e).unwrap().is_proceed());
}

#[test]
fn unmapped_entity_is_lookup_error() {
    let (session, _) = session_with(Dispatcher::new());
    let mut e = Entity::new("Ghost", json!({}));
    let err = session.raise(EventKind::PreInsert, &mut e).unwrap_err();
    assert!(matches!(err, EngineError::Lookup(_)));
}

struct Failing(&'static [EventKind]);
impl PersistenceListener for Failing {
    fn name(&self) -> &str {
        "failing"
    }
    fn supported_kinds(&self) -> &[EventKind] {
        self.0
    }
    fn on_event(&self, _: &mut PersistenceEvent<'_>) -> Result<bool, ListenerError> {
        Err(ListenerError::Other("disk on fire".into()))
    }
}

#[test]
fn listener_error_aborts_dispatch() {
    let log = new_log();
    let dispatcher = Dispatcher::new()
        .with_listener(Arc::new(Failing(PRE_INSERT)))
        .unwrap()
        .with_listener(Recording::new("after", PRE_INSERT, true, &log))
        .unwrap();
    let (session, _) = session_with(dispatcher);

    let mut e = Entity::new("Account", json!({}));
    let err = session.raise(EventKind::PreInsert, &mut e).unwrap_err();

    match err {
        EngineError::Listener { listener, kind, .. } => {
            assert_eq!(listener, "failing");
            assert_eq!(kind, EventKind::PreInsert);
        }
        other => panic!("expected listener error, got {other:?}"),
    }
    assert!(entries(&log).is_empty());
}

#[test]
fn post_listener_error_still_runs_remaining_listeners() {
    let log = new_log();
    let dispatcher = Dispatcher::new()
        .with_listener(Arc::new(Failing(&[EventKind::PostUpdate])))
        .unwrap()
        .with_listener(Recording::new("after", &[EventKind::PostUpdate], true, &log))
        .unwrap();
    let (session, _) = session_with(dispatcher);

    let mut e = Entity::new("Account", json!({}));
    let err = session.raise(EventKind::PostUpdate, &mut e).unwrap_err();

    assert!(matches!(
        err,
        EngineError::Listener { ref listener, kind: EventKind::PostUpdate, .. } if listener == "failing"
    ));
    assert_eq!(entries(&log), vec!["after:post-update"]);
}

struct Stamping;
impl PersistenceListener for Stamping {
    fn name(&self) -> &str {
        "stamping"
    }
    fn supported_kinds(&self) -> &[EventKind] {
        PRE_INSERT
    }
    fn on_event(&self, event: &mut PersistenceEvent<'_>) -> Result<bool, ListenerError> {
        event.access_mut().set_property("owner", "system")?;
        Ok(true)
    }
}

struct OwnerReader {
    seen: std::sync::Mutex<Option<String>>,
}
impl PersistenceListener for OwnerReader {
    fn name(&self) -> &str {
        "reader"
    }
    fn supported_kinds(&self) -> &[EventKind] {
        PRE_INSERT
    }
    fn on_event(&self, event: &mut PersistenceEvent<'_>) -> Result<bool, ListenerError> {
        let owner = event.access().property("owner")?.as_str().map(String::from);
        *self.seen.lock().unwrap() = owner;
        Ok(true)
    }
}

#[test]
fn property_writes_are_visible_to_later_listeners() {
    let reader = Arc::new(OwnerReader {
        seen: std::sync::Mutex::new(None),
    });
    let dispatcher = Dispatcher::new()
        .with_listener(Arc::new(Stamping))
        .unwrap()
        .with_listener(reader.clone())
        .unwrap();
    let (session, _) = session_with(dispatcher);

    let mut e = Entity::new("Account", json!({}));
    session.raise(EventKind::PreInsert, &mut e).unwrap();

    assert_eq!(reader.seen.lock().unwrap().as_deref(), Some("system"));
    assert_eq!(e.get_str("/owner"), Some("system"));
}
