mod common;

use std::sync::Arc;
use std::time::Duration;

use common::single_model;
use modelkit::{with_path, Action, ActionDef, Command, ModelSeed, Store};
use serde_json::{json, Value};

fn set_status(status: &'static str) -> ActionDef {
    ActionDef::reducer(move |state: Value, _: &Action| with_path(&state, "status", json!(status)))
}

fn loader_seed() -> ModelSeed {
    ModelSeed::new("loader")
        .initial_state(json!({"status": "idle", "items": []}))
        .selector("status", "status")
        .selector("items", "items")
        .action("started", set_status("loading").action_type("loader/started"))
        .action(
            "loaded",
            ActionDef::reducer(|state: Value, action: &Action| {
                let state = with_path(&state, "status", json!("done"));
                with_path(&state, "items", action.get("items").cloned().unwrap_or(json!([])))
            })
            .action_type("loader/loaded")
            .param("items"),
        )
        .action(
            "fetch",
            ActionDef::deferred(|args: Action, store: Arc<dyn Store>| {
                store.dispatch(Command::Record(Action::new("loader/started")));
                let count = args.get("count").and_then(Value::as_u64).unwrap_or(0);
                Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    let items: Vec<Value> = (1..=count).map(Value::from).collect();
                    store.dispatch(Command::Record(
                        Action::new("loader/loaded").with_field("items", Value::from(items.clone())),
                    ));
                    Some(json!({"fetched": items.len()}))
                })
            })
            .param("count"),
        )
}

#[tokio::test]
async fn synchronous_part_runs_at_dispatch_time() {
    let (_compiler, model, store) = single_model(loader_seed());

    let pending = model
        .actions()
        .invoke("fetch", &[json!(3)])
        .unwrap()
        .expect("deferred actions hand back a future");

    assert_eq!(model.data().get("status"), Some(json!("loading")));
    assert_eq!(store.dispatched_types(), vec!["loader/started"]);

    let result = pending.await;

    assert_eq!(result, Some(json!({"fetched": 3})));
    assert_eq!(model.data().get("status"), Some(json!("done")));
    assert_eq!(model.data().get("items"), Some(json!([1, 2, 3])));
    assert_eq!(store.dispatched_types(), vec!["loader/started", "loader/loaded"]);
}

#[test]
fn deferred_leaf_has_no_reducer_entry() {
    let (_compiler, model, _store) = single_model(loader_seed());

    let fetch = model.actions().get("fetch").and_then(|node| node.creator()).unwrap();
    assert!(fetch.is_deferred());
    assert_eq!(fetch.action_type(), None);
    assert_eq!(
        model.dispatch_table().action_types(),
        vec!["loader/loaded", "loader/started"]
    );
}

#[tokio::test]
async fn handler_receives_placeholder_args() {
    let seen = Arc::new(parking_lot::Mutex::new(None));
    let captured = Arc::clone(&seen);
    let (_compiler, model, _store) = single_model(
        ModelSeed::new("args").action(
            "probe",
            ActionDef::deferred(move |args: Action, _store| {
                *captured.lock() = Some(args);
                Box::pin(async { None::<Value> })
            })
            .params(["a", "b"]),
        ),
    );

    let pending = model
        .actions()
        .invoke("probe", &[json!(1), json!("two")])
        .unwrap()
        .unwrap();
    assert_eq!(pending.await, None);

    let args = seen.lock().clone().unwrap();
    assert!(args.is_placeholder());
    assert_eq!(args.get("a"), Some(&json!(1)));
    assert_eq!(args.get("b"), Some(&json!("two")));
}

#[test]
fn plain_actions_return_nothing() {
    let (_compiler, model, store) = single_model(loader_seed());

    let result = model.actions().invoke("started", &[]).unwrap();
    assert!(result.is_none());
    assert_eq!(store.dispatched().len(), 1);
}
