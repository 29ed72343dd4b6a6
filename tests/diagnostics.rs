//! Configuration warnings reach the tracing pipeline.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use modelkit::{
    Action, ActionDef, CollisionPolicy, CompilerConfig, ModelCompiler, ModelOptions, ModelSeed,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    fields: BTreeMap<String, String>,
}

/// Layer that keeps every event it sees.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<CapturedEvent>>>);

#[derive(Default)]
struct FieldCollector(BTreeMap<String, String>);

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

impl<S: Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut collector = FieldCollector::default();
        event.record(&mut collector);
        self.0.lock().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: collector.0,
        });
    }
}

/// Run `f` under a capturing subscriber and return the WARN events it emitted.
fn warnings_during(f: impl FnOnce()) -> Vec<CapturedEvent> {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);

    let warnings: Vec<CapturedEvent> = capture
        .0
        .lock()
        .iter()
        .filter(|event| event.level == Level::WARN)
        .cloned()
        .collect();
    warnings
}

fn set_color(color: &'static str) -> ActionDef {
    ActionDef::reducer(move |state: Value, _: &Action| modelkit::with_path(&state, "color", json!(color)))
}

fn colliding_seed(name: &str) -> ModelSeed {
    ModelSeed::new(name)
        .initial_state(json!({}))
        .action("first", set_color("first").action_type("SAME"))
        .action("second", set_color("second").action_type("SAME"))
}

fn compiler_with(policy: CollisionPolicy) -> ModelCompiler {
    ModelCompiler::with_config(CompilerConfig {
        action_type_collisions: policy,
        ..CompilerConfig::default()
    })
}

#[test]
fn duplicate_action_type_warns_once_under_warn_policy() {
    let compiler = compiler_with(CollisionPolicy::Warn);
    let warnings = warnings_during(|| {
        compiler.build(colliding_seed("loud")).unwrap();
    });

    assert_eq!(warnings.len(), 1, "{warnings:?}");
    let fields = &warnings[0].fields;
    assert_eq!(fields.get("model").map(String::as_str), Some("model$_loud"));
    assert_eq!(fields.get("action_type").map(String::as_str), Some("SAME"));
}

#[test]
fn duplicate_action_type_is_silent_under_ignore_policy() {
    let compiler = compiler_with(CollisionPolicy::Ignore);
    let warnings = warnings_during(|| {
        compiler.build(colliding_seed("quiet")).unwrap();
    });
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn distinct_action_types_do_not_warn() {
    let compiler = compiler_with(CollisionPolicy::Warn);
    let warnings = warnings_during(|| {
        compiler
            .build(
                ModelSeed::new("calm")
                    .initial_state(json!({}))
                    .action("a", set_color("a"))
                    .action("b", set_color("b")),
            )
            .unwrap();
    });
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn non_string_props_namespace_warns() {
    let mut options = None;
    let warnings = warnings_during(|| {
        options = Some(ModelOptions::from_value(&json!({"propsNamespace": 7})));
    });

    assert_eq!(options, Some(ModelOptions::default()));
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert_eq!(warnings[0].fields.get("value").map(String::as_str), Some("7"));
}

#[test]
fn string_props_namespace_does_not_warn() {
    let mut options = None;
    let warnings = warnings_during(|| {
        options = Some(ModelOptions::from_value(&json!({"propsNamespace": "prefs"})));
    });
    assert!(warnings.is_empty(), "{warnings:?}");
    assert_eq!(options.and_then(|o| o.props_namespace).as_deref(), Some("prefs"));
}
