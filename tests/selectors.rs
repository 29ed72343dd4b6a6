use modelkit::lookup::lookup;
use modelkit::selectors::{rewrite_selectors, SelectorMap};
use modelkit::Selector;
use serde_json::{json, Value};

fn seed_selectors() -> SelectorMap {
    let mut selectors = SelectorMap::new();
    selectors.insert("color".into(), Selector::path("prefs.color"));
    selectors.insert("first".into(), Selector::path("items.0"));
    selectors.insert(
        "count".into(),
        Selector::func(|state: &Value| state.get("items").and_then(Value::as_array).map(|a| json!(a.len()))),
    );
    selectors
}

#[test]
fn rewritten_map_reads_the_same_values_from_global_state() {
    let raw = seed_selectors();
    let rewritten = rewrite_selectors(&raw, "model$_shop");

    let own = json!({"prefs": {"color": "green"}, "items": ["a", "b"]});
    let global = json!({"model$_shop": own.clone(), "prefs": {"color": "wrong"}});

    for (key, selector) in &raw {
        assert_eq!(
            lookup(&own, selector, None),
            lookup(&global, &rewritten[key], None),
            "selector {key}"
        );
    }
    assert_eq!(lookup(&global, &rewritten["count"], None), Some(json!(2)));
}

#[test]
fn rewriting_leaves_the_input_untouched() {
    let raw = seed_selectors();
    let _ = rewrite_selectors(&raw, "model$_shop");
    assert_eq!(raw["color"].as_path(), Some("prefs.color"));
}

#[test]
fn already_prefixed_paths_are_kept() {
    let mut raw = SelectorMap::new();
    raw.insert("color".into(), Selector::path("model$_shop.prefs.color"));
    let rewritten = rewrite_selectors(&raw, "model$_shop");
    assert_eq!(rewritten["color"].as_path(), Some("model$_shop.prefs.color"));
}

#[test]
fn missing_slice_resolves_to_none() {
    let rewritten = rewrite_selectors(&seed_selectors(), "model$_shop");
    let global = json!({});
    assert_eq!(lookup(&global, &rewritten["color"], None), None);
    assert_eq!(lookup(&global, &rewritten["count"], None), None);
}
