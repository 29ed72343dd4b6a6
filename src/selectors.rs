//! Selector rewriting.
//!
//! Selectors are written against a model's own slice (`"prefs.color"`,
//! `|s| s.get("userId")`), but the store keeps that slice under the model's
//! namespace in the global tree. Rewriting makes every selector work against
//! the global tree:
//!
//! ```text
//! ORIGINAL:  color = "prefs.color"
//! MODIFIED:  color = "<namespace>.prefs.color"
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::lookup::Selector;

/// Selectors keyed by name.
pub type SelectorMap = BTreeMap<String, Selector>;

/// Rewrite one selector to read from the global tree.
///
/// Path selectors already starting with `namespace.` are left alone.
pub fn rewrite_selector(selector: &Selector, namespace: &str) -> Selector {
    match selector {
        Selector::Path(path) => {
            let prefix = format!("{}.", namespace);
            if path.starts_with(&prefix) {
                Selector::Path(path.clone())
            } else {
                Selector::Path(prefix + path)
            }
        }
        Selector::Func(original) => {
            let original = Arc::clone(original);
            let namespace = namespace.to_string();
            Selector::func(move |global: &Value| {
                original(global.get(&namespace).unwrap_or(&Value::Null))
            })
        }
    }
}

/// Build a new map with every selector rewritten. The input is untouched.
pub fn rewrite_selectors(selectors: &SelectorMap, namespace: &str) -> SelectorMap {
    selectors
        .iter()
        .map(|(name, selector)| (name.clone(), rewrite_selector(selector, namespace)))
        .collect()
}
