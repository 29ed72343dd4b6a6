//! Path lookup against a nested state tree.
//!
//! A selector is either a dotted path (`"prefs.color"`) or a function of the
//! state. Lookups never fail: a missing segment, a non-container in the
//! middle of a path, or a panicking selector function all resolve to `None`.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::{Map, Value};

/// Signature of a function selector.
pub type SelectorFn = dyn Fn(&Value) -> Option<Value> + Send + Sync;

/// A read-only projection from state to a derived value.
#[derive(Clone)]
pub enum Selector {
    /// Dotted path walked segment by segment. Numeric segments index arrays.
    Path(String),
    /// Arbitrary projection.
    Func(Arc<SelectorFn>),
}

impl Selector {
    pub fn path(path: impl Into<String>) -> Self {
        Selector::Path(path.into())
    }

    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        Selector::Func(Arc::new(f))
    }

    pub fn as_path(&self) -> Option<&str> {
        match self {
            Selector::Path(path) => Some(path),
            Selector::Func(_) => None,
        }
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Selector::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl From<&str> for Selector {
    fn from(path: &str) -> Self {
        Selector::Path(path.to_string())
    }
}

impl From<String> for Selector {
    fn from(path: String) -> Self {
        Selector::Path(path)
    }
}

/// Resolve `selector` against `root`, optionally scoped under `namespace`.
///
/// With a namespace, a path selector is prefixed with `namespace.` and a
/// function selector receives `root[namespace]` (`Null` when absent).
pub fn lookup(root: &Value, selector: &Selector, namespace: Option<&str>) -> Option<Value> {
    match selector {
        Selector::Path(path) => match namespace {
            Some(ns) if !ns.is_empty() => peek(root, &format!("{}.{}", ns, path)).cloned(),
            _ => peek(root, path).cloned(),
        },
        Selector::Func(f) => {
            let scoped = match namespace {
                Some(ns) if !ns.is_empty() => root.get(ns).unwrap_or(&Value::Null),
                _ => root,
            };
            call_isolated(f.as_ref(), scoped)
        }
    }
}

/// Walk a dotted path, borrowing the value at its end.
pub fn peek<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, step)
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn call_isolated(f: &SelectorFn, state: &Value) -> Option<Value> {
    match panic::catch_unwind(AssertUnwindSafe(|| f(state))) {
        Ok(value) => value,
        Err(_) => {
            tracing::debug!("Selector function panicked; resolving to None");
            None
        }
    }
}

/// Return a copy of `root` with `value` written at `path`.
///
/// Missing or non-object intermediate segments are replaced by empty
/// objects. The input is never modified.
pub fn with_path(root: &Value, path: &str, value: Value) -> Value {
    let mut result = root.clone();
    assign(&mut result, path, value);
    result
}

fn assign(target: &mut Value, path: &str, value: Value) {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(map) = target else {
        return;
    };

    match rest {
        None => {
            map.insert(head.to_string(), value);
        }
        Some(rest) => {
            let child = map.entry(head.to_string()).or_insert(Value::Null);
            assign(child, rest, value);
        }
    }
}
