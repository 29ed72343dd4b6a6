//! Declarative action definitions.
//!
//! A definition is a leaf (it carries a reducer or a deferred handler), a
//! namespace (it carries children), or both at once.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::action::record::Action;
use crate::store::{Deferred, Store};

/// Pure state transition for one action type.
pub type ReducerFn = dyn Fn(Value, &Action) -> Value + Send + Sync;

/// Handler run by the store's thunk middleware. Receives the collected
/// arguments and the store; work done before returning happens at dispatch
/// time, the returned future carries the rest.
pub type DeferredFn = dyn Fn(Action, Arc<dyn Store>) -> Deferred + Send + Sync;

/// Nested action declarations keyed by name, in declaration order.
///
/// Order matters: when two leaves resolve to the same action type, the one
/// declared last wins. Re-inserting an existing key replaces its definition
/// in place.
#[derive(Clone, Default)]
pub struct ActionMap {
    entries: Vec<(String, ActionDef)>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `def` under `key`, returning the definition it replaced.
    pub fn insert(&mut self, key: impl Into<String>, def: ActionDef) -> Option<ActionDef> {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, def)),
            None => {
                self.entries.push((key, def));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ActionDef> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, def)| def)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionDef)> {
        self.entries.iter().map(|(key, def)| (key.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ActionDef)> for ActionMap {
    fn from_iter<I: IntoIterator<Item = (K, ActionDef)>>(iter: I) -> Self {
        let mut map = ActionMap::new();
        for (key, def) in iter {
            map.insert(key, def);
        }
        map
    }
}

impl fmt::Debug for ActionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// What makes a definition actionable.
#[derive(Clone)]
pub enum Handler {
    Reducer(Arc<ReducerFn>),
    Deferred(Arc<DeferredFn>),
}

/// One node of an action map.
#[derive(Clone, Default)]
pub struct ActionDef {
    pub(crate) params: Vec<String>,
    pub(crate) handler: Option<Handler>,
    pub(crate) action_type: Option<String>,
    pub(crate) private: bool,
    pub(crate) children: ActionMap,
}

impl ActionDef {
    /// A node holding only nested actions.
    pub fn namespace() -> Self {
        Self::default()
    }

    /// A leaf whose dispatched record is folded into state by `reducer`.
    pub fn reducer<F>(reducer: F) -> Self
    where
        F: Fn(Value, &Action) -> Value + Send + Sync + 'static,
    {
        Self {
            handler: Some(Handler::Reducer(Arc::new(reducer))),
            ..Self::default()
        }
    }

    /// A leaf that runs `handler` through the store's thunk middleware.
    pub fn deferred<F>(handler: F) -> Self
    where
        F: Fn(Action, Arc<dyn Store>) -> Deferred + Send + Sync + 'static,
    {
        Self {
            handler: Some(Handler::Deferred(Arc::new(handler))),
            ..Self::default()
        }
    }

    /// Alias of [`ActionDef::deferred`].
    pub fn thunk<F>(handler: F) -> Self
    where
        F: Fn(Action, Arc<dyn Store>) -> Deferred + Send + Sync + 'static,
    {
        Self::deferred(handler)
    }

    /// Ordered positional argument names.
    pub fn params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Single positional argument.
    pub fn param(self, param: impl Into<String>) -> Self {
        self.params([param.into()])
    }

    /// Explicit wire-level type instead of the derived `<path>/<key>`.
    ///
    /// Children are not affected: they keep deriving their types from the
    /// key path (`<path>/<key>/<child>`).
    pub fn action_type(mut self, action_type: impl Into<String>) -> Self {
        self.action_type = Some(action_type.into());
        self
    }

    /// Keep this leaf out of the public action tree.
    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    /// Nest a sub-action under `key`.
    pub fn child(mut self, key: impl Into<String>, def: ActionDef) -> Self {
        self.children.insert(key.into(), def);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.handler.is_some()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

impl fmt::Debug for ActionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handler = match &self.handler {
            Some(Handler::Reducer(_)) => "reducer",
            Some(Handler::Deferred(_)) => "deferred",
            None => "none",
        };
        f.debug_struct("ActionDef")
            .field("handler", &handler)
            .field("params", &self.params)
            .field("action_type", &self.action_type)
            .field("private", &self.private)
            .field("children", &self.children)
            .finish()
    }
}
