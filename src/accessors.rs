//! Live data accessors.
//!
//! One accessor per selector, re-resolved against the store's current state
//! on every read. Nothing is cached.

use serde_json::Value;

use crate::error::Result;
use crate::lookup::lookup;
use crate::selectors::SelectorMap;
use crate::store::StoreHandle;

/// Read-only view of a model's data through its (rewritten) selectors.
#[derive(Debug, Clone, Copy)]
pub struct DataAccessors<'a> {
    namespace: &'a str,
    selectors: &'a SelectorMap,
    store: &'a StoreHandle,
}

impl<'a> DataAccessors<'a> {
    pub(crate) fn new(namespace: &'a str, selectors: &'a SelectorMap, store: &'a StoreHandle) -> Self {
        Self {
            namespace,
            selectors,
            store,
        }
    }

    /// Current value of the selector named `key`.
    ///
    /// `None` when the selector is unknown, resolves to nothing, or no store
    /// is bound yet.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.try_get(key).ok().flatten()
    }

    /// Like [`DataAccessors::get`], but reports a missing store.
    pub fn try_get(&self, key: &str) -> Result<Option<Value>> {
        let Some(selector) = self.selectors.get(key) else {
            return Ok(None);
        };
        let state = self.store.get_state()?;
        Ok(lookup(&state, selector, None))
    }

    /// Names of all accessors.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        self.selectors.keys().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.selectors.contains_key(key)
    }

    /// The model's whole current slice of the global state.
    pub fn all(&self) -> Option<Value> {
        let state = self.store.get_state().ok()?;
        state.get(self.namespace).cloned()
    }
}
