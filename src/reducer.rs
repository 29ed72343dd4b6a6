//! Reducers: the only place state transitions happen.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;

use crate::action::{Action, ReducerFn};
use crate::model::Model;

/// Type of the action used to ask a reducer for its initial state.
pub const INIT_TYPE: &str = "@@modelkit/INIT";

/// Transforms state based on dispatched actions.
///
/// Must be pure: `(State, Action) -> State`. A `None` state means the store
/// has nothing yet and the reducer supplies its initial state.
pub trait Reducer: Send + Sync {
    fn reduce(&self, state: Option<Value>, action: &Action) -> Value;

    /// State produced before any action has been handled.
    fn init(&self) -> Value {
        self.reduce(None, &Action::new(INIT_TYPE))
    }
}

/// Reducers keyed by namespaced model name, ready for the store's combiner.
pub type ReducerMap = BTreeMap<String, Arc<dyn Reducer>>;

/// Flat action-type -> reducer table compiled from a model's action map.
///
/// Unmatched types hand the incoming state back untouched.
pub struct DispatchTable {
    initial_state: Value,
    handlers: HashMap<String, Arc<ReducerFn>>,
}

impl DispatchTable {
    pub fn new(initial_state: Value) -> Self {
        Self {
            initial_state,
            handlers: HashMap::new(),
        }
    }

    /// Install `reducer` for `action_type`. Returns `true` when it replaced
    /// an earlier registration.
    pub(crate) fn register(&mut self, action_type: &str, reducer: Arc<ReducerFn>) -> bool {
        self.handlers
            .insert(action_type.to_string(), reducer)
            .is_some()
    }

    pub fn handles(&self, action_type: &str) -> bool {
        self.handlers.contains_key(action_type)
    }

    /// Registered action types, sorted.
    pub fn action_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn initial_state(&self) -> &Value {
        &self.initial_state
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Reducer for DispatchTable {
    fn reduce(&self, state: Option<Value>, action: &Action) -> Value {
        let state = state.unwrap_or_else(|| self.initial_state.clone());
        match self.handlers.get(&action.action_type) {
            Some(handler) => handler(state, action),
            None => state,
        }
    }
}

impl std::fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchTable")
            .field("initial_state", &self.initial_state)
            .field("action_types", &self.action_types())
            .finish()
    }
}

/// Map every model's namespaced name to its reducer.
///
/// ```ignore
/// let reducers = build_reducer_map(&[&geo, &reddit]);
/// let store = MyStore::new(reducers);
/// compiler.bind_store(store);
/// ```
pub fn build_reducer_map(models: &[&Model]) -> ReducerMap {
    models
        .iter()
        .map(|model| (model.name().to_string(), model.reducer()))
        .collect()
}
