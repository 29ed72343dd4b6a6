//! Compiled models.
//!
//! A model is a named slice of the global state plus everything needed to
//! work with it: callable actions, a reducer for the store, selectors
//! rewritten for the global tree, live data accessors and scoped
//! subscriptions.

mod compiler;
mod registry;
mod seed;

pub use compiler::ModelCompiler;
pub use registry::ModelRegistry;
pub use seed::{ModelOptions, ModelSeed};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::accessors::DataAccessors;
use crate::action::{ActionTree, CompiledActions};
use crate::error::Result;
use crate::lookup::{lookup, Selector};
use crate::reducer::{DispatchTable, Reducer};
use crate::selectors::SelectorMap;
use crate::store::{StoreHandle, Unsubscribe};
use crate::subscribe::{subscribe_scoped, SubscribeOptions};

/// A compiled model. Immutable except for the one-time severing of its
/// private actions.
pub struct Model {
    name: String,
    raw_name: String,
    actions: ActionTree,
    private_actions: Mutex<Option<ActionTree>>,
    reducer: Arc<DispatchTable>,
    selectors: SelectorMap,
    raw_selectors: SelectorMap,
    options: ModelOptions,
    store: StoreHandle,
    next_id: AtomicU64,
}

impl Model {
    fn assemble(
        name: String,
        raw_name: String,
        compiled: CompiledActions,
        selectors: SelectorMap,
        raw_selectors: SelectorMap,
        options: ModelOptions,
        store: StoreHandle,
    ) -> Self {
        let private_actions = compiled.has_private.then_some(compiled.private);
        Self {
            name,
            raw_name,
            actions: compiled.public,
            private_actions: Mutex::new(private_actions),
            reducer: Arc::new(compiled.table),
            selectors,
            raw_selectors,
            options,
            store,
            next_id: AtomicU64::new(0),
        }
    }

    /// Key of this model's slice in the global state tree.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as given in the seed.
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Public action tree.
    pub fn actions(&self) -> &ActionTree {
        &self.actions
    }

    /// Hand out the private action tree. Only the first call returns it;
    /// afterwards (or when the model has no private actions) this is `None`.
    pub fn sever_private_actions(&self) -> Option<ActionTree> {
        let severed = self.private_actions.lock().take();
        if severed.is_some() {
            tracing::debug!(model = %self.name, "Severed private actions");
        }
        severed
    }

    /// Whether private actions are still held by the model.
    pub fn has_private_actions(&self) -> bool {
        self.private_actions.lock().is_some()
    }

    /// Reducer for this model's slice, to be combined by the store.
    pub fn reducer(&self) -> Arc<dyn Reducer> {
        self.reducer.clone()
    }

    /// The compiled action-type table behind [`Model::reducer`].
    pub fn dispatch_table(&self) -> &DispatchTable {
        &self.reducer
    }

    /// Selectors rewritten to read from the global state tree.
    pub fn selectors(&self) -> &SelectorMap {
        &self.selectors
    }

    pub fn selector(&self, name: &str) -> Option<&Selector> {
        self.selectors.get(name)
    }

    /// Selectors as declared in the seed, relative to the model's slice.
    pub fn raw_selectors(&self) -> &SelectorMap {
        &self.raw_selectors
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Live accessors, one per selector.
    pub fn data(&self) -> DataAccessors<'_> {
        DataAccessors::new(&self.name, &self.selectors, &self.store)
    }

    /// The model's whole current slice of state.
    pub fn all_data(&self) -> Option<Value> {
        self.data().all()
    }

    /// Subscribe to a selector relative to this model's slice.
    ///
    /// Path selectors get the model's name prepended and function selectors
    /// receive only the slice, so pass the *raw* form (`"prefs.color"`), not
    /// one of [`Model::selectors`].
    pub fn subscribe<F>(
        &self,
        selector: impl Into<Selector>,
        callback: F,
        options: SubscribeOptions,
    ) -> Result<Unsubscribe>
    where
        F: Fn(Option<&Value>, Option<&Value>) + Send + Sync + 'static,
    {
        subscribe_scoped(
            &self.store,
            selector.into(),
            Some(self.name.clone()),
            callback,
            options,
        )
    }

    /// Props for a view layer: every raw selector evaluated against this
    /// model's slice of `global`, nested under the `props_namespace` option
    /// when set. Unresolved selectors map to `null`.
    pub fn props(&self, global: &Value) -> Value {
        let slice = global.get(&self.name).unwrap_or(&Value::Null);
        let props: Map<String, Value> = self
            .raw_selectors
            .iter()
            .map(|(key, selector)| {
                let value = lookup(slice, selector, None).unwrap_or(Value::Null);
                (key.clone(), value)
            })
            .collect();

        match &self.options.props_namespace {
            Some(namespace) => {
                let mut nested = Map::new();
                nested.insert(namespace.clone(), Value::Object(props));
                Value::Object(nested)
            }
            None => Value::Object(props),
        }
    }

    /// A fresh id scoped to this model (`"<name>-1"`, `"<name>-2"`, ...).
    pub fn new_id(&self) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.name, id)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("actions", &self.actions)
            .field("has_private_actions", &self.has_private_actions())
            .field("reducer", &self.reducer)
            .field("selectors", &self.selectors)
            .field("options", &self.options)
            .finish()
    }
}
