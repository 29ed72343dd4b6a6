//! Model seeds: the author-supplied description of a model.

use serde_json::Value;

use crate::action::{ActionDef, ActionMap};
use crate::lookup::Selector;
use crate::selectors::SelectorMap;

/// Everything needed to compile a model.
#[derive(Debug, Clone)]
pub struct ModelSeed {
    pub(crate) name: String,
    pub(crate) initial_state: Value,
    pub(crate) actions: ActionMap,
    pub(crate) selectors: SelectorMap,
    pub(crate) options: ModelOptions,
}

impl ModelSeed {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial_state: Value::Null,
            actions: ActionMap::new(),
            selectors: SelectorMap::new(),
            options: ModelOptions::default(),
        }
    }

    pub fn initial_state(mut self, state: Value) -> Self {
        self.initial_state = state;
        self
    }

    /// Declare a top-level action (or action namespace).
    pub fn action(mut self, key: impl Into<String>, def: ActionDef) -> Self {
        self.actions.insert(key.into(), def);
        self
    }

    /// Replace the whole action map.
    pub fn actions(mut self, actions: ActionMap) -> Self {
        self.actions = actions;
        self
    }

    /// Declare a selector relative to the model's own state.
    pub fn selector(mut self, name: impl Into<String>, selector: impl Into<Selector>) -> Self {
        self.selectors.insert(name.into(), selector.into());
        self
    }

    pub fn options(mut self, options: ModelOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Optional per-model settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelOptions {
    /// Nest the model's view props one level under this key.
    pub props_namespace: Option<String>,
}

impl ModelOptions {
    pub fn props_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.props_namespace = Some(namespace.into());
        self
    }

    /// Read options from a loosely-typed object (`{"propsNamespace": ...}`).
    ///
    /// A non-string `propsNamespace` is reported and treated as absent.
    pub fn from_value(value: &Value) -> Self {
        let props_namespace = match value.get("propsNamespace") {
            None | Some(Value::Null) => None,
            Some(Value::String(namespace)) => Some(namespace.clone()),
            Some(other) => {
                tracing::warn!(
                    value = %other,
                    "Ignoring propsNamespace option: expected a string"
                );
                None
            }
        };
        Self { props_namespace }
    }
}
