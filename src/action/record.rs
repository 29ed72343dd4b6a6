//! Action records: the plain tagged values that get dispatched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type tag carried by the argument object handed to deferred handlers.
/// That object is never dispatched, so it has no real type.
pub const PLACEHOLDER_TYPE: &str = "";

/// A dispatched action: `{ "type": ..., ...namedParams }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Action {
    /// An action with no named fields.
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            fields: Map::new(),
        }
    }

    /// Zip ordered param names with ordered values.
    ///
    /// Extra values are dropped; names without a value are left out, so
    /// reading them yields `None`.
    pub fn from_params<S: AsRef<str>>(
        action_type: impl Into<String>,
        param_names: &[S],
        values: &[Value],
    ) -> Self {
        let fields = param_names
            .iter()
            .zip(values)
            .map(|(name, value)| (name.as_ref().to_string(), value.clone()))
            .collect();
        Self {
            action_type: action_type.into(),
            fields,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Named field, `None` when absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn is_placeholder(&self) -> bool {
        self.action_type == PLACEHOLDER_TYPE
    }
}
