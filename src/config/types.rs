use serde::{Deserialize, Serialize};

/// Settings for the model compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Prefix joined to a model's name to form its key in the global state
    /// tree (default: `model$_`).
    #[serde(default = "default_namespace_prefix")]
    pub namespace_prefix: String,
    /// What to do when two leaves of one model share an action type.
    #[serde(default)]
    pub action_type_collisions: CollisionPolicy,
}

/// Policy for two leaves of the same model resolving to one action type.
///
/// Every policy except `Error` keeps the last registered reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    #[default]
    Warn,
    Ignore,
    Error,
}

fn default_namespace_prefix() -> String {
    "model$_".to_string()
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            namespace_prefix: default_namespace_prefix(),
            action_type_collisions: CollisionPolicy::default(),
        }
    }
}

impl CompilerConfig {
    /// Global state key for a model with the given name.
    pub fn namespaced(&self, name: &str) -> String {
        format!("{}{}", self.namespace_prefix, name)
    }
}
