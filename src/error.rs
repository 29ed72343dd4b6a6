//! Error types for model construction and action dispatch.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the model pipeline.
///
/// Malformed data shapes never end up here: lookups on missing paths,
/// panicking selectors and unmatched action types all degrade to `None`
/// or a pass-through instead.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Two models were registered under the same name.
    #[error("Two models have the same name ({name})")]
    DuplicateModelName { name: String },

    /// Two leaves of one model resolved to the same action type while the
    /// collision policy is `error`.
    #[error("Multiple reducers are installed on model '{model}' for action type '{action_type}'")]
    DuplicateActionType { model: String, action_type: String },

    /// An action creator was invoked before a store was bound.
    #[error("No store is bound; call ModelCompiler::bind_store before dispatching")]
    StoreNotBound,

    /// No callable action lives at the given path.
    #[error("No action at '{path}'")]
    UnknownAction { path: String },

    /// [`crate::ActionTree::call`] on a node that only holds nested actions.
    #[error("Action node is a namespace only; call one of its children: {children:?}")]
    NotCallable { children: Vec<String> },

    /// Compiler configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
