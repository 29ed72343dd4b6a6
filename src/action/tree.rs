//! Callable action trees mirroring the nesting of an action map.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::action::creator::ActionCreator;
use crate::error::{ModelError, Result};
use crate::store::Deferred;

/// A node that may be callable, may hold nested actions, or both.
#[derive(Debug, Clone, Default)]
pub struct ActionTree {
    creator: Option<ActionCreator>,
    children: BTreeMap<String, ActionTree>,
}

impl ActionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct child by key.
    pub fn get(&self, key: &str) -> Option<&ActionTree> {
        self.children.get(key)
    }

    /// Descendant by dotted path (`"color.reddish"`).
    pub fn at(&self, path: &str) -> Option<&ActionTree> {
        path.split('.').try_fold(self, |node, key| node.get(key))
    }

    pub fn creator(&self) -> Option<&ActionCreator> {
        self.creator.as_ref()
    }

    pub fn is_callable(&self) -> bool {
        self.creator.is_some()
    }

    /// Whether a callable action lives at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.at(path).is_some_and(ActionTree::is_callable)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.creator.is_none() && self.children.is_empty()
    }

    /// Invoke the action at this node.
    pub fn call(&self, args: &[Value]) -> Result<Option<Deferred>> {
        match &self.creator {
            Some(creator) => creator.call(args),
            None => Err(ModelError::NotCallable {
                children: self.keys().map(str::to_string).collect(),
            }),
        }
    }

    /// Invoke the action at `path`.
    pub fn invoke(&self, path: &str, args: &[Value]) -> Result<Option<Deferred>> {
        let creator = self
            .at(path)
            .and_then(ActionTree::creator)
            .ok_or_else(|| ModelError::UnknownAction {
                path: path.to_string(),
            })?;
        creator.call(args)
    }

    pub(crate) fn set_creator(&mut self, key: &str, creator: ActionCreator) {
        self.children.entry(key.to_string()).or_default().creator = Some(creator);
    }

    /// Merge `subtree`'s children under `key`, keeping any creator already
    /// installed there.
    pub(crate) fn attach(&mut self, key: &str, subtree: ActionTree) {
        let node = self.children.entry(key.to_string()).or_default();
        for (child_key, child) in subtree.children {
            node.children.entry(child_key).or_default().merge(child);
        }
    }

    fn merge(&mut self, other: ActionTree) {
        if other.creator.is_some() {
            self.creator = other.creator;
        }
        for (key, child) in other.children {
            self.children.entry(key).or_default().merge(child);
        }
    }
}
