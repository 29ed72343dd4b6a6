//! Registry of model names.

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::error::{ModelError, Result};

/// Names of every model built so far.
///
/// Owned by a [`crate::ModelCompiler`]; two models with the same name would
/// silently share (and overwrite) one state slice, so registration of a
/// duplicate fails. `reset` exists for test isolation.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    names: Mutex<HashSet<String>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name`, failing if it is already taken.
    pub fn register(&self, name: &str) -> Result<()> {
        let mut names = self.names.lock();
        if !names.insert(name.to_string()) {
            return Err(ModelError::DuplicateModelName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.lock().contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.lock().is_empty()
    }

    /// Forget every registered name.
    pub fn reset(&self) {
        self.names.lock().clear();
    }
}
