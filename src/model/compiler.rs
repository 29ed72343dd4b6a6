//! The orchestrator: turns seeds into compiled models.

use std::path::Path;
use std::sync::Arc;

use crate::action::compile;
use crate::config::CompilerConfig;
use crate::error::{ModelError, Result};
use crate::model::registry::ModelRegistry;
use crate::model::seed::ModelSeed;
use crate::model::Model;
use crate::selectors::rewrite_selectors;
use crate::store::{Store, StoreHandle};

/// Builds models and owns everything they share: the name registry and the
/// late-bound store handle.
///
/// Typical wiring:
///
/// ```ignore
/// let compiler = ModelCompiler::new();
/// let prefs = compiler.build(prefs_seed)?;
/// let store = MyStore::new(build_reducer_map(&[&prefs]));
/// compiler.bind_store(store);
/// prefs.actions().invoke("makeBlue", &[])?;
/// ```
#[derive(Debug, Default)]
pub struct ModelCompiler {
    config: CompilerConfig,
    registry: ModelRegistry,
    store: StoreHandle,
}

impl ModelCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompilerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Build a compiler from a TOML config file (defaults when absent).
    pub fn from_config_file(path: &Path) -> Result<Self> {
        Ok(Self::with_config(CompilerConfig::load_from(path)?))
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Handle shared by every model built here.
    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Bind the store all models dispatch to and read from.
    pub fn bind_store(&self, store: Arc<dyn Store>) {
        self.store.bind(store);
    }

    /// Forget all registered model names.
    pub fn reset_registry(&self) {
        self.registry.reset();
    }

    /// Compile `seed` into a model.
    ///
    /// Fails if a model with the same name was already built by this
    /// compiler (since the last reset), or if two leaves share an action
    /// type under the `error` collision policy.
    pub fn build(&self, seed: ModelSeed) -> Result<Model> {
        if self.registry.contains(&seed.name) {
            return Err(ModelError::DuplicateModelName { name: seed.name });
        }

        let name = self.config.namespaced(&seed.name);

        let compiled = compile(
            &seed.actions,
            &name,
            seed.initial_state,
            &self.store,
            self.config.action_type_collisions,
        )?;

        let selectors = rewrite_selectors(&seed.selectors, &name);

        self.registry.register(&seed.name)?;

        tracing::debug!(
            model = %name,
            selectors = selectors.len(),
            "Built model"
        );

        Ok(Model::assemble(
            name,
            seed.name,
            compiled,
            selectors,
            seed.selectors,
            seed.options,
            self.store.clone(),
        ))
    }
}
