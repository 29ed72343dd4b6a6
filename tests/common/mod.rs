//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_store;

pub use mock_store::MockStore;

use modelkit::{Model, ModelCompiler, ModelSeed};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Every `(current, previous)` pair a subscription callback received.
pub type CallLog = Arc<Mutex<Vec<(Option<Value>, Option<Value>)>>>;

/// A callback that appends to `log`.
pub fn recorder(log: &CallLog) -> impl Fn(Option<&Value>, Option<&Value>) + Send + Sync + 'static {
    let log = Arc::clone(log);
    move |current, previous| log.lock().push((current.cloned(), previous.cloned()))
}

/// Build `seeds` with `compiler`, then create and bind a store over them.
pub fn build_with_store(compiler: &ModelCompiler, seeds: Vec<ModelSeed>) -> (Vec<Model>, Arc<MockStore>) {
    modelkit::logging::init_tracing();
    let models: Vec<Model> = seeds
        .into_iter()
        .map(|seed| compiler.build(seed).expect("model should build"))
        .collect();
    let refs: Vec<&Model> = models.iter().collect();
    let store = MockStore::for_models(&refs);
    compiler.bind_store(store.clone());
    (models, store)
}

/// Single-model shorthand for [`build_with_store`].
pub fn single_model(seed: ModelSeed) -> (ModelCompiler, Model, Arc<MockStore>) {
    let compiler = ModelCompiler::new();
    let (mut models, store) = build_with_store(&compiler, vec![seed]);
    let model = models.pop().expect("one model");
    (compiler, model, store)
}
