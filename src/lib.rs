//! Declarative state-slice models for a unidirectional-data-flow store.
//!
//! A model seed names a slice of the global state and describes its
//! actions (as a nested map of reducers and deferred handlers) and its
//! selectors. Compiling the seed yields callable action trees, one reducer
//! for the store to combine, selectors rewritten for the global tree, live
//! data accessors and change-detecting subscriptions.
//!
//! # Architecture
//!
//! ```text
//! ModelSeed ──→ ModelCompiler ──→ Model ──reducer──→ external Store
//!                                   │                    │
//!                                   └──actions─dispatch──┘
//! ```
//!
//! The store itself is external; see [`store::Store`] for the contract.

pub mod accessors;
pub mod action;
pub mod config;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod reducer;
pub mod selectors;
pub mod store;
pub mod subscribe;

pub use action::{Action, ActionDef, ActionMap, ActionTree};
pub use config::{CollisionPolicy, CompilerConfig};
pub use error::{ModelError, Result};
pub use lookup::{lookup, with_path, Selector};
pub use model::{Model, ModelCompiler, ModelOptions, ModelSeed};
pub use reducer::{build_reducer_map, Reducer, ReducerMap};
pub use store::{Command, Deferred, Store, StoreHandle, Unsubscribe};
pub use subscribe::{subscribe, SubscribeOptions};
