//! Actions: records, creators, declarations and the compiler that turns a
//! nested declaration map into callable trees plus one dispatch table.
//!
//! # Pipeline
//!
//! ```text
//! ActionMap ──compile──→ public ActionTree
//!                    ├──→ private ActionTree
//!                    └──→ DispatchTable (type → reducer)
//! ```

mod compiler;
mod creator;
mod def;
mod record;
mod tree;

pub use compiler::{compile, CompiledActions};
pub use creator::{make_action_creator, make_async_action, ActionCreator};
pub use def::{ActionDef, ActionMap, DeferredFn, Handler, ReducerFn};
pub use record::{Action, PLACEHOLDER_TYPE};
pub use tree::ActionTree;
