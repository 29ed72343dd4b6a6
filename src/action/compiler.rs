//! Action-map compilation.
//!
//! Walks a nested [`ActionMap`] once and produces a public callable tree, a
//! private callable tree and a flat dispatch table holding every reducer
//! (public and private, at any depth).

use std::sync::Arc;

use serde_json::Value;

use crate::action::creator::{make_action_creator, make_async_action};
use crate::action::def::{ActionMap, Handler, ReducerFn};
use crate::action::tree::ActionTree;
use crate::config::CollisionPolicy;
use crate::error::{ModelError, Result};
use crate::reducer::DispatchTable;
use crate::store::StoreHandle;

/// Output of [`compile`].
#[derive(Debug)]
pub struct CompiledActions {
    pub public: ActionTree,
    pub private: ActionTree,
    pub table: DispatchTable,
    /// Whether any leaf anywhere in the map was private.
    pub has_private: bool,
}

#[derive(Default)]
struct Level {
    public: ActionTree,
    private: ActionTree,
    any_private: bool,
}

struct Walker<'a> {
    model: &'a str,
    store: &'a StoreHandle,
    policy: CollisionPolicy,
    table: DispatchTable,
}

/// Compile `map` for the model whose global key is `namespace`.
///
/// Leaf types default to `<namespace>/<path>/<key>`, so the same map under
/// the same namespace always yields the same types.
pub fn compile(
    map: &ActionMap,
    namespace: &str,
    initial_state: Value,
    store: &StoreHandle,
    policy: CollisionPolicy,
) -> Result<CompiledActions> {
    let mut walker = Walker {
        model: namespace,
        store,
        policy,
        table: DispatchTable::new(initial_state),
    };
    let level = walker.walk(map, namespace)?;

    tracing::debug!(
        model = %namespace,
        reducers = walker.table.len(),
        has_private = level.any_private,
        "Compiled action map"
    );

    Ok(CompiledActions {
        public: level.public,
        private: level.private,
        table: walker.table,
        has_private: level.any_private,
    })
}

impl Walker<'_> {
    fn walk(&mut self, map: &ActionMap, namespace: &str) -> Result<Level> {
        let mut level = Level::default();

        for (key, def) in map.iter() {
            let action_type = def
                .action_type
                .clone()
                .unwrap_or_else(|| format!("{}/{}", namespace, key));

            if let Some(handler) = &def.handler {
                let creator = match handler {
                    Handler::Deferred(handler) => {
                        make_async_action(self.store, Arc::clone(handler), def.params.iter().cloned())
                    }
                    Handler::Reducer(reducer) => {
                        self.install(&action_type, Arc::clone(reducer))?;
                        make_action_creator(self.store, &action_type, def.params.iter().cloned())
                    }
                };

                if def.private {
                    level.private.set_creator(key, creator);
                    level.any_private = true;
                } else {
                    level.public.set_creator(key, creator);
                }
            }

            if def.has_children() {
                let sub = self.walk(&def.children, &format!("{}/{}", namespace, key))?;
                let routed_private = def.private && !sub.public.is_empty();
                // Everything under a private node is only reachable through
                // the private tree, whatever the children's own flags say.
                let public_target = if def.private {
                    &mut level.private
                } else {
                    &mut level.public
                };
                if !sub.public.is_empty() {
                    public_target.attach(key, sub.public);
                }
                if !sub.private.is_empty() {
                    level.private.attach(key, sub.private);
                }
                level.any_private |= sub.any_private || routed_private;
            }
        }

        Ok(level)
    }

    fn install(&mut self, action_type: &str, reducer: Arc<ReducerFn>) -> Result<()> {
        if self.table.handles(action_type) {
            match self.policy {
                CollisionPolicy::Error => {
                    return Err(ModelError::DuplicateActionType {
                        model: self.model.to_string(),
                        action_type: action_type.to_string(),
                    });
                }
                CollisionPolicy::Warn => tracing::warn!(
                    model = %self.model,
                    action_type = %action_type,
                    "Multiple reducers installed for one action type; the last one wins"
                ),
                CollisionPolicy::Ignore => {}
            }
        }
        self.table.register(action_type, reducer);
        Ok(())
    }
}
