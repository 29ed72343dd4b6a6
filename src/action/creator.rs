//! Action creators: partially-applied functions that build a record (or a
//! deferred command) from positional arguments and dispatch it.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::action::record::{Action, PLACEHOLDER_TYPE};
use crate::action::def::DeferredFn;
use crate::error::Result;
use crate::store::{Command, Deferred, StoreHandle, Thunk};

/// A callable that dispatches against the bound store.
#[derive(Clone)]
pub struct ActionCreator {
    kind: CreatorKind,
    params: Arc<[String]>,
    store: StoreHandle,
}

#[derive(Clone)]
enum CreatorKind {
    Record { action_type: String },
    Deferred { handler: Arc<DeferredFn> },
}

/// Build a creator that dispatches `{type, ...params}` records.
///
/// ```ignore
/// let add = make_action_creator(&store, "adder", ["number"]);
/// add.call(&[json!(4)])?;
/// ```
pub fn make_action_creator<I, S>(store: &StoreHandle, action_type: &str, params: I) -> ActionCreator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ActionCreator {
        kind: CreatorKind::Record {
            action_type: action_type.to_string(),
        },
        params: params.into_iter().map(Into::into).collect(),
        store: store.clone(),
    }
}

/// Build a creator that dispatches a thunk.
///
/// When the store runs the thunk, `handler` receives the collected
/// arguments (as a record with a placeholder type) and the store itself.
/// Whatever the handler returns is handed back to the caller of
/// [`ActionCreator::call`].
pub fn make_async_action<I, S>(store: &StoreHandle, handler: Arc<DeferredFn>, params: I) -> ActionCreator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ActionCreator {
        kind: CreatorKind::Deferred { handler },
        params: params.into_iter().map(Into::into).collect(),
        store: store.clone(),
    }
}

impl ActionCreator {
    /// Build and dispatch. Argument count is not checked against the
    /// declared params.
    ///
    /// Plain creators return `Ok(None)`; deferred creators return the
    /// handler's pending result as relayed by the store.
    pub fn call(&self, args: &[Value]) -> Result<Option<Deferred>> {
        match &self.kind {
            CreatorKind::Record { action_type } => {
                let action = Action::from_params(action_type.as_str(), &self.params[..], args);
                tracing::trace!(action_type = %action.action_type, "Dispatching action");
                self.store.dispatch(Command::Record(action))
            }
            CreatorKind::Deferred { handler } => {
                let arguments = Action::from_params(PLACEHOLDER_TYPE, &self.params[..], args);
                let handler = Arc::clone(handler);
                let thunk: Thunk = Box::new(move |store| handler(arguments, store));
                self.store.dispatch(Command::Deferred(thunk))
            }
        }
    }

    /// The record type this creator dispatches; `None` for deferred creators.
    pub fn action_type(&self) -> Option<&str> {
        match &self.kind {
            CreatorKind::Record { action_type } => Some(action_type),
            CreatorKind::Deferred { .. } => None,
        }
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self.kind, CreatorKind::Deferred { .. })
    }
}

impl fmt::Debug for ActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ActionCreator");
        match &self.kind {
            CreatorKind::Record { action_type } => s.field("action_type", action_type),
            CreatorKind::Deferred { .. } => s.field("deferred", &true),
        };
        s.field("params", &self.params).finish()
    }
}
