//! The contract this crate consumes from an external store.
//!
//! The store owns the global state tree, runs reducers, notifies listeners
//! and runs deferred commands (thunks). This crate never mutates state
//! itself; everything goes through [`Store::dispatch`].

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::RwLock;
use serde_json::Value;

use crate::action::Action;
use crate::error::{ModelError, Result};

/// The pending part of a deferred action. Resolves to whatever the handler
/// chose to hand back to the original caller.
pub type Deferred = BoxFuture<'static, Option<Value>>;

/// A function dispatched instead of a record. The store must invoke it with
/// a handle to itself and relay its return value from `dispatch`.
pub type Thunk = Box<dyn FnOnce(Arc<dyn Store>) -> Deferred + Send>;

/// Zero-argument callback run after every committed dispatch.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// What gets dispatched to the store.
pub enum Command {
    /// A plain action record, run through the reducers.
    Record(Action),
    /// A deferred command for the store's thunk middleware.
    Deferred(Thunk),
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Record(action) => f.debug_tuple("Record").field(action).finish(),
            Command::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<Action> for Command {
    fn from(action: Action) -> Self {
        Command::Record(action)
    }
}

/// Handle returned by [`Store::subscribe`]; consuming it removes the listener.
pub struct Unsubscribe(Box<dyn FnOnce() + Send>);

impl Unsubscribe {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self(Box::new(f))
    }

    pub fn unsubscribe(self) {
        (self.0)()
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unsubscribe(..)")
    }
}

/// The four capabilities consumed from the external store.
pub trait Store: Send + Sync {
    /// Dispatch a record or a thunk.
    ///
    /// For `Command::Deferred`, the thunk must be invoked with the store and
    /// its future returned as `Some`. Records return `None`.
    fn dispatch(&self, command: Command) -> Option<Deferred>;

    /// The full current state tree, keyed by namespaced model name.
    fn get_state(&self) -> Value;

    /// Register a listener invoked after every committed dispatch.
    fn subscribe(&self, listener: Listener) -> Unsubscribe;
}

/// Late-bound reference to the store.
///
/// Models exist before the store does (the store is assembled from their
/// reducers), so every model shares one of these and the store is bound
/// afterwards.
#[derive(Clone, Default)]
pub struct StoreHandle {
    inner: Arc<RwLock<Option<Arc<dyn Store>>>>,
}

impl StoreHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind (or rebind) the store. Models built from the same compiler see
    /// the change immediately.
    pub fn bind(&self, store: Arc<dyn Store>) {
        *self.inner.write() = Some(store);
    }

    pub fn is_bound(&self) -> bool {
        self.inner.read().is_some()
    }

    /// The bound store.
    pub fn store(&self) -> Result<Arc<dyn Store>> {
        self.inner.read().clone().ok_or(ModelError::StoreNotBound)
    }

    pub fn dispatch(&self, command: Command) -> Result<Option<Deferred>> {
        // Release the lock before dispatching; listeners may read through
        // this handle again.
        let store = self.store()?;
        Ok(store.dispatch(command))
    }

    pub fn get_state(&self) -> Result<Value> {
        Ok(self.store()?.get_state())
    }

    pub fn subscribe(&self, listener: Listener) -> Result<Unsubscribe> {
        Ok(self.store()?.subscribe(listener))
    }
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreHandle")
            .field("bound", &self.is_bound())
            .finish()
    }
}
