//! Change-detecting subscriptions.
//!
//! Wraps the store's raw listener primitive: the callback only runs when the
//! selected value differs from the last one seen, per a pluggable equality
//! test.
//!
//! ```ignore
//! let unsubscribe = model.subscribe("user.id", |current, previous| {
//!     tracing::info!(?current, ?previous, "user changed");
//! }, SubscribeOptions::default())?;
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::Result;
use crate::lookup::{lookup, Selector};
use crate::store::{Listener, StoreHandle, Unsubscribe};

/// Equality test between the previous and current selected values.
pub type EqualsFn = dyn Fn(Option<&Value>, Option<&Value>) -> bool + Send + Sync;

/// Subscription options.
#[derive(Clone, Default)]
pub struct SubscribeOptions {
    /// Custom equality. Defaults to `==` on the selected values; anything
    /// fancier (tolerances, partial comparison) is up to the caller.
    pub equals: Option<Arc<EqualsFn>>,
    /// Skip the synchronous call made at subscribe time.
    pub no_init: bool,
}

impl SubscribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals<F>(mut self, equals: F) -> Self
    where
        F: Fn(Option<&Value>, Option<&Value>) -> bool + Send + Sync + 'static,
    {
        self.equals = Some(Arc::new(equals));
        self
    }

    pub fn no_init(mut self) -> Self {
        self.no_init = true;
        self
    }
}

impl fmt::Debug for SubscribeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscribeOptions")
            .field("custom_equals", &self.equals.is_some())
            .field("no_init", &self.no_init)
            .finish()
    }
}

fn same_value(previous: Option<&Value>, current: Option<&Value>) -> bool {
    previous == current
}

/// Subscribe to changes of `selector` against the whole global state.
///
/// `callback(current, previous)` runs once right away with `previous =
/// None` (unless `no_init`), then after each dispatch that changes the
/// selected value. Returns the store's own unsubscribe handle.
pub fn subscribe<F>(
    store: &StoreHandle,
    selector: impl Into<Selector>,
    callback: F,
    options: SubscribeOptions,
) -> Result<Unsubscribe>
where
    F: Fn(Option<&Value>, Option<&Value>) + Send + Sync + 'static,
{
    subscribe_scoped(store, selector.into(), None, callback, options)
}

/// Same as [`subscribe`], with the selector scoped under `namespace`.
pub(crate) fn subscribe_scoped<F>(
    store: &StoreHandle,
    selector: Selector,
    namespace: Option<String>,
    callback: F,
    options: SubscribeOptions,
) -> Result<Unsubscribe>
where
    F: Fn(Option<&Value>, Option<&Value>) + Send + Sync + 'static,
{
    let store = store.store()?;
    let equals: Arc<EqualsFn> = match options.equals {
        Some(equals) => equals,
        None => Arc::new(same_value),
    };

    // The store owns the listener, so the listener only keeps a weak
    // reference back to it.
    let weak_store = Arc::downgrade(&store);
    let resolve = move || {
        let store = weak_store.upgrade()?;
        lookup(&store.get_state(), &selector, namespace.as_deref())
    };

    let previous: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));

    if !options.no_init {
        let current = resolve();
        *previous.lock() = current.clone();
        callback(current.as_ref(), None);
    }

    let listener: Listener = Arc::new(move || {
        let current = resolve();
        let prior = {
            let mut previous = previous.lock();
            if equals(previous.as_ref(), current.as_ref()) {
                return;
            }
            std::mem::replace(&mut *previous, current.clone())
        };
        tracing::trace!(?current, ?prior, "Selected value changed");
        // The lock is released here, so the callback may dispatch.
        callback(current.as_ref(), prior.as_ref());
    });

    Ok(store.subscribe(listener))
}
