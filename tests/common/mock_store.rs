//! In-memory store with thunk support, for driving models in tests.

use modelkit::{build_reducer_map, Action, Command, Deferred, Model, ReducerMap, Store, Unsubscribe};
use modelkit::store::Listener;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Combines model reducers under their names, records every dispatched
/// record and notifies listeners after each committed dispatch.
pub struct MockStore {
    me: Weak<MockStore>,
    reducers: ReducerMap,
    state: Mutex<Value>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener: AtomicU64,
    dispatched: Mutex<Vec<Action>>,
}

impl MockStore {
    pub fn new(reducers: ReducerMap) -> Arc<Self> {
        let initial: Map<String, Value> = reducers
            .iter()
            .map(|(name, reducer)| (name.clone(), reducer.init()))
            .collect();

        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            reducers,
            state: Mutex::new(Value::Object(initial)),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(0),
            dispatched: Mutex::new(Vec::new()),
        })
    }

    pub fn for_models(models: &[&Model]) -> Arc<Self> {
        Self::new(build_reducer_map(models))
    }

    /// A store with no reducers at all.
    pub fn empty() -> Arc<Self> {
        Self::new(ReducerMap::new())
    }

    /// Replace the whole state and notify listeners, as if a dispatch had
    /// produced it.
    pub fn replace_state(&self, state: Value) {
        *self.state.lock() = state;
        self.notify();
    }

    pub fn dispatched(&self) -> Vec<Action> {
        self.dispatched.lock().clone()
    }

    pub fn dispatched_types(&self) -> Vec<String> {
        self.dispatched
            .lock()
            .iter()
            .map(|action| action.action_type.clone())
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    fn notify(&self) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }

    fn reduce(&self, action: &Action) {
        let mut state = self.state.lock();
        let mut previous = match std::mem::take(&mut *state) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let next: Map<String, Value> = self
            .reducers
            .iter()
            .map(|(name, reducer)| (name.clone(), reducer.reduce(previous.remove(name), action)))
            .collect();
        *state = Value::Object(next);
    }
}

impl Store for MockStore {
    fn dispatch(&self, command: Command) -> Option<Deferred> {
        match command {
            Command::Record(action) => {
                self.reduce(&action);
                self.dispatched.lock().push(action);
                self.notify();
                None
            }
            Command::Deferred(thunk) => {
                let me: Arc<dyn Store> = self.me.upgrade()?;
                Some(thunk(me))
            }
        }
    }

    fn get_state(&self) -> Value {
        self.state.lock().clone()
    }

    fn subscribe(&self, listener: Listener) -> Unsubscribe {
        let id = self.next_listener.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().push((id, listener));

        let me = self.me.clone();
        Unsubscribe::new(move || {
            if let Some(store) = me.upgrade() {
                store.listeners.lock().retain(|(existing, _)| *existing != id);
            }
        })
    }
}
