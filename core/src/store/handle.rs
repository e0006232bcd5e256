//! Generic persisted reactive store.
//!
//! A [`StoreHandle`] owns an immutable snapshot of its state. Every
//! [`StoreHandle::set_state`] swaps in a new snapshot, writes it through the
//! codec to durable storage and then notifies subscribers, in that order and
//! without yielding. Handles are cheap to clone and all clones share state.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::codec::Codec;
use crate::storage::DurableStorage;
use crate::Result;

type Listener<S> = Rc<dyn Fn(&S)>;

struct Listeners<S> {
    entries: RefCell<Vec<(u64, Listener<S>)>>,
    next_id: Cell<u64>,
}

impl<S> Listeners<S> {
    fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    fn add(&self, listener: Listener<S>) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, listener));
        id
    }
}

trait ListenerRegistry {
    fn remove(&self, id: u64) -> bool;
    fn contains(&self, id: u64) -> bool;
}

impl<S> ListenerRegistry for Listeners<S> {
    fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    fn contains(&self, id: u64) -> bool {
        self.entries.borrow().iter().any(|(entry_id, _)| *entry_id == id)
    }
}

/// Registration returned by `subscribe`. Dropping it keeps the listener
/// registered; call [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    id: u64,
    registry: Weak<dyn ListenerRegistry>,
}

impl Subscription {
    /// Stop receiving notifications, including for the rest of a pass
    /// that is currently running.
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .map(|registry| registry.contains(self.id))
            .unwrap_or(false)
    }
}

struct Inner<S, C> {
    key: String,
    codec: C,
    storage: Rc<dyn DurableStorage>,
    default_state: S,
    state: RefCell<Rc<S>>,
    listeners: Rc<Listeners<S>>,
}

pub struct StoreHandle<S, C> {
    inner: Rc<Inner<S, C>>,
}

impl<S, C> Clone for StoreHandle<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, C> StoreHandle<S, C>
where
    S: Clone + 'static,
    C: Codec<S>,
{
    /// Create a store bound to `key`, hydrated from `storage`.
    ///
    /// Absent, unreadable or undecodable content leaves the store at
    /// `default_state`; those cases are logged, never returned.
    pub fn initialize(
        key: impl Into<String>,
        default_state: S,
        codec: C,
        storage: Rc<dyn DurableStorage>,
    ) -> Self {
        let key = key.into();
        let state = load_state(&key, &codec, storage.as_ref(), &default_state);

        Self {
            inner: Rc::new(Inner {
                key,
                codec,
                storage,
                default_state,
                state: RefCell::new(Rc::new(state)),
                listeners: Rc::new(Listeners::new()),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Current snapshot. Later updates never change a returned snapshot.
    pub fn get_state(&self) -> Rc<S> {
        Rc::clone(&self.inner.state.borrow())
    }

    /// Replace the state with `transform(current)`, persist it, then notify.
    ///
    /// If encoding or the storage write fails, the previous snapshot is
    /// restored, nobody is notified and the error is returned.
    pub fn set_state<F>(&self, transform: F) -> Result<()>
    where
        F: FnOnce(&S) -> S,
    {
        let previous = self.get_state();
        let next = Rc::new(transform(&previous));
        *self.inner.state.borrow_mut() = Rc::clone(&next);

        if let Err(err) = self.persist(&next) {
            *self.inner.state.borrow_mut() = previous;
            tracing::warn!(
                key = %self.inner.key,
                error = %err,
                "failed to persist store state; in-memory change rolled back"
            );
            return Err(err);
        }

        self.notify(&next);
        Ok(())
    }

    /// Register `listener` to be called with the new state after each change
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&S) + 'static,
    {
        let id = self.inner.listeners.add(Rc::new(listener));
        let listeners: Rc<dyn ListenerRegistry> = self.inner.listeners.clone();
        Subscription {
            id,
            registry: Rc::downgrade(&listeners),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.entries.borrow().len()
    }

    /// Reload state from durable storage and notify subscribers
    pub fn rehydrate(&self) {
        let state = load_state(
            &self.inner.key,
            &self.inner.codec,
            self.inner.storage.as_ref(),
            &self.inner.default_state,
        );
        let next = Rc::new(state);
        *self.inner.state.borrow_mut() = Rc::clone(&next);
        self.notify(&next);
    }

    /// Remove this store's key from durable storage. In-memory state is kept.
    pub fn clear_storage(&self) -> Result<()> {
        self.inner.storage.remove(&self.inner.key)?;
        tracing::debug!(key = %self.inner.key, "cleared persisted store state");
        Ok(())
    }

    fn persist(&self, state: &S) -> Result<()> {
        let encoded = self.inner.codec.encode(state)?;
        self.inner.storage.set(&self.inner.key, &encoded)?;
        tracing::debug!(key = %self.inner.key, bytes = encoded.len(), "persisted store state");
        Ok(())
    }

    fn notify(&self, state: &S) {
        // Iterate over a copy so listeners may subscribe or unsubscribe
        // while the pass runs.
        let pass: Vec<(u64, Listener<S>)> = self.inner.listeners.entries.borrow().clone();
        for (id, listener) in pass {
            if self.inner.listeners.contains(id) {
                listener(state);
            }
        }
    }
}

fn load_state<S, C>(key: &str, codec: &C, storage: &dyn DurableStorage, default_state: &S) -> S
where
    S: Clone,
    C: Codec<S>,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "no persisted state; starting from default");
            return default_state.clone();
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read persisted state; using default");
            return default_state.clone();
        }
    };

    match codec.decode(&raw) {
        Ok(state) => {
            tracing::debug!(key, "hydrated store from durable storage");
            state
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to decode persisted state; using default");
            default_state.clone()
        }
    }
}
