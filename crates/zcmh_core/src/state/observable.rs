//! Last-value-cached publish/subscribe state holder.
//!
//! # Invariants
//! - Every subscriber receives the cached value on subscribe.
//! - Subscribers are notified in subscription order after each change.
//! - Callbacks run after the internal lock is released, so a callback may
//!   read the same observable.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    next_id: u64,
    subscribers: BTreeMap<SubscriptionId, Callback<T>>,
}

pub struct Observable<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(Inner {
                value,
                next_id: 0,
                subscribers: BTreeMap::new(),
            }),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Mutates the value in place and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let (snapshot, callbacks) = {
            let mut inner = self.lock();
            f(&mut inner.value);
            let callbacks = inner.subscribers.values().cloned().collect::<Vec<_>>();
            (inner.value.clone(), callbacks)
        };
        for callback in callbacks {
            callback(&snapshot);
        }
    }

    /// Registers `callback` and immediately delivers the cached value.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let callback: Callback<T> = Arc::new(callback);
        let (id, snapshot) = {
            let mut inner = self.lock();
            let id = SubscriptionId(inner.next_id);
            inner.next_id += 1;
            inner.subscribers.insert(id, Arc::clone(&callback));
            (id, inner.value.clone())
        };
        callback(&snapshot);
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().subscribers.remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        // A panicking subscriber never runs under this lock, so poisoning only
        // comes from `update` closures; the cached value is still usable.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
