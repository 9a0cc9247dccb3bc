//! Shared access to one view's selection.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::registry::SubscriptionRegistry;
use crate::store::{SelectionCount, SelectionStore};

/// Published after every mutation made through a [`SelectionHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChanged {
    pub count: SelectionCount,
    pub all_matching: bool,
}

type Subscribers = SubscriptionRegistry<String, SelectionChanged>;

/// Cloneable handle to a [`SelectionStore`] shared by the components of a
/// page.
///
/// Access goes through closures so a lock is never held across an `.await`;
/// readers re-query after every await instead of caching.
#[derive(Debug, Clone, Default)]
pub struct SelectionHandle {
    store: Arc<Mutex<SelectionStore>>,
    subscribers: Arc<Mutex<Subscribers>>,
}

impl SelectionHandle {
    pub fn new(store: SelectionStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            subscribers: Arc::default(),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&SelectionStore) -> R) -> R {
        f(&lock(&self.store))
    }

    /// Mutate the store, then notify subscribers.
    ///
    /// Handlers run after the store lock is released and may call
    /// [`read`](Self::read), but must not subscribe or unsubscribe.
    pub fn update<R>(&self, f: impl FnOnce(&mut SelectionStore) -> R) -> R {
        let (result, event) = {
            let mut store = lock(&self.store);
            let result = f(&mut store);
            let event = SelectionChanged {
                count: store.count(),
                all_matching: store.is_all_matching(),
            };
            (result, event)
        };
        lock(&self.subscribers).notify(&event);
        result
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SelectionStore {
        self.read(Clone::clone)
    }

    /// Register `handler` under `key`, ignoring a second subscription with
    /// the same key.
    ///
    /// The handle owns its handlers, so a handler that needs the store must
    /// capture [`downgrade`](Self::downgrade) rather than a clone of the
    /// handle; a strong clone keeps both alive forever.
    pub fn subscribe(
        &self,
        key: impl Into<String>,
        handler: impl Fn(&SelectionChanged) + Send + Sync + 'static,
    ) -> bool {
        lock(&self.subscribers).subscribe(key.into(), handler)
    }

    pub fn unsubscribe(&self, key: &str) -> bool {
        lock(&self.subscribers).unsubscribe(&key.to_string())
    }

    /// Non-owning handle for use inside subscribers.
    pub fn downgrade(&self) -> WeakSelectionHandle {
        WeakSelectionHandle {
            store: Arc::downgrade(&self.store),
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }
}

/// A [`SelectionHandle`] that does not keep the selection alive.
#[derive(Debug, Clone, Default)]
pub struct WeakSelectionHandle {
    store: Weak<Mutex<SelectionStore>>,
    subscribers: Weak<Mutex<Subscribers>>,
}

impl WeakSelectionHandle {
    /// `None` once every [`SelectionHandle`] has been dropped.
    pub fn upgrade(&self) -> Option<SelectionHandle> {
        Some(SelectionHandle {
            store: self.store.upgrade()?,
            subscribers: self.subscribers.upgrade()?,
        })
    }
}

// Every store operation leaves it consistent, so a poisoned lock still
// guards valid state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
