//! Idempotent subscriptions keyed by component identity.

use std::collections::BTreeMap;
use std::fmt;

/// Callback invoked with each published event.
pub type Handler<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Subscribers keyed by a stable identity, so attaching the same component
/// twice never registers a second handler.
pub struct SubscriptionRegistry<K, E> {
    handlers: BTreeMap<K, Handler<E>>,
}

impl<K: Ord, E> Default for SubscriptionRegistry<K, E> {
    fn default() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }
}

impl<K: Ord, E> SubscriptionRegistry<K, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `key`. Returns `false`, keeping the existing
    /// handler, when `key` is already subscribed.
    pub fn subscribe(&mut self, key: K, handler: impl Fn(&E) + Send + Sync + 'static) -> bool {
        if self.handlers.contains_key(&key) {
            return false;
        }
        self.handlers.insert(key, Box::new(handler));
        true
    }

    /// Returns `false` when `key` was not subscribed.
    pub fn unsubscribe(&mut self, key: &K) -> bool {
        self.handlers.remove(key).is_some()
    }

    pub fn is_subscribed(&self, key: &K) -> bool {
        self.handlers.contains_key(key)
    }

    /// Call every handler, in key order.
    pub fn notify(&self, event: &E) {
        for handler in self.handlers.values() {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<K: fmt::Debug, E> fmt::Debug for SubscriptionRegistry<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionRegistry")
            .field("keys", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn second_subscribe_is_ignored() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = SubscriptionRegistry::<&str, u32>::new();

        let first = Arc::clone(&calls);
        assert!(registry.subscribe("badge", move |n| first.lock().unwrap().push(("a", *n))));
        let second = Arc::clone(&calls);
        assert!(!registry.subscribe("badge", move |n| second.lock().unwrap().push(("b", *n))));

        registry.notify(&7);
        assert_eq!(*calls.lock().unwrap(), vec![("a", 7)]);
    }

    #[test]
    fn notify_runs_in_key_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = SubscriptionRegistry::<&str, ()>::new();
        for key in ["header", "badge", "rows"] {
            let calls = Arc::clone(&calls);
            registry.subscribe(key, move |_| calls.lock().unwrap().push(key));
        }
        registry.notify(&());
        assert_eq!(*calls.lock().unwrap(), vec!["badge", "header", "rows"]);
    }

    #[test]
    fn unsubscribe_allows_resubscribe() {
        let mut registry = SubscriptionRegistry::<String, ()>::new();
        registry.subscribe("rows".to_string(), |_| {});
        assert!(registry.unsubscribe(&"rows".to_string()));
        assert!(!registry.unsubscribe(&"rows".to_string()));
        assert!(registry.subscribe("rows".to_string(), |_| {}));
        assert_eq!(registry.len(), 1);
    }
}
