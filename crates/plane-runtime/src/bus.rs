//! Keyed publish/subscribe registry for live log lines.
//!
//! Callbacks run synchronously on the publishing thread, in registration
//! order, and only for the exact key they subscribed to. The bus keeps no
//! history: a subscriber sees only lines published after it subscribed.

use plane_core::{LogLine, StreamKey};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, trace};

/// Callback invoked for every line published under a subscribed key.
pub type LogCallback = Arc<dyn Fn(&LogLine) + Send + Sync>;

/// Handle identifying one registration on a [`KeyedEventBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Registry {
    by_key: HashMap<StreamKey, Vec<(SubscriptionId, LogCallback)>>,
    keys: HashMap<SubscriptionId, StreamKey>,
}

/// Publish/subscribe registry keyed by [`StreamKey`].
///
/// Create one per console (or per test) and share it behind an `Arc`.
pub struct KeyedEventBus {
    registry: Mutex<Registry>,
    next_id: AtomicU64,
    closed: AtomicBool,
}

impl KeyedEventBus {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
            next_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
        }
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `callback` for lines published under `key`.
    ///
    /// After [`shutdown`](Self::shutdown) the returned id is never registered
    /// and the callback is never invoked.
    pub fn subscribe<F>(&self, key: StreamKey, callback: F) -> SubscriptionId
    where
        F: Fn(&LogLine) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if self.is_closed() {
            debug!(%key, id = id.0, "Bus is shut down, subscription ignored");
            return id;
        }

        let mut registry = self.registry();
        registry
            .by_key
            .entry(key)
            .or_default()
            .push((id, Arc::new(callback)));
        registry.keys.insert(id, key);
        debug!(%key, id = id.0, "Subscribed to log stream");
        id
    }

    /// Like [`subscribe`](Self::subscribe), but returns a guard that
    /// unsubscribes when released or dropped.
    pub fn subscribe_scoped<F>(self: &Arc<Self>, key: StreamKey, callback: F) -> Subscription
    where
        F: Fn(&LogLine) + Send + Sync + 'static,
    {
        let id = self.subscribe(key, callback);
        Subscription {
            bus: Arc::downgrade(self),
            id,
            key,
            released: false,
        }
    }

    /// Remove a registration. Unknown or already-removed ids are a no-op.
    ///
    /// Returns whether a registration was actually removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry();
        let Some(key) = registry.keys.remove(&id) else {
            return false;
        };

        let now_empty = registry.by_key.get_mut(&key).is_some_and(|subscribers| {
            subscribers.retain(|(sub, _)| *sub != id);
            subscribers.is_empty()
        });
        if now_empty {
            registry.by_key.remove(&key);
        }
        debug!(%key, id = id.0, "Unsubscribed from log stream");
        true
    }

    /// Deliver `line` to every subscriber of exactly `key`.
    ///
    /// Returns the number of callbacks invoked.
    pub fn publish(&self, key: StreamKey, line: impl Into<LogLine>) -> usize {
        if self.is_closed() {
            return 0;
        }

        // Clone the callbacks out so they may subscribe/unsubscribe re-entrantly.
        let callbacks: Vec<LogCallback> = {
            let registry = self.registry();
            match registry.by_key.get(&key) {
                Some(subscribers) => subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
                None => return 0,
            }
        };

        let line = line.into();
        trace!(%key, subscribers = callbacks.len(), "Publishing log line");
        for callback in &callbacks {
            callback(&line);
        }
        callbacks.len()
    }

    /// Number of live registrations for `key`.
    pub fn subscriber_count(&self, key: StreamKey) -> usize {
        self.registry().by_key.get(&key).map_or(0, Vec::len)
    }

    /// Drop every registration and refuse new ones.
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
        let mut registry = self.registry();
        let dropped = registry.keys.len();
        registry.by_key.clear();
        registry.keys.clear();
        debug!(dropped, "Event bus shut down");
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Default for KeyedEventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped registration on a [`KeyedEventBus`].
///
/// Released exactly once: explicitly via [`release`](Self::release) or when
/// dropped. Releasing twice is a no-op.
pub struct Subscription {
    bus: Weak<KeyedEventBus>,
    id: SubscriptionId,
    key: StreamKey,
    released: bool,
}

impl Subscription {
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    pub const fn key(&self) -> StreamKey {
        self.key
    }

    pub const fn is_released(&self) -> bool {
        self.released
    }

    /// Unsubscribe now.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("released", &self.released)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&LogLine) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |line: &LogLine| {
            sink.lock().unwrap().push(line.to_string());
        })
    }

    #[test]
    fn test_publish_reaches_only_exact_key() {
        let bus = KeyedEventBus::new();
        let (seen_a, cb_a) = recorder();
        let (seen_b, cb_b) = recorder();
        bus.subscribe(StreamKey::new(1, 0), cb_a);
        bus.subscribe(StreamKey::new(1, 1), cb_b);

        assert_eq!(bus.publish(StreamKey::new(1, 0), "hello"), 1);

        assert_eq!(*seen_a.lock().unwrap(), vec!["hello"]);
        assert!(seen_b.lock().unwrap().is_empty());
    }

    #[test]
    fn test_callbacks_run_in_registration_order() {
        let bus = KeyedEventBus::new();
        let key = StreamKey::new(2, 0);
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            bus.subscribe(key, move |_| order.lock().unwrap().push(tag));
        }

        bus.publish(key, "x");

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_no_history_for_late_subscribers() {
        let bus = KeyedEventBus::new();
        let key = StreamKey::new(1, 0);
        assert_eq!(bus.publish(key, "early"), 0);

        let (seen, cb) = recorder();
        bus.subscribe(key, cb);
        bus.publish(key, "late");

        assert_eq!(*seen.lock().unwrap(), vec!["late"]);
    }

    #[test]
    fn test_double_unsubscribe_is_noop() {
        let bus = KeyedEventBus::new();
        let key = StreamKey::new(1, 0);
        let id = bus.subscribe(key, |_| {});

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(key), 0);
    }

    #[test]
    fn test_scoped_subscription_releases_on_drop() {
        let bus = Arc::new(KeyedEventBus::new());
        let key = StreamKey::new(4, 2);
        {
            let _sub = bus.subscribe_scoped(key, |_| {});
            assert_eq!(bus.subscriber_count(key), 1);
        }
        assert_eq!(bus.subscriber_count(key), 0);
    }

    #[test]
    fn test_release_then_drop_releases_once() {
        let bus = Arc::new(KeyedEventBus::new());
        let key = StreamKey::new(4, 2);
        let mut first = bus.subscribe_scoped(key, |_| {});
        let _second = bus.subscribe_scoped(key, |_| {});

        first.release();
        first.release();
        assert!(first.is_released());
        drop(first);

        assert_eq!(bus.subscriber_count(key), 1);
    }

    #[test]
    fn test_subscription_outliving_bus_is_harmless() {
        let bus = Arc::new(KeyedEventBus::new());
        let sub = bus.subscribe_scoped(StreamKey::new(1, 0), |_| {});
        drop(bus);
        drop(sub);
    }

    #[test]
    fn test_callback_may_unsubscribe_itself() {
        let bus = Arc::new(KeyedEventBus::new());
        let key = StreamKey::new(9, 0);
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

        let id = {
            let bus = Arc::clone(&bus);
            let slot = Arc::clone(&slot);
            bus.clone().subscribe(key, move |_| {
                if let Some(id) = slot.lock().unwrap().take() {
                    bus.unsubscribe(id);
                }
            })
        };
        *slot.lock().unwrap() = Some(id);

        assert_eq!(bus.publish(key, "once"), 1);
        assert_eq!(bus.publish(key, "twice"), 0);
    }

    #[test]
    fn test_shutdown_drops_subscribers_and_publishes() {
        let bus = KeyedEventBus::new();
        let key = StreamKey::new(1, 0);
        let (seen, cb) = recorder();
        bus.subscribe(key, cb);

        bus.shutdown();

        assert!(bus.is_closed());
        assert_eq!(bus.publish(key, "dropped"), 0);
        assert!(seen.lock().unwrap().is_empty());

        bus.subscribe(key, |_| {});
        assert_eq!(bus.subscriber_count(key), 0);
    }
}
