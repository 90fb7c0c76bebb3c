//! Live log panel: follows one stream through the event bus.

use plane_core::{LogRendererPort, LogSnapshot, RenderFrame, RenderReason, StreamKey};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use crate::buffer::LogStore;
use crate::bus::{KeyedEventBus, Subscription};

/// The stream a live view is currently attached to.
struct Attached {
    key: StreamKey,
    subscription: Subscription,
    /// Held for the whole append+render of one line; `false` once detached.
    gate: Arc<Mutex<bool>>,
}

impl Attached {
    fn detach(mut self) {
        // Waits for a callback already past the bus lookup to finish, so no
        // line for this key is appended or rendered once detach returns.
        *self.gate.lock().unwrap_or_else(PoisonError::into_inner) = false;
        self.subscription.release();
    }
}

/// Live-mode log panel.
///
/// While attached to a key, every line published under that key is appended
/// to the view's [`LogStore`] and the new snapshot is rendered with
/// [`RenderReason::Appended`]. Buffers persist per key for the lifetime of
/// the view, so switching back to a stream shows what was already received.
pub struct LiveLogView {
    bus: Arc<KeyedEventBus>,
    store: Arc<LogStore>,
    renderer: Arc<dyn LogRendererPort>,
    attached: Option<Attached>,
}

impl LiveLogView {
    pub fn new(
        bus: Arc<KeyedEventBus>,
        renderer: Arc<dyn LogRendererPort>,
        capacity: usize,
    ) -> Self {
        Self {
            bus,
            store: Arc::new(LogStore::with_capacity(capacity)),
            renderer,
            attached: None,
        }
    }

    /// Attach to `key`, releasing any previous subscription first.
    ///
    /// Blocks until a line of the previous key that is mid-delivery has been
    /// rendered. Must not be called from inside this view's renderer.
    ///
    /// Re-activating the current key is a no-op.
    pub fn activate(&mut self, key: StreamKey) {
        if self.key() == Some(key) {
            return;
        }
        self.deactivate();

        let gate = Arc::new(Mutex::new(true));
        let callback = {
            let gate = Arc::clone(&gate);
            let store = Arc::clone(&self.store);
            let renderer = Arc::clone(&self.renderer);
            move |line: &plane_core::LogLine| {
                let attached = gate.lock().unwrap_or_else(PoisonError::into_inner);
                if !*attached {
                    return;
                }
                let lines = store.append(key, line.clone());
                renderer.render(RenderFrame::new(key, lines, RenderReason::Appended));
                drop(attached);
            }
        };
        let subscription = self.bus.subscribe_scoped(key, callback);

        debug!(%key, "Live view attached");
        self.attached = Some(Attached {
            key,
            subscription,
            gate,
        });
        self.renderer.render(RenderFrame::new(
            key,
            self.store.get(key),
            RenderReason::Switched,
        ));
    }

    /// Detach from the current stream. No-op when already detached.
    pub fn deactivate(&mut self) {
        if let Some(attached) = self.attached.take() {
            debug!(key = %attached.key, "Live view detached");
            attached.detach();
        }
    }

    /// The stream currently followed, if any.
    pub fn key(&self) -> Option<StreamKey> {
        self.attached.as_ref().map(|a| a.key)
    }

    pub const fn is_active(&self) -> bool {
        self.attached.is_some()
    }

    /// Snapshot of the displayed stream; empty when detached.
    pub fn snapshot(&self) -> LogSnapshot {
        self.key().map(|key| self.store.get(key)).unwrap_or_default()
    }

    /// The view's per-stream buffers.
    pub const fn store(&self) -> &Arc<LogStore> {
        &self.store
    }
}

impl Drop for LiveLogView {
    fn drop(&mut self) {
        self.deactivate();
    }
}
