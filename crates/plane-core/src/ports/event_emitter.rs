//! Event emitter trait for user-facing console notifications.
//!
//! Implementations handle transport details (toasts, status lines, SSE, etc.).

use crate::events::ConsoleEvent;

/// Trait for emitting console events.
///
/// # Implementations
///
/// - `NoopEmitter` - For tests and contexts without a notification surface
/// - Adapter-specific implementations (CLI status line, etc.)
pub trait ConsoleEventEmitter: Send + Sync {
    /// Emit a console event.
    ///
    /// This method should not block.
    fn emit(&self, event: ConsoleEvent);
}

/// A no-op event emitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl ConsoleEventEmitter for NoopEmitter {
    fn emit(&self, _event: ConsoleEvent) {
        // Intentionally do nothing
    }
}
