//! Bounded per-stream log buffers.
//!
//! Each stream key gets its own buffer, created on first append and kept for
//! the lifetime of the store. Appends replace the stored snapshot
//! copy-on-write, so readers holding an older snapshot never see it change.

use plane_core::{DEFAULT_LOG_CAPACITY, LogLine, LogSnapshot, StreamKey};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Ring buffers storing recent log lines, keyed by stream.
#[derive(Debug)]
pub struct LogStore {
    buffers: RwLock<HashMap<StreamKey, LogSnapshot>>,
    capacity: usize,
}

impl LogStore {
    /// Create a store keeping [`DEFAULT_LOG_CAPACITY`] lines per stream.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Create a store keeping at most `capacity` lines per stream.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffers: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a line to `key`'s buffer, evicting the oldest past capacity.
    ///
    /// Returns the buffer's new snapshot.
    pub fn append(&self, key: StreamKey, line: impl Into<LogLine>) -> LogSnapshot {
        let mut buffers = self.buffers.write().unwrap_or_else(PoisonError::into_inner);
        let snapshot = buffers.entry(key).or_default();
        snapshot.push_bounded(line.into(), self.capacity);
        snapshot.clone()
    }

    /// Snapshot of `key`'s buffer. Unknown keys yield an empty snapshot.
    pub fn get(&self, key: StreamKey) -> LogSnapshot {
        let buffers = self.buffers.read().unwrap_or_else(PoisonError::into_inner);
        buffers.get(&key).cloned().unwrap_or_default()
    }

    /// Number of lines buffered for `key`.
    pub fn len(&self, key: StreamKey) -> usize {
        let buffers = self.buffers.read().unwrap_or_else(PoisonError::into_inner);
        buffers.get(&key).map_or(0, LogSnapshot::len)
    }

    /// Keys that have received at least one line.
    pub fn keys(&self) -> Vec<StreamKey> {
        let buffers = self.buffers.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<StreamKey> = buffers.keys().copied().collect();
        keys.sort();
        keys
    }
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new()
    }
}
