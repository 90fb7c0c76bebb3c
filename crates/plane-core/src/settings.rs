//! Console settings and validation.
//!
//! Pure configuration types with no infrastructure dependencies.

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_HISTORY_WINDOW, DEFAULT_LOG_CAPACITY, StreamKey, TailRequest};

/// Upper bound on lines buffered per stream.
const MAX_LOG_CAPACITY: usize = 100_000;

/// Upper bound on the history window.
const MAX_HISTORY_WINDOW: u32 = 100_000;

/// Tunables for log panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Lines kept per stream in live mode.
    pub buffer_capacity: usize,
    /// `count` sent with history queries.
    pub history_count: u32,
    /// `tail` sent with history queries.
    pub history_tail: u32,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_LOG_CAPACITY,
            history_count: DEFAULT_HISTORY_WINDOW,
            history_tail: DEFAULT_HISTORY_WINDOW,
        }
    }
}

impl ConsoleSettings {
    /// Build the history query for `key` with the configured window.
    pub const fn tail_request(&self, key: StreamKey) -> TailRequest {
        TailRequest::with_window(key, self.history_count, self.history_tail)
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Buffer capacity must be between 1 and 100000, got {0}")]
    InvalidBufferCapacity(usize),

    #[error("History window must be between 1 and 100000, got {0}")]
    InvalidHistoryWindow(u32),
}

/// Validate settings before handing them to the runtime.
pub fn validate_settings(settings: &ConsoleSettings) -> Result<(), SettingsError> {
    if settings.buffer_capacity == 0 || settings.buffer_capacity > MAX_LOG_CAPACITY {
        return Err(SettingsError::InvalidBufferCapacity(
            settings.buffer_capacity,
        ));
    }
    for window in [settings.history_count, settings.history_tail] {
        if window == 0 || window > MAX_HISTORY_WINDOW {
            return Err(SettingsError::InvalidHistoryWindow(window));
        }
    }
    Ok(())
}
