//! Console notifications surfaced to the user.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "command_failed", "key": {"process_id": 3, "world_index": 0}, "command": "c_save()", "error": "..." }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::StreamKey;

/// Non-blocking notifications produced by the console runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsoleEvent {
    /// A command was accepted by the sink.
    CommandDispatched {
        key: StreamKey,
        command: String,
    },

    /// A command could not be delivered. Never retried.
    CommandFailed {
        key: StreamKey,
        command: String,
        error: String,
    },

    /// A history query was applied to the panel.
    HistoryLoaded {
        key: StreamKey,
        lines: usize,
    },

    /// A history query failed. The panel keeps what it was showing.
    HistoryFailed {
        key: StreamKey,
        error: String,
    },
}

impl ConsoleEvent {
    pub fn command_dispatched(key: StreamKey, command: impl Into<String>) -> Self {
        Self::CommandDispatched {
            key,
            command: command.into(),
        }
    }

    pub fn command_failed(
        key: StreamKey,
        command: impl Into<String>,
        error: impl ToString,
    ) -> Self {
        Self::CommandFailed {
            key,
            command: command.into(),
            error: error.to_string(),
        }
    }

    pub const fn history_loaded(key: StreamKey, lines: usize) -> Self {
        Self::HistoryLoaded { key, lines }
    }

    pub fn history_failed(key: StreamKey, error: impl ToString) -> Self {
        Self::HistoryFailed {
            key,
            error: error.to_string(),
        }
    }

    /// The stream this event concerns.
    pub const fn key(&self) -> StreamKey {
        match self {
            Self::CommandDispatched { key, .. }
            | Self::CommandFailed { key, .. }
            | Self::HistoryLoaded { key, .. }
            | Self::HistoryFailed { key, .. } => *key,
        }
    }

    /// Whether this event reports a failure.
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::CommandFailed { .. } | Self::HistoryFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = ConsoleEvent::command_failed(StreamKey::new(3, 0), "c_save()", "timeout");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "command_failed");
        assert_eq!(json["key"]["process_id"], 3);
        assert_eq!(json["command"], "c_save()");
        assert_eq!(json["error"], "timeout");
    }

    #[test]
    fn test_is_error() {
        let key = StreamKey::new(1, 0);
        assert!(!ConsoleEvent::history_loaded(key, 10).is_error());
        assert!(ConsoleEvent::history_failed(key, "boom").is_error());
        assert_eq!(ConsoleEvent::history_failed(key, "boom").key(), key);
    }
}
