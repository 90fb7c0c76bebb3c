//! Payloads for the remote console API.

use serde::{Deserialize, Serialize};

use super::StreamKey;

/// Default window requested from the history source (both `count` and `tail`).
pub const DEFAULT_HISTORY_WINDOW: u32 = 1000;

/// One-shot history query for a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailRequest {
    /// Remote process id.
    pub id: i64,
    /// Maximum number of lines to return.
    pub count: u32,
    /// Size of the trailing window to read from.
    pub tail: u32,
    /// World within the process.
    pub world_index: i64,
}

impl TailRequest {
    /// Query the default window for `key`.
    pub const fn for_key(key: StreamKey) -> Self {
        Self::with_window(key, DEFAULT_HISTORY_WINDOW, DEFAULT_HISTORY_WINDOW)
    }

    /// Query a custom window for `key`.
    pub const fn with_window(key: StreamKey, count: u32, tail: u32) -> Self {
        Self {
            id: key.process_id,
            count,
            tail,
            world_index: key.world_index,
        }
    }

    /// The stream this query targets.
    pub const fn key(&self) -> StreamKey {
        StreamKey::new(self.id, self.world_index)
    }
}

/// Body of a console command sent to a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Command text, passed through verbatim.
    pub command: String,
    /// World the command targets.
    pub world_index: i64,
}

impl CommandRequest {
    pub fn new(command: impl Into<String>, world_index: i64) -> Self {
        Self {
            command: command.into(),
            world_index,
        }
    }
}

/// Commands exposed as one-click buttons.
///
/// The text is opaque to the console; it is whatever the worker's command
/// interpreter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CannedCommand {
    /// Roll the world back by `saves` snapshots.
    Rollback { saves: u32 },
    /// Regenerate the world shard.
    RegenerateShard,
    /// Force a save.
    Save,
    /// List players currently online.
    ListPlayers,
}

impl CannedCommand {
    /// Snapshots rolled back by the rollback button.
    pub const DEFAULT_ROLLBACK_SAVES: u32 = 3;

    /// The buttons in display order.
    pub const BUTTONS: [Self; 4] = [
        Self::Rollback {
            saves: Self::DEFAULT_ROLLBACK_SAVES,
        },
        Self::RegenerateShard,
        Self::Save,
        Self::ListPlayers,
    ];

    /// Command text sent to the worker.
    pub fn text(&self) -> String {
        match self {
            Self::Rollback { saves } => format!("c_rollback({saves})"),
            Self::RegenerateShard => "c_regenerateshard()".to_string(),
            Self::Save => "c_save()".to_string(),
            Self::ListPlayers => "c_listallplayers()".to_string(),
        }
    }

    /// Short button label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rollback { .. } => "rollback",
            Self::RegenerateShard => "regenerate",
            Self::Save => "save",
            Self::ListPlayers => "players",
        }
    }

    /// Look a button up by its label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::BUTTONS.into_iter().find(|c| c.label() == label)
    }
}
