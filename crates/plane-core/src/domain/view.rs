//! Display modes and render frames.

use serde::{Deserialize, Serialize};

use super::{LogSnapshot, StreamKey};

/// Which feed a log panel is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Lines pushed as they are published.
    #[default]
    Live,
    /// A bounded window pulled once per stream.
    History,
}

/// Why a frame is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderReason {
    /// A new line arrived for the displayed stream.
    Appended,
    /// A history query finished for the displayed stream.
    Loaded,
    /// The panel switched to another stream.
    Switched,
    /// The panel was emptied.
    Cleared,
}

/// Content handed to a renderer.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub key: StreamKey,
    pub lines: LogSnapshot,
    pub reason: RenderReason,
}

impl RenderFrame {
    pub const fn new(key: StreamKey, lines: LogSnapshot, reason: RenderReason) -> Self {
        Self { key, lines, reason }
    }

    /// Whether the renderer should pin its scroll position to the last line.
    ///
    /// Only new content for the displayed stream moves the viewport.
    pub const fn follows_tail(&self) -> bool {
        matches!(self.reason, RenderReason::Appended | RenderReason::Loaded)
    }
}
