//! Live/history mode switching for a log panel.

use plane_core::{LogSnapshot, StreamKey, ViewMode};
use tracing::debug;

use crate::history::{HistoryLogView, PendingLoad};
use crate::live::LiveLogView;

/// Keeps exactly one of the live and history views attached to a panel.
///
/// Switching mode never changes the stream and switching stream never
/// changes the mode. The outgoing view is torn down before the incoming one
/// is attached. Methods that start a history query hand back the
/// [`PendingLoad`] for the caller to drive.
pub struct ModeController {
    mode: ViewMode,
    key: Option<StreamKey>,
    live: LiveLogView,
    history: HistoryLogView,
}

impl ModeController {
    /// Create a closed controller starting in `mode`.
    pub fn new(live: LiveLogView, history: HistoryLogView, mode: ViewMode) -> Self {
        Self {
            mode,
            key: None,
            live,
            history,
        }
    }

    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    pub const fn key(&self) -> Option<StreamKey> {
        self.key
    }

    /// Show `key` in the current mode.
    ///
    /// Selecting the already displayed key does nothing.
    pub fn select(&mut self, key: StreamKey) -> Option<PendingLoad> {
        if self.key == Some(key) {
            return None;
        }
        debug!(%key, mode = ?self.mode, "Selecting stream");
        self.key = Some(key);
        self.attach()
    }

    /// Switch between live and history for the current stream.
    ///
    /// Switching to the current mode does nothing.
    pub fn set_mode(&mut self, mode: ViewMode) -> Option<PendingLoad> {
        if self.mode == mode {
            return None;
        }
        debug!(from = ?self.mode, to = ?mode, "Switching view mode");
        self.mode = mode;
        self.attach()
    }

    /// Flip between the two modes.
    pub fn toggle(&mut self) -> Option<PendingLoad> {
        let next = match self.mode {
            ViewMode::Live => ViewMode::History,
            ViewMode::History => ViewMode::Live,
        };
        self.set_mode(next)
    }

    /// Re-run the history query for the current stream.
    ///
    /// Returns `None` in live mode or when no stream is selected.
    pub fn refresh(&mut self) -> Option<PendingLoad> {
        match (self.mode, self.key) {
            (ViewMode::History, Some(key)) => Some(self.history.load(key)),
            _ => None,
        }
    }

    /// Detach both views and forget the stream.
    pub fn close(&mut self) {
        self.live.deactivate();
        self.history.deactivate();
        self.key = None;
    }

    /// Lines currently on screen.
    pub fn snapshot(&self) -> LogSnapshot {
        match self.mode {
            ViewMode::Live => self.live.snapshot(),
            ViewMode::History => self.history.snapshot(),
        }
    }

    pub const fn live(&self) -> &LiveLogView {
        &self.live
    }

    pub const fn history(&self) -> &HistoryLogView {
        &self.history
    }

    fn attach(&mut self) -> Option<PendingLoad> {
        let key = self.key?;
        match self.mode {
            ViewMode::Live => {
                self.history.deactivate();
                self.live.activate(key);
                None
            }
            ViewMode::History => {
                self.live.deactivate();
                Some(self.history.load(key))
            }
        }
    }
}
