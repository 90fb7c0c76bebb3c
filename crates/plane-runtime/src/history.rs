//! History log panel: one pull query per stream.
//!
//! Every [`HistoryLogView::load`] takes a fresh request token. A result is
//! applied only if its token is still the newest and its key is still the
//! displayed key when it resolves; anything else is discarded as stale.
//! In-flight queries are never aborted, only ignored.

use plane_core::{
    ConsoleEvent, ConsoleEventEmitter, HistoryError, HistorySourcePort, LogRendererPort,
    LogSnapshot, RenderFrame, RenderReason, StreamKey, TailRequest,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Load state of the history panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HistoryStatus {
    /// No stream selected.
    #[default]
    Idle,
    /// A query is in flight for the displayed stream.
    Loading,
    /// The displayed lines came from the last query.
    Ready,
    /// The last query failed; the displayed lines were left untouched.
    Failed(String),
}

/// What happened to a resolved query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result replaced the displayed lines.
    Applied { lines: usize },
    /// The panel moved on before the result arrived; it was discarded.
    Stale,
    /// The query failed. Not retried.
    Failed(HistoryError),
}

#[derive(Debug, Default)]
struct HistoryState {
    key: Option<StreamKey>,
    token: u64,
    lines: LogSnapshot,
    status: HistoryStatus,
}

/// Shared pieces handed to each pending query.
struct Shared {
    source: Arc<dyn HistorySourcePort>,
    renderer: Arc<dyn LogRendererPort>,
    emitter: Arc<dyn ConsoleEventEmitter>,
    state: Mutex<HistoryState>,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// History-mode log panel.
pub struct HistoryLogView {
    shared: Arc<Shared>,
    count: u32,
    tail: u32,
}

impl HistoryLogView {
    /// Create a view querying `count`/`tail` lines per load.
    pub fn new(
        source: Arc<dyn HistorySourcePort>,
        renderer: Arc<dyn LogRendererPort>,
        emitter: Arc<dyn ConsoleEventEmitter>,
        count: u32,
        tail: u32,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                renderer,
                emitter,
                state: Mutex::new(HistoryState::default()),
            }),
            count,
            tail,
        }
    }

    /// Start a query for `key` and make it the displayed stream.
    ///
    /// Switching to a different key clears the panel right away so lines from
    /// the previous stream are never shown under the new one. The returned
    /// [`PendingLoad`] must be resolved (awaited or spawned) to apply the
    /// result.
    pub fn load(&self, key: StreamKey) -> PendingLoad {
        let request = TailRequest::with_window(key, self.count, self.tail);
        let (token, cleared) = {
            let mut state = self.shared.state();
            state.token += 1;
            let cleared = state.key != Some(key) && !state.lines.is_empty();
            if state.key != Some(key) {
                state.lines = LogSnapshot::empty();
            }
            state.key = Some(key);
            state.status = HistoryStatus::Loading;
            (state.token, cleared)
        };

        if cleared {
            self.shared.renderer.render(RenderFrame::new(
                key,
                LogSnapshot::empty(),
                RenderReason::Cleared,
            ));
        }
        debug!(%key, token, "History query issued");

        PendingLoad {
            shared: Arc::clone(&self.shared),
            request,
            token,
        }
    }

    /// Detach from the displayed stream; pending queries become stale.
    pub fn deactivate(&self) {
        let mut state = self.shared.state();
        state.token += 1;
        state.key = None;
        state.lines = LogSnapshot::empty();
        state.status = HistoryStatus::Idle;
    }

    /// The displayed stream, if any.
    pub fn key(&self) -> Option<StreamKey> {
        self.shared.state().key
    }

    /// The displayed lines.
    pub fn snapshot(&self) -> LogSnapshot {
        self.shared.state().lines.clone()
    }

    pub fn status(&self) -> HistoryStatus {
        self.shared.state().status.clone()
    }
}

/// A history query that has been issued but not yet applied.
#[must_use = "a pending load does nothing until resolved"]
pub struct PendingLoad {
    shared: Arc<Shared>,
    request: TailRequest,
    token: u64,
}

impl PendingLoad {
    /// The stream this query was issued for.
    pub const fn key(&self) -> StreamKey {
        self.request.key()
    }

    pub const fn request(&self) -> &TailRequest {
        &self.request
    }

    /// Run the query and apply its result if it is still current.
    pub async fn resolve(self) -> LoadOutcome {
        let key = self.key();
        let result = self.shared.source.tail(&self.request).await;

        let mut state = self.shared.state();
        if state.token != self.token || state.key != Some(key) {
            debug!(%key, token = self.token, "Discarding stale history result");
            return LoadOutcome::Stale;
        }

        match result {
            Ok(lines) => {
                let snapshot = LogSnapshot::from_lines(lines);
                let count = snapshot.len();
                state.lines = snapshot.clone();
                state.status = HistoryStatus::Ready;
                drop(state);

                self.shared
                    .renderer
                    .render(RenderFrame::new(key, snapshot, RenderReason::Loaded));
                self.shared
                    .emitter
                    .emit(ConsoleEvent::history_loaded(key, count));
                LoadOutcome::Applied { lines: count }
            }
            Err(error) => {
                state.status = HistoryStatus::Failed(error.to_string());
                drop(state);

                warn!(%key, %error, "History query failed");
                self.shared
                    .emitter
                    .emit(ConsoleEvent::history_failed(key, &error));
                LoadOutcome::Failed(error)
            }
        }
    }
}

impl std::fmt::Debug for PendingLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingLoad")
            .field("request", &self.request)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}
