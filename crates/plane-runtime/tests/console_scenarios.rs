//! End-to-end console scenarios across bus, views and dispatcher.

use async_trait::async_trait;
use plane_core::{
    CannedCommand, CommandError, CommandRequest, CommandSinkPort, HistoryError,
    HistorySourcePort, LogRendererPort, NoopEmitter, NoopRenderer, RenderFrame, StreamKey,
    TailRequest, ViewMode,
};
use plane_runtime::{
    CommandBar, CommandDispatcher, HistoryLogView, HistoryStatus, KeyedEventBus, LiveLogView,
    LoadOutcome, LogStore, ModeController,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingSink {
    sent: Mutex<Vec<(i64, CommandRequest)>>,
}

#[async_trait]
impl CommandSinkPort for RecordingSink {
    async fn command(&self, id: i64, request: &CommandRequest) -> Result<(), CommandError> {
        self.sent.lock().unwrap().push((id, request.clone()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingHistory {
    requests: Mutex<Vec<TailRequest>>,
}

#[async_trait]
impl HistorySourcePort for RecordingHistory {
    async fn tail(&self, request: &TailRequest) -> Result<Vec<String>, HistoryError> {
        self.requests.lock().unwrap().push(*request);
        Ok(vec!["x".to_string(), "y".to_string()])
    }
}

/// Answers every query with one line naming the queried stream.
struct EchoHistory;

#[async_trait]
impl HistorySourcePort for EchoHistory {
    async fn tail(&self, request: &TailRequest) -> Result<Vec<String>, HistoryError> {
        Ok(vec![format!("from-{}", request.key())])
    }
}

#[derive(Default)]
struct RecordingRenderer {
    frames: Mutex<Vec<RenderFrame>>,
}

impl LogRendererPort for RecordingRenderer {
    fn render(&self, frame: RenderFrame) {
        self.frames.lock().unwrap().push(frame);
    }
}

#[test]
fn appended_lines_come_back_in_order() {
    let store = LogStore::new();
    let key = StreamKey::new(1, 0);

    for line in ["a", "b", "c"] {
        store.append(key, line);
    }

    assert_eq!(store.get(key).to_strings(), vec!["a", "b", "c"]);
}

#[test]
fn overflow_keeps_last_thousand() {
    let store = LogStore::new();
    let key = StreamKey::new(2, 0);

    for i in 0..1002 {
        store.append(key, i.to_string());
    }

    let lines = store.get(key).to_strings();
    assert_eq!(lines.len(), 1000);
    assert_eq!(lines.first().map(String::as_str), Some("2"));
    assert_eq!(lines.last().map(String::as_str), Some("1001"));
}

#[test]
fn any_overflow_length_keeps_newest_suffix() {
    for total in [1001_usize, 1500, 2999] {
        let store = LogStore::new();
        let key = StreamKey::new(9, 9);
        for i in 0..total {
            store.append(key, i.to_string());
        }

        let expected: Vec<String> = (total - 1000..total).map(|i| i.to_string()).collect();
        assert_eq!(store.get(key).to_strings(), expected);
    }
}

#[test]
fn live_view_switch_isolates_old_key() {
    let bus = Arc::new(KeyedEventBus::new());
    let renderer = Arc::new(RecordingRenderer::default());
    let mut view = LiveLogView::new(Arc::clone(&bus), renderer.clone(), 1000);
    let a = StreamKey::new(1, 0);
    let b = StreamKey::new(1, 1);

    view.activate(a);
    bus.publish(a, "for-a");
    view.activate(b);
    bus.publish(b, "for-b");
    let frames_before = renderer.frames.lock().unwrap().len();

    bus.publish(a, "late-a");

    assert_eq!(view.snapshot().to_strings(), vec!["for-b"]);
    assert_eq!(renderer.frames.lock().unwrap().len(), frames_before);
}

#[tokio::test]
async fn history_result_is_not_merged_with_live_buffer() {
    let bus = Arc::new(KeyedEventBus::new());
    let history_source = Arc::new(RecordingHistory::default());
    let live = LiveLogView::new(Arc::clone(&bus), Arc::new(NoopRenderer), 1000);
    let history = HistoryLogView::new(
        history_source.clone(),
        Arc::new(NoopRenderer),
        Arc::new(NoopEmitter),
        1000,
        1000,
    );
    let mut panel = ModeController::new(live, history, ViewMode::Live);
    let key = StreamKey::new(5, 1);

    panel.select(key);
    bus.publish(key, "live-only");
    let pending = panel.set_mode(ViewMode::History).expect("history query");
    assert_eq!(pending.resolve().await, LoadOutcome::Applied { lines: 2 });

    assert_eq!(panel.snapshot().to_strings(), vec!["x", "y"]);
    let requests = history_source.requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![TailRequest {
            id: 5,
            count: 1000,
            tail: 1000,
            world_index: 1,
        }]
    );
}

#[tokio::test]
async fn save_button_dispatches_once() {
    let sink = Arc::new(RecordingSink::default());
    let bar = CommandBar::new(CommandDispatcher::new(sink.clone(), Arc::new(NoopEmitter)));

    bar.press(StreamKey::new(3, 0), CannedCommand::Save)
        .await
        .unwrap()
        .unwrap();

    let sent = sink.sent.lock().unwrap().clone();
    assert_eq!(sent, vec![(3, CommandRequest::new("c_save()", 0))]);
}

#[tokio::test]
async fn earlier_key_resolving_first_leaves_new_key_panel_alone() {
    let bus = Arc::new(KeyedEventBus::new());
    let renderer = Arc::new(RecordingRenderer::default());
    let live = LiveLogView::new(Arc::clone(&bus), renderer.clone(), 1000);
    let history = HistoryLogView::new(
        Arc::new(EchoHistory),
        renderer.clone(),
        Arc::new(NoopEmitter),
        1000,
        1000,
    );
    let mut panel = ModeController::new(live, history, ViewMode::History);
    let a = StreamKey::new(1, 0);
    let b = StreamKey::new(2, 0);

    let pending_a = panel.select(a).expect("query for a");
    let pending_b = panel.select(b).expect("query for b");

    // a answers while b is still in flight
    assert_eq!(pending_a.resolve().await, LoadOutcome::Stale);
    assert!(panel.snapshot().is_empty());
    assert_eq!(panel.history().status(), HistoryStatus::Loading);
    assert!(renderer.frames.lock().unwrap().iter().all(|f| f.key != a));

    assert_eq!(pending_b.resolve().await, LoadOutcome::Applied { lines: 1 });
    assert_eq!(panel.snapshot().to_strings(), vec!["from-2_0"]);
}
