//! Terminal rendering for log panels and notifications.

use std::io::{self, Write};
use std::sync::Mutex;

use plane_core::{ConsoleEvent, ConsoleEventEmitter, LogRendererPort, RenderFrame, RenderReason};
use tracing::info;

/// Renders panels as plain text on a writer (stdout by default).
///
/// Appends print just the new line, so a terminal's own scrollback follows
/// the tail. Loads and switches reprint the panel under a header.
pub struct TextRenderer<W: Write + Send> {
    out: Mutex<W>,
}

impl TextRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TextRenderer<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn write_frame(out: &mut W, frame: &RenderFrame) -> io::Result<()> {
        match frame.reason {
            RenderReason::Appended => {
                if let Some(line) = frame.lines.last() {
                    writeln!(out, "{line}")?;
                }
            }
            RenderReason::Loaded | RenderReason::Switched => {
                writeln!(out, "── {} ({} lines) ──", frame.key, frame.lines.len())?;
                for line in &frame.lines {
                    writeln!(out, "{line}")?;
                }
            }
            RenderReason::Cleared => {}
        }
        out.flush()
    }

    /// Take the writer back (tests).
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> LogRendererPort for TextRenderer<W> {
    fn render(&self, frame: RenderFrame) {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        // A closed stdout (e.g. `| head`) is not worth failing the stream over
        let _ = Self::write_frame(&mut out, &frame);
    }
}

/// Prints failures to stderr; successes only go to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl ConsoleEventEmitter for StderrNotifier {
    fn emit(&self, event: ConsoleEvent) {
        match &event {
            ConsoleEvent::CommandFailed {
                key,
                command,
                error,
            } => eprintln!("[{key}] command '{command}' failed: {error}"),
            ConsoleEvent::HistoryFailed { key, error } => {
                eprintln!("[{key}] history unavailable: {error}");
            }
            ConsoleEvent::CommandDispatched { key, command } => {
                info!(%key, %command, "Command sent");
            }
            ConsoleEvent::HistoryLoaded { key, lines } => {
                info!(%key, lines, "History loaded");
            }
        }
    }
}
