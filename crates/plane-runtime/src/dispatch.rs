//! Fire-and-forget command dispatch.
//!
//! Commands go one way: the outcome is logged and surfaced as a console
//! event, never fed back into a log panel and never retried.

use plane_core::{
    CannedCommand, CommandError, CommandRequest, CommandSinkPort, ConsoleEvent,
    ConsoleEventEmitter, StreamKey,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Sends console commands to the process behind a stream.
#[derive(Clone)]
pub struct CommandDispatcher {
    sink: Arc<dyn CommandSinkPort>,
    emitter: Arc<dyn ConsoleEventEmitter>,
}

impl CommandDispatcher {
    pub fn new(sink: Arc<dyn CommandSinkPort>, emitter: Arc<dyn ConsoleEventEmitter>) -> Self {
        Self { sink, emitter }
    }

    /// Send `command` verbatim to `key`'s process and wait for the outcome.
    ///
    /// Failures are reported through the emitter as well as returned.
    pub async fn dispatch(
        &self,
        key: StreamKey,
        command: impl Into<String>,
    ) -> Result<(), CommandError> {
        let request = CommandRequest::new(command, key.world_index);
        debug!(%key, command = %request.command, "Dispatching command");

        match self.sink.command(key.process_id, &request).await {
            Ok(()) => {
                self.emitter
                    .emit(ConsoleEvent::command_dispatched(key, request.command));
                Ok(())
            }
            Err(error) => {
                warn!(%key, command = %request.command, %error, "Command failed");
                self.emitter
                    .emit(ConsoleEvent::command_failed(key, request.command, &error));
                Err(error)
            }
        }
    }

    /// Spawn [`dispatch`](Self::dispatch) without waiting for it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn send(
        &self,
        key: StreamKey,
        command: impl Into<String>,
    ) -> JoinHandle<Result<(), CommandError>> {
        let dispatcher = self.clone();
        let command = command.into();
        tokio::spawn(async move { dispatcher.dispatch(key, command).await })
    }

    /// Spawn a canned button command.
    pub fn send_canned(
        &self,
        key: StreamKey,
        command: CannedCommand,
    ) -> JoinHandle<Result<(), CommandError>> {
        self.send(key, command.text())
    }
}

/// Keys the command input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Char(char),
    Backspace,
    /// The confirm key. Submits the typed text.
    Enter,
    /// Focus left the input. Never submits.
    Blur,
}

/// Free-text command entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInput {
    text: String,
}

impl CommandInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the typed text (e.g. a paste).
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Apply a key press. Returns the submitted text on confirm.
    ///
    /// Confirm always submits exactly what was typed, even nothing, and
    /// clears the input.
    pub fn handle_key(&mut self, key: InputKey) -> Option<String> {
        match key {
            InputKey::Char(c) => {
                self.text.push(c);
                None
            }
            InputKey::Backspace => {
                self.text.pop();
                None
            }
            InputKey::Enter => Some(std::mem::take(&mut self.text)),
            InputKey::Blur => None,
        }
    }
}

/// Command buttons plus the free-text input for one panel.
pub struct CommandBar {
    dispatcher: CommandDispatcher,
    input: CommandInput,
}

impl CommandBar {
    pub fn new(dispatcher: CommandDispatcher) -> Self {
        Self {
            dispatcher,
            input: CommandInput::new(),
        }
    }

    /// Press a canned command button.
    pub fn press(
        &self,
        key: StreamKey,
        command: CannedCommand,
    ) -> JoinHandle<Result<(), CommandError>> {
        self.dispatcher.send_canned(key, command)
    }

    /// Feed a key press to the input; confirm dispatches the typed text.
    pub fn handle_key(
        &mut self,
        key: StreamKey,
        input: InputKey,
    ) -> Option<JoinHandle<Result<(), CommandError>>> {
        let text = self.input.handle_key(input)?;
        Some(self.dispatcher.send(key, text))
    }

    /// Submit a whole line at once, as a line-oriented terminal would.
    pub fn submit_line(
        &mut self,
        key: StreamKey,
        line: &str,
    ) -> Option<JoinHandle<Result<(), CommandError>>> {
        self.input.set_text(line);
        self.handle_key(key, InputKey::Enter)
    }

    pub const fn input(&self) -> &CommandInput {
        &self.input
    }
}
