//! Core domain types and port definitions for the plane log console.
//!
//! This crate has no I/O. It defines what a log stream is (`StreamKey`,
//! `LogLine`, `LogSnapshot`), the payloads exchanged with the remote console
//! API, and the port traits every adapter implements.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    CannedCommand, CommandRequest, DEFAULT_HISTORY_WINDOW, DEFAULT_LOG_CAPACITY, LogLine,
    LogSnapshot, ParseStreamKeyError, RenderFrame, RenderReason, StreamKey, TailRequest, ViewMode,
};
pub use events::ConsoleEvent;
pub use ports::{
    CommandError, CommandSinkPort, ConsoleEventEmitter, CoreError, HistoryError,
    HistorySourcePort, LogRendererPort, NoopEmitter, NoopRenderer,
};
pub use settings::{ConsoleSettings, SettingsError, validate_settings};

// Silence unused dev-dependency warnings for test-only crates
#[cfg(test)]
use serde_json as _;
