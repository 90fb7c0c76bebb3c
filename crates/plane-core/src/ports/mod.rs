//! Port definitions (trait abstractions) for external collaborators.
//!
//! Ports define the interfaces the console core expects from infrastructure.
//! They contain no transport details and use only domain types.
//!
//! # Design Rules
//!
//! - No HTTP or socket types in any signature
//! - Async only where the collaborator is remote (history, commands)
//! - Rendering and event emission are synchronous and must not block

pub mod command_sink;
pub mod event_emitter;
pub mod history_source;
pub mod renderer;

use thiserror::Error;

pub use command_sink::CommandSinkPort;
pub use event_emitter::{ConsoleEventEmitter, NoopEmitter};
pub use history_source::HistorySourcePort;
pub use renderer::{LogRendererPort, NoopRenderer};

/// Errors from the history query collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The request could not reach the console API.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The console API answered with a non-success status.
    #[error("History request failed with status {status}")]
    Status { status: u16 },

    /// The response body was not a list of lines.
    #[error("Invalid history response: {message}")]
    InvalidResponse { message: String },

    /// The adapter is misconfigured (bad base URL, etc.).
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Errors from the command sink collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The request could not reach the console API.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The console API refused the command.
    #[error("Command rejected with status {status}")]
    Rejected { status: u16 },

    /// The adapter is misconfigured (bad base URL, etc.).
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes, etc.).
#[derive(Debug, Error)]
pub enum CoreError {
    /// History query failed.
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Command dispatch failed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_error_messages() {
        let err = HistoryError::Status { status: 502 };
        assert!(err.to_string().contains("502"));

        let err = HistoryError::InvalidResponse {
            message: "expected array".to_string(),
        };
        assert!(err.to_string().contains("expected array"));
    }

    #[test]
    fn test_core_error_is_transparent_over_port_errors() {
        let err: CoreError = CommandError::Rejected { status: 403 }.into();
        assert_eq!(err.to_string(), "Command rejected with status 403");
        assert!(matches!(err, CoreError::Command(_)));
    }
}
