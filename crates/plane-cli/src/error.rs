//! CLI-specific error types and mappings.
//!
//! Maps console errors to exit codes and user-facing messages.

use plane_core::{CommandError, CoreError, HistoryError};
use plane_http::ApiError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Console API could not be used.
    #[error("Console API error: {0}")]
    Api(String),

    /// History query failed.
    #[error("History unavailable: {0}")]
    History(String),

    /// Command could not be delivered.
    #[error("Command failed: {0}")]
    Command(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Api(_) | Self::History(_) | Self::Command(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,       // EX_IOERR
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::History(e) => e.into(),
            CoreError::Command(e) => e.into(),
            CoreError::Settings(e) => Self::Config(e.to_string()),
            CoreError::Validation(msg) => Self::Arguments(msg),
        }
    }
}

impl From<HistoryError> for CliError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::Configuration { message } => Self::Config(message),
            other => Self::History(other.to_string()),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Configuration { message } => Self::Config(message),
            other => Self::Command(other.to_string()),
        }
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::UnusableBaseUrl { .. } | ApiError::InvalidUrl(_) => {
                Self::Config(err.to_string())
            }
            other => Self::Api(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error bubbled up to `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CliError>())
        .map_or(1, CliError::exit_code)
}
