//! Core port implementations for `ConsoleApiClient`.

use async_trait::async_trait;
use plane_core::{
    CommandError, CommandRequest, CommandSinkPort, HistoryError, HistorySourcePort, TailRequest,
};

use crate::client::ConsoleApiClient;
use crate::error::ApiError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

fn map_history_error(err: ApiError) -> HistoryError {
    match err {
        ApiError::RequestFailed { status, .. } => HistoryError::Status { status },
        ApiError::Network(e) => HistoryError::Network {
            message: e.to_string(),
        },
        ApiError::JsonParse(e) => HistoryError::InvalidResponse {
            message: e.to_string(),
        },
        err @ (ApiError::InvalidUrl(_) | ApiError::UnusableBaseUrl { .. }) => {
            HistoryError::Configuration {
                message: err.to_string(),
            }
        }
    }
}

fn map_command_error(err: ApiError) -> CommandError {
    match err {
        ApiError::RequestFailed { status, .. } => CommandError::Rejected { status },
        ApiError::Network(e) => CommandError::Network {
            message: e.to_string(),
        },
        err @ (ApiError::JsonParse(_)
        | ApiError::InvalidUrl(_)
        | ApiError::UnusableBaseUrl { .. }) => CommandError::Configuration {
            message: err.to_string(),
        },
    }
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl<B: HttpBackend> HistorySourcePort for ConsoleApiClient<B> {
    async fn tail(&self, request: &TailRequest) -> Result<Vec<String>, HistoryError> {
        self.fetch_tail(request).await.map_err(map_history_error)
    }
}

#[async_trait]
impl<B: HttpBackend> CommandSinkPort for ConsoleApiClient<B> {
    async fn command(&self, id: i64, request: &CommandRequest) -> Result<(), CommandError> {
        self.send_command(id, request)
            .await
            .map_err(map_command_error)
    }
}
