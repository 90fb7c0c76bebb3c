//! History query port.

use async_trait::async_trait;

use super::HistoryError;
use crate::domain::TailRequest;

/// Source of historical log lines for a stream.
///
/// Returns at most `request.count` of the most recent lines, oldest first.
/// A stream with no recorded output yields an empty list, not an error.
#[async_trait]
pub trait HistorySourcePort: Send + Sync {
    async fn tail(&self, request: &TailRequest) -> Result<Vec<String>, HistoryError>;
}
