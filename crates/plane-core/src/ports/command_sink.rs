//! Command sink port.

use async_trait::async_trait;

use super::CommandError;
use crate::domain::CommandRequest;

/// Destination for console commands.
///
/// The sink only reports whether the command was accepted; command output,
/// if any, shows up in the process's log stream like any other line.
#[async_trait]
pub trait CommandSinkPort: Send + Sync {
    /// Send `request` to process `id`.
    async fn command(&self, id: i64, request: &CommandRequest) -> Result<(), CommandError>;
}
