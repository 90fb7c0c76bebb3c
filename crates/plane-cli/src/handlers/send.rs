//! Send command handler.

use anyhow::Result;
use plane_core::{CoreError, StreamKey};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the send command.
///
/// `command` goes out verbatim. Nothing is sent for empty text.
///
/// # Errors
///
/// Returns [`CliError::Arguments`] for empty text and
/// [`CliError::Command`] if the console API refuses or cannot be reached.
pub async fn execute(ctx: &CliContext, key: StreamKey, command: String) -> Result<()> {
    if command.is_empty() {
        let err = CoreError::Validation("command text is empty".to_string());
        return Err(CliError::from(err).into());
    }

    let dispatcher = ctx.one_shot().dispatcher();
    dispatcher
        .dispatch(key, command.as_str())
        .await
        .map_err(CliError::from)?;

    println!("Sent '{command}' to {key}");
    Ok(())
}
