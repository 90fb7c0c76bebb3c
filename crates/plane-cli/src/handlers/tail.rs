//! Tail command handler.
//!
//! Prints the recent history window of one stream and exits.

use std::sync::Arc;

use anyhow::Result;
use plane_core::{LogRendererPort, StreamKey, ViewMode};
use plane_runtime::{KeyedEventBus, LoadOutcome};
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::TextRenderer;

/// Execute the tail command.
///
/// # Errors
///
/// Returns [`CliError::History`] if the history query fails.
pub async fn execute(ctx: &CliContext, key: StreamKey) -> Result<()> {
    let ctx = ctx.one_shot();
    let renderer: Arc<dyn LogRendererPort> = Arc::new(TextRenderer::stdout());
    let mut panel = ctx.panel(Arc::new(KeyedEventBus::new()), renderer, ViewMode::History);

    let Some(pending) = panel.select(key) else {
        return Ok(());
    };
    let outcome = pending.resolve().await;
    panel.close();

    match outcome {
        LoadOutcome::Applied { lines } => {
            debug!(%key, lines, "History printed");
            if lines == 0 {
                eprintln!("No history for {key}.");
            }
            Ok(())
        }
        LoadOutcome::Stale => Ok(()),
        LoadOutcome::Failed(err) => Err(CliError::from(err).into()),
    }
}
