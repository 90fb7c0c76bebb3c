//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that build views from the context, drive them, and map
//!   failures to [`CliError`](crate::CliError)

pub mod follow;
pub mod send;
pub mod tail;
