//! Command-line log console for plane worker processes.
//!
//! `main.rs` is the composition root; everything else lives here so it can
//! be unit tested.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

// Used by the binary only
use dotenvy as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{CannedArg, Commands, StreamArgs};
pub use error::CliError;
pub use parser::Cli;
