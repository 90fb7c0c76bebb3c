//! HTTP adapter for the remote console API.
//!
//! Implements the core `HistorySourcePort` and `CommandSinkPort` against:
//!
//! - `GET  {base}/console/{id}/tail?count=&tail=&world_index=` → JSON array of lines
//! - `POST {base}/console/{id}/command` with `{"command": ..., "world_index": ...}`
//!
//! Requests are never retried: history failures are reported to the panel
//! and commands are fire-and-forget.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod port;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{ConsoleApiClient, DefaultConsoleClient};

// Configuration
pub use config::ConsoleApiConfig;

// Errors
pub use error::{ApiError, ApiResult};

// Backend abstraction
pub use http::{HttpBackend, ReqwestBackend};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
