//! Domain types for the log console.
//!
//! These types describe log streams and the payloads exchanged with the
//! remote console. They carry no transport or rendering details.

mod command;
mod log;
mod stream;
mod view;

pub use command::{CannedCommand, CommandRequest, DEFAULT_HISTORY_WINDOW, TailRequest};
pub use log::{DEFAULT_LOG_CAPACITY, LogLine, LogSnapshot};
pub use stream::{ParseStreamKeyError, StreamKey};
pub use view::{RenderFrame, RenderReason, ViewMode};
