//! Log stream multiplexing, bounded buffering and command dispatch.
//!
//! Data flows one way: a transport publishes lines into the
//! [`KeyedEventBus`], an active [`LiveLogView`] appends them to its
//! [`LogStore`] and renders the new snapshot. [`HistoryLogView`] pulls a
//! bounded window from the history source instead, and [`ModeController`]
//! makes sure only one of the two is attached to a panel at a time.
//! [`CommandDispatcher`] is a separate one-way sink.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod buffer;
mod bus;
mod dispatch;
mod history;
mod live;
mod mode;
mod stream;

pub use buffer::LogStore;
pub use bus::{KeyedEventBus, LogCallback, Subscription, SubscriptionId};
pub use dispatch::{CommandBar, CommandDispatcher, CommandInput, InputKey};
pub use history::{HistoryLogView, HistoryStatus, LoadOutcome, PendingLoad};
pub use live::LiveLogView;
pub use mode::ModeController;
pub use stream::{parse_tagged_line, spawn_stream_reader, spawn_tagged_reader};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
