//! Stream addressing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifies one logical log stream: a worker process and a world inside it.
///
/// Keys are compared by value. Negative ids are valid opaque keys; lookups
/// against streams that never produced output simply come back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StreamKey {
    /// Remote process id.
    pub process_id: i64,
    /// Selection index (the "world") within the process.
    pub world_index: i64,
}

impl StreamKey {
    /// Create a key for `process_id` / `world_index`.
    pub const fn new(process_id: i64, world_index: i64) -> Self {
        Self {
            process_id,
            world_index,
        }
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.process_id, self.world_index)
    }
}

/// Error returned when a `"{id}_{world}"` key cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid stream key '{input}': expected '<process_id>_<world_index>'")]
pub struct ParseStreamKeyError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for StreamKey {
    type Err = ParseStreamKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseStreamKeyError {
            input: s.to_string(),
        };

        // rsplit so a negative process id ("-1_0") still splits on the separator
        let (id, world) = s.rsplit_once('_').ok_or_else(err)?;
        let process_id = id.parse().map_err(|_| err())?;
        let world_index = world.parse().map_err(|_| err())?;
        Ok(Self::new(process_id, world_index))
    }
}
