//! Log lines and immutable buffer snapshots.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::collections::vec_deque;
use std::fmt;
use std::sync::Arc;

/// Maximum number of lines kept per stream unless configured otherwise.
pub const DEFAULT_LOG_CAPACITY: usize = 1000;

/// One opaque line of process output.
///
/// Lines are ordered only by arrival and never change once stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogLine(String);

impl LogLine {
    /// Wrap a line of text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The line content.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the line, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LogLine {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for LogLine {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl PartialEq<&str> for LogLine {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Point-in-time view of a stream's buffered lines, oldest first.
///
/// Cloning is cheap. A snapshot never changes after it has been handed out:
/// writers go through [`LogSnapshot::push_bounded`], which copies the
/// underlying buffer when anyone else still holds it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSnapshot {
    lines: Arc<VecDeque<LogLine>>,
}

impl LogSnapshot {
    /// An empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from lines in arrival order.
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LogLine>,
    {
        Self {
            lines: Arc::new(lines.into_iter().map(Into::into).collect()),
        }
    }

    /// Append `line`, evicting the oldest entries so at most `capacity` remain.
    ///
    /// Copy-on-write: other holders of this snapshot keep their old view.
    pub fn push_bounded(&mut self, line: LogLine, capacity: usize) {
        let lines = Arc::make_mut(&mut self.lines);
        lines.push_back(line);
        while lines.len() > capacity {
            lines.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn first(&self) -> Option<&LogLine> {
        self.lines.front()
    }

    pub fn last(&self) -> Option<&LogLine> {
        self.lines.back()
    }

    /// Iterate lines oldest first.
    pub fn iter(&self) -> vec_deque::Iter<'_, LogLine> {
        self.lines.iter()
    }

    /// Copy the lines out as plain strings.
    pub fn to_strings(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.as_str().to_string()).collect()
    }

    /// True when both snapshots share the same underlying buffer.
    pub fn shares_buffer_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.lines, &other.lines)
    }
}

impl<'a> IntoIterator for &'a LogSnapshot {
    type Item = &'a LogLine;
    type IntoIter = vec_deque::Iter<'a, LogLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_bounded_evicts_oldest() {
        let mut snapshot = LogSnapshot::empty();
        for i in 0..5 {
            snapshot.push_bounded(LogLine::new(i.to_string()), 3);
        }
        assert_eq!(snapshot.to_strings(), vec!["2", "3", "4"]);
    }

    #[test]
    fn test_held_snapshot_unaffected_by_later_push() {
        let mut live = LogSnapshot::from_lines(["a", "b"]);
        let held = live.clone();
        assert!(held.shares_buffer_with(&live));

        live.push_bounded("c".into(), 10);

        assert_eq!(held.to_strings(), vec!["a", "b"]);
        assert_eq!(live.to_strings(), vec!["a", "b", "c"]);
        assert!(!held.shares_buffer_with(&live));
    }

    #[test]
    fn test_unshared_push_does_not_copy() {
        let mut snapshot = LogSnapshot::from_lines(["a"]);
        let before = Arc::as_ptr(&snapshot.lines);
        snapshot.push_bounded("b".into(), 10);
        assert_eq!(before, Arc::as_ptr(&snapshot.lines));
    }

    #[test]
    fn test_log_line_serializes_as_plain_string() {
        let line = LogLine::new("[00:00:01]: Server started");
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, "\"[00:00:01]: Server started\"");
    }
}
