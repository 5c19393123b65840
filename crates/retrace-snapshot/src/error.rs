//! Timeline error types.

use thiserror::Error;

/// Result type for timeline operations.
pub type TimelineResult<T> = Result<T, TimelineError>;

/// Errors that can occur during timeline operations.
///
/// A failed operation never changes the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    /// Line number outside the current file content.
    #[error("Line number out of range: {line} (file has {len} lines)")]
    LineOutOfRange { line: usize, len: usize },

    /// Snapshot index outside the recorded history.
    #[error("Index out of range: {index} (timeline has {len} states)")]
    SnapshotOutOfRange { index: usize, len: usize },
}

impl TimelineError {
    /// Create a line out of range error.
    pub fn line(line: usize, len: usize) -> Self {
        Self::LineOutOfRange { line, len }
    }

    /// Create a snapshot out of range error.
    pub fn snapshot(index: usize, len: usize) -> Self {
        Self::SnapshotOutOfRange { index, len }
    }
}
