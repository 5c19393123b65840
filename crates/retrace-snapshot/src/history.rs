//! Read-only iterators over a timeline.

use crate::Snapshot;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// One row of the timeline listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry<'a> {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub description: &'a str,
    /// Whether this snapshot is under the cursor.
    pub is_current: bool,
}

/// Iterator over every snapshot's metadata, oldest first.
///
/// Cheap to clone, so a listing can be walked more than once.
#[derive(Debug, Clone)]
pub struct History<'a> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Snapshot>>,
    current_index: usize,
}

impl<'a> History<'a> {
    pub(crate) fn new(snapshots: &'a [Snapshot], current_index: usize) -> Self {
        Self {
            inner: snapshots.iter().enumerate(),
            current_index,
        }
    }
}

impl<'a> Iterator for History<'a> {
    type Item = HistoryEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, snapshot) = self.inner.next()?;
        Some(HistoryEntry {
            index,
            timestamp: snapshot.timestamp(),
            description: snapshot.description(),
            is_current: index == self.current_index,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for History<'_> {}

/// One step of a replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFrame<'a> {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub lines: &'a [String],
}

/// Iterator over the full content of every snapshot, oldest first.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Snapshot>>,
    step_delay: Duration,
}

impl<'a> Replay<'a> {
    pub(crate) fn new(snapshots: &'a [Snapshot], step_delay: Duration) -> Self {
        Self {
            inner: snapshots.iter().enumerate(),
            step_delay,
        }
    }

    /// Pause the caller should leave between frames.
    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }
}

impl<'a> Iterator for Replay<'a> {
    type Item = ReplayFrame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, snapshot) = self.inner.next()?;
        Some(ReplayFrame {
            index,
            timestamp: snapshot.timestamp(),
            lines: snapshot.lines(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Replay<'_> {}
