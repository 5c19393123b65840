//! Snapshot data structures.

use chrono::{DateTime, Utc};

/// The full content of the file at one point in history.
///
/// Fields are private so a recorded snapshot can only be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// When the snapshot was taken.
    timestamp: DateTime<Utc>,

    /// Description of the edit that produced it.
    description: String,

    /// Every line of the file.
    lines: Vec<String>,
}

impl Snapshot {
    /// Create a new snapshot stamped with the current time.
    pub fn new(lines: Vec<String>, description: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            description: description.into(),
            lines,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
