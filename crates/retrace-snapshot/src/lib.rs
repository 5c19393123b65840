//! Snapshot timeline for retrace.
//!
//! Every edit to a file produces a new immutable [`Snapshot`] of its full
//! content. A [`Timeline`] keeps those snapshots in one linear sequence with
//! a cursor, and supports:
//! - Line replace, insert and delete
//! - Checkout of any past state as a new head (truncating later history)
//! - Read-only preview, history listing and replay
//! - Diffs between any two states
//!
//! # Example
//!
//! ```
//! use retrace_snapshot::Timeline;
//!
//! let mut timeline = Timeline::new(vec!["a".into(), "b".into(), "c".into()]);
//! timeline.replace_line(1, "B").unwrap();
//! timeline.checkout(0).unwrap();
//!
//! assert_eq!(timeline.current_lines(), vec!["a", "b", "c"]);
//! // The replace was dropped; the checkout copy is the new head.
//! assert_eq!(timeline.len(), 2);
//! ```

mod diff;
mod error;
mod history;
mod snapshot;
mod timeline;

pub use error::{TimelineError, TimelineResult};
pub use history::{History, HistoryEntry, Replay, ReplayFrame};
pub use snapshot::Snapshot;
pub use timeline::{Timeline, ORIGINAL_DESCRIPTION};
