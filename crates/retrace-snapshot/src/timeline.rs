//! Linear snapshot timeline.

use crate::history::{History, Replay};
use crate::{Snapshot, TimelineError, TimelineResult};
use std::time::Duration;
use tracing::{debug, info};

/// Description of the snapshot every timeline starts from.
pub const ORIGINAL_DESCRIPTION: &str = "Loaded original file";

/// An append/truncate sequence of snapshots plus a cursor.
///
/// Invariants:
/// - `snapshots` is never empty.
/// - `current_index < snapshots.len()`.
/// - `snapshots[0]` holds the original content and is never removed.
///
/// Pushing while the cursor is behind the tip discards every snapshot after
/// the cursor. History is strictly linear.
#[derive(Debug, Clone)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
    current_index: usize,
}

impl Timeline {
    /// Create a timeline seeded with the original file content.
    pub fn new(original: Vec<String>) -> Self {
        Self {
            snapshots: vec![Snapshot::new(original, ORIGINAL_DESCRIPTION)],
            current_index: 0,
        }
    }

    /// Record `lines` as the new tip.
    ///
    /// If the cursor is not at the tip, everything after it is dropped first.
    pub fn push_snapshot(&mut self, lines: Vec<String>, description: impl Into<String>) {
        let description = description.into();
        if !self.is_at_tip() {
            let dropped = self.snapshots.len() - self.current_index - 1;
            self.snapshots.truncate(self.current_index + 1);
            debug!(
                kept = self.snapshots.len(),
                dropped, "Truncated history after cursor"
            );
        }

        self.snapshots.push(Snapshot::new(lines, description));
        self.current_index = self.snapshots.len() - 1;
        debug!(
            index = self.current_index,
            description = %self.snapshots[self.current_index].description(),
            "Pushed snapshot"
        );
    }

    /// A copy of the lines at the cursor.
    pub fn current_lines(&self) -> Vec<String> {
        self.current().lines().to_vec()
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.current_index]
    }

    /// Replace line `line` of the current content.
    pub fn replace_line(&mut self, line: usize, text: impl Into<String>) -> TimelineResult<()> {
        let mut lines = self.current_lines();
        let len = lines.len();
        let slot = lines
            .get_mut(line)
            .ok_or_else(|| TimelineError::line(line, len))?;
        let old = std::mem::replace(slot, text.into());
        let description = format!("Replace line {line}: '{old}' -> '{}'", lines[line]);
        self.push_snapshot(lines, description);
        Ok(())
    }

    /// Insert `text` before line `line`. `line` may equal the line count to append.
    pub fn insert_line(&mut self, line: usize, text: impl Into<String>) -> TimelineResult<()> {
        let mut lines = self.current_lines();
        if line > lines.len() {
            return Err(TimelineError::line(line, lines.len()));
        }
        let text = text.into();
        let description = format!("Insert at {line}: '{text}'");
        lines.insert(line, text);
        self.push_snapshot(lines, description);
        Ok(())
    }

    /// Remove line `line` of the current content.
    pub fn delete_line(&mut self, line: usize) -> TimelineResult<()> {
        let mut lines = self.current_lines();
        if line >= lines.len() {
            return Err(TimelineError::line(line, lines.len()));
        }
        let old = lines.remove(line);
        self.push_snapshot(lines, format!("Delete line {line}: '{old}'"));
        Ok(())
    }

    /// Make snapshot `index` the new head.
    ///
    /// Moves the cursor to `index` and pushes a copy of its content, which
    /// truncates any later history. Returns the index of the new head.
    pub fn checkout(&mut self, index: usize) -> TimelineResult<usize> {
        let lines = self.get(index)?.lines().to_vec();
        self.current_index = index;
        self.push_snapshot(lines, format!("Checkout state {index} as new head"));
        info!(from = index, head = self.current_index, "Checked out state");
        Ok(self.current_index)
    }

    /// Read the lines of any snapshot without moving the cursor.
    pub fn preview(&self, index: usize) -> TimelineResult<&[String]> {
        Ok(self.get(index)?.lines())
    }

    /// The snapshot at `index`.
    pub fn get(&self, index: usize) -> TimelineResult<&Snapshot> {
        self.snapshots
            .get(index)
            .ok_or_else(|| TimelineError::snapshot(index, self.snapshots.len()))
    }

    /// One entry per snapshot, oldest first.
    pub fn history(&self) -> History<'_> {
        History::new(&self.snapshots, self.current_index)
    }

    /// Walk every snapshot from the original to the tip.
    ///
    /// Starts at index 0 regardless of the cursor. `step_delay` is carried
    /// for the caller to pace output; the iterator itself never sleeps.
    pub fn replay(&self, step_delay: Duration) -> Replay<'_> {
        Replay::new(&self.snapshots, step_delay)
    }

    /// The originally loaded content.
    pub fn original(&self) -> &[String] {
        self.snapshots[0].lines()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn tip_index(&self) -> usize {
        self.snapshots.len() - 1
    }

    pub fn is_at_tip(&self) -> bool {
        self.current_index == self.tip_index()
    }

    /// Number of recorded snapshots. Never zero.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true once constructed.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn abc() -> Timeline {
        Timeline::new(lines(&["a", "b", "c"]))
    }

    #[test]
    fn test_new_seeds_original_snapshot() {
        let timeline = abc();
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.current_index(), 0);
        assert!(timeline.is_at_tip());
        assert_eq!(timeline.current().description(), ORIGINAL_DESCRIPTION);
        assert_eq!(timeline.original(), lines(&["a", "b", "c"]).as_slice());
    }

    #[test]
    fn test_new_accepts_empty_content() {
        let mut timeline = Timeline::new(Vec::new());
        assert!(timeline.current_lines().is_empty());
        timeline.insert_line(0, "first").unwrap();
        assert_eq!(timeline.current_lines(), lines(&["first"]));
    }

    #[test]
    fn test_each_edit_adds_one_snapshot_and_keeps_original() {
        let mut timeline = abc();
        timeline.replace_line(0, "A").unwrap();
        assert_eq!(timeline.len(), 2);
        timeline.insert_line(3, "d").unwrap();
        assert_eq!(timeline.len(), 3);
        timeline.delete_line(1).unwrap();
        assert_eq!(timeline.len(), 4);

        assert_eq!(timeline.current_lines(), lines(&["A", "c", "d"]));
        assert_eq!(timeline.preview(0).unwrap(), lines(&["a", "b", "c"]).as_slice());
        assert_eq!(timeline.current_index(), 3);
    }

    #[test]
    fn test_current_lines_are_independent_copies() {
        let timeline = abc();
        let mut first = timeline.current_lines();
        let second = timeline.current_lines();
        assert_eq!(first, second);

        first[0] = "mutated".to_string();
        first.push("extra".to_string());
        assert_eq!(second, lines(&["a", "b", "c"]));
        assert_eq!(timeline.current_lines(), lines(&["a", "b", "c"]));
    }

    #[test]
    fn test_descriptions_record_edit() {
        let mut timeline = abc();
        timeline.replace_line(1, "B").unwrap();
        assert_eq!(timeline.current().description(), "Replace line 1: 'b' -> 'B'");
        timeline.insert_line(0, "Z").unwrap();
        assert_eq!(timeline.current().description(), "Insert at 0: 'Z'");
        timeline.delete_line(2).unwrap();
        assert_eq!(timeline.current().description(), "Delete line 2: 'B'");
        timeline.checkout(0).unwrap();
        assert_eq!(
            timeline.current().description(),
            "Checkout state 0 as new head"
        );
    }

    #[test]
    fn test_replace_out_of_range_leaves_state() {
        let mut timeline = abc();
        timeline.replace_line(0, "A").unwrap();

        let err = timeline.replace_line(3, "X").unwrap_err();
        assert_eq!(err, TimelineError::LineOutOfRange { line: 3, len: 3 });
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.current_index(), 1);
    }

    #[test]
    fn test_insert_bounds() {
        let mut timeline = abc();
        timeline.insert_line(3, "end").unwrap();
        assert_eq!(timeline.current_lines(), lines(&["a", "b", "c", "end"]));

        let err = timeline.insert_line(5, "late").unwrap_err();
        assert_eq!(err, TimelineError::line(5, 4));
        assert_eq!(timeline.len(), 2);
    }

    #[test]
    fn test_delete_out_of_range_on_empty_file() {
        let mut timeline = Timeline::new(Vec::new());
        assert!(timeline.delete_line(0).is_err());
        assert_eq!(timeline.len(), 1);
    }

    #[test]
    fn test_insert_then_delete_restores_content() {
        let mut timeline = abc();
        let before = timeline.current_lines();
        timeline.insert_line(1, "X").unwrap();
        timeline.delete_line(1).unwrap();
        assert_eq!(timeline.current_lines(), before);
        assert_eq!(timeline.len(), 3);
    }

    #[test]
    fn test_checkout_out_of_range_leaves_state() {
        let mut timeline = abc();
        timeline.delete_line(0).unwrap();
        let err = timeline.checkout(2).unwrap_err();
        assert_eq!(err, TimelineError::SnapshotOutOfRange { index: 2, len: 2 });
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.current_index(), 1);
    }

    #[test]
    fn test_checkout_tip_duplicates_without_truncation() {
        let mut timeline = abc();
        timeline.replace_line(0, "A").unwrap();
        let head = timeline.checkout(1).unwrap();
        assert_eq!(head, 2);
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.current_lines(), lines(&["A", "b", "c"]));
    }

    #[test]
    fn test_checkout_past_then_edit_truncates_future() {
        let mut timeline = abc();
        timeline.replace_line(0, "1").unwrap();
        timeline.replace_line(1, "2").unwrap();
        timeline.replace_line(2, "3").unwrap();
        assert_eq!(timeline.len(), 4);

        let k = 1;
        timeline.checkout(k).unwrap();
        timeline.insert_line(0, "new").unwrap();

        let entries: Vec<_> = timeline.history().collect();
        assert_eq!(entries.len(), k + 3);
        assert_eq!(entries[k + 1].description, "Checkout state 1 as new head");
        assert!(entries[k + 2].description.starts_with("Insert at 0"));
        assert!(entries[k + 2].is_current);
        assert_eq!(timeline.preview(k + 1).unwrap(), lines(&["1", "b", "c"]).as_slice());
        assert_eq!(timeline.current_lines(), lines(&["new", "1", "b", "c"]));
    }

    #[test]
    fn test_push_from_past_cursor_truncates() {
        let mut timeline = abc();
        timeline.replace_line(0, "A").unwrap();
        timeline.replace_line(1, "B").unwrap();

        // Cursor only moves through checkout, which pushes itself; emulate a
        // raw push after moving the cursor back.
        timeline.current_index = 0;
        timeline.push_snapshot(lines(&["fresh"]), "manual");
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.current_index(), 1);
        assert_eq!(timeline.current_lines(), lines(&["fresh"]));
        assert_eq!(timeline.original(), lines(&["a", "b", "c"]).as_slice());
    }

    #[test]
    fn test_scenario_replace_insert_checkout_delete() {
        let mut timeline = abc();

        timeline.replace_line(1, "B").unwrap();
        assert_eq!(timeline.current_lines(), lines(&["a", "B", "c"]));
        assert_eq!(timeline.len(), 2);

        timeline.insert_line(0, "Z").unwrap();
        assert_eq!(timeline.current_lines(), lines(&["Z", "a", "B", "c"]));
        assert_eq!(timeline.len(), 3);

        let head = timeline.checkout(0).unwrap();
        assert_eq!(head, 1);
        assert_eq!(timeline.current_lines(), lines(&["a", "b", "c"]));
        assert_eq!(timeline.len(), 2);

        timeline.delete_line(0).unwrap();
        assert_eq!(timeline.current_lines(), lines(&["b", "c"]));
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.current_index(), 2);

        // Both edits made after state 0 were dropped by the checkout.
        let expected = [
            lines(&["a", "b", "c"]),
            lines(&["a", "b", "c"]),
            lines(&["b", "c"]),
        ];
        for (index, content) in expected.iter().enumerate() {
            assert_eq!(timeline.preview(index).unwrap(), content.as_slice());
        }
        let descriptions: Vec<_> = timeline.history().map(|e| e.description).collect();
        assert_eq!(
            descriptions,
            vec![
                ORIGINAL_DESCRIPTION,
                "Checkout state 0 as new head",
                "Delete line 0: 'a'"
            ]
        );
        assert!(timeline.preview(3).is_err());
    }

    #[test]
    fn test_checkout_past_drops_later_states() {
        let mut timeline = abc();
        timeline.replace_line(0, "A").unwrap();
        timeline.replace_line(1, "B").unwrap();
        timeline.replace_line(2, "C").unwrap();

        let head = timeline.checkout(1).unwrap();
        assert_eq!(head, 2);
        assert_eq!(timeline.len(), 3);
        assert!(timeline.is_at_tip());
        assert_eq!(timeline.preview(1).unwrap(), lines(&["A", "b", "c"]).as_slice());
        assert_eq!(timeline.current_lines(), lines(&["A", "b", "c"]));
        assert_eq!(
            timeline.checkout(3).unwrap_err(),
            TimelineError::SnapshotOutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn test_preview_is_read_only() {
        let mut timeline = abc();
        timeline.replace_line(0, "A").unwrap();
        timeline.replace_line(1, "B").unwrap();

        for index in 0..timeline.len() {
            timeline.preview(index).unwrap();
            assert_eq!(timeline.len(), 3);
            assert_eq!(timeline.current_index(), 2);
        }
        assert!(timeline.preview(3).is_err());
    }
}
