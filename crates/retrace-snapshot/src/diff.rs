//! Line diffs between snapshots.

use crate::{Timeline, TimelineResult};
use similar::{ChangeTag, TextDiff};

impl Timeline {
    /// Unified diff from snapshot `from` to snapshot `to`.
    ///
    /// Returns an empty string when both snapshots hold the same lines.
    pub fn diff(&self, from: usize, to: usize) -> TimelineResult<String> {
        let old = self.get(from)?;
        let new = self.get(to)?;
        if old.lines() == new.lines() {
            return Ok(String::new());
        }

        Ok(generate_diff(
            &joined(old.lines()),
            &joined(new.lines()),
            &format!("state {from}"),
            &format!("state {to}"),
        ))
    }
}

fn joined(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    if !lines.is_empty() {
        text.push('\n');
    }
    text
}

/// Generate a unified diff between two strings.
fn generate_diff(old: &str, new: &str, old_label: &str, new_label: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let mut output = String::new();

    output.push_str(&format!("--- {old_label}\n"));
    output.push_str(&format!("+++ {new_label}\n"));

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push_str("...\n");
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };

                output.push_str(sign);
                output.push_str(change.value());
                if !change.value().ends_with('\n') {
                    output.push('\n');
                }
            }
        }
    }

    output
}
