//! Plain-text rendering of file content and history.

use chrono::{DateTime, Local, Utc};
use retrace_snapshot::{HistoryEntry, ReplayFrame};
use std::io::{self, Write};

pub const HELP: &str = "
Commands:
  s             : show current file state
  t             : show timeline
  p <i>         : preview state index i
  c <i>         : checkout state i (branch from past)
  r <n>         : replace line n (will prompt for text)
  i <n>         : insert before line n (will prompt for text)
  d <n>         : delete line n
  diff <a> [b]  : diff state a against state b (default: current)
  play [delay]  : play through timeline
  save          : save current to disk (creates .bak)
  q             : quit
  h             : show this help
";

/// Local wall-clock time, second precision.
pub fn timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Cut `text` to at most `width` characters, marking the cut with `...`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

pub fn lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for (i, line) in lines.iter().enumerate() {
        writeln!(out, "{i:3}: {line}")?;
    }
    Ok(())
}

pub fn current(out: &mut impl Write, index: usize, content: &[String]) -> io::Result<()> {
    writeln!(out, "\n=== Current file state (index {index}) ===")?;
    lines(out, content)?;
    writeln!(out, "=== end ===\n")
}

pub fn preview(
    out: &mut impl Write,
    index: usize,
    ts: DateTime<Utc>,
    content: &[String],
) -> io::Result<()> {
    writeln!(out, "\n--- Preview state {index} ({}) ---", timestamp(ts))?;
    lines(out, content)?;
    writeln!(out, "--- end preview ---\n")
}

pub fn history<'a>(
    out: &mut impl Write,
    entries: impl Iterator<Item = HistoryEntry<'a>>,
    width: usize,
) -> io::Result<()> {
    writeln!(out, "\n--- Timeline ---")?;
    for entry in entries {
        let marker = if entry.is_current { "<-- current" } else { "" };
        let description = truncate(entry.description, width);
        let row = format!(
            "{:3} | {} | {description:width$} {marker}",
            entry.index,
            timestamp(entry.timestamp),
        );
        writeln!(out, "{}", row.trim_end())?;
    }
    writeln!(out, "--- end ---\n")
}

pub fn replay_frame(out: &mut impl Write, frame: &ReplayFrame<'_>) -> io::Result<()> {
    writeln!(
        out,
        "\n---- state {} ({}) ----",
        frame.index,
        timestamp(frame.timestamp)
    )?;
    lines(out, frame.lines)
}
