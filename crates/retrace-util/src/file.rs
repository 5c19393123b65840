//! Line-oriented file reading and writing.

use crate::{Error, Result};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Read a text file as a sequence of lines.
///
/// Undecodable bytes are replaced rather than rejected. Both `\n` and
/// `\r\n` terminate a line; a trailing terminator does not produce an
/// extra empty line. A lone `\r` is not a terminator and stays in the
/// line. A missing file yields an error of kind `NotFound`.
pub async fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| Error::from_io_at(path, e))?;
    let content = String::from_utf8_lossy(&bytes);
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    debug!(path = %path.display(), lines = lines.len(), "Read file");
    Ok(lines)
}

/// Write lines to a file joined by `\n`.
///
/// A non-empty sequence always ends with exactly one trailing newline. An
/// empty sequence produces an empty file.
pub async fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    fs::write(path, join_lines(lines))
        .await
        .map_err(|e| Error::from_io_at(path, e))?;
    debug!(path = %path.display(), lines = lines.len(), "Wrote file");
    Ok(())
}

fn join_lines(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
