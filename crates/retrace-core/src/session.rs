//! Editing session: one file and its snapshot timeline.

use crate::config::DEFAULT_BACKUP_SUFFIX;
use crate::error::CoreResult;
use retrace_snapshot::Timeline;
use retrace_util::{read_lines, write_lines};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of a successful [`EditorSession::save`].
#[derive(Debug)]
pub struct SaveReport {
    /// File the current content was written to.
    pub path: PathBuf,
    /// Where the original content was backed up.
    pub backup_path: PathBuf,
    /// Set when the backup could not be written. The main save still ran.
    pub backup_error: Option<retrace_util::Error>,
}

/// A file opened for editing together with its history.
#[derive(Debug)]
pub struct EditorSession {
    path: PathBuf,
    /// Content as loaded; only ever used as the backup source.
    original: Vec<String>,
    timeline: Timeline,
    backup_suffix: String,
    created: bool,
}

impl EditorSession {
    /// Open `path` for editing.
    ///
    /// A missing file is created empty and the session starts from an empty
    /// line sequence; check [`EditorSession::created`].
    pub async fn open(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let (original, created) = match read_lines(&path).await {
            Ok(lines) => (lines, false),
            Err(e) if e.is_not_found() => {
                info!(path = %path.display(), "File not found, creating empty file");
                write_lines(&path, &[]).await?;
                (Vec::new(), true)
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            path = %path.display(),
            lines = original.len(),
            created,
            "Opened session"
        );

        Ok(Self::from_lines(path, original, created))
    }

    /// Build a session around content already in memory.
    pub fn from_lines(path: impl Into<PathBuf>, original: Vec<String>, created: bool) -> Self {
        Self {
            path: path.into(),
            timeline: Timeline::new(original.clone()),
            original,
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            created,
        }
    }

    /// Use `suffix` for the backup path instead of `.bak`.
    pub fn with_backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.backup_suffix = suffix.into();
        self
    }

    /// Write the current content to disk.
    ///
    /// The original content goes to the backup path first. A failed backup is
    /// logged and reported in the returned [`SaveReport`] without stopping
    /// the main write; a failed main write is returned as an error.
    pub async fn save(&self) -> CoreResult<SaveReport> {
        let backup_path = self.backup_path();

        let backup_error = match write_lines(&backup_path, &self.original).await {
            Ok(()) => None,
            Err(e) => {
                warn!(path = %backup_path.display(), error = %e, "Backup write failed");
                Some(e)
            }
        };

        write_lines(&self.path, &self.timeline.current_lines()).await?;
        info!(
            path = %self.path.display(),
            index = self.timeline.current_index(),
            "Saved current state"
        );

        Ok(SaveReport {
            path: self.path.clone(),
            backup_path,
            backup_error,
        })
    }

    /// `path` with the backup suffix appended.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(&self.backup_suffix);
        PathBuf::from(name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn original(&self) -> &[String] {
        &self.original
    }

    /// Whether opening created the file.
    pub fn created(&self) -> bool {
        self.created
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }
}
