//! Error handling utilities.
//!
//! This module provides a consistent error handling pattern across retrace.

use std::fmt;
use std::path::Path;

/// A type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for retrace utilities.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// IO operation failed
    Io,
    /// Not found
    NotFound,
    /// Permission denied
    PermissionDenied,
}

impl ErrorKind {
    fn from_io(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::Io,
        }
    }
}

impl Error {
    /// Create a new error with a source error.
    pub fn with_source<E>(kind: ErrorKind, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wrap an IO error raised while touching `path`.
    ///
    /// The kind follows the underlying IO error so callers can tell a
    /// missing file apart from other failures.
    pub fn from_io_at(path: &Path, err: std::io::Error) -> Self {
        let kind = ErrorKind::from_io(&err);
        Self::with_source(kind, format!("{}: {}", path.display(), err), err)
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether this error means the target does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = ErrorKind::from_io(&err);
        Self::with_source(kind, err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_error_display_is_message() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = Error::with_source(ErrorKind::Io, "could not save", io_err);
        assert_eq!(err.to_string(), "could not save");
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_error_from_io_keeps_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.is_not_found());
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn test_error_from_io_other() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_io_at_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from_io_at(Path::new("/tmp/notes.txt"), io_err);
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(err.to_string().contains("/tmp/notes.txt"));
    }
}
