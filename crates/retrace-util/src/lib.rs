//! Shared utilities for retrace.
//!
//! This crate provides common utilities used across the retrace workspace:
//! - Error handling patterns
//! - Logging setup with tracing
//! - Line-oriented file reading and writing

pub mod error;
pub mod file;
pub mod log;

pub use error::{Error, ErrorKind, Result};
pub use file::{read_lines, write_lines};
