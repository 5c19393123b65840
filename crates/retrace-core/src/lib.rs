//! Core editing logic for retrace.
//!
//! This crate ties the snapshot timeline to a file on disk:
//! - [`EditorSession`] owns one file's timeline and handles loading and saving
//! - [`Config`] loads user and project settings
//! - [`command`] parses the interactive command language

pub mod command;
pub mod config;
pub mod error;
pub mod session;

pub use command::{parse_delay, parse_number, ArgKind, Command, CommandError};
pub use config::Config;
pub use error::{ConfigError, CoreError, CoreResult};
pub use session::{EditorSession, SaveReport};
