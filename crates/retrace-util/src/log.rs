//! Logging setup using tracing.
//!
//! This module provides consistent logging configuration across retrace.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration.
pub struct LogConfig {
    /// Whether to print logs to stderr.
    pub print: bool,
    /// Log level.
    pub level: LogLevel,
    /// Whether to include file/line info in logs.
    pub include_location: bool,
    /// Log file path (if any). Ignored when `print` is set.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            print: false,
            level: LogLevel::Info,
            include_location: false,
            file: None,
        }
    }
}

impl LogConfig {
    /// Filter directive scoped to the retrace crates.
    pub fn directive(&self) -> String {
        let level = self.level.as_str();
        format!("retrace={level},retrace_core={level},retrace_snapshot={level},retrace_util={level}")
    }
}

/// Initialize logging with the given configuration.
///
/// This should be called once at application startup. Returns the log file
/// path when logs are written to a file.
pub fn init(config: LogConfig) -> Option<PathBuf> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directive()));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.print {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location);

        subscriber.with(fmt_layer).init();
        return None;
    }

    let file = config.file.as_ref().and_then(|path| {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Warning: Could not create log directory: {e}");
                return None;
            }
        }
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => Some(f),
            Err(e) => {
                eprintln!("Warning: Could not open log file: {e}");
                None
            }
        }
    });

    match file {
        Some(file) => {
            let fmt_layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_file(config.include_location)
                .with_line_number(config.include_location);
            subscriber.with(fmt_layer).init();
            config.file
        }
        None => {
            // Spans still work, logs go nowhere
            subscriber.init();
            None
        }
    }
}

/// Get the default log file path.
pub fn default_log_path() -> Option<PathBuf> {
    log_dir().map(|dir| dir.join("retrace.log"))
}

/// Get the log directory path.
fn log_dir() -> Option<PathBuf> {
    // macOS: ~/Library/Logs/retrace
    // Linux: ~/.local/state/retrace/logs
    // Windows: %LOCALAPPDATA%/retrace/logs

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = dirs::home_dir() {
            return Some(home.join("Library/Logs/retrace"));
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(state_dir) = dirs::state_dir() {
            return Some(state_dir.join("retrace/logs"));
        }
        if let Some(home) = dirs::home_dir() {
            return Some(home.join(".local/state/retrace/logs"));
        }
    }

    dirs::data_local_dir().map(|d| d.join("retrace/logs"))
}
