//! Logging initialization.
//!
//! With `--verbose` logs go to stderr at debug level. Otherwise they are
//! appended to a file in the platform log directory so they never mix with
//! the editor's own output.

use retrace_util::log::{self, LogConfig, LogLevel};
use std::path::PathBuf;

/// Initialize logging. Returns the log file path if logging to a file.
pub fn init_logging(verbose: bool, level: LogLevel) -> Option<PathBuf> {
    if verbose {
        return log::init(LogConfig {
            print: true,
            level: LogLevel::Debug,
            include_location: true,
            file: None,
        });
    }

    log::init(LogConfig {
        print: false,
        level,
        include_location: false,
        file: log::default_log_path(),
    })
}
