//! Configuration management for retrace.
//!
//! Configuration is loaded from multiple sources and merged:
//! 1. Global config: `~/.config/retrace/config.json` or `config.jsonc`
//! 2. Environment variable: `RETRACE_CONFIG_CONTENT`
//! 3. Project config: `retrace.json` or `retrace.jsonc` in the working directory
//!
//! Command-line flags are applied on top by the binary.

use crate::error::{ConfigError, CoreResult};
use retrace_util::log::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default pause between replay frames.
pub const DEFAULT_REPLAY_DELAY: Duration = Duration::from_millis(600);

/// Default suffix appended to the file path for the backup written on save.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

/// Default width of the description column in the timeline listing.
pub const DEFAULT_DESCRIPTION_WIDTH: usize = 60;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pause between replay frames, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replay_delay_secs: Option<f64>,

    /// Suffix for the backup file written on save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_suffix: Option<String>,

    /// Width of the description column in the timeline listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_width: Option<usize>,

    /// Log level when not running verbose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Loading order (later sources override earlier):
    /// 1. Global config from `~/.config/retrace/`
    /// 2. `RETRACE_CONFIG_CONTENT` environment variable
    /// 3. Project config from `project_dir`
    pub async fn load(project_dir: Option<&Path>) -> CoreResult<(Self, Vec<PathBuf>)> {
        Self::load_from(Self::global_config_dir().as_deref(), project_dir).await
    }

    /// Load configuration with an explicit global directory.
    pub async fn load_from(
        global_dir: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> CoreResult<(Self, Vec<PathBuf>)> {
        let mut config = Config::default();
        let mut sources = Vec::new();

        // 1. Load global config
        if let Some(global_dir) = global_dir {
            for name in &["config.jsonc", "config.json"] {
                let path = global_dir.join(name);
                if path.exists() {
                    let loaded = Self::load_file(&path).await?;
                    config = config.merge(loaded);
                    sources.push(path);
                    break;
                }
            }
        }

        // 2. Load from environment variable
        if let Ok(content) = std::env::var("RETRACE_CONFIG_CONTENT") {
            let loaded = Self::parse_jsonc(&content, "<env>")?;
            config = config.merge(loaded);
        }

        // 3. Load project config
        if let Some(dir) = project_dir {
            for name in &["retrace.jsonc", "retrace.json"] {
                let path = dir.join(name);
                if path.exists() {
                    let loaded = Self::load_file(&path).await?;
                    config = config.merge(loaded);
                    sources.push(path);
                    break;
                }
            }
        }

        config.validate()?;
        tracing::debug!(sources = ?sources, "Loaded configuration");
        Ok((config, sources))
    }

    /// Get the global config directory.
    ///
    /// On Unix systems, prefers `~/.config/retrace` over the
    /// platform-specific directory.
    pub fn global_config_dir() -> Option<PathBuf> {
        #[cfg(unix)]
        {
            if let Some(home) = dirs::home_dir() {
                let xdg_config = home.join(".config").join("retrace");
                if xdg_config.exists() {
                    return Some(xdg_config);
                }
            }
        }

        dirs::config_dir().map(|d| d.join("retrace"))
    }

    /// Load configuration from a file.
    pub async fn load_file(path: &Path) -> CoreResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse_jsonc(&content, &path.display().to_string())
    }

    /// Check values that would otherwise fail at use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(delay) = self.replay_delay_secs {
            if Duration::try_from_secs_f64(delay).is_err() {
                return Err(ConfigError::validation(format!(
                    "replay_delay_secs must be a non-negative number, got {delay}"
                )));
            }
        }
        if self.description_width == Some(0) {
            return Err(ConfigError::validation(
                "description_width must be greater than zero",
            ));
        }
        if matches!(self.backup_suffix.as_deref(), Some("")) {
            return Err(ConfigError::validation("backup_suffix must not be empty"));
        }
        Ok(())
    }

    /// Pause between replay frames.
    pub fn replay_delay(&self) -> Duration {
        self.replay_delay_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .unwrap_or(DEFAULT_REPLAY_DELAY)
    }

    pub fn backup_suffix(&self) -> &str {
        self.backup_suffix.as_deref().unwrap_or(DEFAULT_BACKUP_SUFFIX)
    }

    pub fn description_width(&self) -> usize {
        self.description_width
            .filter(|width| *width > 0)
            .unwrap_or(DEFAULT_DESCRIPTION_WIDTH)
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    /// Parse JSONC (JSON with comments).
    fn parse_jsonc(content: &str, source: &str) -> CoreResult<Self> {
        let stripped = Self::strip_comments(content);

        serde_json::from_str(&stripped).map_err(|e| {
            ConfigError::InvalidJson {
                path: source.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Strip JSON comments.
    fn strip_comments(input: &str) -> String {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();
        let mut in_string = false;
        let mut escape_next = false;

        while let Some(c) = chars.next() {
            if escape_next {
                result.push(c);
                escape_next = false;
                continue;
            }

            if c == '\\' && in_string {
                result.push(c);
                escape_next = true;
                continue;
            }

            if c == '"' {
                in_string = !in_string;
                result.push(c);
                continue;
            }

            if in_string {
                result.push(c);
                continue;
            }

            if c == '/' {
                match chars.peek() {
                    Some('/') => {
                        chars.next();
                        for c in chars.by_ref() {
                            if c == '\n' {
                                result.push('\n');
                                break;
                            }
                        }
                        continue;
                    }
                    Some('*') => {
                        chars.next();
                        let mut prev = ' ';
                        for c in chars.by_ref() {
                            if prev == '*' && c == '/' {
                                break;
                            }
                            // Preserve newlines for error reporting
                            if c == '\n' {
                                result.push('\n');
                            }
                            prev = c;
                        }
                        continue;
                    }
                    _ => {}
                }
            }

            result.push(c);
        }

        result
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(mut self, other: Self) -> Self {
        if other.replay_delay_secs.is_some() {
            self.replay_delay_secs = other.replay_delay_secs;
        }
        if other.backup_suffix.is_some() {
            self.backup_suffix = other.backup_suffix;
        }
        if other.description_width.is_some() {
            self.description_width = other.description_width;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        self
    }
}
