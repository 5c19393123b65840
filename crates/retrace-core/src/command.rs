//! Interactive command parsing.
//!
//! Parsing only validates syntax: numeric arguments are checked here so a
//! malformed index never reaches the timeline. Whether an index is in range
//! is left to the timeline.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Which kind of number an argument names, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// A snapshot index in the timeline.
    Index,
    /// A line number in the current content.
    Line,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgKind::Index => write!(f, "index"),
            ArgKind::Line => write!(f, "line number"),
        }
    }
}

/// Errors raised while parsing user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'h' for help.")]
    Unknown(String),

    #[error("Invalid {kind}: '{value}'")]
    InvalidNumber { kind: ArgKind, value: String },

    #[error("Invalid delay: '{0}'")]
    InvalidDelay(String),
}

/// A parsed command.
///
/// Numeric arguments are `None` when the user left them off; the caller
/// prompts for them.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `s`: show the current state.
    Show,
    /// `t`: list the timeline.
    Timeline,
    /// `p <i>`: preview a state.
    Preview(Option<usize>),
    /// `c <i>`: check out a state as the new head.
    Checkout(Option<usize>),
    /// `r <n>`: replace a line.
    Replace(Option<usize>),
    /// `i <n>`: insert before a line.
    Insert(Option<usize>),
    /// `d <n>`: delete a line.
    Delete(Option<usize>),
    /// `diff <a> [b]`: diff two states, `b` defaulting to the current one.
    Diff {
        from: Option<usize>,
        to: Option<usize>,
    },
    /// `play [delay]`: replay the timeline, delay given in seconds.
    Play(Option<Duration>),
    /// `save`: write the current state to disk.
    Save,
    /// `h`: show help.
    Help,
    /// `q`: quit.
    Quit,
}

impl Command {
    /// Parse one input line. Blank input yields `Ok(None)`.
    pub fn parse(input: &str) -> Result<Option<Self>, CommandError> {
        let mut parts = input.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(None);
        };
        let arg = parts.next();

        let command = match name.to_lowercase().as_str() {
            "s" => Command::Show,
            "t" => Command::Timeline,
            "p" => Command::Preview(parse_opt(arg, ArgKind::Index)?),
            "c" => Command::Checkout(parse_opt(arg, ArgKind::Index)?),
            "r" => Command::Replace(parse_opt(arg, ArgKind::Line)?),
            "i" => Command::Insert(parse_opt(arg, ArgKind::Line)?),
            "d" => Command::Delete(parse_opt(arg, ArgKind::Line)?),
            "diff" => Command::Diff {
                from: parse_opt(arg, ArgKind::Index)?,
                to: parse_opt(parts.next(), ArgKind::Index)?,
            },
            "play" => Command::Play(arg.map(parse_delay).transpose()?),
            "save" => Command::Save,
            "h" | "help" => Command::Help,
            "q" | "quit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Parse a non-negative integer argument.
pub fn parse_number(value: &str, kind: ArgKind) -> Result<usize, CommandError> {
    let value = value.trim();
    value
        .parse::<usize>()
        .map_err(|_| CommandError::InvalidNumber {
            kind,
            value: value.to_string(),
        })
}

/// Parse a replay delay given in seconds.
pub fn parse_delay(value: &str) -> Result<Duration, CommandError> {
    let value = value.trim();
    value
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| CommandError::InvalidDelay(value.to_string()))
}

fn parse_opt(arg: Option<&str>, kind: ArgKind) -> Result<Option<usize>, CommandError> {
    arg.map(|value| parse_number(value, kind)).transpose()
}
