//! Interactive command loop.
//!
//! The loop only parses input, prompts for missing arguments and renders
//! results; every edit goes through the session's timeline.

use crate::render;
use anyhow::Result;
use retrace_core::{parse_delay, parse_number, ArgKind, Command, Config, EditorSession};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::Notify;
use tracing::{debug, info};

const PROMPT: &str = "tt> ";

enum Flow {
    Continue,
    Quit,
}

/// Reads commands from `input` and writes everything user-facing to `out`.
pub struct Repl<R, W> {
    session: EditorSession,
    config: Config,
    input: Lines<R>,
    out: W,
    /// Fired on Ctrl-C. Aborts a running replay or ends the session.
    interrupt: Arc<Notify>,
}

impl<R, W> Repl<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        session: EditorSession,
        config: Config,
        input: R,
        out: W,
        interrupt: Arc<Notify>,
    ) -> Self {
        Self {
            session,
            config,
            input: input.lines(),
            out,
            interrupt,
        }
    }

    /// Run until `q`, end of input, or an interrupt at a prompt.
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.out, "Simple Time-Travel Editor")?;
        writeln!(self.out, "{}", render::HELP)?;

        loop {
            let Some(line) = self.prompt(PROMPT).await? else {
                writeln!(self.out)?;
                break;
            };

            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(self.out, "{e}")?;
                    continue;
                }
            };

            debug!(?command, "Dispatching command");
            if let Flow::Quit = self.dispatch(command).await? {
                break;
            }
        }

        writeln!(self.out, "Bye.")?;
        self.out.flush()?;
        info!(snapshots = self.session.timeline().len(), "Session ended");
        Ok(())
    }

    /// Give the session back, e.g. to inspect it after a scripted run.
    pub fn into_session(self) -> EditorSession {
        self.session
    }

    async fn dispatch(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Show => {
                let timeline = self.session.timeline();
                render::current(
                    &mut self.out,
                    timeline.current_index(),
                    timeline.current().lines(),
                )?;
            }
            Command::Timeline => {
                render::history(
                    &mut self.out,
                    self.session.timeline().history(),
                    self.config.description_width(),
                )?;
            }
            Command::Preview(index) => {
                let Some(index) = self.number(index, ArgKind::Index).await? else {
                    return Ok(Flow::Continue);
                };
                match self.session.timeline().get(index) {
                    Ok(snapshot) => render::preview(
                        &mut self.out,
                        index,
                        snapshot.timestamp(),
                        snapshot.lines(),
                    )?,
                    Err(e) => writeln!(self.out, "{e}")?,
                }
            }
            Command::Checkout(index) => {
                let Some(index) = self.number(index, ArgKind::Index).await? else {
                    return Ok(Flow::Continue);
                };
                match self.session.timeline_mut().checkout(index) {
                    Ok(head) => writeln!(
                        self.out,
                        "Checked out state {index} and created new head at index {head}."
                    )?,
                    Err(e) => writeln!(self.out, "{e}")?,
                }
            }
            Command::Replace(line) => {
                let Some(line) = self.number(line, ArgKind::Line).await? else {
                    return Ok(Flow::Continue);
                };
                let Some(text) = self.prompt("New text (replace): ").await? else {
                    return Ok(Flow::Continue);
                };
                match self.session.timeline_mut().replace_line(line, text) {
                    Ok(()) => writeln!(self.out, "Replaced.")?,
                    Err(e) => writeln!(self.out, "{e}")?,
                }
            }
            Command::Insert(line) => {
                let Some(line) = self.number(line, ArgKind::Line).await? else {
                    return Ok(Flow::Continue);
                };
                let Some(text) = self.prompt("New text (insert): ").await? else {
                    return Ok(Flow::Continue);
                };
                match self.session.timeline_mut().insert_line(line, text) {
                    Ok(()) => writeln!(self.out, "Inserted.")?,
                    Err(e) => writeln!(self.out, "{e}")?,
                }
            }
            Command::Delete(line) => {
                let Some(line) = self.number(line, ArgKind::Line).await? else {
                    return Ok(Flow::Continue);
                };
                let confirm = self
                    .prompt(&format!("Delete line {line}? (y/N): "))
                    .await?
                    .unwrap_or_default();
                if confirm.trim().eq_ignore_ascii_case("y") {
                    match self.session.timeline_mut().delete_line(line) {
                        Ok(()) => writeln!(self.out, "Deleted.")?,
                        Err(e) => writeln!(self.out, "{e}")?,
                    }
                } else {
                    writeln!(self.out, "Cancelled.")?;
                }
            }
            Command::Diff { from, to } => {
                let Some(from) = self.number(from, ArgKind::Index).await? else {
                    return Ok(Flow::Continue);
                };
                let to = to.unwrap_or_else(|| self.session.timeline().current_index());
                match self.session.timeline().diff(from, to) {
                    Ok(diff) if diff.is_empty() => writeln!(
                        self.out,
                        "No differences between state {from} and state {to}."
                    )?,
                    Ok(diff) => write!(self.out, "{diff}")?,
                    Err(e) => writeln!(self.out, "{e}")?,
                }
            }
            Command::Play(delay) => {
                let delay = match delay {
                    Some(delay) => delay,
                    None => self.prompt_delay().await?,
                };
                self.play(delay).await?;
            }
            Command::Save => match self.session.save().await {
                Ok(report) => {
                    if let Some(e) = &report.backup_error {
                        writeln!(self.out, "Warning: couldn't write backup: {e}")?;
                    }
                    writeln!(
                        self.out,
                        "Saved current state to {} (backup -> {})",
                        report.path.display(),
                        report.backup_path.display()
                    )?;
                }
                Err(e) => writeln!(self.out, "Error writing file: {e}")?,
            },
            Command::Help => writeln!(self.out, "{}", render::HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Replay the whole timeline, pausing `delay` after each state.
    async fn play(&mut self, delay: Duration) -> Result<()> {
        writeln!(self.out, "Playing timeline forward from 0 to tip:")?;
        let replay = self.session.timeline().replay(delay);
        let step_delay = replay.step_delay();

        for frame in replay {
            render::replay_frame(&mut self.out, &frame)?;
            self.out.flush()?;

            tokio::select! {
                _ = tokio::time::sleep(step_delay) => {}
                _ = self.interrupt.notified() => {
                    writeln!(self.out, "\nPlayback interrupted.\n")?;
                    return Ok(());
                }
            }
        }

        writeln!(self.out, "Play finished.\n")?;
        Ok(())
    }

    /// Use `given` or ask for a number. `None` means the command is dropped.
    async fn number(&mut self, given: Option<usize>, kind: ArgKind) -> Result<Option<usize>> {
        if given.is_some() {
            return Ok(given);
        }
        let label = match kind {
            ArgKind::Index => "Enter state index: ",
            ArgKind::Line => "Enter line number: ",
        };
        let Some(answer) = self.prompt(label).await? else {
            return Ok(None);
        };
        match parse_number(&answer, kind) {
            Ok(n) => Ok(Some(n)),
            Err(e) => {
                writeln!(self.out, "{e}")?;
                Ok(None)
            }
        }
    }

    /// Ask for the replay delay, falling back to the configured default.
    async fn prompt_delay(&mut self) -> Result<Duration> {
        let default = self.config.replay_delay();
        let label = format!(
            "Delay seconds between steps (default {}): ",
            default.as_secs_f64()
        );
        let answer = self.prompt(&label).await?.unwrap_or_default();
        if answer.trim().is_empty() {
            return Ok(default);
        }
        Ok(parse_delay(&answer).unwrap_or(default))
    }

    /// Print `label` and read one line.
    ///
    /// Returns `None` at end of input or when interrupted.
    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        tokio::select! {
            line = self.input.next_line() => Ok(line?),
            _ = self.interrupt.notified() => {
                debug!("Prompt interrupted");
                Ok(None)
            }
        }
    }
}
