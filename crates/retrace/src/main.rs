//! retrace - a time-travel line editor.
//!
//! This is the main entry point for the retrace CLI.

mod logging;
mod render;
mod repl;

use anyhow::Context;
use clap::Parser;
use repl::Repl;
use retrace_core::{Config, EditorSession};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::Notify;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "retrace")]
#[command(author, version, about = "Time-travel line editor", long_about = None)]
struct Cli {
    /// File to edit (created empty if it does not exist)
    file: PathBuf,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Default pause between replay steps, in seconds
    #[arg(long)]
    delay: Option<f64>,

    /// Ignore global and project config files
    #[arg(long)]
    no_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, sources) = if cli.no_config {
        (Config::default(), Vec::new())
    } else {
        let cwd = std::env::current_dir().context("Could not determine working directory")?;
        Config::load(Some(cwd.as_path())).await?
    };
    if let Some(delay) = cli.delay {
        config.replay_delay_secs = Some(delay);
        config.validate()?;
    }

    let log_file = logging::init_logging(cli.verbose, config.log_level());
    debug!(?sources, ?log_file, "Starting retrace");

    let session = EditorSession::open(&cli.file)
        .await
        .with_context(|| format!("Could not open {}", cli.file.display()))?
        .with_backup_suffix(config.backup_suffix());
    if session.created() {
        println!("File not found. Creating new empty file.");
    }

    let interrupt = Arc::new(Notify::new());
    let signal = interrupt.clone();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received");
            signal.notify_waiters();
        }
    });

    let stdin = BufReader::new(tokio::io::stdin());
    let mut repl = Repl::new(session, config, stdin, std::io::stdout(), interrupt);
    repl.run().await?;

    // An interrupted prompt leaves a blocking stdin read that would keep the
    // runtime from shutting down.
    std::process::exit(0)
}
