//! memolog CLI entry point.
//!
//! Binary name: `memolog`
//!
//! Three operating modes:
//! - `--file <path>`: process a single journal file and exit
//! - `--once`: run one full batch pass over the watched directory and exit
//! - neither flag: one batch pass, then continuous watch mode until an
//!   interrupt signal is received

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod runner;
mod state;

use state::AppState;

/// Import fitness records from markdown journal files.
#[derive(Parser)]
#[command(name = "memolog", version, about, long_about = None)]
pub struct Cli {
    /// Run one full batch pass over the watched directory, then exit.
    #[arg(long)]
    pub once: bool,

    /// Process a single file, then exit.
    #[arg(long, value_name = "PATH", conflicts_with = "once")]
    pub file: Option<PathBuf>,

    /// Override the watched directory for this run.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,memolog=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let state = AppState::init(cli.dir.clone()).await?;

    let result = if let Some(path) = &cli.file {
        runner::run_single_file(&state, path, &cli).await
    } else if cli.once {
        runner::run_batch(&state, &cli).await.map(|_| ())
    } else {
        runner::run_watch(&state, &cli).await
    };

    state.db_pool.close().await;
    result
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
