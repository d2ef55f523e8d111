//! gitdeploy CLI - continuous deployment daemon
//!
//! Usage: gitdeploy [OPTIONS] <WATCH_DIR>

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gitdeploy::config::{self, Settings};
use gitdeploy::{git, Coordinator, GitCli, SyncEngine, SyncOptions};

/// Exit status for fatal startup errors
const FATAL_EXIT: u8 = 255;

/// gitdeploy - keep directories in sync with remote git branches
#[derive(Parser, Debug)]
#[command(name = "gitdeploy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Run a single cycle, then exit
    #[arg(long)]
    one_shot: bool,

    /// Seconds to sleep between cycles, at least 1 [default: 60]
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    cycle_time: Option<u64>,

    /// Seconds before a git or post-update command is killed, 0 disables [default: 600]
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Do not run the post-update command after a first-time clone
    #[arg(long)]
    no_action_on_clone: bool,

    /// Descriptor file name suffix [default: Deployfile]
    #[arg(long, value_name = "NAME")]
    descriptor: Option<String>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Directory tree to scan for descriptors
    watch_dir: PathBuf,
}

impl Cli {
    /// Resolve settings: CLI flags over environment over defaults.
    fn settings(&self) -> Settings {
        let mut settings = config::with_env_overrides(Settings::default());

        settings.watch_dir = self.watch_dir.clone();
        settings.one_shot = self.one_shot;
        if let Some(secs) = self.cycle_time {
            settings.cycle_time = std::time::Duration::from_secs(secs);
        }
        if let Some(secs) = self.timeout {
            settings.command_timeout = Settings::timeout_from_secs(secs);
        }
        if self.no_action_on_clone {
            settings.action_on_clone = false;
        }
        if let Some(name) = &self.descriptor {
            settings.descriptor_name = name.clone();
        }

        settings
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(FATAL_EXIT)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_logging(cli.verbose, cli.log_json) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = git::ensure_installed() {
        tracing::error!(error = %e, "git client or ssh not found, install them with your package manager");
        return ExitCode::from(FATAL_EXIT);
    }

    match run(cli.settings()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: Settings) -> Result<()> {
    if !settings.watch_dir.is_dir() {
        tracing::warn!(watch_dir = %settings.watch_dir.display(), "watch directory does not exist yet");
    }

    tracing::info!(
        watch_dir = %settings.watch_dir.display(),
        one_shot = settings.one_shot,
        cycle_time_secs = settings.cycle_time.as_secs(),
        timeout_secs = settings.command_timeout.map(|t| t.as_secs()).unwrap_or(0),
        "gitdeploy starting"
    );

    let shutdown = shutdown_signal()?;

    let runner = Arc::new(GitCli::new(settings.command_timeout));
    let engine = SyncEngine::new(runner, SyncOptions::from(&settings));
    let coordinator = Coordinator::new(settings, Arc::new(engine));

    coordinator.run(shutdown).await;
    Ok(())
}

fn init_logging(verbose: u8, json: bool) -> Result<()> {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    result.context("failed to initialise logging")
}

/// Install SIGINT/SIGTERM handlers now and resolve when either arrives.
///
/// Handlers are registered before the first cycle so a signal received while a
/// cycle runs is delivered once that cycle has been joined.
#[cfg(unix)]
fn shutdown_signal() -> Result<impl std::future::Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt =
        signal(SignalKind::interrupt()).context("failed to install SIGINT handler")?;
    let mut terminate =
        signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;

    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => {}
            _ = terminate.recv() => {}
        }
    })
}

#[cfg(not(unix))]
fn shutdown_signal() -> Result<impl std::future::Future<Output = ()>> {
    Ok(async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    })
}
