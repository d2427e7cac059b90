use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use checkpoint_sweep::checkpoint::{CheckpointLocator, Selection};
use checkpoint_sweep::config::AppConfig;
use checkpoint_sweep::logging;
use checkpoint_sweep::sweep::{CommandDeleter, InvocationStatus, Sweeper};

/// Hand the newest checkpoint runs to the deletion program.
#[derive(Parser)]
#[command(
    name = "checkpoint-sweep",
    about = "Locate the newest checkpoint runs and run the deleter on each"
)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "sweep.toml")]
    config: PathBuf,

    /// Override the directory holding the run directories
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// How many of the newest runs to process
    #[arg(long, value_enum)]
    select: Option<Selection>,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(base_dir) = cli.base_dir {
        app_config.sweep.base_dir = base_dir;
    }
    if let Some(select) = cli.select {
        app_config.sweep.select = select;
    }

    let locator = CheckpointLocator::new(&app_config.sweep.base_dir, &app_config.sweep.pattern)?;
    let deleter = CommandDeleter::new(&app_config.deleter);
    let mut sweeper = Sweeper::new(locator, deleter);

    let report = sweeper.run(app_config.sweep.select)?;
    let launched = report
        .invocations
        .iter()
        .filter(|inv| matches!(inv.status, InvocationStatus::Completed(_)))
        .count();
    tracing::info!(
        processed = report.len(),
        launched,
        "sweep finished"
    );
    Ok(())
}
