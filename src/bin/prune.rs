use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;

use checkpoint_sweep::config::AppConfig;
use checkpoint_sweep::error::PruneError;
use checkpoint_sweep::logging;
use checkpoint_sweep::prune::{
    newest_checkpoint_dir, scan_model_checkpoints, CleanupRecord, PrunePlan,
};

/// Thin the model checkpoints of one training run.
#[derive(Parser)]
#[command(
    name = "checkpoint-prune",
    about = "Keep model_step_<N>.pt checkpoints at phase intervals and delete the rest"
)]
struct Cli {
    /// Directory containing model checkpoints (defaults to the newest
    /// `checkpoints/*` directory below the working directory)
    #[arg(long, alias = "model_dir")]
    model_dir: Option<PathBuf>,

    /// Early phase keep interval, in steps
    #[arg(long, alias = "early_interval")]
    early_interval: Option<u64>,

    /// Middle phase keep interval, in steps
    #[arg(long, alias = "middle_interval")]
    middle_interval: Option<u64>,

    /// Last phase keep interval, in steps
    #[arg(long, alias = "last_interval")]
    last_interval: Option<u64>,

    /// Start of the middle phase, as % of the step span (cannot be combined
    /// with --middle-start-steps)
    #[arg(long, alias = "middle_start_percent", conflicts_with = "middle_start_steps")]
    middle_start_percent: Option<f64>,

    /// Start of the last phase, as % of the step span (cannot be combined
    /// with --last-start-steps)
    #[arg(long, alias = "last_start_percent", conflicts_with = "last_start_steps")]
    last_start_percent: Option<f64>,

    /// Start of the middle phase, as a step number
    #[arg(long, alias = "middle_start_steps")]
    middle_start_steps: Option<u64>,

    /// Start of the last phase, as a step number
    #[arg(long, alias = "last_start_steps")]
    last_start_steps: Option<u64>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "sweep.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides. A boundary given on the command line replaces
    // whichever form the config file used.
    let prune = &mut app_config.prune;
    if let Some(v) = cli.early_interval {
        prune.early_interval = v;
    }
    if let Some(v) = cli.middle_interval {
        prune.middle_interval = v;
    }
    if let Some(v) = cli.last_interval {
        prune.last_interval = v;
    }
    if cli.middle_start_percent.is_some() || cli.middle_start_steps.is_some() {
        prune.middle_start_percent = cli.middle_start_percent;
        prune.middle_start_steps = cli.middle_start_steps;
    }
    if cli.last_start_percent.is_some() || cli.last_start_steps.is_some() {
        prune.last_start_percent = cli.last_start_percent;
        prune.last_start_steps = cli.last_start_steps;
    }
    app_config.validate().context("invalid prune settings")?;

    let model_dir = match cli.model_dir {
        Some(dir) => dir,
        None => match newest_checkpoint_dir(&std::env::current_dir()?)? {
            Some(dir) => {
                println!("Auto-selected newest checkpoint directory: {}", dir.display());
                dir
            }
            None => {
                println!("No checkpoint directory found!");
                return Ok(());
            }
        },
    };

    let checkpoints = match scan_model_checkpoints(&model_dir) {
        Ok(checkpoints) => checkpoints,
        // Nothing to prune in a directory that is not there.
        Err(PruneError::ModelDirMissing(_)) => Vec::new(),
        Err(e) => {
            return Err(e).with_context(|| format!("scanning {}", model_dir.display()));
        }
    };
    let Some(latest) = checkpoints.last() else {
        println!("No checkpoint files found in {}", model_dir.display());
        return Ok(());
    };
    println!(
        "Found latest checkpoint: {} (step: {})",
        latest.file_name(),
        latest.step
    );

    let keep = app_config.prune.policy().steps_to_keep(&checkpoints);
    let plan = PrunePlan::new(checkpoints, &keep);
    plan.print_summary();

    let record = CleanupRecord::write(&model_dir, &plan, Local::now().naive_local())?;
    println!("\nCleanup plan saved to: {}", record.path().display());

    let outcome = plan.execute();
    println!(
        "\nDeletion complete. Deleted {} files, {} errors.",
        outcome.deleted, outcome.errors
    );
    record.append_outcome(&outcome, Local::now().naive_local())?;
    tracing::info!(
        dir = %model_dir.display(),
        kept = plan.keep.len(),
        deleted = outcome.deleted,
        errors = outcome.errors,
        "prune finished"
    );

    if outcome.errors > 0 {
        bail!("{} checkpoint file(s) could not be deleted", outcome.errors);
    }
    Ok(())
}
