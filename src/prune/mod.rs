//! Thinning the `model_step_<N>.pt` files inside one run directory: scan,
//! decide what to keep, record the plan, delete the rest.

mod discover;
mod plan;
mod record;
mod retention;
mod scan;

pub use discover::newest_checkpoint_dir;
pub use plan::{PruneOutcome, PrunePlan};
pub use record::CleanupRecord;
pub use retention::{PhaseStart, RetentionPolicy};
pub use scan::{parse_step, scan_model_checkpoints, ModelCheckpoint};
