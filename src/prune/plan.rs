use std::collections::BTreeSet;
use std::fs;

use crate::prune::scan::ModelCheckpoint;

/// Checkpoints split into those to keep and those to delete, both in step order.
#[derive(Debug, Clone, Default)]
pub struct PrunePlan {
    pub keep: Vec<ModelCheckpoint>,
    pub delete: Vec<ModelCheckpoint>,
}

/// Counts from [`PrunePlan::execute`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    pub deleted: usize,
    pub errors: usize,
}

impl PrunePlan {
    pub fn new(checkpoints: Vec<ModelCheckpoint>, keep_steps: &BTreeSet<u64>) -> Self {
        let (keep, delete) = checkpoints
            .into_iter()
            .partition(|c| keep_steps.contains(&c.step));
        PrunePlan { keep, delete }
    }

    pub fn total(&self) -> usize {
        self.keep.len() + self.delete.len()
    }

    /// Print the keep/delete listing.
    pub fn print_summary(&self) {
        println!("Found {} model checkpoint files.", self.total());
        println!(
            "Planning to keep {} files, delete {} files.",
            self.keep.len(),
            self.delete.len()
        );
        println!("\nFiles to keep:");
        for c in &self.keep {
            println!("  {}", c.file_name());
        }
        println!("\nFiles to delete:");
        for c in &self.delete {
            println!("  {}", c.file_name());
        }
    }

    /// Remove every file in `delete`. A failed removal is reported and the
    /// rest are still attempted.
    pub fn execute(&self) -> PruneOutcome {
        let mut outcome = PruneOutcome::default();
        for c in &self.delete {
            match fs::remove_file(&c.path) {
                Ok(()) => {
                    println!("Deleted: {}", c.file_name());
                    outcome.deleted += 1;
                }
                Err(e) => {
                    println!("Error deleting {}: {}", c.file_name(), e);
                    tracing::warn!(path = %c.path.display(), error = %e, "failed to delete checkpoint");
                    outcome.errors += 1;
                }
            }
        }
        outcome
    }
}
