//! Checkpoint run directories: locating them under a base directory and
//! choosing how many of the newest to act on.

mod locator;
mod selection;

pub use locator::{CheckpointDir, CheckpointLocator, DEFAULT_RUN_PATTERN};
pub use selection::Selection;
