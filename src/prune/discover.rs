use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::{glob_with, MatchOptions, Pattern};

use crate::error::PruneError;

/// The most recently modified directory matching `**/checkpoints/*` under
/// `root`. Hidden entries are not considered.
pub fn newest_checkpoint_dir(root: &Path) -> Result<Option<PathBuf>, PruneError> {
    let pattern = format!(
        "{}/**/checkpoints/*",
        Pattern::escape(&root.to_string_lossy())
    );
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let newest = glob_with(&pattern, options)?
        .filter_map(Result::ok)
        .filter(|p| p.is_dir())
        .filter_map(|p| {
            let modified = p.metadata().and_then(|m| m.modified()).ok()?;
            Some((modified, p))
        })
        .max_by_key(|(modified, _): &(SystemTime, PathBuf)| *modified)
        .map(|(_, p)| p);
    Ok(newest)
}
