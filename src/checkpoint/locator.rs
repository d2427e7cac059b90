use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::LocateError;

/// Naming convention for run directories: three underscore-delimited tokens.
pub const DEFAULT_RUN_PATTERN: &str = "*_*_*";

/// A checkpoint run directory found under the base directory.
///
/// Names are assumed to sort lexically in the same order as the runs were
/// created (e.g. `2024_02_10_run` after `2023_06_15_run`). Nothing checks this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointDir {
    pub path: PathBuf,
    pub name: String,
}

impl CheckpointDir {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        CheckpointDir { path, name }
    }
}

/// Enumerates run directories directly under a base directory.
#[derive(Debug, Clone)]
pub struct CheckpointLocator {
    base_dir: PathBuf,
    pattern: Pattern,
}

impl CheckpointLocator {
    pub fn new(base_dir: impl Into<PathBuf>, pattern: &str) -> Result<Self, LocateError> {
        let pattern = Pattern::new(pattern).map_err(|source| LocateError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(CheckpointLocator {
            base_dir: base_dir.into(),
            pattern,
        })
    }

    /// Locator using the default three-token naming pattern.
    pub fn with_default_pattern(base_dir: impl Into<PathBuf>) -> Self {
        CheckpointLocator {
            base_dir: base_dir.into(),
            pattern: Pattern::new(DEFAULT_RUN_PATTERN).expect("default pattern is valid"),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// All matching run directories, newest (lexically greatest) first.
    pub fn list(&self) -> Result<Vec<CheckpointDir>, LocateError> {
        if !self.base_dir.is_dir() {
            return Err(LocateError::BaseDirMissing(self.base_dir.clone()));
        }

        let mut results = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            // Symlinks are not followed.
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if !self.pattern.matches(&name_str) {
                continue;
            }
            results.push(CheckpointDir {
                path: entry.path(),
                name: name_str.into_owned(),
            });
        }
        results.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(results)
    }

    /// The `count` newest run directories. Fewer matches than `count` returns
    /// all of them; no matches returns an empty list.
    pub fn locate(&self, count: usize) -> Result<Vec<CheckpointDir>, LocateError> {
        let mut dirs = self.list()?;
        dirs.truncate(count);
        Ok(dirs)
    }
}
