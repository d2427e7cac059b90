use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PruneError;

const FILE_PREFIX: &str = "model_step_";
const FILE_SUFFIX: &str = ".pt";

/// A saved model file and the training step it was written at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCheckpoint {
    pub path: PathBuf,
    pub step: u64,
}

impl ModelCheckpoint {
    /// File name for display; falls back to the full path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Parse the step out of a `model_step_<digits>.pt` file name.
pub fn parse_step(file_name: &str) -> Option<u64> {
    let digits = file_name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_SUFFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// All model checkpoint entries directly inside `dir`, sorted by step
/// (ascending). Entries are matched by name only; a directory named like a
/// checkpoint is listed too, and later fails to delete.
pub fn scan_model_checkpoints(dir: &Path) -> Result<Vec<ModelCheckpoint>, PruneError> {
    if !dir.is_dir() {
        return Err(PruneError::ModelDirMissing(dir.to_path_buf()));
    }
    let mut results = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if let Some(step) = parse_step(&name.to_string_lossy()) {
            results.push(ModelCheckpoint {
                path: entry.path(),
                step,
            });
        }
    }
    results.sort_by_key(|c| c.step);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_step() {
        assert_eq!(parse_step("model_step_5000.pt"), Some(5000));
        assert_eq!(parse_step("model_step_0.pt"), Some(0));
        assert_eq!(parse_step("model_step_.pt"), None);
        assert_eq!(parse_step("model_step_12a.pt"), None);
        assert_eq!(parse_step("model_step_100.pt.bak"), None);
        assert_eq!(parse_step("optimizer_step_100.pt"), None);
    }

    #[test]
    fn test_scan_sorts_by_step_and_ignores_others() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "model_step_20000.pt",
            "model_step_5000.pt",
            "model_step_100000.pt",
            "config.json",
            "model_step_final.pt",
        ] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("model_step_7.pt")).unwrap();
        fs::create_dir(dir.path().join("logs")).unwrap();

        let found = scan_model_checkpoints(dir.path()).unwrap();
        let steps: Vec<u64> = found.iter().map(|c| c.step).collect();
        assert_eq!(steps, vec![7, 5000, 20000, 100000]);
        assert_eq!(found[1].file_name(), "model_step_5000.pt");
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_model_checkpoints(&dir.path().join("gone")).unwrap_err();
        assert!(matches!(err, PruneError::ModelDirMissing(_)));
    }
}
