use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::PruneError;
use crate::prune::plan::{PruneOutcome, PrunePlan};

/// Plain-text record of a cleanup, written next to the checkpoints before
/// anything is deleted.
#[derive(Debug, Clone)]
pub struct CleanupRecord {
    path: PathBuf,
}

impl CleanupRecord {
    /// Write `checkpoint_cleanup_<YYYYmmdd_HHMMSS>.log` into `model_dir`.
    pub fn write(
        model_dir: &Path,
        plan: &PrunePlan,
        started: NaiveDateTime,
    ) -> Result<Self, PruneError> {
        let timestamp = started.format("%Y%m%d_%H%M%S").to_string();
        let path = model_dir.join(format!("checkpoint_cleanup_{timestamp}.log"));

        let mut lines = vec![
            format!("Checkpoint cleanup log - {timestamp}"),
            format!("Directory: {}", model_dir.display()),
            format!("Total files: {}", plan.total()),
            format!("Files kept: {}", plan.keep.len()),
            format!("Files deleted: {}", plan.delete.len()),
            String::new(),
            "Kept files:".to_string(),
        ];
        lines.extend(plan.keep.iter().map(|c| format!("  {}", c.file_name())));
        lines.push(String::new());
        lines.push("Deleted files:".to_string());
        lines.extend(plan.delete.iter().map(|c| format!("  {}", c.file_name())));
        let mut body = lines.join("\n");
        body.push('\n');

        fs::write(&path, body).map_err(|source| PruneError::RecordWrite {
            path: path.clone(),
            source,
        })?;
        Ok(CleanupRecord { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append what actually happened once deletion has finished.
    pub fn append_outcome(
        &self,
        outcome: &PruneOutcome,
        completed: NaiveDateTime,
    ) -> Result<(), PruneError> {
        let map_err = |source| PruneError::RecordWrite {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(map_err)?;
        write!(
            file,
            "\nActual deletions: {} files\nDeletion errors: {} files\nCompletion time: {}",
            outcome.deleted,
            outcome.errors,
            completed.format("%Y-%m-%d %H:%M:%S")
        )
        .map_err(map_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prune::scan::ModelCheckpoint;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn checkpoint(dir: &Path, step: u64) -> ModelCheckpoint {
        ModelCheckpoint {
            path: dir.join(format!("model_step_{step}.pt")),
            step,
        }
    }

    #[test]
    fn test_record_contents() {
        let dir = tempfile::tempdir().unwrap();
        let plan = PrunePlan {
            keep: vec![checkpoint(dir.path(), 1000), checkpoint(dir.path(), 3000)],
            delete: vec![checkpoint(dir.path(), 2000)],
        };

        let record = CleanupRecord::write(dir.path(), &plan, at(9, 5, 7)).unwrap();
        assert_eq!(
            record.path(),
            dir.path().join("checkpoint_cleanup_20240210_090507.log")
        );

        record
            .append_outcome(&PruneOutcome { deleted: 1, errors: 0 }, at(9, 6, 0))
            .unwrap();
        let text = fs::read_to_string(record.path()).unwrap();
        assert!(text.starts_with("Checkpoint cleanup log - 20240210_090507\n"));
        assert!(text.contains("Total files: 3\nFiles kept: 2\nFiles deleted: 1\n"));
        assert!(text.contains("Kept files:\n  model_step_1000.pt\n  model_step_3000.pt\n"));
        assert!(text.contains("Deleted files:\n  model_step_2000.pt\n"));
        assert!(text.ends_with(
            "Actual deletions: 1 files\nDeletion errors: 0 files\nCompletion time: 2024-02-10 09:06:00"
        ));
    }

    #[test]
    fn test_record_layout_for_empty_plan() {
        let dir = tempfile::tempdir().unwrap();
        let record = CleanupRecord::write(dir.path(), &PrunePlan::default(), at(23, 59, 1)).unwrap();

        let text = fs::read_to_string(record.path()).unwrap();
        assert_eq!(
            text,
            format!(
                "Checkpoint cleanup log - 20240210_235901\nDirectory: {}\nTotal files: 0\n\
                 Files kept: 0\nFiles deleted: 0\n\nKept files:\n\nDeleted files:\n",
                dir.path().display()
            )
        );
    }

    #[test]
    fn test_record_in_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = CleanupRecord::write(&dir.path().join("gone"), &PrunePlan::default(), at(0, 0, 0))
            .unwrap_err();
        assert!(matches!(err, PruneError::RecordWrite { .. }));
    }
}
