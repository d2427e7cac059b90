use crate::checkpoint::{CheckpointDir, CheckpointLocator, Selection};
use crate::error::{LocateError, SweepError};
use crate::sweep::deleter::{DeleteOutcome, Deleter};

/// Result of handing one directory to the deleter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationStatus {
    Completed(DeleteOutcome),
    LaunchFailed(String),
}

#[derive(Debug, Clone)]
pub struct Invocation {
    pub dir: CheckpointDir,
    pub status: InvocationStatus,
}

/// Directories handed to the deleter during one sweep, in invocation order.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub invocations: Vec<Invocation>,
}

impl SweepReport {
    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }
}

/// Locates the newest runs and passes each one to a [`Deleter`], one at a time.
pub struct Sweeper<D: Deleter> {
    locator: CheckpointLocator,
    deleter: D,
}

impl<D: Deleter> Sweeper<D> {
    pub fn new(locator: CheckpointLocator, deleter: D) -> Self {
        Sweeper { locator, deleter }
    }

    pub fn deleter(&self) -> &D {
        &self.deleter
    }

    /// Run one sweep.
    ///
    /// Nothing to act on (no matches, or no base directory) is `NotFound` and
    /// the deleter is never called. A failed invocation is logged and the
    /// remaining directories are still processed.
    pub fn run(&mut self, selection: Selection) -> Result<SweepReport, SweepError> {
        let base_dir = self.locator.base_dir().to_path_buf();
        let dirs = match self.locator.locate(selection.count()) {
            Ok(dirs) => dirs,
            Err(LocateError::BaseDirMissing(path)) => return Err(SweepError::NotFound(path)),
            Err(e) => return Err(e.into()),
        };
        if dirs.is_empty() {
            return Err(SweepError::NotFound(base_dir));
        }

        tracing::info!(
            base_dir = %base_dir.display(),
            selection = selection.name(),
            found = dirs.len(),
            "located checkpoint runs"
        );

        let mut report = SweepReport::default();
        for dir in dirs {
            let status = match self.deleter.delete(&dir) {
                Ok(outcome) => {
                    if outcome.is_success() {
                        tracing::info!(dir = %dir.path.display(), "deleter finished");
                    } else {
                        tracing::warn!(
                            dir = %dir.path.display(),
                            outcome = ?outcome,
                            "deleter exited unsuccessfully"
                        );
                    }
                    InvocationStatus::Completed(outcome)
                }
                Err(e) => {
                    tracing::warn!(dir = %dir.path.display(), error = %e, "deleter did not run");
                    InvocationStatus::LaunchFailed(e.to_string())
                }
            };
            report.invocations.push(Invocation { dir, status });
        }
        Ok(report)
    }
}
