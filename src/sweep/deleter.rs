use std::ffi::OsString;
use std::process::Command;

use crate::checkpoint::CheckpointDir;
use crate::config::DeleterConfig;
use crate::error::InvokeError;

/// How a single deletion run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Succeeded,
    /// The program ran but exited unsuccessfully. `code` is `None` when it was
    /// killed by a signal.
    Failed { code: Option<i32> },
}

impl DeleteOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, DeleteOutcome::Succeeded)
    }
}

/// Something that removes or prunes one checkpoint run directory.
pub trait Deleter {
    /// Process `dir` and block until done.
    fn delete(&mut self, dir: &CheckpointDir) -> Result<DeleteOutcome, InvokeError>;
}

/// Runs an external program once per directory:
/// `<program> <args...> <dir_flag> <path>`.
#[derive(Debug, Clone)]
pub struct CommandDeleter {
    program: String,
    args: Vec<String>,
    dir_flag: String,
}

impl CommandDeleter {
    pub fn new(config: &DeleterConfig) -> Self {
        CommandDeleter {
            program: config.program.clone(),
            args: config.args.clone(),
            dir_flag: config.dir_flag.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program for `dir` (the program itself excluded).
    pub fn arguments(&self, dir: &CheckpointDir) -> Vec<OsString> {
        let mut argv: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        argv.push(OsString::from(&self.dir_flag));
        argv.push(dir.path.clone().into_os_string());
        argv
    }
}

impl Deleter for CommandDeleter {
    fn delete(&mut self, dir: &CheckpointDir) -> Result<DeleteOutcome, InvokeError> {
        tracing::debug!(program = %self.program, dir = %dir.path.display(), "invoking deleter");
        let status = Command::new(&self.program)
            .args(self.arguments(dir))
            .status()
            .map_err(|source| InvokeError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if status.success() {
            Ok(DeleteOutcome::Succeeded)
        } else {
            Ok(DeleteOutcome::Failed {
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn run_dir() -> CheckpointDir {
        CheckpointDir::new(PathBuf::from("/ckpt/2024_02_10_run"))
    }

    #[test]
    fn test_arguments_default_config() {
        let deleter = CommandDeleter::new(&DeleterConfig::default());
        assert_eq!(deleter.program(), "checkpoint-prune");
        assert_eq!(
            deleter.arguments(&run_dir()),
            vec![
                OsString::from("--model-dir"),
                OsString::from("/ckpt/2024_02_10_run"),
            ]
        );
    }

    #[test]
    fn test_arguments_with_leading_args() {
        let deleter = CommandDeleter::new(&DeleterConfig {
            program: "python".to_string(),
            args: vec!["del_checkpoint.py".to_string()],
            dir_flag: "--model_dir".to_string(),
        });
        assert_eq!(
            deleter.arguments(&run_dir()),
            vec![
                OsString::from("del_checkpoint.py"),
                OsString::from("--model_dir"),
                OsString::from("/ckpt/2024_02_10_run"),
            ]
        );
    }

    #[test]
    fn test_outcome_is_success() {
        assert!(DeleteOutcome::Succeeded.is_success());
        assert!(!DeleteOutcome::Failed { code: Some(2) }.is_success());
        assert!(!DeleteOutcome::Failed { code: None }.is_success());
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let mut deleter = CommandDeleter::new(&DeleterConfig {
            program: "definitely-not-a-real-program-4f1c".to_string(),
            ..DeleterConfig::default()
        });
        let err = deleter.delete(&run_dir()).unwrap_err();
        assert!(matches!(err, InvokeError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_reported() {
        let mut ok = CommandDeleter::new(&DeleterConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "exit 0".to_string(), "sh".to_string()],
            ..DeleterConfig::default()
        });
        assert_eq!(ok.delete(&run_dir()).unwrap(), DeleteOutcome::Succeeded);

        let mut failing = CommandDeleter::new(&DeleterConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "exit 3".to_string(), "sh".to_string()],
            ..DeleterConfig::default()
        });
        assert_eq!(
            failing.delete(&run_dir()).unwrap(),
            DeleteOutcome::Failed { code: Some(3) }
        );
    }
}
