use std::path::{Path, PathBuf};

use crate::checkpoint::{Selection, DEFAULT_RUN_PATTERN};
use crate::error::ConfigError;
use crate::prune::{PhaseStart, RetentionPolicy};

/// Base directory swept when neither the config file nor the CLI names one.
pub const DEFAULT_BASE_DIR: &str = "/notebooks/x-transformers/checkpoints";

/// Where to look for run directories and how many to take.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub base_dir: PathBuf,
    pub pattern: String,
    pub select: Selection,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            pattern: DEFAULT_RUN_PATTERN.to_string(),
            select: Selection::Latest,
        }
    }
}

/// External program run once per located directory.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DeleterConfig {
    pub program: String,
    /// Arguments placed before the directory flag.
    pub args: Vec<String>,
    pub dir_flag: String,
}

impl Default for DeleterConfig {
    fn default() -> Self {
        DeleterConfig {
            program: "checkpoint-prune".to_string(),
            args: Vec::new(),
            dir_flag: "--model-dir".to_string(),
        }
    }
}

/// Retention settings for `checkpoint-prune`. A phase boundary is given either
/// as a percentage of the step span or as an absolute step, not both.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    pub early_interval: u64,
    pub middle_interval: u64,
    pub last_interval: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_start_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_start_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_start_steps: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_start_steps: Option<u64>,
}

impl Default for PruneConfig {
    fn default() -> Self {
        PruneConfig {
            early_interval: 5000,
            middle_interval: 10000,
            last_interval: 2000,
            middle_start_percent: None,
            last_start_percent: None,
            middle_start_steps: None,
            last_start_steps: None,
        }
    }
}

impl PruneConfig {
    /// Build the retention policy. Unset boundaries fall back to 33% and 90%.
    pub fn policy(&self) -> RetentionPolicy {
        let boundary = |steps: Option<u64>, percent: Option<f64>, fallback: f64| match steps {
            Some(step) => PhaseStart::Step(step),
            None => PhaseStart::Percent(percent.unwrap_or(fallback)),
        };
        RetentionPolicy {
            early_interval: self.early_interval,
            middle_interval: self.middle_interval,
            last_interval: self.last_interval,
            middle_start: boundary(self.middle_start_steps, self.middle_start_percent, 33.0),
            last_start: boundary(self.last_start_steps, self.last_start_percent, 90.0),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sweep: SweepConfig,
    pub deleter: DeleterConfig,
    pub prune: PruneConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = glob::Pattern::new(&self.sweep.pattern) {
            return Err(ConfigError::Validation(format!(
                "sweep.pattern is not a valid glob: {e}"
            )));
        }
        if self.deleter.program.trim().is_empty() {
            return Err(ConfigError::Validation(
                "deleter.program must not be empty".into(),
            ));
        }
        if self.deleter.dir_flag.trim().is_empty() {
            return Err(ConfigError::Validation(
                "deleter.dir_flag must not be empty".into(),
            ));
        }

        if self.prune.early_interval == 0 {
            return Err(ConfigError::Validation(
                "prune.early_interval must be > 0".into(),
            ));
        }
        if self.prune.middle_interval == 0 {
            return Err(ConfigError::Validation(
                "prune.middle_interval must be > 0".into(),
            ));
        }
        if self.prune.last_interval == 0 {
            return Err(ConfigError::Validation(
                "prune.last_interval must be > 0".into(),
            ));
        }
        for (name, percent) in [
            ("middle_start_percent", self.prune.middle_start_percent),
            ("last_start_percent", self.prune.last_start_percent),
        ] {
            if let Some(p) = percent {
                if !(0.0..=100.0).contains(&p) {
                    return Err(ConfigError::Validation(format!(
                        "prune.{name} must be in [0, 100]"
                    )));
                }
            }
        }
        if self.prune.middle_start_percent.is_some() && self.prune.middle_start_steps.is_some() {
            return Err(ConfigError::Validation(
                "set only one of prune.middle_start_percent and prune.middle_start_steps".into(),
            ));
        }
        if self.prune.last_start_percent.is_some() && self.prune.last_start_steps.is_some() {
            return Err(ConfigError::Validation(
                "set only one of prune.last_start_percent and prune.last_start_steps".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
