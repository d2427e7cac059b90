use std::path::PathBuf;

/// Errors that can occur while enumerating checkpoint run directories.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("base directory not found: {0}")]
    BaseDirMissing(PathBuf),

    #[error("invalid directory pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when the external deletion program cannot be run.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

/// Errors that end a sweep.
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("Dir not found: no checkpoint runs under {0}")]
    NotFound(PathBuf),

    #[error("locating checkpoints: {0}")]
    Locate(#[from] LocateError),
}

/// Errors that can occur while pruning model files inside a run directory.
#[derive(Debug, thiserror::Error)]
pub enum PruneError {
    #[error("model directory not found: {0}")]
    ModelDirMissing(PathBuf),

    #[error("invalid discovery pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to write cleanup record {path}: {source}")]
    RecordWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
