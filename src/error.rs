//! Error types shared across the crate.

use thiserror::Error;

/// Rejection of a draft payload at the validation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid subject id '{0}' (expected CR followed by 3-6 digits)")]
    InvalidSubjectId(String),

    #[error("unknown stage '{0}'")]
    InvalidStage(String),

    #[error("unknown quality grade '{0}'")]
    InvalidQuality(String),

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("invalid {field} '{value}'")]
    InvalidMeasurement { field: &'static str, value: String },
}

/// Chain-level errors. Integrity failures are reported by verification, not here.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("requested index {requested} does not match next index {expected}")]
    IndexMismatch { requested: u64, expected: u64 },

    #[error("snapshot contains no records")]
    EmptySnapshot,

    #[error("unsupported snapshot format version '{0}'")]
    UnsupportedFormat(String),
}

/// Snapshot file I/O errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid path: {0}")]
    InvalidPath(String),
}

/// Top-level error surfaced by sessions, configuration and tooling.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    StorageError(#[from] StorageError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
