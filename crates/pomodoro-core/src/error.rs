//! Core error types for pomodoro-core.
//!
//! The hierarchy is split by concern: [`StoreError`] for the persisted
//! document, [`ValidationError`] for rejected settings, and [`CoreError`]
//! wrapping both for callers that drive the whole engine.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomodoro-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persisted document errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A setting was outside its allowed range
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] ValidationError),
}

/// Errors raised while reading or writing the state document.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The document exists but cannot be parsed as an app state.
    #[error("State document at {path} is corrupt: {source}")]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Import was requested but no backup exists at the given path.
    #[error("No backup found at {path}")]
    MissingBackup { path: PathBuf },

    /// Reading, writing or renaming a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state could not be serialized.
    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The data directory could not be determined or created.
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error reports an unreadable document (as opposed to I/O).
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::CorruptState { .. })
    }
}

/// Validation errors for user-editable settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Numeric setting outside its range
    #[error("'{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Unknown settings key
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),
}

impl CoreError {
    /// Whether the underlying cause is a corrupt state document.
    pub fn is_corrupt_state(&self) -> bool {
        matches!(self, CoreError::Store(e) if e.is_corrupt())
    }

    /// Whether the underlying cause is a missing backup file.
    pub fn is_missing_backup(&self) -> bool {
        matches!(self, CoreError::Store(StoreError::MissingBackup { .. }))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
