//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Predictor name is not one of the supported kinds.
    #[error("invalid predictor '{value}': expected 'factor' or 'popularity'")]
    InvalidPredictor { value: String },

    /// List length must be at least one.
    #[error("invalid top_n {value}: must be greater than zero")]
    InvalidTopN { value: usize },

    /// A required environment variable was not set.
    ///
    /// Raised when the factor predictor is selected without a model path.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
