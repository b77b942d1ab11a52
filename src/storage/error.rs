use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Errors returned by storage backends.
pub enum StorageError {
    /// IO error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be read or written.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// File being read or written.
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required data file is missing.
    #[error("data file not found: {path}")]
    NotFound {
        /// Expected file path.
        path: PathBuf,
    },

    /// Data directory did not exist and could not be created.
    #[error("failed to create data directory {path}: {source}")]
    CreateDataDir {
        /// Directory that could not be created.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data path exists but is not a directory.
    #[error("data directory unavailable: {path}")]
    DataDirUnavailable {
        /// Path that was unavailable.
        path: PathBuf,
    },
}

/// Convenience result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
