//! Storage-specific error types for snapshot files.

use std::io;
use std::path::PathBuf;

use mfolio_core::errors::Error;
use thiserror::Error;

/// Storage-specific errors that carry the file involved.
///
/// These errors are internal to the storage layer and are converted to
/// `mfolio_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("cannot list {}: {source}", path.display())]
    ListFailed { path: PathBuf, source: io::Error },

    #[error("cannot read {}: {source}", path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    #[error("cannot parse {}: {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid fund in {}: {message}", path.display())]
    InvalidFund { path: PathBuf, message: String },

    #[error("cannot serialize snapshot for {account}: {source}")]
    SerializeFailed {
        account: String,
        source: serde_json::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    #[error("snapshot lock poisoned for {0}")]
    LockPoisoned(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ListFailed { .. }
            | StorageError::ReadFailed { .. }
            | StorageError::ParseFailed { .. }
            | StorageError::InvalidFund { .. } => Error::SnapshotReadFailed(err.to_string()),
            StorageError::SerializeFailed { .. }
            | StorageError::WriteFailed { .. }
            | StorageError::LockPoisoned(_) => Error::SnapshotWriteFailed(err.to_string()),
        }
    }
}
