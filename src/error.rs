//! Error types for the file inventory system.

use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Db(#[from] sled::Error),

    #[error("Codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem scan errors
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to stat {path:?}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scan I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error for one reconciliation run
#[derive(Debug, Error)]
pub enum FiledexError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}
