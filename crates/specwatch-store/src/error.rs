//! Error types for archive and registry operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors writing the versioned archive
#[derive(Error, Debug)]
pub enum StoreError {
    /// Directory creation or file write failed
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Sidecar serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A key segment cannot be used as a directory name
    #[error("Invalid archive key: {0}")]
    InvalidKey(String),
}

/// Errors loading or saving the registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Registry or summary file could not be read or written
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Registry document is not a JSON array of entries
    #[error("Failed to parse registry {path}: {source}")]
    Parse {
        /// Registry path
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },

    /// An entry violates the registry invariants
    #[error("Invalid registry entry #{index} ({key}): {reason}")]
    InvalidEntry {
        /// Position in the registry array
        index: usize,
        /// `<vendor>/<api>` of the entry
        key: String,
        /// Validation failure
        reason: String,
    },

    /// Registry could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
