//! Snapshot error types.

use std::path::PathBuf;

use thiserror::Error;
use veckobrev_core::CoreError;

/// Errors from building, storing, or loading snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Filesystem access failed.
    #[error("snapshot I/O error at {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A stored snapshot could not be parsed.
    #[error("malformed snapshot {path}: {source}")]
    Decode {
        /// Snapshot file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A snapshot could not be serialized.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    /// The school part carries neither or both representations.
    #[error("invalid school state: {0}")]
    InvalidSchool(String),
    /// The (year, week) key does not name an ISO week.
    #[error(transparent)]
    Week(#[from] CoreError),
}

/// Result type for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
