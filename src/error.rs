//! Error handling types and utilities.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for taskdocs-mcp operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a corpus file cannot be turned into a record.
///
/// Ingestion logs these and skips the offending file; a single malformed
/// file never fails a corpus load.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A task definition file contained invalid JSON or was missing
    /// required fields.
    #[error("invalid task definition at {path}: {source}")]
    InvalidTask {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
