//! Top-level error types for the packager binary.
//!
//! Stage-level errors live in [`crate::packager::error`]; this module wraps
//! them together with CLI and I/O failures for the binary entry point.

use thiserror::Error;

/// Result type alias for top-level operations
pub type Result<T> = std::result::Result<T, GtkpackError>;

/// Main error type for the packager binary
#[derive(Error, Debug)]
pub enum GtkpackError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Packaging pipeline errors
    #[error("{0}")]
    Packager(#[from] crate::packager::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}
