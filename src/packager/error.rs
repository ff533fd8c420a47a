//! Error types for the packaging pipeline.
//!
//! Provides contextual error chaining, filesystem-specific errors, and typed
//! stage failures carrying the literal external command for diagnosis.
//!
//! - **Context trait**: add context to errors, eagerly or lazily
//! - **ErrorExt trait**: filesystem operations with automatic path context
//! - **bail! macro**: early return with formatted error messages

use crate::packager::stage::Stage;
use std::{
    fmt::Display,
    io, path,
    path::PathBuf,
    process::ExitStatus,
};
use thiserror::Error as DeriveError;

/// Errors returned by the packaging pipeline.
///
/// Covers all failure conditions of a pipeline run: missing inputs, external
/// tool failures, and filesystem errors. External tools are never retried;
/// their failures are deterministic given the same inputs.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "copying runtime library")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// A required input file or directory does not exist.
    ///
    /// Raised before any external tool is invoked for the affected stage.
    #[error("{what} not found at {path}")]
    MissingInput {
        /// Description of the missing input (e.g., "application binary")
        what: &'static str,
        /// Path that was expected to exist
        path: PathBuf,
    },

    /// A required external tool is not on PATH.
    #[error("required external tool `{program}` not found in PATH")]
    ToolNotFound {
        /// Program name from the tool configuration
        program: String,
    },

    /// Child process could not be spawned.
    #[error("failed to run command `{command}`: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// External tool exited unsuccessfully.
    ///
    /// Carries the stage it belongs to and the literal command line so the
    /// failure can be reproduced by hand.
    #[error("[{stage}] command `{command}` exited unsuccessfully ({status})")]
    ToolFailed {
        /// Pipeline stage the command belongs to
        stage: Stage,
        /// The literal command line that was attempted
        command: String,
        /// Exit status reported by the operating system
        status: ExitStatus,
    },

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Error walking a directory tree (locale assembly).
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripError(#[from] path::StripPrefixError),

    /// Invalid glob pattern (plugin or schema enumeration).
    #[error("{0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Glob execution error.
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    /// JSON deserialization error (tool configuration file).
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with the pipeline's [`Error`]
/// type. Works with both `Result<T>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    ///
    /// Use this when context string construction is expensive.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
///
/// Wraps I/O errors with the path that caused them for better diagnostics.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the
    /// operation, e.g., "reading file", "creating staging directory".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns immediately.
///
/// # Examples
///
/// ```ignore
/// bail!("operation failed");
/// bail!("invalid value: {}", value);
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::packager::error::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::packager::error::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::packager::error::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failed_names_stage_and_command() {
        #[cfg(unix)]
        let status = {
            use std::os::unix::process::ExitStatusExt;
            ExitStatus::from_raw(256)
        };
        #[cfg(windows)]
        let status = {
            use std::os::windows::process::ExitStatusExt;
            ExitStatus::from_raw(1)
        };

        let err = Error::ToolFailed {
            stage: Stage::Schemas,
            command: "glib-compile-schemas /tmp/gschemas".into(),
            status,
        };
        let msg = err.to_string();
        assert!(msg.contains("gschemas"));
        assert!(msg.contains("glib-compile-schemas /tmp/gschemas"));
    }

    #[test]
    fn context_wraps_inner_error() {
        let inner: Result<()> = Err(Error::GenericError("boom".into()));
        let wrapped = inner.context("collecting runtime libraries");
        assert_eq!(
            wrapped.unwrap_err().to_string(),
            "collecting runtime libraries: boom"
        );
    }

    #[test]
    fn missing_input_displays_path() {
        let err = Error::MissingInput {
            what: "application binary",
            path: PathBuf::from("/build/bin/app.exe"),
        };
        assert_eq!(
            err.to_string(),
            "application binary not found at /build/bin/app.exe"
        );
    }
}
