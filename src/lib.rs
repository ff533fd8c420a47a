//! Installer-asset collection and packaging pipeline for GTK applications.
//!
//! Given a build output directory and a MinGW-style runtime prefix, this
//! library assembles a self-contained distributable bundle in four strictly
//! sequential stages:
//!
//! 1. Runtime-library discovery and collection (`dlls/`)
//! 2. Settings-schema collection and compilation (`gschemas/`)
//! 3. Locale-catalog assembly (`locale/<lang>/LC_MESSAGES/`)
//! 4. Installer-compiler invocation
//!
//! Each staging directory is deleted and recreated on every run, so re-running
//! with identical inputs yields identical output trees. Any stage failure
//! aborts the whole pipeline with the literal failing command for diagnosis.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, GtkpackError, Result};
pub use packager::{Packager, Settings, SettingsBuilder};
