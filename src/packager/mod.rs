//! Installer-asset collection and packaging pipeline.
//!
//! The pipeline stages everything an installer descriptor references into the
//! build root, then invokes the external installer compiler:
//!
//! | Stage | Output | External tool |
//! |-----------|-----------------------------------|--------------------------|
//! | dlls | `<build>/dlls/` | dependency inspector |
//! | gschemas | `<build>/gschemas/` | settings-schema compiler |
//! | locale | `<build>/locale/<lang>/LC_MESSAGES/` | none |
//! | installer | descriptor-declared artifact | installer compiler |
//!
//! Stages run strictly in order; each one recreates its staging directory
//! from scratch, so a failed run leaves no state a later successful run would
//! trip over. Any external command exiting non-zero aborts the whole pipeline
//! with the literal command line for manual reproduction.
//!
//! ```no_run
//! use gtkpack::packager::{Packager, SettingsBuilder};
//!
//! # async fn example() -> gtkpack::packager::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .source_dir("/src/app")
//!     .build_dir("/build/app")
//!     .runtime_prefix("/mingw64")
//!     .app_name("app")
//!     .display_name("App")
//!     .app_id("com.example.App")
//!     .binary("bin/app.exe")
//!     .installer_script("/src/app/packaging/app.iss")
//!     .build()?;
//!
//! Packager::new(settings).run().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
mod pipeline;
mod settings;
pub(crate) mod stage;
mod tools;
pub(crate) mod utils;

// Public re-exports
pub use error::{Context, Error, ErrorExt, Result};
pub use pipeline::Packager;
pub use settings::{Settings, SettingsBuilder};
pub use stage::Stage;
pub use tools::{ToolConfig, ToolSpec};
