//! Pipeline orchestration.
//!
//! Runs the four stages strictly in sequence; each stage's filesystem output
//! is the next stage's input, so none may overlap. There is no retry,
//! rollback, or cleanup-on-failure: a failed run aborts immediately and the
//! next run recreates every staging directory from scratch.

use crate::packager::{settings::Settings, stage, Result};
use std::path::PathBuf;

/// Main pipeline orchestrator.
///
/// Coordinates the staging stages and the final installer invocation.
///
/// ```no_run
/// use gtkpack::packager::{Packager, Settings};
///
/// # async fn example(settings: Settings) -> gtkpack::packager::Result<()> {
/// let artifact = Packager::new(settings).run().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager {
    settings: Settings,
}

impl Packager {
    /// Creates a new packager with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Executes the full pipeline.
    ///
    /// # Process
    ///
    /// 1. Probe the external tools on PATH (fail fast before staging)
    /// 2. Collect runtime libraries into `dlls/`
    /// 3. Stage and compile settings schemas into `gschemas/`
    /// 4. Assemble the locale tree into `locale/`
    /// 5. Invoke the installer compiler on the descriptor script
    ///
    /// # Returns
    ///
    /// The verified installer artifact path, when the settings declared one.
    ///
    /// # Errors
    ///
    /// The first failing stage aborts the run; the error carries the stage
    /// and, for external tools, the literal command line that failed.
    pub async fn run(&self) -> Result<Option<PathBuf>> {
        log::info!(
            "Packaging {} ({}) from {}",
            self.settings.display_name(),
            self.settings.app_id(),
            self.settings.build_dir().display()
        );

        self.settings.tools().probe()?;

        stage::dlls::collect(&self.settings).await?;
        stage::schemas::compile(&self.settings).await?;
        stage::locale::collect(&self.settings).await?;
        let artifact = stage::installer::compile(&self.settings).await?;

        log::info!("✓ Packaging finished for {}", self.settings.app_name());

        Ok(artifact)
    }

    /// Returns a reference to the packager settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
