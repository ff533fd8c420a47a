//! Installer-compiler invocation.
//!
//! The installer descriptor is externally authored; it declares which staged
//! directories to embed and where its output lands. This stage's obligations
//! are ordering (it runs only after the staging stages complete) and
//! propagating the external compiler's exit status. On failure the earlier
//! staging directories are deliberately left on disk for inspection; the next
//! successful run rebuilds them from scratch anyway.

use crate::{
    bail,
    packager::{
        error::{Error, Result},
        settings::Settings,
        stage::Stage,
        utils::{checksum, command},
    },
};
use std::path::PathBuf;

/// Compile the installer descriptor into the final installer.
///
/// When the caller declared the descriptor's output path, the artifact is
/// verified to exist after a zero exit and its SHA-256 is logged; returns the
/// verified path in that case.
pub async fn compile(settings: &Settings) -> Result<Option<PathBuf>> {
    log::info!("Compiling installer for {}", settings.display_name());

    let script = settings.installer_script();
    if !script.is_file() {
        return Err(Error::MissingInput {
            what: "installer descriptor script",
            path: script.to_path_buf(),
        });
    }

    command::run_checked(
        Stage::Installer,
        &settings.tools().installer_compiler,
        &[script.as_os_str()],
    )
    .await?;

    let Some(artifact) = settings.expected_artifact() else {
        log::info!("✓ Installer compiler finished for {}", script.display());
        return Ok(None);
    };

    if !artifact.is_file() {
        bail!(
            "installer compiler exited successfully but {} was not created",
            artifact.display()
        );
    }

    let digest = checksum::calculate_sha256(artifact).await?;
    log::info!("✓ Created installer {} (sha256 {})", artifact.display(), digest);

    Ok(Some(artifact.to_path_buf()))
}
