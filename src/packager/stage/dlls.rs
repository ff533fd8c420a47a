//! Runtime-library discovery and collection.
//!
//! Produces `<build>/dlls/` containing every shared library the application
//! binary (and its dynamically loaded plugins) require at load time. The
//! dependency set is discovered, not declared: each binary is handed to an
//! external link-inspection tool and the resolved paths are filtered to the
//! runtime prefix. System libraries outside the prefix are assumed present on
//! the target machine or are not redistributable.

use crate::packager::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
    stage::Stage,
    utils::{command, fs},
};
use std::path::{Path, PathBuf};

/// Collect the application's runtime libraries into `<build>/dlls/`.
///
/// # Process
///
/// 1. Recreate the staging directory from scratch
/// 2. Enumerate binaries to inspect: the application binary, every
///    plugin-glob match, every extra-library match
/// 3. Copy extra-library matches directly (they carry no link record in the
///    application binary, e.g. GPU-acceleration shims)
/// 4. Inspect each binary and copy its in-prefix dependencies, skipping
///    names already present
pub async fn collect(settings: &Settings) -> Result<()> {
    log::info!("Collecting runtime libraries for {}", settings.display_name());

    let dlls_dir = settings.dlls_dir();
    fs::create_dir_all(&dlls_dir, true).await?;

    let binary = settings.binary_path();
    if !binary.is_file() {
        return Err(Error::MissingInput {
            what: "application binary",
            path: binary,
        });
    }

    let mut binaries = vec![binary];

    for pattern in settings.plugin_globs() {
        let matches = fs::glob_under(settings.runtime_prefix(), pattern)?;
        log::debug!("plugin glob {pattern} matched {} binaries", matches.len());
        binaries.extend(matches);
    }

    // Explicit per-pattern enumeration, not a generic directory walk: these
    // libraries are loaded at runtime without appearing in any link record.
    for pattern in settings.extra_library_globs() {
        for library in fs::glob_under(settings.runtime_prefix(), pattern)? {
            copy_into(&library, &dlls_dir).await?;
            binaries.push(library);
        }
    }

    let mut collected = 0usize;
    for binary in &binaries {
        for dependency in inspect(settings, binary).await? {
            if dependency.starts_with(settings.runtime_prefix()) {
                if copy_into(&dependency, &dlls_dir).await? {
                    collected += 1;
                }
            } else {
                log::debug!("skipping out-of-prefix dependency {}", dependency.display());
            }
        }
    }

    log::info!(
        "✓ Collected {} runtime libraries into {}",
        collected,
        dlls_dir.display()
    );

    Ok(())
}

/// Runs the dependency inspector over one binary and parses its output.
async fn inspect(settings: &Settings, binary: &Path) -> Result<Vec<PathBuf>> {
    let stdout = command::capture_stdout(
        Stage::Dlls,
        &settings.tools().dependency_inspector,
        &[binary.as_os_str()],
    )
    .await?;

    Ok(stdout.lines().filter_map(parse_inspector_line).collect())
}

/// Parses one line of link-inspection output.
///
/// Lines have the form `NAME.dll => /resolved/path (0xADDRESS)`; the load
/// address suffix is optional and unresolved entries read `=> not found`.
/// Returns the resolved path, or `None` for unresolved or malformed lines.
fn parse_inspector_line(line: &str) -> Option<PathBuf> {
    let (_, resolved) = line.split_once("=>")?;
    let resolved = resolved.trim();

    // Strip the trailing load address, if present
    let resolved = match resolved.rsplit_once(" (") {
        Some((path, addr)) if addr.ends_with(')') => path.trim_end(),
        _ => resolved,
    };

    if resolved.is_empty() || resolved == "not found" {
        return None;
    }

    Some(PathBuf::from(resolved))
}

/// Copies a library into the collection directory, keyed by file name.
///
/// Returns whether a copy happened. An already-present name is skipped: the
/// same library shows up in many dependency lists and re-copying it would be
/// redundant I/O, not an error.
async fn copy_into(library: &Path, dlls_dir: &Path) -> Result<bool> {
    let name = library.file_name().ok_or_else(|| Error::GenericError(format!(
        "library path {library:?} has no file name"
    )))?;

    let dest = dlls_dir.join(name);
    if dest.exists() {
        log::debug!("already collected {}", dest.display());
        return Ok(false);
    }

    tokio::fs::copy(library, &dest)
        .await
        .fs_context("copying runtime library", library)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resolved_line_with_address() {
        let line = "\tlibgtk-4-1.dll => /mingw64/bin/libgtk-4-1.dll (0x7ff8a0000000)";
        assert_eq!(
            parse_inspector_line(line),
            Some(PathBuf::from("/mingw64/bin/libgtk-4-1.dll"))
        );
    }

    #[test]
    fn parses_windows_style_path() {
        let line = "\tlibglib-2.0-0.dll => C:\\msys64\\mingw64\\bin\\libglib-2.0-0.dll (0x10000)";
        assert_eq!(
            parse_inspector_line(line),
            Some(PathBuf::from("C:\\msys64\\mingw64\\bin\\libglib-2.0-0.dll"))
        );
    }

    #[test]
    fn parses_line_without_address() {
        let line = "libadwaita-1-0.dll => /mingw64/bin/libadwaita-1-0.dll";
        assert_eq!(
            parse_inspector_line(line),
            Some(PathBuf::from("/mingw64/bin/libadwaita-1-0.dll"))
        );
    }

    #[test]
    fn skips_unresolved_entries() {
        assert_eq!(parse_inspector_line("\tmissing.dll => not found"), None);
    }

    #[test]
    fn skips_lines_without_arrow() {
        assert_eq!(parse_inspector_line("ntldd 0.1"), None);
        assert_eq!(parse_inspector_line(""), None);
    }
}
