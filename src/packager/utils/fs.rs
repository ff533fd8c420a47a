//! File system utilities for staging.
//!
//! Provides safe file operations with automatic directory creation,
//! symlink preservation, and comprehensive error handling.

use crate::packager::error::{Error, Result};
use std::{
    io,
    path::Path,
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if
/// specified.
///
/// Erase-then-create is what makes each pipeline stage idempotent: stale
/// files from a previous (possibly failed) run never survive into the next.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    Ok(fs::create_dir_all(path).await?)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e.into()),
    }
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir).await?;
    }
    fs::copy(from, to).await?;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks on platforms that support them. Fails if the source
/// path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    // Validate in async context (cheap, doesn't need spawn_blocking)
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_dir() {
        return Err(Error::GenericError(format!("{from:?} is not a directory")));
    }

    // Clone paths for move into blocking closure
    let from = from.to_path_buf();
    let to = to.to_path_buf();

    // Offload blocking work to dedicated thread pool
    tokio::task::spawn_blocking(move || {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Blocking iteration is OK in spawn_blocking
        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry?;
            debug_assert!(entry.path().starts_with(&from));
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path())?;
                if entry.path().is_dir() {
                    symlink_dir(&target, &dest_path)?;
                } else {
                    symlink_file(&target, &dest_path)?;
                }
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(dest_path)?;
            } else {
                std::fs::copy(entry.path(), dest_path)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

/// Expands a glob pattern relative to a root directory.
///
/// Only the relative pattern carries glob syntax; the root is escaped before
/// joining so metacharacters in the root path (`[`, `]`, `?`, `*`) are
/// matched literally instead of silently matching nothing. Results are
/// sorted so enumeration order is deterministic across runs. Glob matching
/// operates on strings, so both parts must be valid UTF-8.
pub fn glob_under(root: &Path, pattern: &str) -> Result<Vec<std::path::PathBuf>> {
    let root = root
        .to_str()
        .ok_or_else(|| Error::GenericError(format!("root path {root:?} is not valid UTF-8")))?;

    let full = Path::new(&glob::Pattern::escape(root)).join(pattern);
    let pattern = full
        .to_str()
        .ok_or_else(|| Error::GenericError(format!("glob pattern {full:?} is not valid UTF-8")))?;

    let mut matches = Vec::new();
    for entry in glob::glob(pattern)? {
        matches.push(entry?);
    }
    matches.sort();
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_under_matches_relative_patterns() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let schemas = tmp.path().join("share/glib-2.0/schemas");
        std::fs::create_dir_all(&schemas).expect("mkdir");
        std::fs::write(schemas.join("org.gtk.Settings.FileChooser.gschema.xml"), b"")
            .expect("write");
        std::fs::write(schemas.join("org.vendor.Other.gschema.xml"), b"").expect("write");

        let matches =
            glob_under(tmp.path(), "share/glib-2.0/schemas/org.gtk.*.xml").expect("glob");
        assert_eq!(matches.len(), 1);
        assert!(matches[0].ends_with("org.gtk.Settings.FileChooser.gschema.xml"));
    }

    #[test]
    fn glob_under_matches_literally_inside_roots_with_metacharacters() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let prefix = tmp.path().join("prefix [ci]");
        std::fs::create_dir_all(prefix.join("bin")).expect("mkdir");
        std::fs::write(prefix.join("bin/libEGL.dll"), b"").expect("write");
        std::fs::write(prefix.join("bin/libGLESv2.dll"), b"").expect("write");

        let matches = glob_under(&prefix, "bin/libEGL.dll").expect("glob");
        assert_eq!(matches, [prefix.join("bin/libEGL.dll")]);

        let matches = glob_under(&prefix, "bin/*.dll").expect("glob");
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn glob_under_with_no_matches_is_empty() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let matches = glob_under(tmp.path(), "lib/*.dll").expect("glob");
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn create_dir_all_with_erase_drops_stale_contents() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path().join("staging");
        std::fs::create_dir_all(&dir).expect("mkdir");
        std::fs::write(dir.join("stale.dll"), b"old").expect("write");

        create_dir_all(&dir, true).await.expect("recreate");

        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).expect("read_dir").count(), 0);
    }

    #[tokio::test]
    async fn copy_file_creates_parents() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let src = tmp.path().join("app.mo");
        std::fs::write(&src, b"catalog").expect("write");

        let dest = tmp.path().join("locale/de/LC_MESSAGES/app.mo");
        copy_file(&src, &dest).await.expect("copy");

        assert_eq!(std::fs::read(&dest).expect("read"), b"catalog");
    }

    #[tokio::test]
    async fn copy_dir_copies_tree_verbatim() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let src = tmp.path().join("locale");
        std::fs::create_dir_all(src.join("de/LC_MESSAGES")).expect("mkdir");
        std::fs::write(src.join("de/LC_MESSAGES/app.mo"), b"de").expect("write");

        let dest = tmp.path().join("out");
        copy_dir(&src, &dest).await.expect("copy");

        assert_eq!(
            std::fs::read(dest.join("de/LC_MESSAGES/app.mo")).expect("read"),
            b"de"
        );
    }

    #[tokio::test]
    async fn copy_file_rejects_missing_source() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let result = copy_file(&tmp.path().join("nope"), &tmp.path().join("out")).await;
        assert!(result.is_err());
    }
}
