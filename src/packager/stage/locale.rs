//! Locale-catalog assembly.
//!
//! Produces `<build>/locale/<lang>/LC_MESSAGES/` from the application's own
//! translations plus selected system catalogs. Iteration is driven by the
//! application's locale tree, never the system's superset, so the bundle
//! never advertises a language the application UI itself has not been
//! translated into — even if the underlying toolkit has.

use crate::packager::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
    utils::fs,
};
use std::path::Path;

/// Assemble the bundle's locale tree into `<build>/locale/`.
///
/// The application tree is copied verbatim as the base; for each of its
/// language tags, each configured system catalog (toolkit, base library,
/// adaptive layout) is copied when present. A missing system catalog is a
/// best-effort skip; a failed copy of the application's own catalogs is
/// fatal.
pub async fn collect(settings: &Settings) -> Result<()> {
    log::info!("Assembling locale tree for {}", settings.display_name());

    let locale_dir = settings.locale_dir();
    fs::remove_dir_all(&locale_dir).await?;

    let app_tree = settings.app_locale_dir();
    if !app_tree.is_dir() {
        return Err(Error::MissingInput {
            what: "application locale tree",
            path: app_tree.to_path_buf(),
        });
    }

    fs::copy_dir(app_tree, &locale_dir).await?;

    let system_tree = settings.system_locale_dir();
    for lang in supported_languages(app_tree).await? {
        for catalog in settings.system_catalogs() {
            let source = system_tree.join(&lang).join("LC_MESSAGES").join(catalog);
            if !source.is_file() {
                log::debug!("no system catalog {catalog} for {lang}, skipping");
                continue;
            }

            let dest = locale_dir.join(&lang).join("LC_MESSAGES").join(catalog);
            fs::copy_file(&source, &dest).await?;
        }
    }

    log::info!("✓ Assembled locale tree in {}", locale_dir.display());

    Ok(())
}

/// Lists the language tags the application itself supports.
///
/// One directory per tag in the application's locale tree; tags are plain
/// directory names, never paths. Sorted so catalog collection order is
/// deterministic.
async fn supported_languages(app_tree: &Path) -> Result<Vec<String>> {
    let mut languages = Vec::new();

    let mut entries = tokio::fs::read_dir(app_tree)
        .await
        .fs_context("reading application locale tree", app_tree)?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading application locale tree", app_tree)?
    {
        let file_type = entry
            .file_type()
            .await
            .fs_context("inspecting locale entry", entry.path())?;
        if file_type.is_dir() {
            languages.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    languages.sort();
    Ok(languages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn supported_languages_lists_only_directories() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(tmp.path().join("de/LC_MESSAGES")).expect("mkdir");
        std::fs::create_dir_all(tmp.path().join("fr/LC_MESSAGES")).expect("mkdir");
        std::fs::write(tmp.path().join("locale.alias"), b"").expect("write");

        let languages = supported_languages(tmp.path()).await.expect("languages");
        assert_eq!(languages, ["de", "fr"]);
    }

    #[tokio::test]
    async fn supported_languages_of_empty_tree_is_empty() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let languages = supported_languages(tmp.path()).await.expect("languages");
        assert!(languages.is_empty());
    }
}
