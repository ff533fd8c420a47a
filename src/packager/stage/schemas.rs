//! Settings-schema collection and compilation.
//!
//! Produces `<build>/gschemas/` containing the application's settings schema,
//! the system schemas it references, and the binary catalog compiled from
//! them. The external compiler owns the catalog's filename, so compilation is
//! a pure function of the staged directory's contents.

use crate::packager::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
    stage::Stage,
    utils::{command, fs},
};

/// Stage and compile the settings schemas into `<build>/gschemas/`.
///
/// The application schema is required; a malformed schema is rejected by the
/// external compiler and aborts the pipeline before the locale and installer
/// stages run.
pub async fn compile(settings: &Settings) -> Result<()> {
    log::info!("Compiling settings schemas for {}", settings.display_name());

    let schemas_dir = settings.schemas_dir();
    fs::create_dir_all(&schemas_dir, true).await?;

    let app_schema = settings.app_schema();
    if !app_schema.is_file() {
        return Err(Error::MissingInput {
            what: "application settings schema",
            path: app_schema.to_path_buf(),
        });
    }

    let system_schemas =
        fs::glob_under(settings.runtime_prefix(), settings.system_schema_glob())?;
    log::debug!("staging {} system schemas", system_schemas.len());

    for schema in system_schemas {
        let name = schema.file_name().ok_or_else(|| {
            Error::GenericError(format!("schema path {schema:?} has no file name"))
        })?;
        tokio::fs::copy(&schema, schemas_dir.join(name))
            .await
            .fs_context("copying system schema", &schema)?;
    }

    let app_schema_name = app_schema.file_name().ok_or_else(|| {
        Error::GenericError(format!("schema path {app_schema:?} has no file name"))
    })?;
    tokio::fs::copy(app_schema, schemas_dir.join(app_schema_name))
        .await
        .fs_context("copying application schema", app_schema)?;

    command::run_checked(
        Stage::Schemas,
        &settings.tools().schema_compiler,
        &[schemas_dir.as_os_str()],
    )
    .await?;

    log::info!("✓ Compiled schema catalog in {}", schemas_dir.display());

    Ok(())
}
