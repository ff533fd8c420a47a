//! Pipeline configuration.
//!
//! All paths a run touches are resolved up front into one [`Settings`] value
//! and passed explicitly into the pipeline; nothing reads the ambient working
//! directory or environment once a run has started.

use crate::packager::tools::ToolConfig;
use std::path::{Path, PathBuf};

/// Default glob, relative to the runtime prefix, for dynamically loaded
/// plugin binaries whose dependencies must also be collected.
const DEFAULT_PLUGIN_GLOBS: &[&str] = &["lib/gdk-pixbuf-2.0/*/loaders/*.dll"];

/// Default GPU-acceleration shims. These are loaded at runtime without a
/// link record in the application binary, so they are copied directly in
/// addition to having their own dependencies resolved.
const DEFAULT_EXTRA_LIBRARY_GLOBS: &[&str] = &["bin/libEGL.dll", "bin/libGLESv2.dll"];

/// Default glob, relative to the runtime prefix, for system settings schemas
/// compiled alongside the application schema.
const DEFAULT_SYSTEM_SCHEMA_GLOB: &str = "share/glib-2.0/schemas/org.gtk.*.xml";

/// Well-known system message catalogs copied per supported language.
/// Missing catalogs are best-effort skips, not errors.
const DEFAULT_SYSTEM_CATALOGS: &[&str] = &["gtk40.mo", "glib20.mo", "libadwaita.mo"];

/// Resolved configuration for one packaging run.
///
/// Constructed via [`SettingsBuilder`]. Every optional input has been
/// defaulted by the time a `Settings` exists, so the pipeline stages never
/// have to make policy decisions themselves.
#[derive(Clone, Debug)]
pub struct Settings {
    source_dir: PathBuf,
    build_dir: PathBuf,
    runtime_prefix: PathBuf,
    app_name: String,
    display_name: String,
    app_id: String,
    binary: PathBuf,
    installer_script: PathBuf,
    app_schema: PathBuf,
    app_locale_dir: PathBuf,
    plugin_globs: Vec<String>,
    extra_library_globs: Vec<String>,
    system_schema_glob: String,
    system_catalogs: Vec<String>,
    expected_artifact: Option<PathBuf>,
    tools: ToolConfig,
}

impl Settings {
    /// Returns the source root path.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Returns the build root path, under which all staging directories live.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Returns the runtime-environment install prefix.
    ///
    /// Only shared libraries under this prefix are redistributed; anything
    /// outside it is assumed present on the target machine.
    pub fn runtime_prefix(&self) -> &Path {
        &self.runtime_prefix
    }

    /// Returns the application short name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns the application display name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the application identifier in reverse-domain form.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Returns the full path to the built application binary.
    pub fn binary_path(&self) -> PathBuf {
        self.build_dir.join(&self.binary)
    }

    /// Returns the path to the installer descriptor script.
    pub fn installer_script(&self) -> &Path {
        &self.installer_script
    }

    /// Returns the staging directory for collected shared libraries.
    pub fn dlls_dir(&self) -> PathBuf {
        self.build_dir.join("dlls")
    }

    /// Returns the staging directory for settings schemas.
    pub fn schemas_dir(&self) -> PathBuf {
        self.build_dir.join("gschemas")
    }

    /// Returns the staging directory for the assembled locale tree.
    pub fn locale_dir(&self) -> PathBuf {
        self.build_dir.join("locale")
    }

    /// Returns the path to the application settings schema file.
    pub fn app_schema(&self) -> &Path {
        &self.app_schema
    }

    /// Returns the application's own locale tree (one directory per
    /// supported language tag).
    pub fn app_locale_dir(&self) -> &Path {
        &self.app_locale_dir
    }

    /// Returns the system locale tree under the runtime prefix.
    pub fn system_locale_dir(&self) -> PathBuf {
        self.runtime_prefix.join("share").join("locale")
    }

    /// Returns globs, relative to the runtime prefix, for plugin binaries
    /// whose dependencies must also be resolved.
    pub fn plugin_globs(&self) -> &[String] {
        &self.plugin_globs
    }

    /// Returns globs for libraries copied directly in addition to having
    /// their dependencies resolved.
    pub fn extra_library_globs(&self) -> &[String] {
        &self.extra_library_globs
    }

    /// Returns the glob, relative to the runtime prefix, selecting system
    /// settings schemas.
    pub fn system_schema_glob(&self) -> &str {
        &self.system_schema_glob
    }

    /// Returns the system catalog names copied per supported language.
    pub fn system_catalogs(&self) -> &[String] {
        &self.system_catalogs
    }

    /// Returns the path the installer descriptor declares for its output,
    /// if the caller asked for post-build verification.
    pub fn expected_artifact(&self) -> Option<&Path> {
        self.expected_artifact.as_deref()
    }

    /// Returns the external tool configuration.
    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }
}

/// Builder for constructing [`Settings`].
///
/// The eight required fields mirror the positional CLI arguments; everything
/// else has a default derived from them.
///
/// ```no_run
/// use gtkpack::packager::SettingsBuilder;
///
/// # fn example() -> gtkpack::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .source_dir("/src/app")
///     .build_dir("/build/app")
///     .runtime_prefix("/mingw64")
///     .app_name("app")
///     .display_name("App")
///     .app_id("com.example.App")
///     .binary("bin/app.exe")
///     .installer_script("/src/app/packaging/app.iss")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    source_dir: Option<PathBuf>,
    build_dir: Option<PathBuf>,
    runtime_prefix: Option<PathBuf>,
    app_name: Option<String>,
    display_name: Option<String>,
    app_id: Option<String>,
    binary: Option<PathBuf>,
    installer_script: Option<PathBuf>,
    app_schema: Option<PathBuf>,
    app_locale_dir: Option<PathBuf>,
    plugin_globs: Option<Vec<String>>,
    extra_library_globs: Option<Vec<String>>,
    system_schema_glob: Option<String>,
    system_catalogs: Option<Vec<String>>,
    expected_artifact: Option<PathBuf>,
    tools: Option<ToolConfig>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the source root path. Required.
    pub fn source_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the build root path. Required.
    pub fn build_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the runtime-environment install prefix. Required.
    pub fn runtime_prefix<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.runtime_prefix = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the application short name. Required.
    pub fn app_name<S: Into<String>>(mut self, name: S) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Sets the application display name. Required.
    pub fn display_name<S: Into<String>>(mut self, name: S) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the application identifier in reverse-domain form. Required.
    pub fn app_id<S: Into<String>>(mut self, id: S) -> Self {
        self.app_id = Some(id.into());
        self
    }

    /// Sets the application binary path, relative to the build root. Required.
    pub fn binary<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.binary = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the installer descriptor script path. Required.
    pub fn installer_script<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.installer_script = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the application settings schema file.
    ///
    /// Default: `<source>/data/<app-id>.gschema.xml`
    pub fn app_schema<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.app_schema = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the application's own locale tree.
    ///
    /// Default: `<build>/share/locale`
    pub fn app_locale_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.app_locale_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the default plugin globs.
    ///
    /// Default: gdk-pixbuf image loaders
    pub fn plugin_globs(mut self, globs: Vec<String>) -> Self {
        self.plugin_globs = Some(globs);
        self
    }

    /// Replaces the default extra-library globs.
    ///
    /// Default: ANGLE GPU-acceleration shims
    pub fn extra_library_globs(mut self, globs: Vec<String>) -> Self {
        self.extra_library_globs = Some(globs);
        self
    }

    /// Replaces the default system schema glob.
    ///
    /// Default: `share/glib-2.0/schemas/org.gtk.*.xml`
    pub fn system_schema_glob<S: Into<String>>(mut self, glob: S) -> Self {
        self.system_schema_glob = Some(glob.into());
        self
    }

    /// Replaces the default system catalog names.
    ///
    /// Default: `gtk40.mo`, `glib20.mo`, `libadwaita.mo`
    pub fn system_catalogs(mut self, catalogs: Vec<String>) -> Self {
        self.system_catalogs = Some(catalogs);
        self
    }

    /// Sets the artifact path to verify after the installer stage.
    ///
    /// Default: no verification (the descriptor owns its output location)
    pub fn expected_artifact<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.expected_artifact = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the external tool configuration.
    ///
    /// Default: [`ToolConfig::default`]
    pub fn tools(mut self, tools: ToolConfig) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Builds the settings, resolving all defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the eight required fields is missing.
    pub fn build(self) -> crate::packager::Result<Settings> {
        use crate::packager::error::Context;

        let source_dir = self.source_dir.context("source directory is required")?;
        let build_dir = self.build_dir.context("build directory is required")?;
        let runtime_prefix = self
            .runtime_prefix
            .context("runtime prefix is required")?;
        let app_name = self.app_name.context("application name is required")?;
        let display_name = self.display_name.context("display name is required")?;
        let app_id = self.app_id.context("application identifier is required")?;
        let binary = self.binary.context("application binary path is required")?;
        let installer_script = self
            .installer_script
            .context("installer descriptor script is required")?;

        let app_schema = self.app_schema.unwrap_or_else(|| {
            source_dir
                .join("data")
                .join(format!("{app_id}.gschema.xml"))
        });
        let app_locale_dir = self
            .app_locale_dir
            .unwrap_or_else(|| build_dir.join("share").join("locale"));

        Ok(Settings {
            source_dir,
            build_dir,
            runtime_prefix,
            app_name,
            display_name,
            app_id,
            binary,
            installer_script,
            app_schema,
            app_locale_dir,
            plugin_globs: self.plugin_globs.unwrap_or_else(default_strings(DEFAULT_PLUGIN_GLOBS)),
            extra_library_globs: self
                .extra_library_globs
                .unwrap_or_else(default_strings(DEFAULT_EXTRA_LIBRARY_GLOBS)),
            system_schema_glob: self
                .system_schema_glob
                .unwrap_or_else(|| DEFAULT_SYSTEM_SCHEMA_GLOB.to_string()),
            system_catalogs: self
                .system_catalogs
                .unwrap_or_else(default_strings(DEFAULT_SYSTEM_CATALOGS)),
            expected_artifact: self.expected_artifact,
            tools: self.tools.unwrap_or_default(),
        })
    }
}

fn default_strings(defaults: &'static [&'static str]) -> impl FnOnce() -> Vec<String> {
    move || defaults.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> SettingsBuilder {
        SettingsBuilder::new()
            .source_dir("/src/app")
            .build_dir("/build/app")
            .runtime_prefix("/mingw64")
            .app_name("app")
            .display_name("App")
            .app_id("com.example.App")
            .binary("bin/app.exe")
            .installer_script("/src/app/packaging/app.iss")
    }

    #[test]
    fn staging_directories_live_under_build_root() {
        let settings = minimal().build().expect("settings");
        assert_eq!(settings.dlls_dir(), PathBuf::from("/build/app/dlls"));
        assert_eq!(settings.schemas_dir(), PathBuf::from("/build/app/gschemas"));
        assert_eq!(settings.locale_dir(), PathBuf::from("/build/app/locale"));
    }

    #[test]
    fn app_schema_defaults_from_app_id() {
        let settings = minimal().build().expect("settings");
        assert_eq!(
            settings.app_schema(),
            Path::new("/src/app/data/com.example.App.gschema.xml")
        );
    }

    #[test]
    fn binary_path_is_relative_to_build_root() {
        let settings = minimal().build().expect("settings");
        assert_eq!(
            settings.binary_path(),
            PathBuf::from("/build/app/bin/app.exe")
        );
    }

    #[test]
    fn explicit_globs_replace_defaults() {
        let settings = minimal()
            .plugin_globs(vec!["lib/custom/*.dll".into()])
            .build()
            .expect("settings");
        assert_eq!(settings.plugin_globs(), ["lib/custom/*.dll"]);

        let settings = minimal().build().expect("settings");
        assert_eq!(settings.plugin_globs(), DEFAULT_PLUGIN_GLOBS);
        assert_eq!(settings.system_catalogs(), DEFAULT_SYSTEM_CATALOGS);
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let result = SettingsBuilder::new().source_dir("/src/app").build();
        assert!(result.is_err());
    }
}
