//! Command line argument parsing and validation.

use crate::packager::{Settings, SettingsBuilder, ToolConfig};
use clap::Parser;
use std::path::PathBuf;

/// Installer-asset packager for GTK applications
#[derive(Parser, Debug)]
#[command(
    name = "gtkpack",
    version,
    about = "Installer-asset collector and packager for GTK applications",
    long_about = "Stages the runtime libraries, compiled settings schemas and locale catalogs a \
GTK application needs at load time, then invokes an external installer compiler on the \
descriptor script.

Staging directories (dlls/, gschemas/, locale/) are created under the build root and are \
deleted and rebuilt on every run.

Usage:
  gtkpack ~/src/app ~/build/app /mingw64 app \"App\" com.example.App bin/app.exe packaging/app.iss

Exit code 0 = every stage completed and the installer compiler succeeded."
)]
pub struct Args {
    /// Source root path
    pub source_dir: PathBuf,

    /// Build root path (staging directories are created under it)
    pub build_dir: PathBuf,

    /// Runtime-environment root path (e.g. the MinGW prefix)
    pub runtime_prefix: PathBuf,

    /// Application short name
    pub app_name: String,

    /// Application display name
    pub display_name: String,

    /// Application identifier in reverse-domain form
    pub app_id: String,

    /// Path to the built application binary, relative to the build root
    pub binary: PathBuf,

    /// Path to the installer-descriptor script
    pub installer_script: PathBuf,

    /// Application settings schema file
    ///
    /// Default: <SOURCE_DIR>/data/<APP_ID>.gschema.xml
    #[arg(long, value_name = "PATH")]
    pub app_schema: Option<PathBuf>,

    /// Application locale tree (one directory per supported language)
    ///
    /// Default: <BUILD_DIR>/share/locale
    #[arg(long, value_name = "PATH")]
    pub app_locale_dir: Option<PathBuf>,

    /// Glob, relative to the runtime prefix, for loadable plugin binaries
    /// whose dependencies must also be collected (repeatable; replaces the
    /// gdk-pixbuf loader default)
    #[arg(long = "plugin-glob", value_name = "GLOB")]
    pub plugin_globs: Vec<String>,

    /// Glob, relative to the runtime prefix, for libraries copied directly
    /// in addition to having their dependencies resolved (repeatable;
    /// replaces the GPU-shim default)
    #[arg(long = "extra-library", value_name = "GLOB")]
    pub extra_libraries: Vec<String>,

    /// Glob, relative to the runtime prefix, for system settings schemas
    #[arg(long, value_name = "GLOB")]
    pub system_schema_glob: Option<String>,

    /// System message catalog copied per supported language (repeatable;
    /// replaces the gtk40/glib20/libadwaita default)
    #[arg(long = "system-catalog", value_name = "NAME")]
    pub system_catalogs: Vec<String>,

    /// JSON file overriding the external tool command lines
    #[arg(long, value_name = "PATH")]
    pub tools: Option<PathBuf>,

    /// Artifact path the installer descriptor declares; verified to exist
    /// (and checksummed) after the installer stage
    #[arg(long, value_name = "PATH")]
    pub expect_artifact: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.app_name.trim().is_empty() {
            return Err("Application name cannot be empty".to_string());
        }

        if !self.app_id.contains('.') {
            return Err(format!(
                "Application identifier must be in reverse-domain form (e.g. com.example.App), got: {}",
                self.app_id
            ));
        }

        if self.binary.is_absolute() {
            return Err(format!(
                "Application binary path must be relative to the build root, got: {}",
                self.binary.display()
            ));
        }

        Ok(())
    }

    /// Resolve arguments into pipeline settings, loading the tool
    /// configuration file when one was given.
    pub fn into_settings(self) -> crate::packager::Result<Settings> {
        let tools = match &self.tools {
            Some(path) => ToolConfig::load(path)?,
            None => ToolConfig::default(),
        };

        let mut builder = SettingsBuilder::new()
            .source_dir(&self.source_dir)
            .build_dir(&self.build_dir)
            .runtime_prefix(&self.runtime_prefix)
            .app_name(&self.app_name)
            .display_name(&self.display_name)
            .app_id(&self.app_id)
            .binary(&self.binary)
            .installer_script(&self.installer_script)
            .tools(tools);

        if let Some(path) = &self.app_schema {
            builder = builder.app_schema(path);
        }
        if let Some(path) = &self.app_locale_dir {
            builder = builder.app_locale_dir(path);
        }
        if !self.plugin_globs.is_empty() {
            builder = builder.plugin_globs(self.plugin_globs.clone());
        }
        if !self.extra_libraries.is_empty() {
            builder = builder.extra_library_globs(self.extra_libraries.clone());
        }
        if let Some(glob) = &self.system_schema_glob {
            builder = builder.system_schema_glob(glob);
        }
        if !self.system_catalogs.is_empty() {
            builder = builder.system_catalogs(self.system_catalogs.clone());
        }
        if let Some(path) = &self.expect_artifact {
            builder = builder.expected_artifact(path);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec![
            "gtkpack",
            "/src/app",
            "/build/app",
            "/mingw64",
            "app",
            "App",
            "com.example.App",
            "bin/app.exe",
            "/src/app/packaging/app.iss",
        ];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn positional_order_matches_invocation_surface() {
        let args = parse(&[]);
        assert_eq!(args.source_dir, PathBuf::from("/src/app"));
        assert_eq!(args.build_dir, PathBuf::from("/build/app"));
        assert_eq!(args.runtime_prefix, PathBuf::from("/mingw64"));
        assert_eq!(args.app_name, "app");
        assert_eq!(args.display_name, "App");
        assert_eq!(args.app_id, "com.example.App");
        assert_eq!(args.binary, PathBuf::from("bin/app.exe"));
        assert_eq!(
            args.installer_script,
            PathBuf::from("/src/app/packaging/app.iss")
        );
        assert!(args.validate().is_ok());
    }

    #[test]
    fn rejects_app_id_without_domain() {
        let mut args = parse(&[]);
        args.app_id = "app".into();
        assert!(args.validate().is_err());
    }

    #[test]
    fn rejects_absolute_binary_path() {
        let mut args = parse(&[]);
        args.binary = PathBuf::from("/build/app/bin/app.exe");
        assert!(args.validate().is_err());
    }

    #[test]
    fn repeatable_globs_accumulate() {
        let args = parse(&[
            "--plugin-glob",
            "lib/a/*.dll",
            "--plugin-glob",
            "lib/b/*.dll",
        ]);
        assert_eq!(args.plugin_globs, ["lib/a/*.dll", "lib/b/*.dll"]);
    }

    #[test]
    fn settings_resolution_uses_overrides() {
        let args = parse(&["--app-schema", "/elsewhere/app.gschema.xml"]);
        let settings = args.into_settings().expect("settings");
        assert_eq!(
            settings.app_schema(),
            std::path::Path::new("/elsewhere/app.gschema.xml")
        );
    }
}
