//! External tool configuration and availability checking.
//!
//! The pipeline treats its three external collaborators as opaque commands:
//! a dynamic-link dependency inspector, a settings-schema compiler, and an
//! installer-script compiler. Their exact invocation syntax is environment
//! specific, so each is configurable via a small JSON file; the defaults
//! match an MSYS2/MinGW environment with Inno Setup on PATH.
//!
//! ```json
//! {
//!     "dependency_inspector": { "program": "ntldd", "args": ["-R"] },
//!     "schema_compiler": { "program": "glib-compile-schemas", "args": [] },
//!     "installer_compiler": { "program": "iscc", "args": [] }
//! }
//! ```

use crate::packager::error::{ErrorExt, Result};
use serde::Deserialize;
use std::path::Path;

/// One external command: a program name plus its fixed leading arguments.
///
/// Stage-specific arguments (the binary to inspect, the schema directory,
/// the descriptor script) are appended by the stage that runs the tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolSpec {
    /// Program name, resolved through PATH
    pub program: String,
    /// Fixed arguments always passed before stage-specific ones
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolSpec {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// The set of external tools a pipeline run invokes.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ToolConfig {
    /// Lists the shared libraries a binary loads at runtime (`ntldd -R`)
    pub dependency_inspector: ToolSpec,
    /// Compiles a directory of settings schemas into one binary catalog
    pub schema_compiler: ToolSpec,
    /// Compiles the installer descriptor into the final installer
    pub installer_compiler: ToolSpec,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            dependency_inspector: ToolSpec::new("ntldd", &["-R"]),
            schema_compiler: ToolSpec::new("glib-compile-schemas", &[]),
            installer_compiler: ToolSpec::new("iscc", &[]),
        }
    }
}

impl ToolConfig {
    /// Loads tool overrides from a JSON file.
    ///
    /// Unknown fields are rejected so a typo in the override file fails
    /// loudly instead of silently keeping a default.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).fs_context("reading tool configuration", path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Checks that every configured program resolves through PATH.
    ///
    /// Runs before stage 1 so a missing tool fails fast instead of after
    /// staging directories have already been rebuilt.
    pub fn probe(&self) -> Result<()> {
        for spec in [
            &self.dependency_inspector,
            &self.schema_compiler,
            &self.installer_compiler,
        ] {
            match which::which(&spec.program) {
                Ok(path) => log::debug!("found {} at {}", spec.program, path.display()),
                Err(_) => {
                    return Err(crate::packager::Error::ToolNotFound {
                        program: spec.program.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_msys2_toolchain() {
        let config = ToolConfig::default();
        assert_eq!(config.dependency_inspector.program, "ntldd");
        assert_eq!(config.dependency_inspector.args, vec!["-R"]);
        assert_eq!(config.schema_compiler.program, "glib-compile-schemas");
        assert_eq!(config.installer_compiler.program, "iscc");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config: ToolConfig = serde_json::from_str(
            r#"{ "installer_compiler": { "program": "makensis" } }"#,
        )
        .expect("valid override");
        assert_eq!(config.installer_compiler.program, "makensis");
        assert!(config.installer_compiler.args.is_empty());
        assert_eq!(config.dependency_inspector.program, "ntldd");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result: std::result::Result<ToolConfig, _> =
            serde_json::from_str(r#"{ "dependency_inspctor": { "program": "ntldd" } }"#);
        assert!(result.is_err());
    }
}
