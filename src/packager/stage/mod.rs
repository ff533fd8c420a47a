//! Pipeline stages, in execution order.

pub mod dlls;
pub mod installer;
pub mod locale;
pub mod schemas;

/// The named stages of a packaging run.
///
/// Failures carry their stage so diagnostics identify which part of the
/// pipeline to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Runtime-library discovery and collection
    Dlls,
    /// Settings-schema collection and compilation
    Schemas,
    /// Locale-catalog assembly
    Locale,
    /// Installer-compiler invocation
    Installer,
}

impl Stage {
    /// Stage name, matching the staging directory it produces.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Dlls => "dlls",
            Stage::Schemas => "gschemas",
            Stage::Locale => "locale",
            Stage::Installer => "installer",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_match_staging_directories() {
        assert_eq!(Stage::Dlls.to_string(), "dlls");
        assert_eq!(Stage::Schemas.to_string(), "gschemas");
        assert_eq!(Stage::Locale.to_string(), "locale");
        assert_eq!(Stage::Installer.to_string(), "installer");
    }
}
