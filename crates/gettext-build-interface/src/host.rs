//! The host side of the interface.
//!
//! Hooks never reach into the packaging tool directly. Everything they need
//! from it is exposed through [`BuildHost`], and everything they hand back is
//! appended to [`BuildData`].

use std::path::Path;

/// Capabilities a packaging host exposes to its build hooks.
pub trait BuildHost {
    /// Absolute path of the project root.
    fn root(&self) -> &Path;

    /// The hook's own configuration table.
    fn config(&self) -> &toml::Table;

    /// Package name from the project metadata.
    fn metadata_name(&self) -> &str;

    /// Name of the artifact currently being packaged (e.g. "wheel", "sdist").
    fn target_name(&self) -> &str;

    /// Where the hook configuration lives, for error messages.
    fn config_location(&self) -> String {
        "the build configuration".to_string()
    }
}

/// Artifact manifest shared between the host and its hooks.
///
/// Paths are relative to the project root and use forward slashes. The list
/// is append-only: hooks register outputs, nothing removes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildData {
    artifacts: Vec<String>,
}

impl BuildData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered artifacts in registration order.
    pub fn artifacts(&self) -> &[String] {
        &self.artifacts
    }

    /// Register one artifact path.
    pub fn register(&mut self, path: impl Into<String>) {
        self.artifacts.push(path.into());
    }

    /// Register several artifact paths, preserving their order.
    pub fn extend<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artifacts.extend(paths.into_iter().map(Into::into));
    }
}
