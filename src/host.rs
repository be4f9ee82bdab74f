//! A [`BuildHost`] backed by a project manifest on disk.
//!
//! Lets the gettext hook run outside a packaging tool: options are read from
//! a section of `pyproject.toml` (or `Cargo.toml`) and the package name from
//! its metadata.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use gettext_build_interface::BuildHost;
use toml::{Table, Value};

pub const PYPROJECT: &str = "pyproject.toml";
pub const CARGO_MANIFEST: &str = "Cargo.toml";

/// Default section holding the hook options for a given manifest file name.
pub fn default_section(manifest: &Path) -> &'static str {
    match manifest.file_name().and_then(|n| n.to_str()) {
        Some(CARGO_MANIFEST) => "package.metadata.gettext",
        _ => "tool.hatch.build.hooks.gettext",
    }
}

#[derive(Debug, Clone)]
pub struct ProjectHost {
    root: PathBuf,
    manifest: PathBuf,
    section: String,
    config: Table,
    name: String,
    target: String,
}

impl ProjectHost {
    /// Load `manifest` (relative to `root` unless absolute).
    ///
    /// A missing section yields an empty configuration; a missing package
    /// name is an error.
    pub fn load(root: &Path, manifest: &Path, section: Option<&str>, target: &str) -> Result<Self> {
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .context("Could not determine the current directory")?
                .join(root)
        };
        let manifest_path = root.join(manifest);
        let section = section
            .map(str::to_string)
            .unwrap_or_else(|| default_section(manifest).to_string());

        let content = fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        let document: Table = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", manifest_path.display()))?;

        let config = match lookup(&document, &section) {
            Some(Value::Table(t)) => t.clone(),
            Some(other) => bail!(
                "[{}] in {} must be a table, got {}",
                section,
                manifest_path.display(),
                other.type_str()
            ),
            None => {
                tracing::debug!("No [{}] in {}", section, manifest_path.display());
                Table::new()
            }
        };

        let name = ["project.name", "package.name"]
            .iter()
            .find_map(|key| lookup(&document, key).and_then(Value::as_str))
            .ok_or_else(|| {
                anyhow!(
                    "{} has no project.name or package.name",
                    manifest_path.display()
                )
            })?
            .to_string();

        Ok(Self {
            root,
            manifest: manifest_path,
            section,
            config,
            name,
            target: target.to_string(),
        })
    }

    pub fn section(&self) -> &str {
        &self.section
    }
}

fn lookup<'a>(table: &'a Table, dotted_key: &str) -> Option<&'a Value> {
    let mut parts = dotted_key.split('.');
    let mut value = table.get(parts.next()?)?;
    for part in parts {
        value = value.as_table()?.get(part)?;
    }
    Some(value)
}

impl BuildHost for ProjectHost {
    fn root(&self) -> &Path {
        &self.root
    }

    fn config(&self) -> &Table {
        &self.config
    }

    fn metadata_name(&self) -> &str {
        &self.name
    }

    fn target_name(&self) -> &str {
        &self.target
    }

    fn config_location(&self) -> String {
        let manifest = self
            .manifest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.manifest.display().to_string());
        format!("[{}] in {}", self.section, manifest)
    }
}
