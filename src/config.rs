//! Loading and validating the gettext hook configuration.
//!
//! Options are read from the table the host hands over (for hatch projects,
//! `[tool.hatch.build.hooks.gettext]` in `pyproject.toml`), checked against
//! [`gettext_schema`], and turned into a [`BuildConfig`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use gettext_build_interface::{BuildHost, ConfigField, ConfigSchema, ConfigType, ConfigValue};
use toml::Value;

use crate::error::{GettextError, Result};
use crate::tools::Toolchain;
use crate::utils::paths::{normalize_lexically, project_path};

pub const DEFAULT_PO_DIRECTORY: &str = "po";

/// The options understood by the gettext hook.
///
/// Keys use hyphens; underscored spellings are rejected with a pointer to the
/// canonical key.
pub fn gettext_schema() -> ConfigSchema {
    ConfigSchema {
        fields: vec![
            ConfigField::required(
                "locale-directory",
                ConfigType::String,
                "Directory, relative to the project root, compiled mo files are written to",
            ),
            ConfigField::optional(
                "po-directory",
                ConfigType::String,
                Some(ConfigValue::String(DEFAULT_PO_DIRECTORY.to_string())),
                "Directory holding the .po files (and an optional LINGUAS file)",
            ),
            ConfigField::optional(
                "i18n-name",
                ConfigType::String,
                None,
                "Gettext domain used to name mo files [default: the package name]",
            ),
            ConfigField::optional(
                "files",
                ConfigType::FolderMap,
                None,
                "Output folder to list of .desktop.in/.xml.in files translated by intltool-merge",
            ),
            ConfigField::optional(
                "identify-left-out",
                ConfigType::Boolean,
                Some(ConfigValue::Boolean(false)),
                "When building an sdist, fail if source files are missing from POTFILES.in",
            ),
            ConfigField::optional(
                "regenerate-template",
                ConfigType::Boolean,
                Some(ConfigValue::Boolean(false)),
                "When building an sdist, regenerate the .pot template",
            ),
            ConfigField::optional(
                "show-report",
                ConfigType::Boolean,
                Some(ConfigValue::Boolean(false)),
                "When building an sdist, show a translation status report",
            ),
            ConfigField::optional(
                "msgfmt",
                ConfigType::String,
                Some(ConfigValue::String(Toolchain::DEFAULT_MSGFMT.to_string())),
                "Program used to compile po files",
            ),
            ConfigField::optional(
                "intltool-merge",
                ConfigType::String,
                Some(ConfigValue::String(Toolchain::DEFAULT_INTLTOOL_MERGE.to_string())),
                "Program used to translate template files",
            ),
            ConfigField::optional(
                "intltool-update",
                ConfigType::String,
                Some(ConfigValue::String(Toolchain::DEFAULT_INTLTOOL_UPDATE.to_string())),
                "Program used for the sdist diagnostics",
            ),
        ],
    }
}

/// Validated hook configuration for one build invocation.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Absolute project root
    pub root: PathBuf,
    /// Gettext domain, i.e. the mo file stem
    pub i18n_name: String,
    /// Absolute path of the po directory
    pub po_dir: PathBuf,
    /// Absolute path of the locale directory
    pub locale_dir: PathBuf,
    /// The locale directory as configured, relative to the root
    pub locale_dir_rel: PathBuf,
    /// Output folder to template inputs, both relative to the root
    pub files: Vec<(PathBuf, Vec<PathBuf>)>,
    pub identify_left_out: bool,
    pub regenerate_template: bool,
    pub show_report: bool,
    pub toolchain: Toolchain,
    /// Where the options live, for error messages
    pub location: String,
}

impl BuildConfig {
    /// Read and validate the hook options exposed by `host`.
    pub fn load(host: &dyn BuildHost) -> Result<Self> {
        let location = host.config_location();
        let values = ConfigLoader::validate(host.config(), &gettext_schema(), &location)?;

        let root = normalize_lexically(host.root());

        let locale_dir_rel = match values.get("locale-directory") {
            Some(ConfigValue::String(s)) => normalize_lexically(Path::new(s)),
            _ => return Err(GettextError::MissingLocaleDirectory { location }),
        };
        let locale_dir = project_path(&root, &locale_dir_rel);
        if locale_dir == root {
            return Err(GettextError::LocaleDirIsProjectRoot);
        }

        let po_dir = project_path(&root, Path::new(&string_value(&values, "po-directory")));
        if po_dir == locale_dir {
            return Err(GettextError::LocaleDirIsPoDir);
        }
        if !po_dir.is_dir() {
            return Err(GettextError::MissingPoDirectory {
                location,
                path: po_dir,
            });
        }

        let i18n_name = match values.get("i18n-name") {
            Some(ConfigValue::String(s)) if !s.is_empty() => s.clone(),
            _ => host.metadata_name().to_string(),
        };

        let files = match values.get("files") {
            Some(ConfigValue::FolderMap(entries)) => entries
                .iter()
                .map(|(folder, inputs)| {
                    (
                        PathBuf::from(folder),
                        inputs.iter().map(PathBuf::from).collect(),
                    )
                })
                .collect(),
            _ => Vec::new(),
        };

        let toolchain = Toolchain {
            msgfmt: string_value(&values, "msgfmt"),
            intltool_merge: string_value(&values, "intltool-merge"),
            intltool_update: string_value(&values, "intltool-update"),
        };

        Ok(Self {
            root,
            i18n_name,
            po_dir,
            locale_dir,
            locale_dir_rel,
            files,
            identify_left_out: bool_value(&values, "identify-left-out"),
            regenerate_template: bool_value(&values, "regenerate-template"),
            show_report: bool_value(&values, "show-report"),
            toolchain,
            location,
        })
    }

    /// Whether any template files are configured for translation.
    pub fn has_templates(&self) -> bool {
        self.files.iter().any(|(_, inputs)| !inputs.is_empty())
    }
}

fn string_value(values: &HashMap<String, ConfigValue>, key: &str) -> String {
    match values.get(key) {
        Some(ConfigValue::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn bool_value(values: &HashMap<String, ConfigValue>, key: &str) -> bool {
    matches!(values.get(key), Some(ConfigValue::Boolean(true)))
}

/// Schema-driven validation of a raw configuration table.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Validate `table` against `schema`.
    ///
    /// Returns the present values plus defaults for absent optional fields.
    /// Required fields are not enforced here so that callers can report them
    /// with a tailored message.
    pub fn validate(
        table: &toml::Table,
        schema: &ConfigSchema,
        location: &str,
    ) -> Result<HashMap<String, ConfigValue>> {
        for key in table.keys() {
            if schema.field(key).is_some() {
                continue;
            }
            let canonical = key.replace('_', "-");
            if schema.field(&canonical).is_some() {
                return Err(GettextError::NonCanonicalKey {
                    key: key.clone(),
                    canonical,
                    location: location.to_string(),
                });
            }
            tracing::warn!("Ignoring unknown option \"{}\" in {}", key, location);
        }

        let mut result = HashMap::new();
        for field in &schema.fields {
            match table.get(&field.name) {
                Some(value) => {
                    let typed =
                        Self::validate_field_type(&field.name, value, field.field_type, location)?;
                    result.insert(field.name.clone(), typed);
                }
                None => {
                    if let Some(default) = &field.default {
                        result.insert(field.name.clone(), default.clone());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Validate that a TOML value matches the expected type.
    pub fn validate_field_type(
        field_name: &str,
        value: &Value,
        expected: ConfigType,
        location: &str,
    ) -> Result<ConfigValue> {
        let mismatch = |actual: &str| GettextError::InvalidOptionType {
            key: field_name.to_string(),
            location: location.to_string(),
            expected: expected.type_name(),
            actual: actual.to_string(),
        };

        match (expected, value) {
            (ConfigType::String, Value::String(s)) => Ok(ConfigValue::String(s.clone())),
            (ConfigType::Boolean, Value::Boolean(b)) => Ok(ConfigValue::Boolean(*b)),
            (ConfigType::FolderMap, Value::Table(t)) => {
                let mut entries = Vec::with_capacity(t.len());
                for (folder, files) in t {
                    let Value::Array(files) = files else {
                        return Err(mismatch(&format!("{} for \"{}\"", files.type_str(), folder)));
                    };
                    let files = files
                        .iter()
                        .map(|f| match f {
                            Value::String(s) => Ok(s.clone()),
                            other => Err(mismatch(&format!(
                                "{} inside \"{}\"",
                                other.type_str(),
                                folder
                            ))),
                        })
                        .collect::<Result<Vec<_>>>()?;
                    entries.push((folder.clone(), files));
                }
                Ok(ConfigValue::FolderMap(entries))
            }
            _ => Err(mismatch(value.type_str())),
        }
    }
}
