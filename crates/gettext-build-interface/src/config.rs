//! Configuration schema types for build hooks.
//!
//! A hook declares the options it reads from the host configuration as a
//! [`ConfigSchema`]. Hosts use the schema to validate option types and to
//! generate a commented configuration template for users.

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// A string value
    String(String),
    /// A boolean value
    Boolean(bool),
    /// A table of output folder to list of input files, in declaration order
    FolderMap(Vec<(String, Vec<String>)>),
}

/// Config field type specifier for schema definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigType {
    /// String type
    String,
    /// Boolean type
    Boolean,
    /// Table whose values are arrays of strings
    FolderMap,
}

impl ConfigType {
    /// Human-readable type name used in templates and error messages.
    pub fn type_name(self) -> &'static str {
        match self {
            ConfigType::String => "string",
            ConfigType::Boolean => "boolean",
            ConfigType::FolderMap => "table of string arrays",
        }
    }
}

/// A single configuration field definition.
#[derive(Debug, Clone)]
pub struct ConfigField {
    /// Field name in the host configuration table
    pub name: String,
    /// Expected type of the field value
    pub field_type: ConfigType,
    /// Whether the field must be present
    pub required: bool,
    /// Default value used when the field is absent
    pub default: Option<ConfigValue>,
    /// Human-readable description
    pub description: Option<String>,
}

impl ConfigField {
    pub fn required(name: &str, field_type: ConfigType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: true,
            default: None,
            description: Some(description.to_string()),
        }
    }

    pub fn optional(
        name: &str,
        field_type: ConfigType,
        default: Option<ConfigValue>,
        description: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: false,
            default,
            description: Some(description.to_string()),
        }
    }
}

/// The set of options a hook reads.
#[derive(Debug, Clone, Default)]
pub struct ConfigSchema {
    /// List of field definitions
    pub fields: Vec<ConfigField>,
}

impl ConfigSchema {
    /// Create an empty schema indicating no configuration is needed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a field by its exact name.
    pub fn field(&self, name: &str) -> Option<&ConfigField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Generate a template configuration section from a schema.
///
/// Required fields are emitted uncommented with an example value, optional
/// fields are commented out with their default (or an example).
pub fn generate_config_template(schema: &ConfigSchema, section: &str) -> String {
    let mut lines = vec![format!("[{}]", section)];

    for field in &schema.fields {
        lines.push(String::new());

        if let Some(desc) = &field.description {
            lines.push(format!("# {}", desc));
        }

        let req_str = if field.required { "required" } else { "optional" };
        lines.push(format!(
            "# Type: {} ({})",
            field.field_type.type_name(),
            req_str
        ));

        let example_value = match &field.default {
            Some(default) => format_config_value(default),
            None => example_value(field.field_type),
        };

        if field.required {
            lines.push(format!("{} = {}", field.name, example_value));
        } else {
            lines.push(format!("# {} = {}", field.name, example_value));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

fn format_config_value(value: &ConfigValue) -> String {
    match value {
        ConfigValue::String(s) => format!("\"{}\"", s),
        ConfigValue::Boolean(b) => b.to_string(),
        ConfigValue::FolderMap(entries) => {
            let items: Vec<String> = entries
                .iter()
                .map(|(folder, files)| {
                    let files: Vec<String> = files.iter().map(|f| format!("\"{}\"", f)).collect();
                    format!("\"{}\" = [{}]", folder, files.join(", "))
                })
                .collect();
            format!("{{ {} }}", items.join(", "))
        }
    }
}

fn example_value(field_type: ConfigType) -> String {
    match field_type {
        ConfigType::String => "\"example\"".to_string(),
        ConfigType::Boolean => "false".to_string(),
        ConfigType::FolderMap => "{ \"data\" = [\"data/app.desktop.in\"] }".to_string(),
    }
}
