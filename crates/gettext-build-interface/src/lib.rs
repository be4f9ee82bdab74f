//! Interface types shared between a packaging host and its build hooks.
//!
//! A host (the packaging tool, or the bundled `gettext-build` CLI) implements
//! [`BuildHost`] and drives hooks implementing [`BuildHook`] through the
//! `initialize` and `clean` lifecycle points.

pub mod config;
pub mod hook;
pub mod host;
pub mod version;

pub use config::{generate_config_template, ConfigField, ConfigSchema, ConfigType, ConfigValue};
pub use hook::{BuildHook, HookError, HookResult};
pub use host::{BuildData, BuildHost};
pub use version::{is_version_compatible, INTERFACE_VERSION};
