//! The build hook trait.

use std::fmt::Debug;

use crate::config::ConfigSchema;
use crate::host::{BuildData, BuildHost};

/// Error type crossing the hook boundary.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for hook lifecycle calls.
pub type HookResult<T = ()> = Result<T, HookError>;

/// A build hook driven by a packaging host.
///
/// # Example (for hook implementors)
///
/// ```
/// use gettext_build_interface::{BuildData, BuildHook, BuildHost, ConfigSchema, HookResult};
///
/// #[derive(Debug)]
/// struct Noop;
///
/// impl BuildHook for Noop {
///     fn name(&self) -> &str {
///         "noop"
///     }
///
///     fn version(&self) -> &str {
///         "1.0.0"
///     }
///
///     fn min_interface_version(&self) -> &str {
///         "0.1.0"
///     }
///
///     fn config_schema(&self) -> ConfigSchema {
///         ConfigSchema::empty()
///     }
///
///     fn initialize(&self, _: &dyn BuildHost, _: &str, _: &mut BuildData) -> HookResult {
///         Ok(())
///     }
///
///     fn clean(&self, _: &dyn BuildHost, _: &[String]) -> HookResult {
///         Ok(())
///     }
/// }
/// ```
pub trait BuildHook: Debug {
    /// Short hook name, also used as the configuration section suffix.
    fn name(&self) -> &str;

    /// The hook's own version in semver format.
    fn version(&self) -> &str;

    /// Minimum interface version the hook was written against.
    ///
    /// The host checks this against [`crate::INTERFACE_VERSION`] before
    /// calling any lifecycle method.
    fn min_interface_version(&self) -> &str;

    /// Options this hook reads from the host configuration.
    fn config_schema(&self) -> ConfigSchema;

    /// Called before or while the host packages an artifact.
    ///
    /// Produced files must be registered in `build_data` so the host ships
    /// them instead of treating them as stray files.
    fn initialize(
        &self,
        host: &dyn BuildHost,
        version: &str,
        build_data: &mut BuildData,
    ) -> HookResult;

    /// Called when the host purges build outputs.
    fn clean(&self, host: &dyn BuildHost, versions: &[String]) -> HookResult;
}
