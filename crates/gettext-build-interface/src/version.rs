//! Interface version protocol.

use semver::Version;

/// Current interface crate version.
///
/// Hooks declare their minimum required interface version, and the host
/// uses this constant to check compatibility before driving them.
pub const INTERFACE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check if a hook's minimum interface version is compatible with the host.
///
/// # Compatibility rules
///
/// - Same major version required (breaking changes only in major versions)
/// - Host version must be >= hook's minimum version
///
/// # Example
///
/// ```
/// use gettext_build_interface::is_version_compatible;
///
/// // Same version - compatible
/// assert!(is_version_compatible("0.1.0", "0.1.0").unwrap());
///
/// // Host newer, same major - compatible
/// assert!(is_version_compatible("0.1.0", "0.2.0").unwrap());
///
/// // Host older - incompatible
/// assert!(!is_version_compatible("0.2.0", "0.1.0").unwrap());
///
/// // Different major - incompatible
/// assert!(!is_version_compatible("1.0.0", "0.9.0").unwrap());
/// ```
pub fn is_version_compatible(hook_min_version: &str, host_version: &str) -> Result<bool, String> {
    let hook_min = Version::parse(hook_min_version)
        .map_err(|e| format!("Invalid hook version '{}': {}", hook_min_version, e))?;
    let host = Version::parse(host_version)
        .map_err(|e| format!("Invalid host version '{}': {}", host_version, e))?;

    Ok(host.major == hook_min.major && host >= hook_min)
}
