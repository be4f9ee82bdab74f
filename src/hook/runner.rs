//! Host-side driver for build hooks.
//!
//! The runner refuses hooks written against an incompatible interface
//! version, then forwards lifecycle calls, logging and wrapping failures.

use std::fmt;

use gettext_build_interface::{
    is_version_compatible, BuildData, BuildHook, BuildHost, HookError, INTERFACE_VERSION,
};

/// Kinds of hook runner errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerErrorKind {
    /// Hook requires a newer (or different major) interface version.
    VersionMismatch { required: String, actual: String },
    /// Hook declared a version string that is not semver.
    InvalidVersion,
    /// A lifecycle call returned an error.
    HookFailed,
}

/// Error when checking or driving a hook.
#[derive(Debug)]
pub struct RunnerError {
    /// Name of the hook that failed.
    pub hook_name: String,
    /// Category of the error.
    pub kind: RunnerErrorKind,
    /// Human-readable error message.
    pub message: String,
    source: Option<HookError>,
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RunnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

pub struct HookRunner {
    hook: Box<dyn BuildHook>,
}

impl HookRunner {
    /// Accept `hook` if its interface requirement is met by this host.
    pub fn new(hook: Box<dyn BuildHook>) -> Result<Self, RunnerError> {
        let required = hook.min_interface_version().to_string();
        match is_version_compatible(&required, INTERFACE_VERSION) {
            Ok(true) => {
                tracing::debug!(
                    hook = hook.name(),
                    version = hook.version(),
                    "Accepted build hook"
                );
                Ok(Self { hook })
            }
            Ok(false) => Err(RunnerError {
                hook_name: hook.name().to_string(),
                message: format!(
                    "Hook '{}' requires interface version {}, but this host provides {}",
                    hook.name(),
                    required,
                    INTERFACE_VERSION
                ),
                kind: RunnerErrorKind::VersionMismatch {
                    required,
                    actual: INTERFACE_VERSION.to_string(),
                },
                source: None,
            }),
            Err(msg) => Err(RunnerError {
                hook_name: hook.name().to_string(),
                kind: RunnerErrorKind::InvalidVersion,
                message: msg,
                source: None,
            }),
        }
    }

    pub fn hook(&self) -> &dyn BuildHook {
        self.hook.as_ref()
    }

    /// Run the `initialize` lifecycle point and return the artifacts the
    /// hook registered.
    pub fn initialize(
        &self,
        host: &dyn BuildHost,
        version: &str,
    ) -> Result<BuildData, RunnerError> {
        let mut build_data = BuildData::new();
        self.hook
            .initialize(host, version, &mut build_data)
            .map_err(|e| self.failed("initialize", e))?;
        tracing::debug!(
            hook = self.hook.name(),
            artifacts = build_data.artifacts().len(),
            "Hook initialized"
        );
        Ok(build_data)
    }

    /// Run the `clean` lifecycle point.
    pub fn clean(&self, host: &dyn BuildHost, versions: &[String]) -> Result<(), RunnerError> {
        self.hook
            .clean(host, versions)
            .map_err(|e| self.failed("clean", e))
    }

    fn failed(&self, stage: &str, error: HookError) -> RunnerError {
        tracing::error!(hook = self.hook.name(), stage, "{}", error);
        RunnerError {
            hook_name: self.hook.name().to_string(),
            kind: RunnerErrorKind::HookFailed,
            message: format!(
                "Build hook '{}' failed during {}: {}",
                self.hook.name(),
                stage,
                error
            ),
            source: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::GettextBuildHook;
    use crate::test_support::TestHost;
    use gettext_build_interface::{ConfigSchema, HookResult};
    use std::error::Error;
    use std::path::Path;

    #[derive(Debug)]
    struct StubHook {
        min_version: &'static str,
        fail: bool,
    }

    impl BuildHook for StubHook {
        fn name(&self) -> &str {
            "stub"
        }
        fn version(&self) -> &str {
            "1.0.0"
        }
        fn min_interface_version(&self) -> &str {
            self.min_version
        }
        fn config_schema(&self) -> ConfigSchema {
            ConfigSchema::empty()
        }
        fn initialize(&self, _: &dyn BuildHost, _: &str, build_data: &mut BuildData) -> HookResult {
            if self.fail {
                return Err("catalog compiler exploded".into());
            }
            build_data.register("locale/fr/LC_MESSAGES/stub.mo");
            Ok(())
        }
        fn clean(&self, _: &dyn BuildHost, _: &[String]) -> HookResult {
            if self.fail {
                return Err("cannot clean".into());
            }
            Ok(())
        }
    }

    fn host() -> TestHost {
        TestHost::new(Path::new("/nonexistent"), "")
    }

    #[test]
    fn test_accepts_gettext_hook() {
        let runner = HookRunner::new(Box::new(GettextBuildHook::new())).unwrap();
        assert_eq!(runner.hook().name(), "gettext");
    }

    #[test]
    fn test_rejects_future_interface() {
        let err = HookRunner::new(Box::new(StubHook {
            min_version: "99.0.0",
            fail: false,
        }))
        .err()
        .unwrap();

        assert_eq!(err.hook_name, "stub");
        assert!(matches!(
            err.kind,
            RunnerErrorKind::VersionMismatch { ref required, .. } if required == "99.0.0"
        ));
        assert!(err.to_string().contains("requires interface version 99.0.0"));
    }

    #[test]
    fn test_rejects_invalid_version() {
        let err = HookRunner::new(Box::new(StubHook {
            min_version: "latest",
            fail: false,
        }))
        .err()
        .unwrap();
        assert_eq!(err.kind, RunnerErrorKind::InvalidVersion);
    }

    #[test]
    fn test_initialize_returns_registered_artifacts() {
        let runner = HookRunner::new(Box::new(StubHook {
            min_version: "0.1.0",
            fail: false,
        }))
        .unwrap();

        let data = runner.initialize(&host(), "standard").unwrap();

        assert_eq!(data.artifacts(), &["locale/fr/LC_MESSAGES/stub.mo".to_string()]);
    }

    #[test]
    fn test_hook_failures_are_wrapped() {
        let runner = HookRunner::new(Box::new(StubHook {
            min_version: "0.1.0",
            fail: true,
        }))
        .unwrap();

        let err = runner.initialize(&host(), "standard").unwrap_err();
        assert_eq!(err.kind, RunnerErrorKind::HookFailed);
        assert!(err.to_string().contains("during initialize"));
        assert_eq!(err.source().unwrap().to_string(), "catalog compiler exploded");

        let err = runner.clean(&host(), &[]).unwrap_err();
        assert!(err.to_string().contains("during clean: cannot clean"));
    }
}
