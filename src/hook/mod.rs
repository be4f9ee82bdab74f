//! The gettext build hook.
//!
//! Compiles GNU gettext translation files from po-format into mo-format using
//! msgfmt, and optionally translates files using intltool-merge. Cleans up any
//! files it creates, and any resulting directories, but only if the
//! directories are empty.

pub mod context;
pub mod runner;

pub use context::InvocationContext;
pub use runner::{HookRunner, RunnerError, RunnerErrorKind};

use gettext_build_interface::{BuildData, BuildHook, BuildHost, ConfigSchema, HookResult};

use crate::cleaner;
use crate::config::gettext_schema;
use crate::error::Result;
use crate::executor;

pub const PLUGIN_NAME: &str = "gettext";

/// Targets the hook builds translations for.
pub const SUPPORTED_TARGETS: &[&str] = &["wheel", "sdist"];

/// The source distribution target, the only one running the diagnostics.
pub const SOURCE_TARGET: &str = "sdist";

#[derive(Debug, Default, Clone, Copy)]
pub struct GettextBuildHook;

impl GettextBuildHook {
    pub fn new() -> Self {
        Self
    }

    /// Compile catalogs and translate templates for the current target.
    pub fn build(&self, host: &dyn BuildHost, build_data: &mut BuildData) -> Result<()> {
        let ctx = InvocationContext::load(host)?;
        let config = ctx.config();

        if host.target_name() == SOURCE_TARGET {
            if config.identify_left_out {
                executor::identify_left_out(config)?;
            }
            if config.regenerate_template {
                executor::regenerate_template(config)?;
            }
            if config.show_report {
                executor::show_report(config)?;
            }
        }

        build_data.extend(ctx.catalog_artifacts()?);
        executor::build_catalogs(&config.root, ctx.catalog_pairs()?, &config.toolchain)?;

        if config.has_templates() {
            build_data.extend(ctx.template_artifacts()?);
            executor::build_templates(
                &config.root,
                ctx.template_pairs()?,
                &config.po_dir,
                &config.toolchain,
            )?;
        }

        Ok(())
    }

    /// Remove everything `build` would produce.
    pub fn clean_outputs(&self, host: &dyn BuildHost) -> Result<()> {
        let ctx = InvocationContext::load(host)?;
        let config = ctx.config();
        cleaner::clean(
            &config.root,
            &config.locale_dir,
            ctx.catalog_pairs()?,
            ctx.template_pairs()?,
        )
    }
}

impl BuildHook for GettextBuildHook {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn min_interface_version(&self) -> &str {
        "0.1.0"
    }

    fn config_schema(&self) -> ConfigSchema {
        gettext_schema()
    }

    fn initialize(
        &self,
        host: &dyn BuildHost,
        _version: &str,
        build_data: &mut BuildData,
    ) -> HookResult {
        if !SUPPORTED_TARGETS.contains(&host.target_name()) {
            tracing::debug!(
                "Skipping gettext translations for target \"{}\"",
                host.target_name()
            );
            return Ok(());
        }

        tracing::info!("Building gettext translations");
        self.build(host, build_data)?;
        tracing::info!("Finished building gettext translations");
        Ok(())
    }

    fn clean(&self, host: &dyn BuildHost, _versions: &[String]) -> HookResult {
        tracing::info!("Cleaning gettext translations");
        self.clean_outputs(host)?;
        tracing::info!("Finished cleaning gettext translations");
        Ok(())
    }
}
