//! Per-invocation state.
//!
//! A context is created at the start of each lifecycle call and dropped at
//! the end of it, so plans are never reused across invocations.

use std::cell::OnceCell;

use gettext_build_interface::BuildHost;

use crate::config::BuildConfig;
use crate::error::Result;
use crate::planner::{
    plan_catalogs, plan_templates, CatalogPair, LanguageFilter, TemplatePair, LINGUAS,
};

pub struct InvocationContext {
    config: BuildConfig,
    linguas_override: Option<String>,
    catalogs: OnceCell<Vec<CatalogPair>>,
    templates: OnceCell<Vec<TemplatePair>>,
}

impl InvocationContext {
    /// Load the configuration from `host` and snapshot `LINGUAS` from the
    /// process environment.
    pub fn load(host: &dyn BuildHost) -> Result<Self> {
        let linguas = std::env::var_os(LINGUAS).map(|v| v.to_string_lossy().into_owned());
        Ok(Self::new(BuildConfig::load(host)?, linguas))
    }

    pub fn new(config: BuildConfig, linguas_override: Option<String>) -> Self {
        Self {
            config,
            linguas_override,
            catalogs: OnceCell::new(),
            templates: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// The catalogs this invocation builds, planned on first use.
    pub fn catalog_pairs(&self) -> Result<&[CatalogPair]> {
        if let Some(pairs) = self.catalogs.get() {
            return Ok(pairs);
        }
        let filter =
            LanguageFilter::resolve(&self.config.po_dir, self.linguas_override.as_deref())?;
        let pairs = plan_catalogs(&self.config, &filter)?;
        Ok(self.catalogs.get_or_init(|| pairs))
    }

    /// The translated templates this invocation builds, planned on first use.
    pub fn template_pairs(&self) -> Result<&[TemplatePair]> {
        if let Some(pairs) = self.templates.get() {
            return Ok(pairs);
        }
        let pairs = plan_templates(&self.config)?;
        Ok(self.templates.get_or_init(|| pairs))
    }

    /// Artifact manifest entries for the compiled catalogs.
    pub fn catalog_artifacts(&self) -> Result<Vec<String>> {
        Ok(self
            .catalog_pairs()?
            .iter()
            .map(CatalogPair::manifest_entry)
            .collect())
    }

    /// Artifact manifest entries for the translated templates.
    pub fn template_artifacts(&self) -> Result<Vec<String>> {
        Ok(self
            .template_pairs()?
            .iter()
            .map(TemplatePair::manifest_entry)
            .collect())
    }
}
