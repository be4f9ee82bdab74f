//! Compile GNU gettext catalogs and translate template files as part of a
//! packaging build.
//!
//! The [`hook::GettextBuildHook`] is driven by a packaging host through the
//! `gettext-build-interface` crate. [`host::ProjectHost`] and the
//! `gettext-build` binary provide a standalone host reading a project
//! manifest.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod executor;
pub mod hook;
pub mod host;
pub mod planner;
pub mod tools;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use config::BuildConfig;
pub use error::{GettextError, Result};
pub use hook::{GettextBuildHook, HookRunner, InvocationContext};
pub use planner::{CatalogPair, LanguageFilter, TemplatePair};
