//! Producing the planned artifacts.

use std::fs;
use std::path::Path;

use crate::config::BuildConfig;
use crate::error::{GettextError, Result};
use crate::planner::{CatalogPair, TemplatePair};
use crate::tools::Toolchain;
use crate::utils::paths::project_path;

/// intltool-merge switch for each supported template kind, keyed by the
/// extension preceding `.in`.
const MERGE_SWITCHES: &[(&str, &str)] = &[
    ("xml", "-x"),
    ("desktop", "-d"),
    ("schemas", "-s"),
    ("keys", "-k"),
];

/// Pick the intltool-merge switch for a template such as `app.desktop.in`.
pub fn merge_switch(in_file: &Path) -> Result<&'static str> {
    let inner_extension = in_file
        .file_stem()
        .map(Path::new)
        .and_then(Path::extension)
        .and_then(|ext| ext.to_str());

    inner_extension
        .and_then(|ext| {
            MERGE_SWITCHES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, switch)| *switch)
        })
        .ok_or_else(|| GettextError::UnknownTemplateKind {
            path: in_file.to_path_buf(),
        })
}

/// Compile each po file to its mo file, stopping at the first failure.
pub fn build_catalogs(root: &Path, pairs: &[CatalogPair], toolchain: &Toolchain) -> Result<()> {
    for pair in pairs {
        let file_name = pair
            .source
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        tracing::info!("Compiling \"{}\"", file_name);

        let mo_file = project_path(root, &pair.output);
        if let Some(parent) = mo_file.parent() {
            fs::create_dir_all(parent)?;
        }
        toolchain.compile_catalog(&pair.source, &mo_file)?;
    }
    Ok(())
}

/// Translate each template, stopping at the first failure.
pub fn build_templates(
    root: &Path,
    pairs: &[TemplatePair],
    po_dir: &Path,
    toolchain: &Toolchain,
) -> Result<()> {
    for pair in pairs {
        let switch = merge_switch(&pair.input)?;
        let translated = project_path(root, &pair.output);
        if let Some(parent) = translated.parent() {
            fs::create_dir_all(parent)?;
        }
        tracing::info!(
            "Translating \"{}\"",
            pair.output
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default()
        );
        toolchain.merge_translations(switch, po_dir, &pair.input, &translated)?;
    }
    Ok(())
}

/// Fail if any source file with translatable strings is missing from
/// POTFILES.in.
pub fn identify_left_out(config: &BuildConfig) -> Result<()> {
    tracing::info!("Checking for files missing from the translation template");
    let result = config.toolchain.find_left_out(&config.po_dir)?;
    let report = result.output.trim();
    if !report.is_empty() {
        tracing::error!("{}", report);
        return Err(GettextError::MissingFromTemplate {
            report: report.to_string(),
        });
    }
    Ok(())
}

pub fn regenerate_template(config: &BuildConfig) -> Result<()> {
    tracing::info!("Regenerating .pot template");
    let result = config
        .toolchain
        .regenerate_template(&config.po_dir, &config.i18n_name)?;
    log_tool_output(&result.output);
    Ok(())
}

pub fn show_report(config: &BuildConfig) -> Result<()> {
    tracing::info!("Generating report");
    let result = config.toolchain.report(&config.po_dir, &config.i18n_name)?;
    for line in result.output.lines() {
        tracing::info!("{}", line);
    }
    Ok(())
}

fn log_tool_output(output: &str) {
    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        tracing::debug!("{}", line);
    }
}
