//! Working out which files a build produces.
//!
//! Planning never writes to disk. The same plan drives both the build and
//! the clean, which is what lets `clean` remove exactly what `build` made.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::BuildConfig;
use crate::error::{GettextError, Result};
use crate::utils::paths::{manifest_entry, project_path};

/// Name of the sentinel file, and of the environment variable overriding it.
pub const LINGUAS: &str = "LINGUAS";

pub const PO_EXTENSION: &str = "po";
pub const MO_EXTENSION: &str = "mo";
pub const MESSAGES_DIR: &str = "LC_MESSAGES";

/// A po file and the mo file compiled from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogPair {
    /// Locale code, the po file stem
    pub locale: String,
    /// Absolute path of the po file
    pub source: PathBuf,
    /// Path of the mo file, relative to the project root
    pub output: PathBuf,
}

/// A template input and the translated file produced from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplatePair {
    /// Absolute path of the `.in` file
    pub input: PathBuf,
    /// Path of the translated file, relative to the project root
    pub output: PathBuf,
}

impl CatalogPair {
    pub fn manifest_entry(&self) -> String {
        manifest_entry(&self.output)
    }
}

impl TemplatePair {
    pub fn manifest_entry(&self) -> String {
        manifest_entry(&self.output)
    }
}

/// Allow-list of locale codes to build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageFilter {
    locales: Option<Vec<String>>,
}

impl LanguageFilter {
    /// A filter letting every locale through.
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse a whitespace separated list of locale codes.
    ///
    /// `#` starts a comment running to the end of the line. An empty list
    /// means no filtering.
    pub fn parse(list: &str) -> Self {
        let locales: Vec<String> = list
            .lines()
            .map(|line| line.split('#').next().unwrap_or_default())
            .flat_map(str::split_whitespace)
            .map(str::to_string)
            .collect();
        Self {
            locales: (!locales.is_empty()).then_some(locales),
        }
    }

    /// Resolve the filter for `po_dir`.
    ///
    /// `env_override` is the value of the `LINGUAS` environment variable, if
    /// set; it wins over the `LINGUAS` file in the po directory.
    pub fn resolve(po_dir: &Path, env_override: Option<&str>) -> io::Result<Self> {
        if let Some(list) = env_override {
            tracing::debug!("Using {} from the environment: {:?}", LINGUAS, list);
            return Ok(Self::parse(list));
        }

        let linguas_file = po_dir.join(LINGUAS);
        if linguas_file.is_file() {
            let content = fs::read_to_string(&linguas_file)?;
            tracing::debug!("Using {}", linguas_file.display());
            return Ok(Self::parse(&content));
        }

        Ok(Self::all())
    }

    pub fn allows(&self, locale: &str) -> bool {
        match &self.locales {
            Some(locales) => locales.iter().any(|l| l == locale),
            None => true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.locales.is_some()
    }
}

/// Plan the mo files compiled from the po directory, sorted by po filename.
pub fn plan_catalogs(config: &BuildConfig, filter: &LanguageFilter) -> Result<Vec<CatalogPair>> {
    let mut po_files = Vec::new();
    for entry in fs::read_dir(&config.po_dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != PO_EXTENSION) {
            continue;
        }
        po_files.push(path);
    }
    po_files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mo_name = format!("{}.{}", config.i18n_name, MO_EXTENSION);
    let available = po_files.len();
    let pairs: Vec<CatalogPair> = po_files
        .into_iter()
        .filter_map(|source| {
            let locale = source.file_stem()?.to_string_lossy().into_owned();
            if !filter.allows(&locale) {
                tracing::debug!("Skipping {} (not in {})", locale, LINGUAS);
                return None;
            }
            let output = config
                .locale_dir_rel
                .join(&locale)
                .join(MESSAGES_DIR)
                .join(&mo_name);
            Some(CatalogPair {
                locale,
                source,
                output,
            })
        })
        .collect();

    if filter.is_active() {
        tracing::info!(
            "{} limits the build to {} of {} catalogs",
            LINGUAS,
            pairs.len(),
            available
        );
    }
    Ok(pairs)
}

/// Plan the files translated from templates.
///
/// Each output is the input's file name minus its last extension, placed in
/// the configured output folder: `data/app.desktop.in` under `share` becomes
/// `share/app.desktop`.
pub fn plan_templates(config: &BuildConfig) -> Result<Vec<TemplatePair>> {
    let mut pairs = Vec::new();
    for (folder, inputs) in &config.files {
        for input in inputs {
            let stem = input
                .file_stem()
                .ok_or_else(|| GettextError::InvalidTemplatePath {
                    path: input.clone(),
                    location: config.location.clone(),
                })?;
            pairs.push(TemplatePair {
                input: project_path(&config.root, input),
                output: folder.join(stem),
            });
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{catalog_project, TestHost};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn load(dir: &TempDir, extra: &str) -> BuildConfig {
        let host = TestHost::new(
            dir.path(),
            &format!("i18n-name = \"demo\"\nlocale-directory = \"locale\"\n{extra}"),
        );
        BuildConfig::load(&host).unwrap()
    }

    fn locales(pairs: &[CatalogPair]) -> Vec<&str> {
        pairs.iter().map(|p| p.locale.as_str()).collect()
    }

    #[test]
    fn test_catalogs_sorted_by_filename() {
        let dir = catalog_project(&["fr", "de_DE", "es", "de"]);
        let config = load(&dir, "");

        let pairs = plan_catalogs(&config, &LanguageFilter::all()).unwrap();

        assert_eq!(locales(&pairs), vec!["de", "de_DE", "es", "fr"]);
        assert_eq!(pairs[0].source, dir.path().join("po").join("de.po"));
        assert_eq!(
            pairs[0].output,
            PathBuf::from("locale/de/LC_MESSAGES/demo.mo")
        );
        assert_eq!(pairs[0].manifest_entry(), "locale/de/LC_MESSAGES/demo.mo");
    }

    #[test]
    fn test_catalogs_ignore_other_files() {
        let dir = catalog_project(&["fr"]);
        crate::test_support::write_file(&dir.path().join("po/demo.pot"), "");
        crate::test_support::write_file(&dir.path().join("po/POTFILES.in"), "");
        std::fs::create_dir_all(dir.path().join("po/old.po")).unwrap();
        let config = load(&dir, "");

        let pairs = plan_catalogs(&config, &LanguageFilter::all()).unwrap();

        assert_eq!(locales(&pairs), vec!["fr"]);
    }

    #[test]
    fn test_catalogs_are_deterministic() {
        let dir = catalog_project(&["pt_BR", "fr", "nl"]);
        let config = load(&dir, "");

        let first = plan_catalogs(&config, &LanguageFilter::all()).unwrap();
        let second = plan_catalogs(&config, &LanguageFilter::all()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_linguas_file_restricts_locales() {
        let dir = catalog_project(&["fr", "de", "es"]);
        crate::test_support::write_file(&dir.path().join("po/LINGUAS"), "fr de\n");
        let config = load(&dir, "");

        let filter = LanguageFilter::resolve(&config.po_dir, None).unwrap();
        let pairs = plan_catalogs(&config, &filter).unwrap();

        assert!(filter.is_active());
        assert_eq!(locales(&pairs), vec!["de", "fr"]);
    }

    #[test]
    fn test_environment_overrides_linguas_file() {
        let dir = catalog_project(&["fr", "de", "es"]);
        crate::test_support::write_file(&dir.path().join("po/LINGUAS"), "fr de\n");
        let config = load(&dir, "");

        let filter = LanguageFilter::resolve(&config.po_dir, Some("es")).unwrap();
        let pairs = plan_catalogs(&config, &filter).unwrap();

        assert_eq!(locales(&pairs), vec!["es"]);
    }

    #[test]
    fn test_empty_override_builds_everything() {
        let dir = catalog_project(&["fr", "de"]);
        crate::test_support::write_file(&dir.path().join("po/LINGUAS"), "fr\n");
        let config = load(&dir, "");

        let filter = LanguageFilter::resolve(&config.po_dir, Some("  ")).unwrap();

        assert!(!filter.is_active());
        assert_eq!(
            locales(&plan_catalogs(&config, &filter).unwrap()),
            vec!["de", "fr"]
        );
    }

    #[test]
    fn test_linguas_parse_skips_comments() {
        let filter = LanguageFilter::parse("# Languages shipped\nfr de # partial\n\tpt_BR\n");
        assert!(filter.allows("fr"));
        assert!(filter.allows("de"));
        assert!(filter.allows("pt_BR"));
        assert!(!filter.allows("partial"));
        assert!(!filter.allows("es"));
    }

    #[test]
    fn test_templates_empty_without_files() {
        let dir = catalog_project(&["fr"]);
        let config = load(&dir, "");
        assert!(plan_templates(&config).unwrap().is_empty());
    }

    #[test]
    fn test_template_output_drops_last_extension() {
        let dir = catalog_project(&["fr"]);
        let config = load(&dir, "[files]\ndata = [\"app.desktop.in\"]");

        let pairs = plan_templates(&config).unwrap();

        assert_eq!(
            pairs,
            vec![TemplatePair {
                input: dir.path().join("app.desktop.in"),
                output: PathBuf::from("data/app.desktop"),
            }]
        );
        assert_eq!(pairs[0].manifest_entry(), "data/app.desktop");
    }

    #[test]
    fn test_template_output_uses_input_file_name_only() {
        let dir = catalog_project(&["fr"]);
        let config = load(
            &dir,
            r#"
            [files]
            "share/metainfo" = ["data/net.example.App.metainfo.xml.in"]
            "share/applications" = ["data/net.example.App.desktop.in", "data/extra.desktop.in"]
            "#,
        );

        let outputs: Vec<PathBuf> = plan_templates(&config)
            .unwrap()
            .into_iter()
            .map(|p| p.output)
            .collect();

        assert_eq!(
            outputs,
            vec![
                PathBuf::from("share/applications/net.example.App.desktop"),
                PathBuf::from("share/applications/extra.desktop"),
                PathBuf::from("share/metainfo/net.example.App.metainfo.xml"),
            ]
        );
    }

    #[test]
    fn test_template_without_file_name_is_rejected() {
        let dir = catalog_project(&["fr"]);
        let config = load(&dir, "[files]\ndata = [\"..\"]");
        assert!(matches!(
            plan_templates(&config),
            Err(GettextError::InvalidTemplatePath { .. })
        ));
    }
}
