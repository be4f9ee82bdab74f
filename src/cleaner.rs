//! Removing what a build produced.
//!
//! Files are only removed if the planner says the build creates them.
//! Directories are only removed when nothing but directories remain beneath
//! them, so trees a user has since put their own files into survive.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::Result;
use crate::planner::{CatalogPair, TemplatePair};
use crate::utils::paths::{project_path, relative_parent_dirs};

/// Delete each root-relative file in `relative_paths` that exists.
pub fn clean_files<'a, I>(root: &Path, relative_paths: I) -> io::Result<usize>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut removed = 0;
    for relative in relative_paths {
        let full_path = project_path(root, relative);
        if full_path.is_file() {
            tracing::debug!("Removing {}", full_path.display());
            fs::remove_file(&full_path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Whether `path` holds no files at any depth.
///
/// Symbolic links count as files and are never followed.
pub fn has_only_subdirectories(path: &Path) -> io::Result<bool> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            return Ok(false);
        }
        if !has_only_subdirectories(&entry.path())? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Remove the tree rooted at `folder` if it holds no files at any depth.
///
/// Returns whether the tree was removed.
pub fn remove_tree_if_only_subdirectories(folder: &Path) -> io::Result<bool> {
    let is_real_dir = fs::symlink_metadata(folder)
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_real_dir || !has_only_subdirectories(folder)? {
        return Ok(false);
    }
    tracing::debug!("Removing {}", folder.display());
    fs::remove_dir_all(folder)?;
    Ok(true)
}

/// Prune each ancestor of root-relative `relative`, deepest first.
///
/// Only folders strictly inside `root` are candidates.
fn remove_empty_ancestors(root: &Path, relative: &Path) -> io::Result<()> {
    for folder in relative_parent_dirs(relative) {
        let folder = project_path(root, &folder);
        if folder == root || !folder.starts_with(root) {
            continue;
        }
        remove_tree_if_only_subdirectories(&folder)?;
    }
    Ok(())
}

/// Remove every planned artifact, then any directory tree left empty.
///
/// Catalog outputs are only looked for when the locale directory exists.
/// Candidate trees are the locale directory, its ancestors, and each
/// ancestor of each template output, deepest first, never the project root
/// itself nor anything outside it.
pub fn clean(
    root: &Path,
    locale_dir: &Path,
    catalogs: &[CatalogPair],
    templates: &[TemplatePair],
) -> Result<()> {
    if locale_dir.is_dir() {
        clean_files(root, catalogs.iter().map(|p| p.output.as_path()))?;
    }
    clean_files(root, templates.iter().map(|p| p.output.as_path()))?;

    remove_tree_if_only_subdirectories(locale_dir)?;
    if let Ok(locale_rel) = locale_dir.strip_prefix(root) {
        remove_empty_ancestors(root, locale_rel)?;
    }

    for template in templates {
        remove_empty_ancestors(root, &template.output)?;
    }
    Ok(())
}
