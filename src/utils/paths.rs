use std::path::{Component, Path, PathBuf};

/// Normalize a path without touching the filesystem.
///
/// Drops `.` components and resolves `..` against the preceding normal
/// component. Leading `..` components of a relative path are kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Join a root-relative path onto the project root, normalized.
pub fn project_path(root: &Path, relative: &Path) -> PathBuf {
    normalize_lexically(&root.join(relative))
}

/// Render a root-relative path as an artifact manifest entry.
///
/// Manifest entries always use forward slashes, whatever the platform.
pub fn manifest_entry(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Ancestors of a root-relative file path, deepest first.
///
/// The file itself and the (empty) project root are excluded, so
/// `data/sub/app.desktop` yields `data/sub` then `data`. For an absolute
/// path the filesystem root is excluded too.
pub fn relative_parent_dirs(relative: &Path) -> Vec<PathBuf> {
    relative
        .ancestors()
        .skip(1)
        .filter(|p| p.parent().is_some() && *p != Path::new("."))
        .map(Path::to_path_buf)
        .collect()
}
