//! Fixtures shared by the unit tests.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use gettext_build_interface::BuildHost;
use tempfile::TempDir;

/// In-memory host standing in for the packaging tool.
pub struct TestHost {
    root: PathBuf,
    config: toml::Table,
    name: String,
    target: String,
}

impl TestHost {
    pub fn new(root: &Path, config: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            config: toml::from_str(config).unwrap(),
            name: "demo-app".to_string(),
            target: "wheel".to_string(),
        }
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.target = target.to_string();
        self
    }
}

impl BuildHost for TestHost {
    fn root(&self) -> &Path {
        &self.root
    }

    fn config(&self) -> &toml::Table {
        &self.config
    }

    fn metadata_name(&self) -> &str {
        &self.name
    }

    fn target_name(&self) -> &str {
        &self.target
    }

    fn config_location(&self) -> String {
        "[tool.hatch.build.hooks.gettext] in pyproject.toml".to_string()
    }
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A project with `po/<locale>.po` for each locale.
pub fn catalog_project(locales: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("po")).unwrap();
    for locale in locales {
        write_file(
            &dir.path().join("po").join(format!("{locale}.po")),
            &format!("msgid \"Hello\"\nmsgstr \"Hello ({locale})\"\n"),
        );
    }
    dir
}

/// Every file and directory below `root`, relative to it.
pub fn snapshot(root: &Path) -> BTreeSet<(PathBuf, bool)> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeSet<(PathBuf, bool)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let is_dir = path.is_dir();
            out.insert((path.strip_prefix(root).unwrap().to_path_buf(), is_dir));
            if is_dir {
                walk(root, &path, out);
            }
        }
    }
    let mut out = BTreeSet::new();
    walk(root, root, &mut out);
    out
}

/// Write an executable shell script and return its path.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.display().to_string()
}

/// Stand-ins for msgfmt, intltool-merge and intltool-update.
///
/// msgfmt copies the po file to the mo path, intltool-merge copies the
/// template; either fails for the file names it was told to. intltool-update prints
/// the content of a `missing` file in the po directory when run with `-m`,
/// and logs its arguments to `intltool-update.log` in the tools directory.
#[cfg(unix)]
pub struct FakeTools {
    dir: TempDir,
    pub msgfmt: String,
    pub intltool_merge: String,
    pub intltool_update: String,
}

#[cfg(unix)]
impl FakeTools {
    pub fn new() -> Self {
        Self::failing_on(&[])
    }

    /// msgfmt exits 1 for the po files named in `fail_on`.
    pub fn failing_on(fail_on: &[&str]) -> Self {
        Self::with_failures(fail_on, &[])
    }

    /// intltool-merge exits 1 for the templates named in `fail_on`.
    pub fn merge_failing_on(fail_on: &[&str]) -> Self {
        Self::with_failures(&[], fail_on)
    }

    fn with_failures(msgfmt_fails: &[&str], merge_fails: &[&str]) -> Self {
        fn fail_cases(names: &[&str], message: &str) -> String {
            names
                .iter()
                .map(|name| format!("    */{name}) echo \"{name}: {message}\"; exit 1 ;;\n"))
                .collect()
        }

        let dir = TempDir::new().unwrap();
        let msgfmt = fake_tool(
            dir.path(),
            "msgfmt",
            &format!(
                "case \"$2\" in\n{}esac\ncp \"$2\" \"${{1#--output-file=}}\"",
                fail_cases(msgfmt_fails, "fatal error")
            ),
        );
        let intltool_merge = fake_tool(
            dir.path(),
            "intltool-merge",
            &format!(
                "case \"$3\" in\n{}esac\ncp \"$3\" \"$4\"",
                fail_cases(merge_fails, "badly formed XML")
            ),
        );
        let log = dir.path().join("intltool-update.log");
        let intltool_update = fake_tool(
            dir.path(),
            "intltool-update",
            &format!(
                "echo \"$@\" >> \"{}\"\nif [ \"$1\" = \"-m\" ] && [ -f missing ]; then cat missing; fi\nif [ \"$1\" = \"-r\" ]; then echo \"fr: 10 translated messages.\"; fi",
                log.display()
            ),
        );
        Self {
            dir,
            msgfmt,
            intltool_merge,
            intltool_update,
        }
    }

    /// Configuration lines pointing the hook at these tools.
    pub fn config(&self) -> String {
        format!(
            "msgfmt = \"{}\"\nintltool-merge = \"{}\"\nintltool-update = \"{}\"\n",
            self.msgfmt, self.intltool_merge, self.intltool_update
        )
    }

    /// Arguments of each intltool-update call, one line per call.
    pub fn update_calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("intltool-update.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}
