//! Wrappers around the GNU gettext and intltool command-line utilities.
//!
//! All functions block until the tool exits. A nonzero exit is turned into
//! [`GettextError::ToolFailed`] carrying everything the tool printed.

use std::io;
use std::path::Path;
use std::process::Command;

use crate::error::{GettextError, Result};

/// The external programs used by the hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub msgfmt: String,
    pub intltool_merge: String,
    pub intltool_update: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            msgfmt: Self::DEFAULT_MSGFMT.to_string(),
            intltool_merge: Self::DEFAULT_INTLTOOL_MERGE.to_string(),
            intltool_update: Self::DEFAULT_INTLTOOL_UPDATE.to_string(),
        }
    }
}

/// Captured result of a tool that exited successfully.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// stdout followed by stderr
    pub output: String,
}

impl Toolchain {
    pub const DEFAULT_MSGFMT: &'static str = "msgfmt";
    pub const DEFAULT_INTLTOOL_MERGE: &'static str = "intltool-merge";
    pub const DEFAULT_INTLTOOL_UPDATE: &'static str = "intltool-update";

    /// Compile `po_file` into `mo_file`.
    pub fn compile_catalog(&self, po_file: &Path, mo_file: &Path) -> Result<ToolOutput> {
        let mut output_arg = std::ffi::OsString::from("--output-file=");
        output_arg.push(mo_file);

        let mut cmd = Command::new(&self.msgfmt);
        cmd.arg(output_arg).arg(po_file);
        run_captured(&self.msgfmt, &mut cmd)
    }

    /// Translate `in_file` into `translated_file` using the catalogs in `po_dir`.
    pub fn merge_translations(
        &self,
        switch: &str,
        po_dir: &Path,
        in_file: &Path,
        translated_file: &Path,
    ) -> Result<ToolOutput> {
        let mut cmd = Command::new(&self.intltool_merge);
        cmd.arg(switch).arg(po_dir).arg(in_file).arg(translated_file);
        run_captured(&self.intltool_merge, &mut cmd)
    }

    /// List source files containing translatable strings that are missing
    /// from POTFILES.in. Empty output means nothing is missing.
    pub fn find_left_out(&self, po_dir: &Path) -> Result<ToolOutput> {
        let mut cmd = Command::new(&self.intltool_update);
        cmd.arg("-m").current_dir(po_dir);
        run_captured(&self.intltool_update, &mut cmd)
    }

    /// Regenerate the `<domain>.pot` template.
    pub fn regenerate_template(&self, po_dir: &Path, domain: &str) -> Result<ToolOutput> {
        let mut cmd = Command::new(&self.intltool_update);
        cmd.args(["-p", "-g", domain]).current_dir(po_dir);
        run_captured(&self.intltool_update, &mut cmd)
    }

    /// Produce a translation status report.
    pub fn report(&self, po_dir: &Path, domain: &str) -> Result<ToolOutput> {
        let mut cmd = Command::new(&self.intltool_update);
        cmd.args(["-r", "-g", domain]).current_dir(po_dir);
        run_captured(&self.intltool_update, &mut cmd)
    }
}

/// Run `cmd` to completion, capturing stdout and stderr.
pub fn run_captured(program: &str, cmd: &mut Command) -> Result<ToolOutput> {
    tracing::debug!(command = ?cmd, "Running {}", program);

    let output = cmd.output().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            GettextError::ToolUnavailable {
                program: program.to_string(),
                source: e,
            }
        }
        _ => GettextError::Io(e),
    })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        let status = match output.status.code() {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        };
        return Err(GettextError::ToolFailed {
            program: program.to_string(),
            status,
            output: combined,
        });
    }

    Ok(ToolOutput { output: combined })
}
