use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GettextError>;

/// Errors raised while configuring, building or cleaning translations.
#[derive(Debug, Error)]
pub enum GettextError {
    #[error("Configure \"locale-directory\" in {location} to the directory in which compiled mo files will be written to.")]
    MissingLocaleDirectory { location: String },

    #[error("Configure \"po-directory\" in {location} to the project's po directory [default: \"po\"], and ensure the directory exists ({}).", .path.display())]
    MissingPoDirectory { location: String, path: PathBuf },

    #[error("The locale directory must be different from the project's root directory.")]
    LocaleDirIsProjectRoot,

    #[error("The locale directory must be different from the po directory.")]
    LocaleDirIsPoDir,

    #[error("\"{key}\" in {location}: expected {expected}, got {actual}")]
    InvalidOptionType {
        key: String,
        location: String,
        expected: &'static str,
        actual: String,
    },

    #[error("\"{key}\" in {location} is not a recognised option; use \"{canonical}\" instead")]
    NonCanonicalKey {
        key: String,
        canonical: String,
        location: String,
    },

    #[error("\"files\" entry {} in {location} does not name a file", .path.display())]
    InvalidTemplatePath { path: PathBuf, location: String },

    #[error("Don't know how to translate {}: expected a .xml.in, .desktop.in, .schemas.in or .keys.in file", .path.display())]
    UnknownTemplateKind { path: PathBuf },

    #[error("Error while invoking {program} ({status}):\n{output}")]
    ToolFailed {
        program: String,
        status: String,
        output: String,
    },

    #[error("Could not run {program}; is GNU gettext/intltool installed?")]
    ToolUnavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Files missing from translation template:\n{report}")]
    MissingFromTemplate { report: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}
