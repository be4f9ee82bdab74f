use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use gettext_build::host::PYPROJECT;

/// Target used when none is given on the command line.
pub const DEFAULT_TARGET: &str = "wheel";

#[derive(Parser, Debug)]
#[command(name = "gettext-build", version)]
#[command(
    about = "Compile gettext catalogs and translate template files for packaging",
    long_about = None
)]
pub struct Cli {
    /// Project root directory
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Project manifest holding the hook options, relative to the root
    #[arg(long, global = true, default_value = PYPROJECT)]
    pub manifest: PathBuf,

    /// Dotted path of the options table inside the manifest
    #[arg(long, global = true)]
    pub section: Option<String>,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile catalogs and translate templates, printing the artifacts
    Build {
        /// Packaging target; only "wheel" and "sdist" build translations
        #[arg(short, long, default_value = DEFAULT_TARGET)]
        target: String,

        /// Build version passed to the hook
        #[arg(long, default_value = "standard")]
        version: String,
    },
    /// Remove compiled catalogs, translated files and emptied directories
    Clean,
    /// Show which files a build would produce
    Plan {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a commented configuration template
    Schema,
}
