mod cli;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, DEFAULT_TARGET};
use gettext_build::host::{default_section, ProjectHost};
use gettext_build::{CatalogPair, GettextBuildHook, HookRunner, InvocationContext, TemplatePair};
use gettext_build_interface::{generate_config_template, BuildHook, BuildHost};
use serde::Serialize;

/// Initialize logging to stderr, or to `--log-file` when given.
///
/// Log level can be controlled with RUST_LOG env var; otherwise it follows
/// -v/-q (default: info).
fn init_logging(cli: &Cli) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let Some(log_file) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .init();
        return Ok(None);
    };

    let logs_dir = match log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Could not create logs directory {}", logs_dir.display()))?;
    let file_name = log_file
        .file_name()
        .context("--log-file must name a file")?;

    let file_appender = tracing_appender::rolling::never(&logs_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI colors in log files
        .with_target(true)
        .init();

    Ok(Some(guard))
}

fn load_host(cli: &Cli, target: &str) -> Result<ProjectHost> {
    let host = ProjectHost::load(&cli.root, &cli.manifest, cli.section.as_deref(), target)?;
    tracing::debug!(
        section = host.section(),
        package = host.metadata_name(),
        "Loaded {}",
        cli.manifest.display()
    );
    Ok(host)
}

fn runner() -> Result<HookRunner> {
    Ok(HookRunner::new(Box::new(GettextBuildHook::new()))?)
}

fn handle_build(cli: &Cli, target: &str, version: &str) -> Result<()> {
    let host = load_host(cli, target)?;
    let build_data = runner()?.initialize(&host, version)?;
    for artifact in build_data.artifacts() {
        println!("{}", artifact);
    }
    Ok(())
}

fn handle_clean(cli: &Cli) -> Result<()> {
    let host = load_host(cli, DEFAULT_TARGET)?;
    runner()?.clean(&host, &[])?;
    Ok(())
}

#[derive(Serialize)]
struct Plan<'a> {
    catalogs: &'a [CatalogPair],
    templates: &'a [TemplatePair],
}

fn handle_plan(cli: &Cli, json: bool) -> Result<()> {
    let host = load_host(cli, DEFAULT_TARGET)?;
    let ctx = InvocationContext::load(&host)?;
    let plan = Plan {
        catalogs: ctx.catalog_pairs()?,
        templates: ctx.template_pairs()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let root = &ctx.config().root;
    let shown = |path: &Path| path.strip_prefix(root).unwrap_or(path).display().to_string();
    for pair in plan.catalogs {
        println!("{} -> {}", shown(&pair.source), pair.output.display());
    }
    for pair in plan.templates {
        println!("{} -> {}", shown(&pair.input), pair.output.display());
    }
    Ok(())
}

fn handle_schema(cli: &Cli) {
    let section = cli
        .section
        .as_deref()
        .unwrap_or_else(|| default_section(&cli.manifest));
    print!(
        "{}",
        generate_config_template(&GettextBuildHook::new().config_schema(), section)
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Guard must be kept alive until logs are flushed
    let _log_guard = init_logging(&cli)?;

    match &cli.command {
        Commands::Build { target, version } => handle_build(&cli, target, version),
        Commands::Clean => handle_clean(&cli),
        Commands::Plan { json } => handle_plan(&cli, *json),
        Commands::Schema => {
            handle_schema(&cli);
            Ok(())
        }
    }
}
