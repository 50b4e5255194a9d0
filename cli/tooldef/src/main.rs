//! tooldef CLI — resolve `DEFINE` macros in a build configuration file and
//! export grouped per-architecture flags.

mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::{Settings, ToolDefConfig};
use tooldef_core::{PropertyKey, WILDCARD};

#[derive(Parser)]
#[command(
    name = "tooldef",
    version,
    about = "Resolve DEFINE macros and export grouped build flags"
)]
struct Cli {
    /// Configuration file with DEFINE and property lines
    file: PathBuf,
    /// Target selector (e.g., DEBUG, RELEASE)
    #[arg(long, default_value = WILDCARD)]
    target: String,
    /// Toolchain selector (e.g., GCC5); also names the output file
    #[arg(long, default_value = WILDCARD)]
    toolchain: String,
    /// Architecture selector (e.g., X64, AARCH64)
    #[arg(long, default_value = WILDCARD)]
    arch: String,
    /// Command selector (e.g., CC, DLINK)
    #[arg(long, default_value = WILDCARD)]
    command: String,
    /// Attribute selector (e.g., FLAGS, PATH)
    #[arg(long, default_value = WILDCARD)]
    attribute: String,
    /// Print matching resolved properties instead of writing the flag file
    #[arg(long)]
    list: bool,
    /// Include *_*_*_*_ catch-all records
    #[arg(long)]
    all: bool,
    /// Keep long values on a single line
    #[arg(long)]
    raw: bool,
    /// Layout configuration (default: nearest tooldef.toml above the input file)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory to write the flag file to (default: current directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = build_settings(&cli, &cwd)?;
    if let Some(path) = &settings.config_path {
        debug!(config = %path.display(), "loaded layout configuration");
    }

    let parsed = tooldef_core::load_file(&settings.input)
        .with_context(|| format!("can't read file {}", settings.input.display()))?;
    if !parsed.diagnostics.is_empty() {
        info!(skipped = parsed.diagnostics.len(), "skipped malformed lines");
    }

    let resolution = tooldef_core::resolve(&parsed)?;
    info!(
        macros = resolution.macros.len(),
        properties = resolution.properties.len(),
        "resolved configuration"
    );
    println!("Success, {} records", resolution.properties.len());

    if cli.list {
        commands::list::run(
            &resolution.properties,
            &settings.selection,
            settings.layout.include_catch_all,
        );
    } else {
        commands::export::run(&resolution.properties, &settings)?;
    }
    Ok(())
}

/// Merge command-line flags over the configuration file into one value.
fn build_settings(cli: &Cli, cwd: &Path) -> Result<Settings> {
    let input = absolute(&cli.file, cwd);
    if input.is_dir() {
        bail!("{} is a directory", input.display());
    }

    let (config, config_path) = match &cli.config {
        Some(path) => {
            let path = absolute(path, cwd);
            (ToolDefConfig::load(&path)?, Some(path))
        }
        None => {
            let start = input.parent().unwrap_or(cwd);
            match ToolDefConfig::find_and_load(start)? {
                Some((config, path)) => (config, Some(path)),
                None => (ToolDefConfig::default(), None),
            }
        }
    };

    let mut layout = config.layout()?;
    if cli.all {
        layout.include_catch_all = true;
    }
    if cli.raw {
        layout.pretty = false;
    }

    let output_dir = match &cli.output_dir {
        Some(dir) => absolute(dir, cwd),
        None => cwd.to_path_buf(),
    };

    Ok(Settings {
        input,
        selection: PropertyKey::new(
            cli.target.as_str(),
            cli.toolchain.as_str(),
            cli.arch.as_str(),
            cli.command.as_str(),
            cli.attribute.as_str(),
        ),
        layout,
        output_dir,
        config_path,
    })
}

fn absolute(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
