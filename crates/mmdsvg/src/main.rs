//! mmdsvg CLI - Mermaid to SVG conversion via Kroki.
//!
//! Two modes:
//! - `mmdsvg <INPUT> <OUTPUT>`: convert one file
//! - `mmdsvg --all`: convert every diagram under `apps/sensorgrid_*`

mod commands;
mod error;
mod output;

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use mmdsvg_config::{CliSettings, Config};
use tracing_subscriber::EnvFilter;

use error::CliError;
use output::Output;

/// Convert Mermaid (.mmd) files to SVG using a Kroki server.
#[derive(Parser)]
#[command(name = "mmdsvg", version, about)]
struct Cli {
    /// Mermaid source file to convert.
    #[arg(requires = "output", conflicts_with = "all")]
    input: Option<PathBuf>,

    /// SVG file to write (parent directories are created).
    #[arg(requires = "input")]
    output: Option<PathBuf>,

    /// Convert all diagrams found in the project layout.
    #[arg(long)]
    all: bool,

    /// Path to configuration file (default: auto-discover mmdsvg.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Kroki server URL (overrides config).
    #[arg(long, env = "MMDSVG_KROKI_URL")]
    kroki_url: Option<String>,

    /// Request timeout in seconds (overrides config).
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Project root scanned by --all (overrides config).
    #[arg(long)]
    project_root: Option<PathBuf>,

    /// Enable verbose output (per-request logs).
    #[arg(short, long)]
    verbose: bool,
}

/// What the parsed arguments ask for.
#[derive(Debug, PartialEq, Eq)]
enum Mode<'a> {
    Single { input: &'a Path, output: &'a Path },
    All,
}

impl Cli {
    /// Resolve the run mode, or None when neither mode was requested.
    fn mode(&self) -> Option<Mode<'_>> {
        match (&self.input, &self.output, self.all) {
            (Some(input), Some(output), false) => Some(Mode::Single { input, output }),
            (None, None, true) => Some(Mode::All),
            _ => None,
        }
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            kroki_url: self.kroki_url.clone(),
            timeout_secs: self.timeout,
            project_root: self.project_root.clone(),
        }
    }
}

fn run(cli: &Cli, mode: &Mode<'_>) -> Result<(), CliError> {
    let config = Config::load(cli.config.as_deref(), Some(&cli.cli_settings()))?;
    match &config.config_path {
        Some(path) => tracing::info!(
            path = %path.display(),
            kroki_url = %config.kroki.url,
            "Loaded configuration"
        ),
        None => tracing::info!(kroki_url = %config.kroki.url, "Using default configuration"),
    }

    match mode {
        Mode::Single { input, output } => commands::single::execute(&config, input, output),
        Mode::All => {
            commands::all::execute(&config);
            Ok(())
        }
    }
}

/// `--verbose` enables INFO level, otherwise `RUST_LOG` or WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let Some(mode) = cli.mode() else {
        let _ = Cli::command().print_help();
        std::process::exit(1);
    };

    match run(&cli, &mode) {
        Ok(()) => {}
        Err(CliError::ConversionFailed) => std::process::exit(1),
        Err(err) => {
            output.error(&format!("Error: {err}"));
            std::process::exit(1);
        }
    }
}
