//! ufd - a universal file dialog for the terminal.
//!
//! Usage:
//!   ufd [OPTIONS]                 Browse and choose, print chosen paths
//!   ufd --format json             Print the result as a JSON array
//!   ufd --config dialog.json      Load dialog settings from a file
//!   ufd --help                    Show help
//!
//! Exits with status 0 when the dialog is submitted and 1 when it is
//! cancelled, so calling programs can tell the two apart even when nothing
//! was chosen.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::info;

use ufd_core::{DialogConfig, DialogSession, SessionState};
use ufd_fs::{StdFsProvider, StdVolumes};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "UFD_LOG";

/// Log filter used when `UFD_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "ufd=info,ufd_core=info,ufd_fs=info,ufd_tui=info,warn";

#[derive(Parser, Debug)]
#[command(
    name = "ufd",
    version,
    about = "A universal file dialog for the terminal",
    long_about = "ufd lets you browse volumes and directories and choose files or \
                  directories. Chosen paths are printed to stdout, one per line, \
                  for the calling program to read."
)]
struct Cli {
    /// Dialog title
    #[arg(long)]
    title: Option<String>,

    /// Show hidden entries
    #[arg(long, value_name = "BOOL")]
    show_hidden: Option<bool>,

    /// Show files in the tree
    #[arg(long, value_name = "BOOL")]
    include_files: Option<bool>,

    /// Allow choosing more than one entry
    #[arg(long, value_name = "BOOL")]
    multiselect: Option<bool>,

    /// Allow choosing directories
    #[arg(long, value_name = "BOOL")]
    select_dirs: Option<bool>,

    /// Allow choosing files
    #[arg(long, value_name = "BOOL")]
    select_files: Option<bool>,

    /// Print paths with the platform delimiter instead of '/'
    #[arg(long, value_name = "BOOL")]
    external_delimiter: Option<bool>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Load dialog settings from a JSON file; flags override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file (filter from UFD_LOG)
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(log) = &cli.log {
        init_logging(log)?;
    }

    let config = build_config(&cli)?;
    info!(%config, "starting dialog");

    let session = DialogSession::new(config, StdFsProvider::new(), &StdVolumes::new())
        .context("Failed to open dialog")?;
    let outcome = ufd_tui::run(session)?;

    print!("{}", format_output(&outcome.paths, cli.format)?);

    Ok(match outcome.state {
        SessionState::Submitted => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

/// Route tracing output to a file; the terminal belongs to the TUI.
fn init_logging(path: &Path) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}

/// Merge the optional config file with the command-line flags.
fn build_config(cli: &Cli) -> Result<DialogConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DialogConfig::default(),
    };

    if let Some(title) = &cli.title {
        config.title = title.clone();
    }
    if let Some(v) = cli.show_hidden {
        config.show_hidden = v;
    }
    if let Some(v) = cli.include_files {
        config.include_files = v;
    }
    if let Some(v) = cli.multiselect {
        config.multiselect = v;
    }
    if let Some(v) = cli.select_dirs {
        config.select_dirs = v;
    }
    if let Some(v) = cli.select_files {
        config.select_files = v;
    }
    if let Some(v) = cli.external_delimiter {
        config.use_external_delimiter = v;
    }

    config.validate().context("Invalid dialog settings")?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<DialogConfig> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Render the chosen paths for stdout.
fn format_output(paths: &[String], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(paths.iter().map(|p| format!("{p}\n")).collect()),
        OutputFormat::Json => {
            let json = serde_json::to_string(paths).context("Failed to serialize result")?;
            Ok(format!("{json}\n"))
        }
    }
}
