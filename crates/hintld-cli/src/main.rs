//! hintld - HiNT interaction tables to linked data
//!
//! Reconciles the per-organism HiNT tables and writes them as JSON-LD
//! (one object per line) or Turtle.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::{Config, DEFAULT_CONFIG};

#[derive(Parser)]
#[command(name = "hintld")]
#[command(about = "HiNT interaction tables to JSON-LD / Turtle")]
#[command(version)]
struct Cli {
    /// Defaults to `convert`
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (JSON, or TOML by extension)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Write log lines to this file instead of stderr (overrides `log_file`)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert the configured organisms into one output document
    Convert(cmd::convert::ConvertArgs),
    /// Download the configured tables into `data_path`
    Fetch(cmd::fetch::FetchArgs),
    /// Show current configuration
    Config,
}

/// Warn-only logging while progress bars own the terminal.
fn log_quiet(is_tty: bool, has_log_file: bool, debug: bool) -> bool {
    is_tty && !has_log_file && !debug
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_file(&cli.config)?;

    // Progress context (TTY auto-detect)
    let progress = Arc::new(hintld_core::ProgressContext::new());

    // Logging:
    //   TTY:     quiet (warn) unless --debug, spinners show activity
    //   non-TTY: info unless --debug, logs are the only progress indicator
    //   file:    info unless --debug
    let log_file = cli.log_file.as_ref().or(config.log_file.as_ref());
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = log_quiet(is_tty, log_file.is_some(), cli.debug);
    hintld_core::init_logging(quiet, cli.debug, multi, log_file.map(PathBuf::as_path))?;
    log::debug!("Loaded config from {}", cli.config.display());

    let result = match cli.command.unwrap_or(Command::Convert(Default::default())) {
        Command::Convert(args) => cmd::convert::run(args, &config, &progress),
        Command::Fetch(args) => cmd::fetch::run(args, &config, &progress),
        Command::Config => cmd::show_config::run(&config, &cli.config),
    };
    if let Err(e) = &result {
        log::error!("{e:#}");
    }
    result
}
