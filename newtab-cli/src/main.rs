// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! newtab CLI - favicon resolution from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Resolve one or more pages
//! newtab resolve https://github.com https://docs.rs --size 64
//!
//! # Resolve a bookmark list in paced groups
//! newtab batch --file bookmarks.txt --stats
//!
//! # See every provider attempt for a site
//! newtab check https://example.com --all
//!
//! # JSON output
//! newtab --format json --pretty resolve https://example.com
//!
//! # Settings
//! newtab config set batch_size 8
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use newtab_store::{LogLevel, SettingsStore, StoreError, default_settings_path};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{batch, check, config, providers, resolve};

// ============================================================================
// CLI Definition
// ============================================================================

/// newtab CLI - favicon resolution for the new-tab dashboard.
#[derive(Parser)]
#[command(name = "newtab")]
#[command(about = "Favicon resolution and caching for the new-tab dashboard")]
#[command(long_about = r"
newtab finds a displayable icon for any page URL.

Providers are tried in order until one answers:
  1. Google S2 favicon service (google)
  2. DuckDuckGo icon service (duckduckgo)
  3. The site's own /favicon.ico (direct)
  4. Google S2 at 16px (google_small)

Sites where every provider fails get a built-in globe icon.

Examples:
  newtab resolve https://github.com        # One URL
  newtab batch --file bookmarks.txt        # Many URLs, paced
  newtab check https://example.com --all   # Diagnose providers
  newtab --format json providers           # JSON output
")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Settings file to use instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Returns the settings file path in effect.
    pub fn settings_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_settings_path)
    }
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve icons for one or more page URLs.
    #[command(visible_alias = "r")]
    Resolve(resolve::ResolveArgs),

    /// Resolve many URLs in paced groups.
    #[command(visible_alias = "b")]
    Batch(batch::BatchArgs),

    /// Show every provider attempt for one URL, bypassing the cache.
    Check(check::CheckArgs),

    /// List icon providers in priority order.
    #[command(visible_alias = "p")]
    Providers,

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// At least one input URL could not be parsed.
    InvalidInput = 2,
    /// Bad configuration value or key.
    ConfigError = 3,
}

impl ExitCode {
    fn for_error(error: &anyhow::Error) -> Self {
        if let Some(store) = error.downcast_ref::<StoreError>() {
            if store.is_config_error() {
                return ExitCode::ConfigError;
            }
        }
        if error.downcast_ref::<resolve::InvalidInput>().is_some() {
            return ExitCode::InvalidInput;
        }
        ExitCode::Error
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("newtab=debug")
    } else {
        EnvFilter::new(format!("newtab={level}"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli.settings_path();
    let (store, load_error) = match SettingsStore::load(path.clone()).await {
        Ok(store) => (store, None),
        Err(e) => (SettingsStore::new(path), Some(e)),
    };

    let settings = store.get().await;
    setup_logging(cli.verbose, cli.quiet, settings.log_level);

    if let Some(e) = load_error {
        warn!(path = %store.path().display(), error = %e, "Invalid settings file, using defaults");
    }

    let result = match &cli.command {
        Commands::Resolve(args) => resolve::run(args, &cli, &settings).await,
        Commands::Batch(args) => batch::run(args, &cli, &settings).await,
        Commands::Check(args) => check::run(args, &cli, &settings).await,
        Commands::Providers => providers::run(&cli, &settings),
        Commands::Config(args) => config::run(args, &cli, &store).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    std::process::exit(ExitCode::Success as i32);
}
