//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use newtab_store::persistence::remove_file;
use newtab_store::{Settings, SettingsStore};
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show the settings file path.
    Path,

    /// Set a value, e.g. `batch_size 8` or `providers google,direct`.
    Set {
        /// Setting name.
        key: String,
        /// New value.
        value: String,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
///
/// `store` holds the settings loaded at startup, or defaults if the file was
/// missing or invalid.
pub async fn run(args: &ConfigArgs, cli: &Cli, store: &SettingsStore) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli, store).await,
        ConfigAction::Path => show_path(cli),
        ConfigAction::Set { key, value } => set_value(key, value, cli, store).await,
        ConfigAction::Reset => reset_config(cli).await,
    }
}

async fn show_config(cli: &Cli, store: &SettingsStore) -> Result<()> {
    let settings = store.get().await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("newtab Configuration");
            println!("{}", "─".repeat(40));
            println!("{}", formatter.format_settings(&settings));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

fn show_path(cli: &Cli) -> Result<()> {
    let settings_path = cli.settings_path();

    match cli.format {
        OutputFormat::Text => println!("{}", settings_path.display()),
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "settings_file": settings_path.display().to_string(),
                "exists": settings_path.exists(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_value(key: &str, value: &str, cli: &Cli, store: &SettingsStore) -> Result<()> {
    store.set_value(key, value).await.map_err(|e| {
        if matches!(e, newtab_store::StoreError::UnknownKey(_)) {
            anyhow::Error::new(e).context(format!(
                "Unknown setting '{key}' (known: {})",
                Settings::KEYS.join(", ")
            ))
        } else {
            e.into()
        }
    })?;
    store.save().await?;

    if !cli.quiet {
        println!("{key} = {value}");
    }
    Ok(())
}

async fn reset_config(cli: &Cli) -> Result<()> {
    let path = cli.settings_path();

    if remove_file(&path).await? {
        info!(path = %path.display(), "Settings reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }

    Ok(())
}
