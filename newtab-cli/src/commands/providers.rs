//! Providers command - list icon providers.

use anyhow::Result;
use newtab_core::ProviderKind;
use newtab_providers::ProviderRegistry;
use newtab_store::Settings;
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the providers command.
pub fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    info!("Listing providers");

    let providers = ProviderRegistry::all();
    let enabled_position = |id: ProviderKind| settings.providers.iter().position(|k| *k == id);

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_providers_header());
            println!("{}", "─".repeat(70));

            for (i, desc) in providers.iter().enumerate() {
                println!("{}", formatter.format_provider_line(i, desc, enabled_position(desc.id)));
            }

            println!();
            println!(
                "Total: {} providers ({} enabled)",
                providers.len(),
                settings.providers.len()
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = formatter.format_providers(providers, |desc| enabled_position(desc.id))?;
            println!("{output}");
        }
    }

    Ok(())
}
