//! Check command - show every provider attempt for one URL.

use anyhow::Result;
use clap::Args;
use newtab_core::{Domain, IconSize};
use newtab_fetch::FetchContext;
use newtab_providers::ProviderRegistry;
use newtab_store::Settings;
use std::time::Instant;
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Page URL (or bare hostname) to check.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Icon size in pixels (defaults to the configured size).
    #[arg(long, short)]
    pub size: Option<u32>,

    /// Probe every provider instead of stopping at the first success.
    #[arg(long)]
    pub all: bool,
}

/// Runs the check command.
pub async fn run(args: &CheckArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let domain = parse_target(&args.url)?;
    let size = IconSize::new(args.size.unwrap_or(settings.icon_size))?;

    let ctx = FetchContext::builder()
        .settings(settings.fetch_settings())
        .build()?;
    let pipeline = ProviderRegistry::build_pipeline(&settings.providers);
    info!(domain = %domain, size = size.pixels(), all = args.all, "Checking providers");

    let start = Instant::now();
    let (attempts, icon) = if args.all {
        let attempts = pipeline.survey(&ctx, &domain, size).await;
        let icon = attempts.iter().find(|a| a.success).map(|a| a.url.clone());
        (attempts, icon)
    } else {
        let outcome = pipeline.execute(&ctx, &domain, size).await;
        let icon = outcome.icon_url().map(str::to_string);
        (outcome.attempts, icon)
    };
    let total = start.elapsed();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_check_header(domain.as_str(), size.pixels(), args.all));
            println!();
            for (i, attempt) in attempts.iter().enumerate() {
                println!("{}", formatter.format_attempt(i, attempt));
            }
            println!();
            println!("{}", formatter.format_check_result(icon.as_deref(), total));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = formatter.format_check(
                domain.as_str(),
                size.pixels(),
                args.all,
                icon.as_deref(),
                &attempts,
                total,
            )?;
            println!("{output}");
        }
    }

    Ok(())
}

/// Accepts a full page URL or a bare hostname.
fn parse_target(input: &str) -> Result<Domain> {
    let input = input.trim();
    if input.contains("://") {
        return Ok(Domain::from_page_url(input)?);
    }
    Ok(Domain::from_page_url(&format!("https://{input}"))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("https://GitHub.com/x").unwrap().as_str(), "github.com");
        assert_eq!(parse_target("docs.rs").unwrap().as_str(), "docs.rs");
        assert!(parse_target("https://").is_err());
    }
}
