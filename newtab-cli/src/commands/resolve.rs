//! Resolve command - icons for a handful of URLs.

use anyhow::Result;
use clap::Args;
use newtab_core::CoreError;
use newtab_store::{FaviconResolver, Settings};
use std::fmt;
use tracing::info;

use crate::output::{IconReport, JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the resolve command.
#[derive(Args)]
pub struct ResolveArgs {
    /// Page URLs to resolve.
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    /// Icon size in pixels (defaults to the configured size).
    #[arg(long, short)]
    pub size: Option<u32>,

    /// Print cache statistics afterwards.
    #[arg(long)]
    pub stats: bool,
}

/// Raised after output when some inputs were rejected.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InvalidInput {
    /// Inputs with no usable hostname.
    pub bad_urls: usize,
    /// Inputs rejected because of the icon size.
    pub bad_sizes: usize,
}

impl InvalidInput {
    fn record(&mut self, error: &CoreError) {
        match error {
            CoreError::InvalidIconSize(_) => self.bad_sizes += 1,
            _ => self.bad_urls += 1,
        }
    }

    fn is_empty(&self) -> bool {
        self.bad_urls == 0 && self.bad_sizes == 0
    }
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reasons = Vec::new();
        if self.bad_urls > 0 {
            reasons.push(format!("{} not a valid page URL", self.bad_urls));
        }
        if self.bad_sizes > 0 {
            reasons.push(format!("{} with an invalid icon size", self.bad_sizes));
        }
        write!(
            f,
            "{} input(s) were rejected ({})",
            self.bad_urls + self.bad_sizes,
            reasons.join(", ")
        )
    }
}

impl std::error::Error for InvalidInput {}

/// Runs the resolve command.
pub async fn run(args: &ResolveArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let resolver = FaviconResolver::from_settings(settings)?;
    let size = args.size.unwrap_or(settings.icon_size);
    info!(urls = args.urls.len(), size, "Resolving");

    let mut reports = Vec::with_capacity(args.urls.len());
    let mut invalid = InvalidInput::default();
    for url in &args.urls {
        let report = match resolver.try_resolve(url, size).await {
            Ok(icon) => IconReport::new(url, icon),
            Err(e) => {
                invalid.record(&e);
                IconReport::rejected(url, e)
            }
        };
        reports.push(report);
    }

    let stats = if args.stats {
        Some(resolver.cache_stats().await)
    } else {
        None
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            for report in &reports {
                println!("{}", formatter.format_icon(report));
            }
            if let Some(stats) = &stats {
                println!();
                println!("{}", formatter.format_stats(stats));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_resolve(&reports, stats)?);
        }
    }

    if !invalid.is_empty() {
        return Err(invalid.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_counts_reasons_separately() {
        let mut invalid = InvalidInput::default();
        invalid.record(&CoreError::InvalidIconSize(0));
        invalid.record(&CoreError::InvalidIconSize(0));

        assert_eq!(
            invalid.to_string(),
            "2 input(s) were rejected (2 with an invalid icon size)"
        );

        invalid.record(&CoreError::MissingHost("mailto:a@b.c".to_string()));
        assert_eq!(
            invalid,
            InvalidInput {
                bad_urls: 1,
                bad_sizes: 2
            }
        );
        assert_eq!(
            invalid.to_string(),
            "3 input(s) were rejected (1 not a valid page URL, 2 with an invalid icon size)"
        );
    }

    #[test]
    fn test_invalid_input_empty() {
        assert!(InvalidInput::default().is_empty());
    }
}
