//! Batch command - many URLs in paced groups.

use anyhow::{Context, Result};
use clap::Args;
use newtab_store::{FaviconResolver, Settings};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::output::{IconReport, JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Page URLs to resolve.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Read URLs from a file, one per line (`#` starts a comment).
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Icon size in pixels (defaults to the configured size).
    #[arg(long, short)]
    pub size: Option<u32>,

    /// Print cache statistics afterwards.
    #[arg(long)]
    pub stats: bool,
}

/// Runs the batch command.
pub async fn run(args: &BatchArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let mut urls = args.urls.clone();
    if let Some(path) = &args.file {
        urls.extend(read_url_file(path).await?);
    }
    if urls.is_empty() {
        anyhow::bail!("No URLs given. Pass URLs as arguments or use --file");
    }

    let resolver = FaviconResolver::from_settings(settings)?;
    let size = args.size.unwrap_or(settings.icon_size);
    info!(urls = urls.len(), batch_size = resolver.options().batch_size, "Starting batch");

    let outcome = resolver.resolve_batch_report(&urls, size).await;

    // One row per distinct input, in input order.
    let mut seen = HashSet::new();
    let reports: Vec<IconReport> = urls
        .iter()
        .filter(|url| seen.insert(url.as_str()))
        .filter_map(|url| outcome.icons.get(url).map(|icon| IconReport::new(url, icon)))
        .collect();

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
            if !cli.quiet {
                println!();
                println!("{}", formatter.format_batch_summary(&outcome, urls.len()));
            }
            if let Some(stats) = &stats {
                println!("{}", formatter.format_stats(stats));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_batch(&reports, &outcome, stats)?);
        }
    }

    Ok(())
}

/// Reads URLs from a file, skipping blank lines and comments.
async fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let urls = parse_url_list(&content);
    debug!(path = %path.display(), count = urls.len(), "Read URL file");
    Ok(urls)
}

fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
