//! Catalog-Harvest main entry point
//!
//! This is the command-line interface for the Catalog-Harvest catalog extractor.

use anyhow::Context;
use catalog_harvest::config::{load_config, validate, Config};
use catalog_harvest::output::{print_statistics, HarvestStatistics};
use catalog_harvest::run_harvest;
use catalog_harvest::url::listing_page_url;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog-Harvest: a paginated storefront catalog extractor
///
/// Catalog-Harvest walks the listing pages of a product collection, enriches
/// every product from its detail page, and writes the results as CSV.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A paginated storefront catalog extractor", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Collection listing URL to start from
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Number of records to collect
    #[arg(short, long)]
    target: Option<usize>,

    /// CSV file to write
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Detail pages fetched at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching anything
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.catalog.base_url = base_url.clone();
        }
        if let Some(target) = self.target {
            config.catalog.target = target;
        }
        if let Some(output) = &self.output {
            config.output.csv_path = output.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.fetcher.detail_concurrency = concurrency;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_harvest(&config, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_harvest=info,warn"),
            1 => EnvFilter::new("catalog_harvest=debug,info"),
            2 => EnvFilter::new("catalog_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Catalog-Harvest Dry Run ===\n");

    let base_url = config.base_url()?;
    let origin = config.origin()?;

    println!("Catalog:");
    println!("  Base URL: {}", base_url);
    println!("  Origin: {}", origin);
    println!("  Target: {} records", config.catalog.target);
    match config.catalog.max_pages {
        Some(max_pages) => println!("  Max pages: {}", max_pages),
        None => println!("  Max pages: unbounded"),
    }
    println!(
        "  Stop on repeated listing: {}",
        config.catalog.stop_on_repeated_listing
    );

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Wait bound: {}s", config.fetcher.wait_bound_secs);
    println!("  Settle delay: {}ms", config.fetcher.settle_millis);
    println!(
        "  Retries: {} (backoff base {}ms)",
        config.fetcher.max_retries, config.fetcher.backoff_base_millis
    );
    println!("  Detail concurrency: {}", config.fetcher.detail_concurrency);

    println!("\nLandmarks:");
    println!("  Listing: {}", config.selectors.listing.item);
    println!("  Detail: {}", config.selectors.detail.ready);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
    println!("✓ Would start with {}", listing_page_url(&base_url, 1));

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: &Config, quiet: bool) -> anyhow::Result<()> {
    let report = run_harvest(config).await.context("Harvest failed")?;

    if report.is_short() {
        tracing::warn!(
            "Collected {} of {} records ({})",
            report.records.len(),
            report.target,
            report.stop_reason
        );
    }

    if !quiet {
        println!();
        print_statistics(&HarvestStatistics::from_report(&report));
    }

    Ok(())
}
