//! Quote-Harvest main entry point
//!
//! This is the command-line interface for the Quote-Harvest scraper.

use clap::Parser;
use quote_harvest::config::{load_config_with_hash, Config};
use quote_harvest::crawler::{page_urls, run_harvest};
use quote_harvest::output::{compute_statistics, load_records, print_statistics};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Quote-Harvest: a paginated quotation scraper
///
/// Quote-Harvest walks the numbered pages of a quotation listing, extracts
/// text, author, title, tags and likes from every quote, and writes the
/// collection to a single JSON file.
#[derive(Parser, Debug)]
#[command(name = "quote-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A paginated quotation scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show which pages would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics for the existing output file and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_harvest(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quote_harvest=info,warn"),
            1 => EnvFilter::new("quote_harvest=debug,info"),
            2 => EnvFilter::new("quote_harvest=trace,debug"),
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

/// Handles the --dry-run mode: shows settings and the pages that would be crawled
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let listing_url = config.listing_url()?;

    println!("=== Quote-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Listing: {}", listing_url);
    println!("  Expected title: {}", config.site.expected_title);

    println!("\nCrawler Configuration:");
    println!("  Page count: {}", config.crawler.page_count);
    println!(
        "  Navigation timeout: {}ms",
        config.crawler.navigation_timeout_ms
    );
    println!("  Field timeout: {}ms", config.crawler.field_timeout_ms);
    println!("  Max retries: {}", config.crawler.max_retries);
    println!(
        "  Max retry delay: {}ms",
        config.crawler.max_retry_delay_ms
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  {}", config.output.output_path);

    let urls = page_urls(&listing_url, config.crawler.page_count);
    println!("\nPages ({}):", urls.len());
    for url in &urls {
        println!("  - {}", url);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --stats mode: summarizes the existing output file
fn handle_stats(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(&config.output.output_path);
    println!("Output: {}\n", path.display());

    let records = load_records(path)?;
    print_statistics(&compute_statistics(&records));

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Harvesting {} pages from {}",
        config.crawler.page_count,
        config.site.base_origin
    );

    match run_harvest(config).await {
        Ok(stats) => {
            tracing::info!(
                "Harvest completed successfully ({} quotes, {} authors)",
                stats.total_records,
                stats.distinct_authors
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
