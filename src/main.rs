//! Price Tracker main entry point
//!
//! This is the command-line interface for the Price Tracker service.

use anyhow::Context;
use clap::Parser;
use price_tracker::api::{self, AppState};
use price_tracker::config::{load_config_with_hash, Config};
use price_tracker::history::{load_statistics, print_statistics};
use price_tracker::scrape::Scraper;
use price_tracker::storage::open_storage;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Number of products listed by `--stats`
const STATS_PRODUCT_LIMIT: u32 = 20;

/// Price Tracker: marketplace price history service
///
/// Serves a JSON API for scraping marketplace product pages and recording
/// their prices over time.
#[derive(Parser, Debug)]
#[command(name = "price-tracker")]
#[command(version = "1.0.0")]
#[command(about = "Marketplace price history service", long_about = None)]
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

    /// Validate config and print the effective settings without serving
    #[arg(long, conflicts_with_all = ["stats", "scrape"])]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with_all = ["dry_run", "scrape"])]
    stats: bool,

    /// Scrape a single product URL, print the result as JSON and exit
    #[arg(long, value_name = "URL", conflicts_with_all = ["dry_run", "stats"])]
    scrape: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if let Some(url) = cli.scrape.as_deref() {
        handle_scrape(&config, url).await?;
    } else {
        handle_serve(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("price_tracker=info,tower_http=info,warn"),
            1 => EnvFilter::new("price_tracker=debug,tower_http=debug,info"),
            2 => EnvFilter::new("price_tracker=trace,debug"),
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

/// Handles the --dry-run mode: prints the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Price Tracker Dry Run ===\n");

    println!("Server:");
    println!("  Bind address: {}", config.server.bind_address);
    println!("  Static directory: {}", config.server.static_dir);

    println!("\nFetcher:");
    println!("  Timeout: {}ms", config.fetcher.timeout_ms);
    println!("  User-Agent: {}", config.fetcher.user_agent);
    println!("  Accept: {}", config.fetcher.accept);
    println!("  Accept-Language: {}", config.fetcher.accept_language);

    println!("\nStorage:");
    println!("  Database: {}", config.storage.database_path);

    println!("\nHistory:");
    println!("  Records per product: {}", config.history.default_limit);

    println!("\nMarketplace:");
    println!("  Host: {}", config.marketplace.host);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.storage.database_path);

    let storage = open_storage(Path::new(&config.storage.database_path))?;
    let stats = load_statistics(&storage, STATS_PRODUCT_LIMIT)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --scrape mode: one scrape, result printed as JSON
async fn handle_scrape(config: &Config, url: &str) -> anyhow::Result<()> {
    let scraper = Scraper::new(&config.fetcher).context("failed to build HTTP client")?;
    let result = scraper.scrape(url).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Handles the default mode: serves the API
async fn handle_serve(config: Config) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.storage.database_path))?;
    tracing::info!("Database opened: {}", config.storage.database_path);

    let scraper = Scraper::new(&config.fetcher).context("failed to build HTTP client")?;

    let state = AppState::new(scraper, storage, config);
    if let Err(e) = api::serve(state).await {
        tracing::error!("Server failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
