//! Ekimae main entry point
//!
//! This is the command-line interface for the ekimae listing scraper.

use anyhow::Context;
use clap::Parser;
use ekimae::config::load_config_with_hash;
use ekimae::crawler::crawl;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Ekimae: a paced rental-listing scraper
///
/// Ekimae walks a paginated listing site one page at a time, respecting a
/// fixed pacing interval, and records the nearest-station fields of every
/// listed unit in a SQLite database and an append-only CSV file.
#[derive(Parser, Debug)]
#[command(name = "ekimae")]
#[command(version = "1.0.0")]
#[command(about = "A paced rental-listing scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show record counts from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load and validate configuration
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    setup_logging(cli.verbose, cli.quiet, &config.output.log_path)?;
    tracing::info!(
        config = %cli.config.display(),
        hash = %config_hash,
        "configuration loaded"
    );

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    if cli.stats {
        return handle_stats(&config);
    }

    // A Ctrl-C flips the stop flag; the orchestrator drains between pages.
    let stop = Arc::new(AtomicBool::new(false));
    let stop_signal = Arc::clone(&stop);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, stopping after the current page");
            stop_signal.store(true, Ordering::Relaxed);
        }
    });

    let report = crawl(config, stop).await?;
    println!(
        "done: {} pages processed, {} failed, {} records written",
        report.pages_processed, report.pages_failed, report.records_written
    );

    Ok(())
}

/// Sets up the tracing subscriber: a console layer plus a persistent file
/// layer, so operational logs survive independently of the progress output
fn setup_logging(verbose: u8, quiet: bool, log_path: &str) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ekimae=info,warn"),
            1 => EnvFilter::new("ekimae=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("failed to open log file {}", log_path))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .init();

    Ok(())
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &ekimae::config::Config) {
    println!("=== Ekimae Dry Run ===\n");

    println!("Crawl:");
    println!("  Page URL template: {}", config.crawl.page_url);
    println!("  Pacing: {}ms", config.crawl.pacing_ms);
    println!("  Fetch attempts: {}", config.crawl.max_attempts);
    println!("  Initial backoff: {}ms", config.crawl.initial_backoff_ms);
    println!("  Fallback page bound: {}", config.crawl.fallback_max_page);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}ms", config.http.timeout_ms);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  CSV: {}", config.output.csv_path);
    println!("  Log: {}", config.output.log_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows record counts from the database
fn handle_stats(config: &ekimae::config::Config) -> anyhow::Result<()> {
    use ekimae::storage::{RecordStore, SqliteStore};

    let store = SqliteStore::open(Path::new(&config.output.database_path))?;

    println!("Database: {}", config.output.database_path);
    println!("Records: {}", store.count_records()?);

    Ok(())
}
