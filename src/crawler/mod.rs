//! Crawler module for listing page fetching and processing
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with retry and exponential backoff
//! - Listing page parsing and the pagination hint
//! - Record extraction with per-container failure containment
//! - Overall crawl orchestration

mod extractor;
mod fetcher;
mod orchestrator;
mod parser;

pub use extractor::{extract_container, extract_records, ExtractError, SelectorSet};
pub use fetcher::{build_http_client, fetch_page, FetchError, RetryPolicy};
pub use orchestrator::{CrawlReport, CrawlState, Orchestrator};
pub use parser::{extract_max_page_hint, parse_listing_page, ParseError};

use crate::config::Config;
use crate::output::CsvAppender;
use crate::storage::SqliteStore;
use crate::ScrapeError;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Runs a complete scrape with the sinks named in the configuration
///
/// This is the main entry point for a run. It will:
/// 1. Open the SQLite store (creating the schema if absent)
/// 2. Attach the CSV appender
/// 3. Discover the page bound from page 1
/// 4. Walk every page, writing each batch to both sinks
///
/// The `stop` flag is checked between pages; setting it drains the run.
pub async fn crawl(config: Config, stop: Arc<AtomicBool>) -> Result<CrawlReport, ScrapeError> {
    let store = SqliteStore::open(Path::new(&config.output.database_path))?;
    let appender = CsvAppender::new(Path::new(&config.output.csv_path));

    let mut orchestrator = Orchestrator::new(config, store, appender, stop)?;
    orchestrator.run().await
}
