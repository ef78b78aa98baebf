//! Crawl orchestration
//!
//! The orchestrator owns the page loop: it discovers the page bound from
//! page 1, paces every request, funnels each page through fetch → parse →
//! extract, and hands each page's batch to both sinks. A failure on any
//! page after the first is logged and skipped; only a failed fetch of
//! page 1 aborts the run, because without it there is no page bound to
//! drive the loop.

use crate::config::Config;
use crate::crawler::extractor::{extract_records, SelectorSet};
use crate::crawler::fetcher::{build_http_client, fetch_page, RetryPolicy};
use crate::crawler::parser::{extract_max_page_hint, parse_listing_page};
use crate::output::RecordAppender;
use crate::record::TIMESTAMP_FORMAT;
use crate::storage::RecordStore;
use crate::ScrapeError;
use chrono::Local;
use reqwest::Client;
use scraper::Html;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Mutable progress of a single crawl run
///
/// Owned by the orchestrator and threaded through the loop; nothing else
/// mutates it. `max_page` is set once from page 1's hint and never revised,
/// even if later pages would suggest a different value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlState {
    /// The page currently being processed (1-based)
    pub current_page: u32,

    /// Upper page bound, fixed after page 1
    pub max_page: u32,

    /// Records accepted by the relational sink so far
    pub total_records: u64,
}

/// Outcome summary returned by [`Orchestrator::run`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Pages that made it through extraction and on to the sinks
    pub pages_processed: u32,

    /// Pages skipped after a fetch or parse failure
    pub pages_failed: u32,

    /// Records accepted by the relational sink
    pub records_written: u64,
}

/// Drives one scrape run over both sinks
pub struct Orchestrator<S, A> {
    config: Config,
    selectors: SelectorSet,
    client: Client,
    retry: RetryPolicy,
    store: S,
    appender: A,
    stop: Arc<AtomicBool>,
}

impl<S: RecordStore, A: RecordAppender> Orchestrator<S, A> {
    /// Creates an orchestrator with injected sinks
    ///
    /// The sinks are owned for the whole run and released when the
    /// orchestrator drops, on every exit path.
    pub fn new(
        config: Config,
        store: S,
        appender: A,
        stop: Arc<AtomicBool>,
    ) -> Result<Self, ScrapeError> {
        let selectors = SelectorSet::compile(&config.selectors)?;
        let client = build_http_client(&config.http)?;
        let retry = RetryPolicy::from_config(&config.crawl);

        Ok(Self {
            config,
            selectors,
            client,
            retry,
            store,
            appender,
            stop,
        })
    }

    /// Runs the crawl from discovery to drain
    ///
    /// Page 1 is fetched once: its pagination hint fixes the page bound and
    /// its records are processed as the first loop step, so a run over a
    /// bound of N issues exactly N fetches. Every fetch, including the
    /// first, is preceded by the pacing sleep.
    pub async fn run(&mut self) -> Result<CrawlReport, ScrapeError> {
        let pacing = Duration::from_millis(self.config.crawl.pacing_ms);
        let mut report = CrawlReport::default();
        let mut state = CrawlState {
            current_page: 1,
            max_page: self.config.crawl.fallback_max_page,
            total_records: 0,
        };

        tokio::time::sleep(pacing).await;
        let first_url = self.page_url(1);
        let body = match fetch_page(&self.client, &first_url, &self.retry).await {
            Ok(body) => body,
            Err(source) => {
                tracing::error!(error = %source, "page 1 could not be fetched, aborting run");
                return Err(ScrapeError::Discovery { source });
            }
        };

        match parse_listing_page(&body) {
            Ok(document) => {
                state.max_page = extract_max_page_hint(
                    &document,
                    &self.selectors,
                    self.config.crawl.fallback_max_page,
                );
                tracing::info!(max_page = state.max_page, "page bound established");
                self.process_document(1, &document, &mut state, &mut report);
            }
            Err(err) => {
                // The bound stays at the fallback; page 1 contributes nothing.
                tracing::warn!(page = 1, error = %err, "page could not be parsed, skipping");
                report.pages_failed += 1;
            }
        }

        for page in 2..=state.max_page {
            if self.stop.load(Ordering::Relaxed) {
                tracing::info!(page, "stop requested, draining");
                break;
            }

            state.current_page = page;
            tokio::time::sleep(pacing).await;
            self.process_page(page, &mut state, &mut report).await;
        }

        tracing::info!(
            pages_processed = report.pages_processed,
            pages_failed = report.pages_failed,
            records_written = report.records_written,
            "crawl finished"
        );

        Ok(report)
    }

    /// Fetches, parses, and processes one page, absorbing its failures
    async fn process_page(&mut self, page: u32, state: &mut CrawlState, report: &mut CrawlReport) {
        let url = self.page_url(page);

        let body = match fetch_page(&self.client, &url, &self.retry).await {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(page, error = %err, "page fetch failed, skipping");
                report.pages_failed += 1;
                return;
            }
        };

        match parse_listing_page(&body) {
            Ok(document) => self.process_document(page, &document, state, report),
            Err(err) => {
                tracing::warn!(page, error = %err, "page could not be parsed, skipping");
                report.pages_failed += 1;
            }
        }
    }

    /// Extracts one page's records and writes them to both sinks
    ///
    /// The sinks are independent: a failure in one is logged and does not
    /// block or roll back the other, and neither stops the run.
    fn process_document(
        &mut self,
        page: u32,
        document: &Html,
        state: &mut CrawlState,
        report: &mut CrawlReport,
    ) {
        let scraped_at = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let records = extract_records(document, &self.selectors, &scraped_at);

        match self.store.write_batch(&records) {
            Ok(written) => state.total_records += written as u64,
            Err(err) => {
                tracing::error!(page, error = %err, "database write failed, continuing");
            }
        }

        if let Err(err) = self.appender.append_batch(&records) {
            tracing::error!(page, error = %err, "csv append failed, continuing");
        }

        report.pages_processed += 1;
        report.records_written = state.total_records;

        let percent = page as f64 / state.max_page as f64 * 100.0;
        println!(
            "page {}/{} complete ({:.2}%)",
            page, state.max_page, percent
        );
        tracing::info!(
            page,
            max_page = state.max_page,
            records = records.len(),
            "page processed"
        );
    }

    /// Interpolates a page index into the configured URL template
    fn page_url(&self, page: u32) -> String {
        self.config.crawl.page_url.replace("{page}", &page.to_string())
    }
}
