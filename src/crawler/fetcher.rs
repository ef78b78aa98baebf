//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building the HTTP client with a browser user agent and fixed timeout
//! - GET requests for single listing pages
//! - Retry with exponential backoff for transient failures
//! - Error classification into transient and fatal

use crate::config::{CrawlConfig, HttpConfig};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors produced while fetching one page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request exceeded the per-call timeout
    #[error("request timeout for {url}")]
    Timeout { url: String },

    /// The connection could not be established or was dropped
    #[error("transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    /// The server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The response body could not be read
    #[error("failed to read body for {url}: {source}")]
    Body { url: String, source: reqwest::Error },

    /// The request URL itself is malformed; retrying cannot help
    #[error("invalid request URL {url}: {source}")]
    InvalidUrl { url: String, source: reqwest::Error },
}

impl FetchError {
    /// Whether retrying the same request can possibly succeed
    pub fn is_transient(&self) -> bool {
        !matches!(self, FetchError::InvalidUrl { .. })
    }
}

/// Retry behavior for transient fetch failures
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Delay before the first retry; doubles on each further retry
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    /// Builds the policy from the crawl configuration
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
        }
    }

    /// Delay slept after the given failed attempt (1-based)
    pub fn delay_after(&self, failed_attempt: u32) -> Duration {
        self.initial_backoff * 2u32.saturating_pow(failed_attempt.saturating_sub(1))
    }

    /// The full backoff schedule, one delay per attempt
    pub fn backoff_schedule(&self) -> Vec<Duration> {
        (1..=self.max_attempts).map(|a| self.delay_after(a)).collect()
    }
}

/// Builds the HTTP client shared by the whole run
///
/// The client carries a realistic desktop browser user agent and a fixed
/// per-request timeout; the timeout is not affected by retry delays.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_millis(config.timeout_ms))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body, retrying transient failures with backoff
///
/// Up to `retry.max_attempts` attempts are made; after a transient failure
/// the call sleeps for the next backoff delay before trying again. A fatal
/// error (malformed URL) is returned immediately. Every failed attempt is
/// logged with its attempt count and reason. After the last attempt the
/// last error is returned and the caller decides whether the page is
/// skippable.
pub async fn fetch_page(
    client: &Client,
    url: &str,
    retry: &RetryPolicy,
) -> Result<String, FetchError> {
    let mut attempt = 1;

    loop {
        match fetch_once(client, url).await {
            Ok(body) => return Ok(body),
            Err(err) => {
                tracing::warn!(
                    url,
                    attempt,
                    max_attempts = retry.max_attempts,
                    error = %err,
                    "page fetch attempt failed"
                );

                if !err.is_transient() || attempt >= retry.max_attempts {
                    return Err(err);
                }

                tokio::time::sleep(retry.delay_after(attempt)).await;
                attempt += 1;
            }
        }
    }
}

/// One GET round trip without retries
async fn fetch_once(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_send_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| FetchError::Body {
        url: url.to_string(),
        source: e,
    })
}

fn classify_send_error(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if err.is_builder() {
        FetchError::InvalidUrl {
            url: url.to_string(),
            source: err,
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: err,
        }
    }
}
