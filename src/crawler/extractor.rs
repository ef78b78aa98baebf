//! Record extraction
//!
//! Walks the listing containers on a parsed page and emits one record per
//! unit row, all rows sharing the container-level station fields. A failure
//! inside one container is contained there: it is logged and contributes
//! zero records, leaving the rest of the page intact.

use crate::config::SelectorConfig;
use crate::record::{ListingRecord, UNKNOWN_STATION};
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Compiled CSS selectors for the upstream listing markup
///
/// Compiled once per run from [`SelectorConfig`]; a selector that does not
/// compile is a configuration error, not a runtime one.
pub struct SelectorSet {
    pub pagination: Selector,
    pub container: Selector,
    pub station_block: Selector,
    pub station_text: Selector,
    pub unit_block: Selector,
    pub unit_row: Selector,
}

impl SelectorSet {
    /// Compiles the configured selector strings
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            pagination: parse_selector("pagination", &config.pagination)?,
            container: parse_selector("container", &config.container)?,
            station_block: parse_selector("station-block", &config.station_block)?,
            station_text: parse_selector("station-text", &config.station_text)?,
            unit_block: parse_selector("unit-block", &config.unit_block)?,
            unit_row: parse_selector("unit-row", &config.unit_row)?,
        })
    }
}

fn parse_selector(name: &str, value: &str) -> Result<Selector, ConfigError> {
    Selector::parse(value)
        .map_err(|e| ConfigError::InvalidSelector(format!("{} '{}': {:?}", name, value, e)))
}

/// Errors contained at the single-container boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The container has no unit block; without it there is nothing to emit
    #[error("container has no unit block")]
    MissingUnitBlock,
}

/// Extracts every record on a page
///
/// Containers are visited in document order, so extracting the same
/// document twice yields the same records. A container that fails to
/// extract is logged with its index and skipped without affecting its
/// neighbors; a single malformed listing must not lose the rest of the
/// page's data.
pub fn extract_records(
    document: &Html,
    selectors: &SelectorSet,
    scraped_at: &str,
) -> Vec<ListingRecord> {
    let mut records = Vec::new();

    for (index, container) in document.select(&selectors.container).enumerate() {
        match extract_container(&container, selectors, scraped_at) {
            Ok(mut found) => records.append(&mut found),
            Err(err) => {
                tracing::warn!(container = index, error = %err, "skipping listing container");
            }
        }
    }

    records
}

/// Extracts the records of a single listing container
///
/// The two station fields are read once per container; a missing station
/// text node degrades to [`UNKNOWN_STATION`] rather than failing. One
/// record is emitted per unit row; a unit block with no rows yields an
/// empty batch.
pub fn extract_container(
    container: &ElementRef<'_>,
    selectors: &SelectorSet,
    scraped_at: &str,
) -> Result<Vec<ListingRecord>, ExtractError> {
    let stations: Vec<String> = container
        .select(&selectors.station_block)
        .next()
        .map(|block| {
            block
                .select(&selectors.station_text)
                .map(|node| node.text().collect::<String>().trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    let primary = stations
        .first()
        .cloned()
        .unwrap_or_else(|| UNKNOWN_STATION.to_string());
    let secondary = stations
        .get(1)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_STATION.to_string());

    let unit_block = container
        .select(&selectors.unit_block)
        .next()
        .ok_or(ExtractError::MissingUnitBlock)?;

    Ok(unit_block
        .select(&selectors.unit_row)
        .map(|_| ListingRecord::new(scraped_at, &primary, &secondary))
        .collect())
}
