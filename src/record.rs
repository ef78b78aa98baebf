//! The unit of scraper output.

use serde::Serialize;

/// Timestamp format shared by both sinks, e.g. `2026-08-05 14:03:21`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sentinel recorded when a station node is absent from a listing.
pub const UNKNOWN_STATION: &str = "unknown";

/// One scraped listing unit.
///
/// Every record belongs to exactly one page and one scrape run; the whole
/// page batch shares a single `scraped_at` stamp. Records are immutable
/// after extraction; sinks only append them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRecord {
    /// When the page containing this record was fetched
    pub scraped_at: String,

    /// First entry in the listing's nearest-station block
    pub primary_station: String,

    /// Second entry in the listing's nearest-station block
    pub secondary_station: String,
}

impl ListingRecord {
    /// Creates a record for one unit row of a listing container.
    pub fn new(scraped_at: &str, primary_station: &str, secondary_station: &str) -> Self {
        Self {
            scraped_at: scraped_at.to_string(),
            primary_station: primary_station.to_string(),
            secondary_station: secondary_station.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_copies_fields() {
        let record = ListingRecord::new("2026-08-05 12:00:00", "Line A / Sta. X 5 min", "Line B / Sta. Y 8 min");
        assert_eq!(record.scraped_at, "2026-08-05 12:00:00");
        assert_eq!(record.primary_station, "Line A / Sta. X 5 min");
        assert_eq!(record.secondary_station, "Line B / Sta. Y 8 min");
    }
}
