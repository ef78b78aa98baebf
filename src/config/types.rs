use serde::Deserialize;

/// Main configuration structure for ekimae
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl loop behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Listing URL template containing a `{page}` placeholder
    #[serde(rename = "page-url")]
    pub page_url: String,

    /// Minimum wait before each request (milliseconds)
    #[serde(rename = "pacing-ms", default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// Total fetch attempts per page before giving up
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// First retry delay (milliseconds); doubles on each further retry
    #[serde(rename = "initial-backoff-ms", default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Page bound used when the pagination hint cannot be read
    #[serde(rename = "fallback-max-page", default = "default_fallback_max_page")]
    pub fallback_max_page: u32,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout (milliseconds), independent of retry delays
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// CSS selectors locating the upstream listing markup
///
/// The defaults match the markup the scraper was written against; a site
/// restyle only needs a config change, not a code change.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    /// Anchors of the pagination control; the second-to-last names the last page
    #[serde(default = "default_pagination")]
    pub pagination: String,

    /// One listing container per property
    #[serde(default = "default_container")]
    pub container: String,

    /// Block holding the nearest-station lines of a container
    #[serde(rename = "station-block", default = "default_station_block")]
    pub station_block: String,

    /// Individual station text nodes inside the station block
    #[serde(rename = "station-text", default = "default_station_text")]
    pub station_text: String,

    /// Block holding a container's unit rows
    #[serde(rename = "unit-block", default = "default_unit_block")]
    pub unit_block: String,

    /// One row per rentable unit inside the unit block
    #[serde(rename = "unit-row", default = "default_unit_row")]
    pub unit_row: String,
}

/// Output artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,

    /// Path to the append-only CSV file
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,

    /// Path to the operational log file
    #[serde(rename = "log-path", default = "default_log_path")]
    pub log_path: String,
}

fn default_pacing_ms() -> u64 {
    2_000
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    10_000
}

fn default_fallback_max_page() -> u32 {
    100
}

fn default_user_agent() -> String {
    // A current desktop browser string; the listing site serves a reduced
    // page to unknown agents.
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_pagination() -> String {
    "div.pagination-parts a".to_string()
}

fn default_container() -> String {
    ".cassetteitem".to_string()
}

fn default_station_block() -> String {
    ".cassetteitem_detail-col2".to_string()
}

fn default_station_text() -> String {
    ".cassetteitem_detail-text".to_string()
}

fn default_unit_block() -> String {
    ".cassetteitem_other".to_string()
}

fn default_unit_row() -> String {
    ".js-cassette_link".to_string()
}

fn default_database_path() -> String {
    "./listings.db".to_string()
}

fn default_csv_path() -> String {
    "./listings.csv".to_string()
}

fn default_log_path() -> String {
    "./scrape.log".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            pagination: default_pagination(),
            container: default_container(),
            station_block: default_station_block(),
            station_text: default_station_text(),
            unit_block: default_unit_block(),
            unit_row: default_unit_row(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            csv_path: default_csv_path(),
            log_path: default_log_path(),
        }
    }
}
