//! Database schema definition

/// SQL schema for the listings database
pub const SCHEMA_SQL: &str = r#"
-- One row per scraped listing unit
CREATE TABLE IF NOT EXISTS listings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    scraped_at TEXT NOT NULL,
    primary_station TEXT NOT NULL,
    secondary_station TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_listings_scraped_at ON listings(scraped_at);
"#;

/// Initializes the database schema
///
/// Safe to call on every open; existing tables and data are left untouched.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)
}
