//! SQLite storage implementation
//!
//! This module provides the SQLite-backed implementation of the
//! [`RecordStore`] trait. The connection is exclusively owned for the
//! lifetime of a run and closed when the store drops.

use crate::record::ListingRecord;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{RecordStore, StorageError, StorageResult};
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite record sink
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl RecordStore for SqliteStore {
    fn write_batch(&mut self, records: &[ListingRecord]) -> StorageResult<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO listings (scraped_at, primary_station, secondary_station)
                 VALUES (?1, ?2, ?3)",
            )?;

            for record in records {
                stmt.execute(params![
                    record.scraped_at,
                    record.primary_station,
                    record.secondary_station
                ])?;
            }
        }
        tx.commit()?;

        Ok(records.len())
    }

    fn count_records(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM listings", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records(n: usize) -> Vec<ListingRecord> {
        (0..n)
            .map(|i| {
                ListingRecord::new(
                    "2026-08-05 12:00:00",
                    &format!("Line A / Station {} 5 min", i),
                    "Line B / Station X 8 min",
                )
            })
            .collect()
    }

    #[test]
    fn test_write_batch_counts() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        let written = store.write_batch(&sample_records(3)).unwrap();
        assert_eq!(written, 3);
        assert_eq!(store.count_records().unwrap(), 3);
    }

    #[test]
    fn test_empty_batch_is_a_noop() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        let written = store.write_batch(&[]).unwrap();
        assert_eq!(written, 0);
        assert_eq!(store.count_records().unwrap(), 0);
    }

    #[test]
    fn test_batches_accumulate() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.write_batch(&sample_records(2)).unwrap();
        store.write_batch(&sample_records(3)).unwrap();

        assert_eq!(store.count_records().unwrap(), 5);
    }

    #[test]
    fn test_written_values_round_trip() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let records = vec![ListingRecord::new(
            "2026-08-05 12:00:00",
            "Line A 5 min",
            "unknown",
        )];
        store.write_batch(&records).unwrap();

        let (scraped_at, primary, secondary): (String, String, String) = store
            .conn
            .query_row(
                "SELECT scraped_at, primary_station, secondary_station FROM listings",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();

        assert_eq!(scraped_at, "2026-08-05 12:00:00");
        assert_eq!(primary, "Line A 5 min");
        assert_eq!(secondary, "unknown");
    }

    #[test]
    fn test_open_is_idempotent_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.write_batch(&sample_records(2)).unwrap();
        }

        // Re-opening must keep the schema and the rows
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.count_records().unwrap(), 2);
    }
}
