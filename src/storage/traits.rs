//! Storage trait and error types

use crate::record::ListingRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database error: {0}")]
    Database(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for the relational record sink
///
/// One batch is written per page. Implementations do not retry: a failed
/// batch surfaces to the orchestrator, which logs it and moves on, leaving
/// the flat-file sink unaffected.
pub trait RecordStore {
    /// Appends a batch of records, returning how many were written
    fn write_batch(&mut self, records: &[ListingRecord]) -> StorageResult<usize>;

    /// Counts all records currently stored
    fn count_records(&self) -> StorageResult<u64>;
}
