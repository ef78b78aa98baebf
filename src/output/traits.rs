//! Output trait and error types

use crate::record::ListingRecord;
use thiserror::Error;

/// Errors that can occur during flat-file output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for the append-only flat-file sink
///
/// Called once per page, independently of the relational sink. The header
/// is the implementation's concern; callers just hand over batches.
pub trait RecordAppender {
    /// Appends a batch of rows, returning how many were appended
    fn append_batch(&mut self, records: &[ListingRecord]) -> OutputResult<usize>;
}
