//! Output module for the flat-file record sink
//!
//! This module handles the CSV side of persistence: an append-only artifact
//! with a one-time header, safe to extend across runs.

mod csv;
mod traits;

pub use self::csv::CsvAppender;
pub use traits::{OutputError, OutputResult, RecordAppender};
