//! CSV record appender
//!
//! Appends one row per record to a durable CSV artifact. The header is
//! written only when the file is newly created or still empty, so repeated
//! calls and repeated runs share a single header and never truncate prior
//! rows.

use crate::output::traits::{OutputResult, RecordAppender};
use crate::record::ListingRecord;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// CSV column headers, matching the field order of [`ListingRecord`]
const HEADERS: [&str; 3] = ["scraped_at", "primary_station", "secondary_station"];

/// Append-only CSV sink
///
/// The file is opened per batch, so nothing is held between pages and a
/// crashed run leaves every previously flushed row intact.
pub struct CsvAppender {
    path: PathBuf,
}

impl CsvAppender {
    /// Creates an appender for the artifact at `path`
    ///
    /// The file itself is created lazily by the first batch.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// The artifact path this appender writes to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordAppender for CsvAppender {
    fn append_batch(&mut self, records: &[ListingRecord]) -> OutputResult<usize> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(HEADERS)?;
        }

        for record in records {
            writer.serialize(record)?;
        }

        writer.flush()?;
        Ok(records.len())
    }
}
