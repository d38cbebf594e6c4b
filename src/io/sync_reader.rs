//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger events from a CSV feed file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The SyncReader uses csv::Reader to read and deserialize rows
//! sequentially, converting each to a `LedgerEvent` one at a time without
//! loading the whole feed into memory.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `new()`
//! - Individual row parse errors are yielded as Err variants in the
//!   iterator, with line numbers for debugging

use crate::io::csv_format::{convert_event_row, EventRow};
use crate::types::LedgerEvent;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV event reader
///
/// Provides an iterator interface over ledger events. Maintains streaming
/// behavior with constant memory usage.
///
/// # Examples
///
/// ```no_run
/// use shuttle_ledger::io::sync_reader::SyncReader;
/// use std::path::Path;
///
/// let reader = SyncReader::new(Path::new("events.csv")).unwrap();
/// let events: Vec<_> = reader.filter_map(Result::ok).collect();
/// println!("Parsed {} events", events.len());
/// ```
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// Opens the CSV file and prepares it for streaming iteration. The CSV
    /// reader trims whitespace from all fields and allows flexible field
    /// counts so rows may omit trailing unused columns.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<LedgerEvent, String>;

    /// Get the next event from the feed
    ///
    /// Yields `Some(Err(..))` with a line number for rows that fail to
    /// parse or convert, and `None` at end of file.
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<EventRow>();

        match deserializer.next()? {
            Ok(row) => {
                self.line_num += 1;
                Some(
                    convert_event_row(row)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}
