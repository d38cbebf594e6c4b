//! Asynchronous CSV reader with batch interface
//!
//! Provides a batched streaming interface over ledger events from a CSV
//! feed. Used by the async replay strategy to pull work in chunks that are
//! then settled concurrently.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - futures for the async read abstraction
//! - Batch reading so callers control how much is in flight

use crate::io::csv_format::{convert_event_row, EventRow};
use crate::types::LedgerEvent;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV event reader
///
/// Provides batch reading over ledger events. Maintains streaming behavior
/// with constant memory usage per batch.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read a batch of events
    ///
    /// Reads up to `batch_size` rows, converting each to a `LedgerEvent`.
    /// Rows that fail to parse or convert are logged and skipped. Returns
    /// an empty vector at end of feed.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<LedgerEvent> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut rows = self.csv_reader.deserialize::<EventRow>();

        while batch.len() < batch_size {
            match rows.next().await {
                Some(Ok(row)) => match convert_event_row(row) {
                    Ok(event) => batch.push(event),
                    Err(e) => log::warn!("Event conversion error: {}", e),
                },
                Some(Err(e)) => log::warn!("CSV parse error: {}", e),
                None => break,
            }
        }

        batch
    }
}
