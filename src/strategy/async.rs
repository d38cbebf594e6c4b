//! Asynchronous batch replay strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of
//! the ReplayStrategy trait. Events are read in batches and settled with
//! user-based partitioning.
//!
//! # Parallelism
//!
//! - Batches are processed sequentially to keep per-user ordering across
//!   the whole feed
//! - Within each batch, events are partitioned by username and each user's
//!   group runs as its own tokio task, so different users settle in
//!   parallel
//! - The shared `LedgerEngine` is thread-safe; the partitioning exists for
//!   ordering, not safety

use crate::core::LedgerEngine;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_leaderboard_csv;
use crate::strategy::{apply_event, ReplayStrategy};
use crate::types::LedgerEvent;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch replay
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of events per batch
    pub batch_size: usize,
    /// Number of tokio worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, falling back to defaults for zero values
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            log::warn!(
                "Invalid batch_size (0), using default ({})",
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            log::warn!(
                "Invalid max_concurrent_batches (0), using default ({})",
                default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch replay strategy
///
/// Settles events batch by batch on a tokio multi-threaded runtime,
/// partitioning each batch by username so one user's events stay ordered
/// while different users run in parallel.
#[derive(Debug, Clone)]
pub struct AsyncReplayStrategy {
    config: BatchConfig,
}

impl AsyncReplayStrategy {
    /// Create a new AsyncReplayStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

/// Settle one batch, running each user's events as its own task
///
/// Groups preserve within-batch order per user. The join set is awaited
/// fully before returning, so the caller can start the next batch knowing
/// every event of this one has settled.
async fn settle_batch(engine: &Arc<LedgerEngine>, batch: Vec<LedgerEvent>) {
    let mut groups: HashMap<String, Vec<LedgerEvent>> = HashMap::new();
    for event in batch {
        groups
            .entry(event.username().to_string())
            .or_default()
            .push(event);
    }

    let mut tasks = Vec::with_capacity(groups.len());
    for (_, events) in groups {
        let engine = Arc::clone(engine);
        tasks.push(tokio::spawn(async move {
            for event in events {
                if let Err(e) = apply_event(&engine, event) {
                    log::warn!("Event rejected: {}", e);
                }
            }
        }));
    }

    for task in tasks {
        if let Err(e) = task.await {
            log::warn!("Settlement task failed: {}", e);
        }
    }
}

impl ReplayStrategy for AsyncReplayStrategy {
    /// Process events from the input feed and write the leaderboard
    ///
    /// Fatal errors (file not found, runtime construction failure, output
    /// failure) are returned. Individual event errors are logged and
    /// processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let engine = Arc::new(LedgerEngine::new());

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            // Sequential batches keep per-user ordering when a user's
            // events span a batch boundary
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }
                settle_batch(&engine, batch).await;
            }

            let board = engine.leaderboard(Some(usize::MAX));
            write_leaderboard_csv(&board, output)?;

            Ok(())
        })
    }
}
