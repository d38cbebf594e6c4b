//! Synchronous replay strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ReplayStrategy trait. It orchestrates event settlement by coordinating
//! between the SyncReader (CSV input) and LedgerEngine (business logic).
//!
//! # Design
//!
//! The SyncReplayStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Event settlement to `LedgerEngine` via `apply_event`
//! - CSV output to `csv_format::write_leaderboard_csv`
//!
//! Events are streamed one at a time, so memory usage is bounded by the
//! ledger state, not the feed size.

use crate::core::LedgerEngine;
use crate::io::csv_format::write_leaderboard_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{apply_event, ReplayStrategy};
use std::io::Write;
use std::path::Path;

/// Synchronous replay strategy
///
/// Settles events in feed order on a single thread, then writes the full
/// leaderboard.
///
/// # Examples
///
/// ```no_run
/// use shuttle_ledger::strategy::{ReplayStrategy, SyncReplayStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncReplayStrategy;
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("events.csv"), &mut output)
///     .expect("Replay failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncReplayStrategy;

impl ReplayStrategy for SyncReplayStrategy {
    /// Process events from the input feed and write the leaderboard
    ///
    /// Fatal errors (file not found, output failure) are returned.
    /// Individual event errors are logged and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let engine = LedgerEngine::new();
        let reader = SyncReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(event) => {
                    if let Err(e) = apply_event(&engine, event) {
                        log::warn!("Event rejected: {}", e);
                    }
                }
                Err(e) => {
                    log::warn!("CSV parsing error: {}", e);
                }
            }
        }

        // Full standings, not just the default top ten
        let board = engine.leaderboard(Some(usize::MAX));
        write_leaderboard_csv(&board, output)?;

        Ok(())
    }
}
