//! Replay strategy module for event feed processing
//!
//! This module defines the Strategy pattern for complete replay pipelines,
//! encompassing CSV parsing, event settlement through the ledger engine, and
//! leaderboard output. Different implementations (synchronous, asynchronous
//! batch) are selected at runtime.

use crate::cli::StrategyType;
use crate::core::LedgerEngine;
use crate::types::LedgerEvent;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncReplayStrategy, BatchConfig};
pub use sync::SyncReplayStrategy;

/// Replay strategy trait for complete event processing pipelines
///
/// Each strategy reads events from a CSV feed, settles them through a
/// `LedgerEngine`, and writes the final leaderboard to output.
pub trait ReplayStrategy: Send + Sync {
    /// Process events from the input feed and write the leaderboard
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal problems: unreadable input, broken
    /// output, runtime construction failure. Individual event errors
    /// (rejected purchases, unknown users) are logged and processing
    /// continues with the next event.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a replay strategy based on the specified strategy type
///
/// Factory selecting the strategy implementation at runtime. The batch
/// configuration only applies to the async strategy and is ignored for
/// sync.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ReplayStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncReplayStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncReplayStrategy::new(config))
        }
    }
}

/// Apply one replay event to the engine
///
/// Resolves the event's username to a user id (registration events create
/// the mapping) and dispatches to the matching engine operation. Shared by
/// both strategies so they settle events identically.
pub fn apply_event(engine: &LedgerEngine, event: LedgerEvent) -> Result<(), String> {
    match event {
        LedgerEvent::Register { username } => engine
            .register(&username)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        LedgerEvent::Game { username, submission } => {
            let user = engine
                .resolve_username(&username)
                .map_err(|e| e.to_string())?;
            engine
                .record_game(user, submission)
                .map(|_| ())
                .map_err(|e| e.to_string())
        }
        LedgerEvent::Purchase {
            username,
            item_type,
            item,
        } => {
            let user = engine
                .resolve_username(&username)
                .map_err(|e| e.to_string())?;
            engine
                .purchase(user, item_type, item)
                .map(|_| ())
                .map_err(|e| e.to_string())
        }
        LedgerEvent::Equip {
            username,
            item_type,
            item,
        } => {
            let user = engine
                .resolve_username(&username)
                .map_err(|e| e.to_string())?;
            engine.equip(user, item_type, item).map_err(|e| e.to_string())
        }
    }
}
