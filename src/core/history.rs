//! Per-user game history
//!
//! This module provides the `GameHistory` struct, an append-only log of
//! finished games keyed by user. Records carry the ledger-wide sequence
//! number assigned when the game was settled, so per-user order matches
//! settlement order even across threads.

use crate::types::{GameOutcome, GameRecord, UserId};
use dashmap::DashMap;

/// Number of most recent games the win-streak statistic looks at
pub const STREAK_WINDOW: usize = 10;

/// Default number of records returned by a history query
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Thread-safe append-only store of game records
#[derive(Debug, Default)]
pub struct GameHistory {
    /// Records per user, in append (settlement) order
    records: DashMap<UserId, Vec<GameRecord>>,
}

impl GameHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Append a settled game record for a user
    pub fn append(&self, user: UserId, record: GameRecord) {
        self.records.entry(user).or_default().push(record);
    }

    /// Get the most recent records for a user, newest first
    pub fn recent(&self, user: UserId, limit: usize) -> Vec<GameRecord> {
        self.records
            .get(&user)
            .map(|records| records.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    /// Number of consecutive wins at the head of the recent history
    ///
    /// Counts wins from the most recent game backwards, stopping at the
    /// first non-win, and never looks past the last `STREAK_WINDOW` games.
    /// Draws break the streak like losses do.
    pub fn win_streak(&self, user: UserId) -> usize {
        self.records
            .get(&user)
            .map(|records| {
                records
                    .iter()
                    .rev()
                    .take(STREAK_WINDOW)
                    .take_while(|r| r.outcome == GameOutcome::Win)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Total number of recorded games for a user
    pub fn len(&self, user: UserId) -> usize {
        self.records.get(&user).map(|r| r.len()).unwrap_or(0)
    }
}
