//! Game result types for the shuttle ledger
//!
//! This module defines the immutable game-record fact appended by the points
//! ledger, and the balance snapshot returned after a record is applied.

use serde::{Deserialize, Serialize};

/// Outcome of a single match from the player's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    /// The player won; increments `games_won` alongside `games_played`
    Win,

    /// The player lost; only `games_played` is incremented
    Lose,

    /// Neither side won; only `games_played` is incremented
    Draw,
}

impl GameOutcome {
    /// Parse an outcome from its lowercase wire form
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "win" => Some(GameOutcome::Win),
            "lose" => Some(GameOutcome::Lose),
            "draw" => Some(GameOutcome::Draw),
            _ => None,
        }
    }
}

/// Match result submitted to the points ledger
///
/// Carries everything the ledger persists about one game. Validated before
/// being applied: `points_earned` must be non-negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSubmission {
    /// Game mode label, e.g. "singles" or "doubles"
    pub game_type: String,

    /// Outcome from the player's perspective
    pub outcome: GameOutcome,

    /// Points awarded for this game (>= 0)
    pub points_earned: i64,

    /// Match duration in seconds
    pub duration_secs: u64,

    /// Final rally score for the player
    pub player_score: u32,

    /// Final rally score for the opponent
    pub opponent_score: u32,

    /// Sets won by the player
    pub sets_won: u32,

    /// Sets lost by the player
    pub sets_lost: u32,
}

/// Immutable, persisted game record
///
/// Append-only: once stored it is never mutated or deleted. The `seq` field
/// is a ledger-wide monotonically increasing sequence number assigned at
/// append time; it orders records the way a creation timestamp would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Ledger-wide append sequence number (newest record has the largest)
    pub seq: u64,

    /// Game mode label
    pub game_type: String,

    /// Outcome from the player's perspective
    pub outcome: GameOutcome,

    /// Points awarded for this game
    pub points_earned: i64,

    /// Match duration in seconds
    pub duration_secs: u64,

    /// Final rally score for the player
    pub player_score: u32,

    /// Final rally score for the opponent
    pub opponent_score: u32,

    /// Sets won by the player
    pub sets_won: u32,

    /// Sets lost by the player
    pub sets_lost: u32,
}

impl GameRecord {
    /// Build the persisted record from a validated submission
    pub fn from_submission(seq: u64, submission: GameSubmission) -> Self {
        GameRecord {
            seq,
            game_type: submission.game_type,
            outcome: submission.outcome,
            points_earned: submission.points_earned,
            duration_secs: submission.duration_secs,
            player_score: submission.player_score,
            opponent_score: submission.opponent_score,
            sets_won: submission.sets_won,
            sets_lost: submission.sets_lost,
        }
    }
}

/// Balance snapshot returned after a game record is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceUpdate {
    /// Points awarded by the recorded game
    pub points_earned: i64,

    /// Spendable balance after the update
    pub current_points: i64,

    /// Lifetime total after the update
    pub total_points: i64,
}
