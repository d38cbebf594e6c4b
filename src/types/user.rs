//! User account types for the shuttle ledger
//!
//! This module defines the UserAccount structure holding a player's point
//! balances and lifetime game statistics.

/// User identifier
///
/// Assigned sequentially by the account store at registration.
pub type UserId = u64;

/// Points credited to every freshly registered account.
pub const SIGNUP_BONUS: i64 = 1000;

/// Per-user balance and statistics record
///
/// Represents the current state of a player's account. `current_points` is
/// the spendable balance and never goes negative; `total_points` is the
/// lifetime earned total and only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// The user ID assigned at registration
    pub id: UserId,

    /// Unique display name chosen at registration
    pub username: String,

    /// Spendable balance
    ///
    /// Increased by game results, decreased by shop purchases.
    /// Invariant: `current_points >= 0` after every ledger operation.
    pub current_points: i64,

    /// Lifetime earned points
    ///
    /// Increased together with `current_points` when a game is recorded,
    /// never decreased by purchases. Drives the leaderboard ordering.
    pub total_points: i64,

    /// Number of games recorded for this user
    pub games_played: u64,

    /// Number of recorded games with a winning outcome
    ///
    /// Invariant: `games_won <= games_played`.
    pub games_won: u64,
}

impl UserAccount {
    /// Create a new account with the signup bonus and no games played
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        UserAccount {
            id,
            username: username.into(),
            current_points: SIGNUP_BONUS,
            total_points: 0,
            games_played: 0,
            games_won: 0,
        }
    }
}
