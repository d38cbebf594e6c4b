//! CSV format handling for event feeds and leaderboard output
//!
//! This module centralizes all CSV format concerns, providing:
//! - EventRow structure for deserialization
//! - Conversion from CSV rows to domain events
//! - Leaderboard output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::core::LeaderboardEntry;
use crate::types::{GameOutcome, GameSubmission, ItemType, LedgerEvent};
use serde::Deserialize;
use std::io::Write;

/// CSV row structure for deserialization
///
/// Matches the event feed format with columns:
/// event, user, game_type, outcome, points, item_type, item
///
/// Most fields are optional because each event kind uses a different
/// subset: register needs only the user, game events need outcome and
/// points, purchase and equip need item_type and item.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub event: String,
    pub user: String,
    pub game_type: Option<String>,
    pub outcome: Option<String>,
    pub points: Option<i64>,
    pub item_type: Option<String>,
    pub item: Option<u32>,
}

/// Convert an EventRow to a LedgerEvent
///
/// Validates that the fields each event kind requires are present and
/// parseable: unknown event names, missing or unparseable outcomes, and
/// missing item references are all conversion errors. Extra fields an
/// event kind does not use are ignored.
pub fn convert_event_row(row: EventRow) -> Result<LedgerEvent, String> {
    if row.user.is_empty() {
        return Err(format!("'{}' event is missing a user", row.event));
    }

    match row.event.to_lowercase().as_str() {
        "register" => Ok(LedgerEvent::Register { username: row.user }),
        "game" => {
            let outcome_str = row
                .outcome
                .as_deref()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| format!("game event for '{}' is missing an outcome", row.user))?;
            let outcome = GameOutcome::parse(outcome_str).ok_or_else(|| {
                format!("Invalid outcome '{}' for user '{}'", outcome_str, row.user)
            })?;
            let points = row
                .points
                .ok_or_else(|| format!("game event for '{}' is missing points", row.user))?;

            Ok(LedgerEvent::Game {
                submission: GameSubmission {
                    game_type: row.game_type.unwrap_or_else(|| "singles".to_string()),
                    outcome,
                    points_earned: points,
                    // The feed carries only the settlement essentials; the
                    // rally-level detail defaults to zero.
                    duration_secs: 0,
                    player_score: 0,
                    opponent_score: 0,
                    sets_won: 0,
                    sets_lost: 0,
                },
                username: row.user,
            })
        }
        "purchase" | "equip" => {
            let type_str = row
                .item_type
                .as_deref()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    format!("{} event for '{}' is missing an item type", row.event, row.user)
                })?;
            let item_type = ItemType::parse(type_str).ok_or_else(|| {
                format!("Invalid item type '{}' for user '{}'", type_str, row.user)
            })?;
            let item = row.item.ok_or_else(|| {
                format!("{} event for '{}' is missing an item id", row.event, row.user)
            })?;

            if row.event.to_lowercase() == "purchase" {
                Ok(LedgerEvent::Purchase {
                    username: row.user,
                    item_type,
                    item,
                })
            } else {
                Ok(LedgerEvent::Equip {
                    username: row.user,
                    item_type,
                    item,
                })
            }
        }
        other => Err(format!("Invalid event type: '{}' for user '{}'", other, row.user)),
    }
}

/// Write leaderboard rows to CSV format
///
/// Writes rows in CSV format with columns:
/// rank, username, total_points, games_played, games_won, win_rate
///
/// The input is expected to already be in rank order.
pub fn write_leaderboard_csv(
    entries: &[LeaderboardEntry],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "rank",
            "username",
            "total_points",
            "games_played",
            "games_won",
            "win_rate",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for entry in entries {
        writer
            .write_record(&[
                entry.rank.to_string(),
                entry.username.clone(),
                entry.total_points.to_string(),
                entry.games_played.to_string(),
                entry.games_won.to_string(),
                format!("{:.2}", entry.win_rate),
            ])
            .map_err(|e| format!("Failed to write leaderboard row: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
