//! Replay event types for the shuttle ledger
//!
//! This module defines the parsed form of one row of an event feed. Events
//! are keyed by username rather than user id: the feed comes from systems
//! that know players by name, and the replay resolves names to ids at the
//! boundary (registration events create the mapping).

use super::game::GameSubmission;
use super::item::{ItemId, ItemType};

/// One parsed event from a replay feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    /// Create an account for a new player
    Register {
        /// Username to register
        username: String,
    },

    /// Settle a finished game for a player
    Game {
        /// Player the result belongs to
        username: String,
        /// The validated match result
        submission: GameSubmission,
    },

    /// Buy a shop item for a player
    Purchase {
        /// Purchasing player
        username: String,
        /// Expected category of the item
        item_type: ItemType,
        /// Catalog item id
        item: ItemId,
    },

    /// Equip an owned item for a player
    Equip {
        /// Equipping player
        username: String,
        /// Slot to equip into
        item_type: ItemType,
        /// Owned item id
        item: ItemId,
    },
}

impl LedgerEvent {
    /// The username this event applies to
    pub fn username(&self) -> &str {
        match self {
            LedgerEvent::Register { username }
            | LedgerEvent::Game { username, .. }
            | LedgerEvent::Purchase { username, .. }
            | LedgerEvent::Equip { username, .. } => username,
        }
    }
}
