//! Inventory ownership types for the shuttle ledger

use super::item::{ItemId, ItemType};

/// Ownership record for one item held by one user
///
/// Created by a purchase or by the registration bootstrap, never deleted.
/// Only the `is_equipped` flag is ever mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    /// Category / equip slot of the owned item
    pub item_type: ItemType,

    /// Catalog id of the owned item (0 for the free basic tier)
    pub item_id: ItemId,

    /// Display name snapshot taken at acquisition time
    ///
    /// A snapshot so later catalog renames do not rewrite history.
    pub item_name: String,

    /// Whether this entry occupies its equip slot
    ///
    /// Invariant: at most one entry per (user, item type) has this set.
    pub is_equipped: bool,

    /// Ledger-wide sequence number assigned at acquisition
    ///
    /// Orders inventory listings the way an acquisition timestamp would.
    pub purchased_at: u64,
}

impl InventoryEntry {
    /// Create an unequipped ownership entry
    pub fn new(item_type: ItemType, item_id: ItemId, item_name: impl Into<String>, seq: u64) -> Self {
        InventoryEntry {
            item_type,
            item_id,
            item_name: item_name.into(),
            is_equipped: false,
            purchased_at: seq,
        }
    }

    /// Create a pre-equipped entry (registration bootstrap path only)
    pub fn new_equipped(
        item_type: ItemType,
        item_id: ItemId,
        item_name: impl Into<String>,
        seq: u64,
    ) -> Self {
        InventoryEntry {
            is_equipped: true,
            ..Self::new(item_type, item_id, item_name, seq)
        }
    }
}
