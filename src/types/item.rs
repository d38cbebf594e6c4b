//! Shop catalog types for the shuttle ledger
//!
//! This module defines the purchasable item reference data: item categories
//! (the equip slots), the closed set of stat names a bonus may apply to, and
//! the ShopItem catalog entry itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Shop item identifier
///
/// Item id 0 is reserved for the free "basic" tier granted at registration
/// and never appears in the catalog.
pub type ItemId = u32;

/// Item category, doubling as the equip slot
///
/// At most one inventory entry per (user, item type) may be equipped at a
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Racket,
    Outfit,
    Accessory,
    Consumable,
}

impl ItemType {
    /// Parse an item type from its lowercase wire form
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "racket" => Some(ItemType::Racket),
            "outfit" => Some(ItemType::Outfit),
            "accessory" => Some(ItemType::Accessory),
            "consumable" => Some(ItemType::Consumable),
            _ => None,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemType::Racket => "racket",
            ItemType::Outfit => "outfit",
            ItemType::Accessory => "accessory",
            ItemType::Consumable => "consumable",
        };
        f.write_str(s)
    }
}

/// Closed set of stats an item bonus may apply to
///
/// The catalog validates every bonus key against this set at load time, so
/// downstream code never sees a free-form stat string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatName {
    Power,
    Accuracy,
    Speed,
    Stamina,
    Comfort,
    Charisma,
}

/// One-shot effect carried by consumable items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemEffect {
    /// Double the points earned in the next recorded game
    DoublePoints,

    /// Temporary boost to all stats
    SkillBoost,

    /// Increased chance of rare rewards
    LuckyBoost,
}

/// Typed stat-bonus mapping
///
/// BTreeMap keeps iteration order deterministic for display and tests.
pub type StatBonuses = BTreeMap<StatName, i32>;

/// Catalog entry for a purchasable item
///
/// Effectively immutable reference data seeded once at catalog construction.
/// Items with `is_available = false` are invisible to both listing and
/// purchase resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopItem {
    /// Catalog item id (unique within the catalog, never 0)
    pub id: ItemId,

    /// Display name
    pub name: String,

    /// Category / equip slot
    pub item_type: ItemType,

    /// Price in points (>= 0)
    pub price: i64,

    /// Short marketing description
    pub description: String,

    /// Stat bonuses granted while the item is equipped
    pub bonuses: StatBonuses,

    /// One-shot effect, present only on consumables
    pub effect: Option<ItemEffect>,

    /// Whether the item is currently purchasable
    pub is_available: bool,
}
