//! Shop catalog
//!
//! This module provides the `Catalog` struct holding the purchasable item
//! reference data. The catalog is read-mostly: it is seeded once at
//! construction (availability toggling is an administrative concern outside
//! this core) and every entry is validated at load time, so the rest of the
//! system can trust ids, prices, and stat bonuses unconditionally.

use crate::types::{ItemEffect, ItemId, ItemType, LedgerError, ShopItem, StatBonuses, StatName};
use std::collections::BTreeMap;

/// Read-mostly catalog of purchasable items
///
/// BTreeMap keyed by item id keeps lookups cheap and iteration
/// deterministic.
#[derive(Debug, Default)]
pub struct Catalog {
    items: BTreeMap<ItemId, ShopItem>,
}

impl Catalog {
    /// Build a catalog from a list of items, validating every entry
    ///
    /// Validation rejects duplicate ids, the reserved id 0 (the free basic
    /// tier granted at registration), and negative prices. Stat-bonus keys
    /// are already constrained to the closed `StatName` set by the type
    /// system.
    pub fn new(items: Vec<ShopItem>) -> Result<Self, LedgerError> {
        let mut map = BTreeMap::new();
        for item in items {
            if item.id == 0 {
                return Err(LedgerError::Storage {
                    message: "catalog item id 0 is reserved for default gear".to_string(),
                });
            }
            if item.price < 0 {
                return Err(LedgerError::Storage {
                    message: format!("catalog item {} has negative price {}", item.id, item.price),
                });
            }
            if map.insert(item.id, item).is_some() {
                return Err(LedgerError::Storage {
                    message: "duplicate catalog item id".to_string(),
                });
            }
        }
        Ok(Self { items: map })
    }

    /// Build the standard catalog shipped with the game
    ///
    /// # Panics
    ///
    /// Panics if the built-in seed fails validation, which indicates a bug
    /// in the seed data itself.
    pub fn with_defaults() -> Self {
        Self::new(default_items()).expect("default catalog seed is valid")
    }

    /// Resolve an available item by id
    ///
    /// Unavailable items are reported as not found, indistinguishable from
    /// absent ones.
    pub fn get(&self, item: ItemId) -> Result<&ShopItem, LedgerError> {
        self.items
            .get(&item)
            .filter(|i| i.is_available)
            .ok_or_else(|| LedgerError::item_not_found(item))
    }

    /// List available items
    ///
    /// Filtered listings are ordered by price ascending; unfiltered listings
    /// by (type, price) ascending. Unavailable items are excluded either
    /// way.
    pub fn list(&self, type_filter: Option<ItemType>) -> Vec<ShopItem> {
        let mut items: Vec<ShopItem> = self
            .items
            .values()
            .filter(|item| item.is_available)
            .filter(|item| type_filter.is_none_or(|t| item.item_type == t))
            .cloned()
            .collect();

        match type_filter {
            Some(_) => items.sort_by_key(|item| item.price),
            None => items.sort_by_key(|item| (item.item_type, item.price)),
        }
        items
    }
}

fn bonuses(pairs: &[(StatName, i32)]) -> StatBonuses {
    pairs.iter().copied().collect()
}

/// The standard shop inventory
///
/// Three rackets, four outfits, four accessories, and three consumables,
/// matching the game's seeded shop.
fn default_items() -> Vec<ShopItem> {
    use ItemType::*;
    use StatName::*;

    let item = |id, name: &str, item_type, price, description: &str, b, effect| ShopItem {
        id,
        name: name.to_string(),
        item_type,
        price,
        description: description.to_string(),
        bonuses: b,
        effect,
        is_available: true,
    };

    vec![
        // Rackets
        item(
            1,
            "Pro Racket",
            Racket,
            800,
            "Improves smash power and placement",
            bonuses(&[(Power, 10), (Accuracy, 15)]),
            None,
        ),
        item(
            2,
            "Advanced Racket",
            Racket,
            1500,
            "A clear step up across the board",
            bonuses(&[(Power, 20), (Accuracy, 25), (Speed, 10)]),
            None,
        ),
        item(
            3,
            "Legendary Racket",
            Racket,
            3000,
            "Top-tier racket, strong in every stat",
            bonuses(&[(Power, 35), (Accuracy, 40), (Speed, 20)]),
            None,
        ),
        // Outfits
        item(
            4,
            "Sport Set",
            Outfit,
            300,
            "Professional athlete's kit",
            bonuses(&[(Speed, 5), (Stamina, 10)]),
            None,
        ),
        item(
            5,
            "Casual Wear",
            Outfit,
            200,
            "Comfortable casual sportswear",
            bonuses(&[(Comfort, 10)]),
            None,
        ),
        item(
            6,
            "Tech Suit",
            Outfit,
            1000,
            "Futuristic competition suit",
            bonuses(&[(Power, 15), (Speed, 15), (Accuracy, 10)]),
            None,
        ),
        item(
            7,
            "Legendary Robe",
            Outfit,
            2500,
            "The robe of legend",
            bonuses(&[(Power, 25), (Speed, 25), (Accuracy, 20), (Stamina, 20)]),
            None,
        ),
        // Accessories
        item(
            8,
            "Energy Headband",
            Accessory,
            150,
            "Sharpens focus",
            bonuses(&[(Accuracy, 8)]),
            None,
        ),
        item(
            9,
            "Power Wristband",
            Accessory,
            200,
            "Adds weight to every smash",
            bonuses(&[(Power, 12)]),
            None,
        ),
        item(
            10,
            "Speed Shoes",
            Accessory,
            250,
            "Faster court coverage",
            bonuses(&[(Speed, 15)]),
            None,
        ),
        item(
            11,
            "Aura Effect",
            Accessory,
            500,
            "A flashy glow for match entrances",
            bonuses(&[(Charisma, 100)]),
            None,
        ),
        // Consumables
        item(
            12,
            "Double Points Card",
            Consumable,
            500,
            "Doubles the points from the next match",
            bonuses(&[]),
            Some(ItemEffect::DoublePoints),
        ),
        item(
            13,
            "Skill Boost Card",
            Consumable,
            200,
            "Temporarily raises every stat",
            bonuses(&[]),
            Some(ItemEffect::SkillBoost),
        ),
        item(
            14,
            "Lucky Boost Card",
            Consumable,
            300,
            "Improves the odds of rare rewards",
            bonuses(&[]),
            Some(ItemEffect::LuckyBoost),
        ),
    ]
}
