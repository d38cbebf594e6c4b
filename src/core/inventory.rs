//! Thread-safe item ownership tracking
//!
//! This module provides the `InventoryLedger` struct, which records which
//! items each user owns and which of them are currently equipped.
//!
//! # Design
//!
//! One `DashMap` entry holds a user's whole inventory as a `Vec`, so the
//! entry lock makes every per-user mutation atomic. In particular an equip
//! clears the old slot holder and sets the new one inside a single closure,
//! which is what keeps the one-equipped-per-slot invariant from ever being
//! observable in a broken state.
//!
//! Ownership entries are append-only; nothing here ever removes one.

use crate::types::{InventoryEntry, ItemId, ItemType, LedgerError, UserId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Default gear granted to every new account, pre-equipped
///
/// Id 0 is reserved for these free basic-tier items; the shop catalog never
/// uses it.
pub const DEFAULT_GEAR: [(ItemType, ItemId, &str); 2] = [
    (ItemType::Racket, 0, "Basic Racket"),
    (ItemType::Outfit, 0, "Basic Outfit"),
];

/// Thread-safe per-user inventory store
#[derive(Debug, Default)]
pub struct InventoryLedger {
    /// Ownership entries keyed by user id
    inventories: DashMap<UserId, Vec<InventoryEntry>>,
}

impl InventoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            inventories: DashMap::new(),
        }
    }

    /// Grant the default gear to a freshly registered user
    ///
    /// Inserts the basic racket and basic outfit, both equipped. Must be
    /// called exactly once per user, by the registration path; calling it
    /// again for a user that already has an inventory is a bug and fails
    /// with `AlreadyOwned` without mutating anything.
    pub fn grant_default_gear(&self, user: UserId, seq: u64) -> Result<(), LedgerError> {
        match self.inventories.entry(user) {
            Entry::Occupied(_) => {
                let (item_type, item_id, _) = DEFAULT_GEAR[0];
                Err(LedgerError::already_owned(user, item_id, item_type))
            }
            Entry::Vacant(slot) => {
                slot.insert(
                    DEFAULT_GEAR
                        .iter()
                        .map(|&(item_type, item_id, name)| {
                            InventoryEntry::new_equipped(item_type, item_id, name, seq)
                        })
                        .collect(),
                );
                Ok(())
            }
        }
    }

    /// Check whether a user owns an item of the given type
    pub fn owns(&self, user: UserId, item_type: ItemType, item: ItemId) -> bool {
        self.inventories
            .get(&user)
            .map(|entries| {
                entries
                    .iter()
                    .any(|e| e.item_type == item_type && e.item_id == item)
            })
            .unwrap_or(false)
    }

    /// Add an ownership entry for a purchased item
    ///
    /// The duplicate check runs under the entry lock, so two concurrent adds
    /// of the same item cannot both succeed. Fails with `AlreadyOwned` if an
    /// entry for the same (type, id) already exists.
    pub fn add_item(
        &self,
        user: UserId,
        item_type: ItemType,
        item: ItemId,
        item_name: &str,
        seq: u64,
    ) -> Result<(), LedgerError> {
        let mut entries = self.inventories.entry(user).or_default();

        if entries
            .iter()
            .any(|e| e.item_type == item_type && e.item_id == item)
        {
            return Err(LedgerError::already_owned(user, item, item_type));
        }

        entries.push(InventoryEntry::new(item_type, item, item_name, seq));
        Ok(())
    }

    /// Equip an owned item into its slot
    ///
    /// Clears whatever currently occupies the (user, type) slot and marks
    /// the requested item equipped, all under one entry lock. Fails with
    /// `NotOwned` if the user has no matching ownership entry, in which case
    /// the current slot holder stays equipped. Equipping an already-equipped
    /// item is a no-op that still succeeds.
    pub fn equip(&self, user: UserId, item_type: ItemType, item: ItemId) -> Result<(), LedgerError> {
        let mut entries = self
            .inventories
            .get_mut(&user)
            .ok_or_else(|| LedgerError::not_owned(user, item, item_type))?;

        if !entries
            .iter()
            .any(|e| e.item_type == item_type && e.item_id == item)
        {
            return Err(LedgerError::not_owned(user, item, item_type));
        }

        for entry in entries.iter_mut().filter(|e| e.item_type == item_type) {
            entry.is_equipped = entry.item_id == item;
        }
        Ok(())
    }

    /// List a user's inventory
    ///
    /// Sorted by item type (slot listing order) and acquisition sequence
    /// within the type. Users without any grant yet get an empty list.
    pub fn list(&self, user: UserId) -> Vec<InventoryEntry> {
        let mut entries: Vec<InventoryEntry> = self
            .inventories
            .get(&user)
            .map(|e| e.clone())
            .unwrap_or_default();
        entries.sort_by_key(|e| (e.item_type, e.purchased_at));
        entries
    }

    /// List the currently equipped items for a user
    pub fn equipped(&self, user: UserId) -> Vec<InventoryEntry> {
        self.list(user)
            .into_iter()
            .filter(|e| e.is_equipped)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gear_grant_equips_both_slots() {
        let ledger = InventoryLedger::new();
        ledger.grant_default_gear(1, 0).unwrap();

        let equipped = ledger.equipped(1);
        assert_eq!(equipped.len(), 2);
        assert!(equipped
            .iter()
            .any(|e| e.item_type == ItemType::Racket && e.item_id == 0));
        assert!(equipped
            .iter()
            .any(|e| e.item_type == ItemType::Outfit && e.item_id == 0));
    }

    #[test]
    fn test_default_gear_grant_is_once_only() {
        let ledger = InventoryLedger::new();
        ledger.grant_default_gear(1, 0).unwrap();

        let result = ledger.grant_default_gear(1, 1);

        assert!(matches!(result, Err(LedgerError::AlreadyOwned { .. })));
        assert_eq!(ledger.list(1).len(), 2);
    }

    #[test]
    fn test_add_item_records_unequipped_entry() {
        let ledger = InventoryLedger::new();
        ledger.grant_default_gear(1, 0).unwrap();

        ledger
            .add_item(1, ItemType::Racket, 3, "Legendary Racket", 5)
            .unwrap();

        assert!(ledger.owns(1, ItemType::Racket, 3));
        let entry = ledger
            .list(1)
            .into_iter()
            .find(|e| e.item_id == 3)
            .unwrap();
        assert!(!entry.is_equipped);
        assert_eq!(entry.item_name, "Legendary Racket");
        assert_eq!(entry.purchased_at, 5);
    }

    #[test]
    fn test_add_item_rejects_duplicate_ownership() {
        let ledger = InventoryLedger::new();
        ledger.add_item(1, ItemType::Racket, 3, "Legendary Racket", 1).unwrap();

        let result = ledger.add_item(1, ItemType::Racket, 3, "Legendary Racket", 2);

        assert_eq!(
            result.unwrap_err(),
            LedgerError::already_owned(1, 3, ItemType::Racket)
        );
        assert_eq!(ledger.list(1).len(), 1);
    }

    #[test]
    fn test_same_id_different_type_is_not_a_duplicate() {
        let ledger = InventoryLedger::new();
        ledger.add_item(1, ItemType::Racket, 7, "Racket Seven", 1).unwrap();

        ledger.add_item(1, ItemType::Outfit, 7, "Outfit Seven", 2).unwrap();

        assert!(ledger.owns(1, ItemType::Racket, 7));
        assert!(ledger.owns(1, ItemType::Outfit, 7));
    }

    #[test]
    fn test_equip_swaps_slot_holder_atomically() {
        let ledger = InventoryLedger::new();
        ledger.grant_default_gear(1, 0).unwrap();
        ledger.add_item(1, ItemType::Racket, 3, "Legendary Racket", 1).unwrap();

        ledger.equip(1, ItemType::Racket, 3).unwrap();

        let rackets: Vec<_> = ledger
            .list(1)
            .into_iter()
            .filter(|e| e.item_type == ItemType::Racket)
            .collect();
        let equipped: Vec<_> = rackets.iter().filter(|e| e.is_equipped).collect();
        assert_eq!(equipped.len(), 1);
        assert_eq!(equipped[0].item_id, 3);
    }

    #[test]
    fn test_equip_does_not_touch_other_slots() {
        let ledger = InventoryLedger::new();
        ledger.grant_default_gear(1, 0).unwrap();
        ledger.add_item(1, ItemType::Racket, 3, "Legendary Racket", 1).unwrap();

        ledger.equip(1, ItemType::Racket, 3).unwrap();

        assert!(ledger
            .equipped(1)
            .iter()
            .any(|e| e.item_type == ItemType::Outfit && e.item_id == 0));
    }

    #[test]
    fn test_equip_unowned_item_keeps_current_holder() {
        let ledger = InventoryLedger::new();
        ledger.grant_default_gear(1, 0).unwrap();

        let result = ledger.equip(1, ItemType::Racket, 3);

        assert_eq!(
            result.unwrap_err(),
            LedgerError::not_owned(1, 3, ItemType::Racket)
        );
        assert!(ledger
            .equipped(1)
            .iter()
            .any(|e| e.item_type == ItemType::Racket && e.item_id == 0));
    }

    #[test]
    fn test_equip_unknown_user_is_not_owned() {
        let ledger = InventoryLedger::new();
        assert!(matches!(
            ledger.equip(9, ItemType::Racket, 3),
            Err(LedgerError::NotOwned { .. })
        ));
    }

    #[test]
    fn test_equip_already_equipped_item_is_noop() {
        let ledger = InventoryLedger::new();
        ledger.grant_default_gear(1, 0).unwrap();

        ledger.equip(1, ItemType::Racket, 0).unwrap();

        assert_eq!(ledger.equipped(1).len(), 2);
    }

    #[test]
    fn test_list_sorted_by_type_then_acquisition() {
        let ledger = InventoryLedger::new();
        ledger.add_item(1, ItemType::Consumable, 12, "Double Points Card", 3).unwrap();
        ledger.add_item(1, ItemType::Racket, 1, "Pro Racket", 2).unwrap();
        ledger.add_item(1, ItemType::Racket, 3, "Legendary Racket", 5).unwrap();
        ledger.add_item(1, ItemType::Outfit, 4, "Sport Set", 4).unwrap();

        let order: Vec<(ItemType, ItemId)> = ledger
            .list(1)
            .into_iter()
            .map(|e| (e.item_type, e.item_id))
            .collect();

        assert_eq!(
            order,
            vec![
                (ItemType::Racket, 1),
                (ItemType::Racket, 3),
                (ItemType::Outfit, 4),
                (ItemType::Consumable, 12),
            ]
        );
    }

    #[test]
    fn test_list_unknown_user_is_empty() {
        let ledger = InventoryLedger::new();
        assert!(ledger.list(42).is_empty());
    }

    #[test]
    fn test_concurrent_adds_of_same_item_one_winner() {
        use std::sync::Arc;
        use std::thread;

        let ledger = Arc::new(InventoryLedger::new());

        let mut handles = vec![];
        for _ in 0..10 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || {
                ledger.add_item(1, ItemType::Racket, 3, "Legendary Racket", 1).is_ok()
            }));
        }
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(ledger.list(1).len(), 1);
    }
}
