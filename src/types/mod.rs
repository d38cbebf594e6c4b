//! Core domain types for the shuttle ledger

pub mod error;
pub mod event;
pub mod game;
pub mod inventory;
pub mod item;
pub mod user;

pub use error::LedgerError;
pub use event::LedgerEvent;
pub use game::{BalanceUpdate, GameOutcome, GameRecord, GameSubmission};
pub use inventory::InventoryEntry;
pub use item::{ItemEffect, ItemId, ItemType, ShopItem, StatBonuses, StatName};
pub use user::{UserAccount, UserId, SIGNUP_BONUS};
