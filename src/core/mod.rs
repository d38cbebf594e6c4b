//! Core ledger components
//!
//! The four state components (accounts, catalog, inventory, history) and
//! the `LedgerEngine` coordinator that sequences operations across them.

pub mod account_store;
pub mod catalog;
pub mod engine;
pub mod history;
pub mod inventory;

pub use account_store::AccountStore;
pub use catalog::Catalog;
pub use engine::{LeaderboardEntry, LedgerEngine, PlayerStats, PurchaseReceipt, DEFAULT_LEADERBOARD_LIMIT};
pub use history::{GameHistory, DEFAULT_HISTORY_LIMIT, STREAK_WINDOW};
pub use inventory::{InventoryLedger, DEFAULT_GEAR};
