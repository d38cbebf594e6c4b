//! Shuttle Ledger Library
//! # Overview
//!
//! This library provides the points and inventory ledger backing a casual
//! badminton game, plus a streaming CSV replay tool with sync and async
//! strategies.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (UserAccount, ShopItem, GameRecord, etc.)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Operation coordination and transaction semantics
//!   - [`core::account_store`] - Balances and game statistics
//!   - [`core::catalog`] - Shop item reference data
//!   - [`core::inventory`] - Item ownership and equip slots
//!   - [`core::history`] - Append-only game records
//! - [`io`] - CSV event parsing and leaderboard output
//! - [`strategy`] - Pluggable replay strategies
//!
//! # Ledger Operations
//!
//! The engine exposes the full player lifecycle:
//!
//! - **register**: Create an account with the signup bonus and default gear
//! - **record_game**: Settle a match, crediting points and appending history
//! - **purchase**: Buy a shop item, debiting the spendable balance
//! - **equip**: Move an owned item into its slot
//! - **queries**: balance, stats, history, inventory, shop listing, leaderboard
//!
//! # Invariants
//!
//! - The spendable balance never goes negative
//! - A user owns at most one copy of each item
//! - At most one item per slot is equipped per user
//! - Game records are append-only and immutable

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{Catalog, LeaderboardEntry, LedgerEngine, PlayerStats, PurchaseReceipt};
pub use io::write_leaderboard_csv;
pub use types::{
    GameOutcome, GameRecord, GameSubmission, InventoryEntry, ItemId, ItemType, LedgerError,
    LedgerEvent, ShopItem, UserAccount, UserId,
};
