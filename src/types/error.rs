//! Error types for the shuttle ledger
//!
//! This module defines the business-outcome taxonomy surfaced by every ledger
//! operation. All variants except `Storage` are expected outcomes a caller is
//! meant to branch on ("can't afford" vs "already own" vs "item doesn't
//! exist"); `Storage` wraps failures from the persistence layer and always
//! implies the enclosing operation was fully rolled back.
//!
//! Authentication failures are not represented here: credential verification
//! happens in the external identity resolver before the ledger is invoked.

use super::item::{ItemId, ItemType};
use super::user::UserId;
use thiserror::Error;

/// Main error type for the shuttle ledger
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No account exists for the given user id
    #[error("User {user} not found")]
    UserNotFound {
        /// The user id that was not found
        user: UserId,
    },

    /// Registration attempted with a username that is already taken
    #[error("Username '{username}' is already taken")]
    UsernameTaken {
        /// The conflicting username
        username: String,
    },

    /// Item absent from the catalog or marked unavailable
    ///
    /// Also reported when a purchase names the right id but the wrong item
    /// type; unavailable and mismatched items are indistinguishable from
    /// missing ones on purpose.
    #[error("Item {item} not found or not available")]
    ItemNotFound {
        /// The item id that could not be resolved
        item: ItemId,
    },

    /// Purchase rejected because the user already owns the item
    #[error("User {user} already owns {item_type} item {item}")]
    AlreadyOwned {
        /// User attempting the purchase
        user: UserId,
        /// The owned item id
        item: ItemId,
        /// The owned item's slot
        item_type: ItemType,
    },

    /// Purchase rejected because the balance does not cover the price
    ///
    /// The account state is unchanged: no partial debit ever happens.
    #[error("Insufficient points for user {user}: balance {balance}, price {price}")]
    InsufficientPoints {
        /// User attempting the purchase
        user: UserId,
        /// Spendable balance at the time of the attempt
        balance: i64,
        /// Price of the requested item
        price: i64,
    },

    /// Equip rejected because the user has no matching ownership entry
    #[error("User {user} does not own {item_type} item {item}")]
    NotOwned {
        /// User attempting the equip
        user: UserId,
        /// The item id that is not in the inventory
        item: ItemId,
        /// The requested slot
        item_type: ItemType,
    },

    /// Game submission carried a negative points award
    ///
    /// Negative awards are disallowed by contract; the record is rejected
    /// before anything is persisted.
    #[error("Invalid points award {points}: must be non-negative")]
    InvalidPoints {
        /// The offending award
        points: i64,
    },

    /// Arithmetic overflow would corrupt a balance
    ///
    /// The operation is rejected and the account left untouched.
    #[error("Balance overflow in {operation} for user {user}")]
    BalanceOverflow {
        /// Operation that would overflow
        operation: String,
        /// Affected user
        user: UserId,
    },

    /// Failure reported by the persistence layer
    ///
    /// The enclosing transaction is rolled back; the ledger does not retry.
    #[error("Storage failure: {message}")]
    Storage {
        /// Description of the underlying failure
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Storage {
            message: error.to_string(),
        }
    }
}

// Helper constructors for the variants built in more than one place

impl LedgerError {
    /// Create a UserNotFound error
    pub fn user_not_found(user: UserId) -> Self {
        LedgerError::UserNotFound { user }
    }

    /// Create an ItemNotFound error
    pub fn item_not_found(item: ItemId) -> Self {
        LedgerError::ItemNotFound { item }
    }

    /// Create an AlreadyOwned error
    pub fn already_owned(user: UserId, item: ItemId, item_type: ItemType) -> Self {
        LedgerError::AlreadyOwned {
            user,
            item,
            item_type,
        }
    }

    /// Create an InsufficientPoints error
    pub fn insufficient_points(user: UserId, balance: i64, price: i64) -> Self {
        LedgerError::InsufficientPoints {
            user,
            balance,
            price,
        }
    }

    /// Create a NotOwned error
    pub fn not_owned(user: UserId, item: ItemId, item_type: ItemType) -> Self {
        LedgerError::NotOwned {
            user,
            item,
            item_type,
        }
    }

    /// Create a BalanceOverflow error
    pub fn balance_overflow(operation: &str, user: UserId) -> Self {
        LedgerError::BalanceOverflow {
            operation: operation.to_string(),
            user,
        }
    }
}
