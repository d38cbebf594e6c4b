//! Thread-safe account state management
//!
//! This module provides the `AccountStore` struct, which maintains every
//! user's balances and game statistics using concurrent data structures.
//!
//! # Design
//!
//! The store uses `DashMap` (a concurrent HashMap) for per-user sharded
//! locking: operations on different users proceed in parallel, while the
//! entry lock serializes mutations of a single account. Compound
//! read-check-write sequences that span more than one component (purchase,
//! game recording) take the coordinator's per-user operation lock on top of
//! this; the store alone guarantees that each individual mutation is atomic.
//!
//! Accounts are only ever created through `create`: there is no
//! create-on-first-use, because registration is an explicit bootstrap step
//! that also grants default inventory.

use crate::types::{LedgerError, UserAccount, UserId};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe store of user accounts
///
/// Keeps the account map and a username uniqueness index in step. All
/// methods are safe to call from multiple threads concurrently.
#[derive(Debug)]
pub struct AccountStore {
    /// Account states keyed by user id
    accounts: DashMap<UserId, UserAccount>,

    /// Username uniqueness index, mapping username to user id
    usernames: DashMap<String, UserId>,

    /// Next user id to hand out
    next_id: AtomicU64,
}

impl AccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            usernames: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a new account with the signup bonus
    ///
    /// Fails with `UsernameTaken` if the username is already registered.
    /// The username index entry is inserted first and acts as the claim:
    /// two concurrent registrations of the same name race on the index and
    /// exactly one wins.
    pub fn create(&self, username: &str) -> Result<UserAccount, LedgerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let claimed = {
            let mut taken = true;
            self.usernames.entry(username.to_string()).or_insert_with(|| {
                taken = false;
                id
            });
            !taken
        };
        if !claimed {
            return Err(LedgerError::UsernameTaken {
                username: username.to_string(),
            });
        }

        let account = UserAccount::new(id, username);
        self.accounts.insert(id, account.clone());
        Ok(account)
    }

    /// Get a snapshot of an account
    ///
    /// The returned value is a clone taken under the entry lock; concurrent
    /// modifications after the call are not reflected in it.
    pub fn get(&self, user: UserId) -> Result<UserAccount, LedgerError> {
        self.accounts
            .get(&user)
            .map(|entry| entry.clone())
            .ok_or_else(|| LedgerError::user_not_found(user))
    }

    /// Resolve a username to its user id
    pub fn lookup(&self, username: &str) -> Option<UserId> {
        self.usernames.get(username).map(|entry| *entry)
    }

    /// Update an account using a closure
    ///
    /// The closure runs while the entry lock is held, so the mutation is
    /// atomic: no other thread can observe a partially-updated account.
    /// Fails with `UserNotFound` if no account exists; closure errors are
    /// propagated with the account left exactly as the closure left it, so
    /// closures must not mutate before their last fallible check.
    pub fn update<F>(&self, user: UserId, f: F) -> Result<(), LedgerError>
    where
        F: FnOnce(&mut UserAccount) -> Result<(), LedgerError>,
    {
        let mut entry = self
            .accounts
            .get_mut(&user)
            .ok_or_else(|| LedgerError::user_not_found(user))?;
        f(entry.value_mut())
    }

    /// Apply a game-result delta to an account
    ///
    /// Atomically adds `points_delta` to both `current_points` and
    /// `total_points`, increments `games_played`, and increments `games_won`
    /// when `won` is set. Uses checked arithmetic; on overflow nothing is
    /// applied. Returns the post-update snapshot.
    pub fn adjust_balance(
        &self,
        user: UserId,
        points_delta: i64,
        won: bool,
    ) -> Result<UserAccount, LedgerError> {
        let mut entry = self
            .accounts
            .get_mut(&user)
            .ok_or_else(|| LedgerError::user_not_found(user))?;
        let account = entry.value_mut();

        let new_current = account
            .current_points
            .checked_add(points_delta)
            .ok_or_else(|| LedgerError::balance_overflow("adjust_balance", user))?;
        let new_total = account
            .total_points
            .checked_add(points_delta)
            .ok_or_else(|| LedgerError::balance_overflow("adjust_balance", user))?;

        account.current_points = new_current;
        account.total_points = new_total;
        account.games_played += 1;
        if won {
            account.games_won += 1;
        }

        Ok(account.clone())
    }

    /// Debit points from an account
    ///
    /// Atomically subtracts `amount` from `current_points` only if the
    /// balance covers it; fails with `InsufficientPoints` otherwise without
    /// mutating anything. `total_points` is untouched: lifetime earnings are
    /// not reduced by spending. Returns the new spendable balance.
    pub fn debit(&self, user: UserId, amount: i64) -> Result<i64, LedgerError> {
        let mut entry = self
            .accounts
            .get_mut(&user)
            .ok_or_else(|| LedgerError::user_not_found(user))?;
        let account = entry.value_mut();

        if account.current_points < amount {
            return Err(LedgerError::insufficient_points(
                user,
                account.current_points,
                amount,
            ));
        }

        account.current_points -= amount;
        Ok(account.current_points)
    }

    /// Credit points back to an account
    ///
    /// Compensation path for a purchase whose inventory insert failed after
    /// the debit already committed; restores `current_points` only.
    pub fn credit(&self, user: UserId, amount: i64) -> Result<i64, LedgerError> {
        let mut entry = self
            .accounts
            .get_mut(&user)
            .ok_or_else(|| LedgerError::user_not_found(user))?;
        let account = entry.value_mut();

        account.current_points = account
            .current_points
            .checked_add(amount)
            .ok_or_else(|| LedgerError::balance_overflow("credit", user))?;
        Ok(account.current_points)
    }

    /// Get a snapshot of all accounts
    ///
    /// Returned in arbitrary map order; callers sort as needed.
    pub fn all_accounts(&self) -> Vec<UserAccount> {
        self.accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}
