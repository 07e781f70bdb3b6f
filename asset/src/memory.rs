//! In-memory fungible token with allowance-gated custody transfers.

use std::collections::HashMap;

use prorata_types::AccountId;
use serde::{Deserialize, Serialize};

use crate::transfer::{AssetTransfer, TransferError};

/// A complete in-memory asset: per-account balances, per-account
/// allowances granted to the engine, and an explicit engine custody
/// counter.
///
/// Mirrors the usual approve-then-pull token flow: a participant first
/// calls [`approve`](Self::approve), then the engine may `pull` up to the
/// approved amount. Pulls consume allowance; pushes draw from custody.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryAsset {
    balances: HashMap<AccountId, u128>,
    allowances: HashMap<AccountId, u128>,
    custody: u128,
}

impl InMemoryAsset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to an account out of thin air.
    pub fn mint(&mut self, to: &AccountId, amount: u128) {
        let balance = self.balances.entry(to.clone()).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Authorize the engine to pull up to `amount` from `from`.
    /// Overwrites any previous authorization.
    pub fn approve(&mut self, from: &AccountId, amount: u128) {
        self.allowances.insert(from.clone(), amount);
    }

    /// Remaining authorization for an account.
    pub fn allowance(&self, from: &AccountId) -> u128 {
        self.allowances.get(from).copied().unwrap_or(0)
    }

    /// Total asset currently held in engine custody.
    pub fn custody(&self) -> u128 {
        self.custody
    }
}

impl AssetTransfer for InMemoryAsset {
    fn pull(&mut self, from: &AccountId, amount: u128) -> Result<(), TransferError> {
        let approved = self.allowance(from);
        if approved < amount {
            return Err(TransferError::InsufficientAllowance {
                needed: amount,
                approved,
            });
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(TransferError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        let custody = self
            .custody
            .checked_add(amount)
            .ok_or_else(|| TransferError::Rejected("custody overflow".into()))?;
        self.balances.insert(from.clone(), available - amount);
        self.allowances.insert(from.clone(), approved - amount);
        self.custody = custody;
        Ok(())
    }

    fn push(&mut self, to: &AccountId, amount: u128) -> Result<(), TransferError> {
        if self.custody < amount {
            return Err(TransferError::InsufficientFunds {
                needed: amount,
                available: self.custody,
            });
        }
        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or_else(|| TransferError::Rejected("balance overflow".into()))?;
        self.balances.insert(to.clone(), balance);
        self.custody -= amount;
        Ok(())
    }

    fn balance_of(&self, id: &AccountId) -> u128 {
        self.balances.get(id).copied().unwrap_or(0)
    }
}
