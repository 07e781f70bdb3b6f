//! The narrow interface between the engine and the asset holding custody.

use prorata_types::AccountId;
use thiserror::Error;

/// Errors surfaced by an asset implementation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, approved {approved}")]
    InsufficientAllowance { needed: u128, approved: u128 },

    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Moves the underlying fungible asset between participants and engine
/// custody.
///
/// Both operations are synchronous and atomic: on `Err` no balance has
/// moved. `pull` requires the source account to have authorized the
/// engine beforehand (how authorization is granted is the asset's
/// concern — see [`crate::InMemoryAsset::approve`] for the reference
/// implementation).
pub trait AssetTransfer {
    /// Move `amount` from `from`'s balance into engine custody.
    fn pull(&mut self, from: &AccountId, amount: u128) -> Result<(), TransferError>;

    /// Move `amount` from engine custody to `to`'s balance.
    fn push(&mut self, to: &AccountId, amount: u128) -> Result<(), TransferError>;

    /// External balance of an account. Never consulted by the engine's
    /// internal accounting; exists for verification and reporting.
    fn balance_of(&self, id: &AccountId) -> u128;
}
