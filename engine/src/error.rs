//! Engine errors.

use prorata_asset::TransferError;
use prorata_types::AccountId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("insufficient stake: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("account {caller} is not authorized to distribute rewards")]
    Unauthorized { caller: AccountId },

    #[error("cannot distribute rewards with zero total stake")]
    NoStakers,

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("arithmetic overflow in reward computation")]
    Overflow,

    #[error("asset transfer failed: {0}")]
    Transfer(#[from] TransferError),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}
