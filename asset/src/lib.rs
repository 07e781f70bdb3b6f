//! Asset custody boundary for the prorata staking ledger.
//!
//! The accounting engine never touches token balances directly — all
//! custody moves go through the [`AssetTransfer`] trait. Production
//! deployments implement it against whatever holds the real balances;
//! [`InMemoryAsset`] is the reference implementation used by the CLI
//! simulator and the test suites.

pub mod memory;
pub mod transfer;

pub use memory::InMemoryAsset;
pub use transfer::{AssetTransfer, TransferError};
