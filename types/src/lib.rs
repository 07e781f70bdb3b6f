//! Fundamental types for the prorata staking ledger.
//!
//! This crate defines the types shared by every other crate in the
//! workspace: account identities and the fixed-point arithmetic used by
//! the reward accumulator.

pub mod account;
pub mod amount;

pub use account::AccountId;
pub use amount::{mul_div, REWARD_SCALE};
