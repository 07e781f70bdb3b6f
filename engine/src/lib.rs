//! Proportional reward-distribution accounting engine.
//!
//! Participants deposit a fungible asset and accrue a share of
//! externally-injected rewards in proportion to their stake at the moment
//! of each distribution. The hard requirement is O(1) cost per operation
//! regardless of staker count: a distribution raises the single global
//! `acc_reward_per_share` accumulator, and each staker's share
//! materializes lazily the next time their account settles.
//!
//! This crate handles:
//! - Deposit / withdraw of staked principal
//! - Owner-only reward distribution (the O(1) broadcast)
//! - Reward settlement and claiming
//! - Snapshot persistence of the full pool state

pub mod engine;
pub mod error;
pub mod snapshot;
pub mod state;

pub use engine::{PoolSummary, RewardPool};
pub use error::PoolError;
pub use snapshot::{PoolSnapshot, StakerEntry};
pub use state::StakerAccount;
