//! Pool snapshots — capture the full engine state at a point in time.
//!
//! A snapshot carries the owner, the global accumulator and lifetime
//! counters, and every staker record. Restoring one rebuilds an engine
//! that behaves identically to the captured one.

use serde::{Deserialize, Serialize};

use prorata_types::AccountId;

use crate::engine::RewardPool;
use crate::error::PoolError;
use crate::state::StakerAccount;

/// Snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// One staker record in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakerEntry {
    pub id: AccountId,
    pub account: StakerAccount,
}

/// The full pool state, serializable via bincode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub version: u32,
    pub owner: AccountId,
    pub total_staked: u128,
    pub acc_reward_per_share: u128,
    pub total_distributed: u128,
    pub total_claimed: u128,
    /// Staker records sorted by id, so identical pools serialize to
    /// identical bytes.
    pub stakers: Vec<StakerEntry>,
}

impl PoolSnapshot {
    /// Serialize the snapshot to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PoolError> {
        bincode::serialize(self).map_err(|e| PoolError::Snapshot(e.to_string()))
    }

    /// Deserialize a snapshot from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PoolError> {
        bincode::deserialize(bytes).map_err(|e| PoolError::Snapshot(e.to_string()))
    }

    /// Number of staker records captured.
    pub fn staker_count(&self) -> usize {
        self.stakers.len()
    }
}

impl RewardPool {
    /// Capture the current pool state.
    pub fn snapshot(&self) -> PoolSnapshot {
        let mut stakers: Vec<StakerEntry> = self
            .stakers
            .iter()
            .map(|(id, account)| StakerEntry {
                id: id.clone(),
                account: account.clone(),
            })
            .collect();
        stakers.sort_by(|a, b| a.id.cmp(&b.id));
        PoolSnapshot {
            version: SNAPSHOT_VERSION,
            owner: self.owner().clone(),
            total_staked: self.total_staked,
            acc_reward_per_share: self.acc_reward_per_share,
            total_distributed: self.total_distributed,
            total_claimed: self.total_claimed,
            stakers,
        }
    }

    /// Rebuild a pool from a snapshot.
    ///
    /// Rejects snapshots whose `total_staked` disagrees with the sum of
    /// the captured principals — that invariant must hold for every live
    /// pool.
    pub fn restore(snapshot: PoolSnapshot) -> Result<Self, PoolError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PoolError::Snapshot(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        let mut principal_sum: u128 = 0;
        for entry in &snapshot.stakers {
            principal_sum = principal_sum
                .checked_add(entry.account.principal)
                .ok_or(PoolError::Overflow)?;
        }
        if principal_sum != snapshot.total_staked {
            return Err(PoolError::Snapshot(format!(
                "total_staked {} does not match principal sum {}",
                snapshot.total_staked, principal_sum
            )));
        }

        let mut pool = RewardPool::new(snapshot.owner);
        pool.total_staked = snapshot.total_staked;
        pool.acc_reward_per_share = snapshot.acc_reward_per_share;
        pool.total_distributed = snapshot.total_distributed;
        pool.total_claimed = snapshot.total_claimed;
        pool.stakers = snapshot
            .stakers
            .into_iter()
            .map(|entry| (entry.id, entry.account))
            .collect();
        Ok(pool)
    }
}
