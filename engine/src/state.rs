//! Per-staker account state.

use prorata_types::REWARD_SCALE;
use serde::{Deserialize, Serialize};

/// A single staker's position.
///
/// `reward_debt` marks the accumulator level already accounted for: it
/// always equals `principal * acc_reward_per_share` as of the last
/// settlement, so the reward accrued since then is the scaled difference.
/// All checked arithmetic returns `None` on overflow; the engine maps
/// that to [`crate::PoolError::Overflow`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakerAccount {
    /// Currently staked amount, withdrawable by this staker alone.
    pub principal: u128,

    /// `principal * acc_reward_per_share` at the last settlement point.
    /// Scaled by `REWARD_SCALE`.
    pub reward_debt: u128,

    /// Reward accrued but not yet claimed (unscaled).
    pub pending_reward: u128,
}

impl StakerAccount {
    /// Fold reward accrued since the last settlement into
    /// `pending_reward` and re-anchor `reward_debt` at the current
    /// accumulator level.
    ///
    /// Must run before any mutation of `principal` so accrual earned
    /// under the old principal is locked in.
    pub fn settle(&mut self, acc_reward_per_share: u128) -> Option<()> {
        let anchored = self.principal.checked_mul(acc_reward_per_share)?;
        let owed = anchored.checked_sub(self.reward_debt)? / REWARD_SCALE;
        let pending = self.pending_reward.checked_add(owed)?;
        self.pending_reward = pending;
        self.reward_debt = anchored;
        Some(())
    }

    /// Re-anchor `reward_debt` after a principal change.
    pub fn reset_debt(&mut self, acc_reward_per_share: u128) -> Option<()> {
        self.reward_debt = self.principal.checked_mul(acc_reward_per_share)?;
        Some(())
    }

    /// Settled plus unsettled reward at the given accumulator level,
    /// without mutating the account.
    pub fn claimable(&self, acc_reward_per_share: u128) -> Option<u128> {
        let anchored = self.principal.checked_mul(acc_reward_per_share)?;
        let unsettled = anchored.checked_sub(self.reward_debt)? / REWARD_SCALE;
        self.pending_reward.checked_add(unsettled)
    }

    /// A dormant account holds nothing and is owed nothing — it is
    /// indistinguishable from an absent one.
    pub fn is_dormant(&self) -> bool {
        self.principal == 0 && self.pending_reward == 0
    }
}
