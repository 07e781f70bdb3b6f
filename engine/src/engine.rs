//! The reward pool engine.

use std::collections::HashMap;

use prorata_asset::AssetTransfer;
use prorata_types::{mul_div, AccountId, REWARD_SCALE};
use tracing::debug;

use crate::error::PoolError;
use crate::state::StakerAccount;

/// The reward pool — owns every staker position and the global reward
/// accumulator, and implements deposit / withdraw / distribute / claim
/// with O(1) cost per call regardless of staker count.
///
/// Distribution is the O(1) broadcast: the injected amount raises the
/// shared `acc_reward_per_share`, and each staker's proportional share
/// materializes lazily the next time their account settles.
///
/// Every operation is atomic. All fallible arithmetic runs before the
/// asset transfer; pulls precede the state commit and pushes follow it,
/// rolling back if custody refuses. A failed call leaves the pool exactly
/// as it was before the call.
#[derive(Clone, Debug)]
pub struct RewardPool {
    owner: AccountId,
    pub(crate) total_staked: u128,
    pub(crate) acc_reward_per_share: u128,
    pub(crate) total_distributed: u128,
    pub(crate) total_claimed: u128,
    pub(crate) stakers: HashMap<AccountId, StakerAccount>,
}

/// Point-in-time totals for reporting.
#[derive(Clone, Debug)]
pub struct PoolSummary {
    pub stakers: u64,
    pub total_staked: u128,
    pub acc_reward_per_share: u128,
    pub total_distributed: u128,
    pub total_claimed: u128,
}

impl RewardPool {
    /// Create an empty pool. Only `owner` may distribute rewards.
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            total_staked: 0,
            acc_reward_per_share: 0,
            total_distributed: 0,
            total_claimed: 0,
            stakers: HashMap::new(),
        }
    }

    /// Stake `amount` for `staker`, pulling it from the staker's external
    /// balance into engine custody.
    ///
    /// The staker's record is created lazily on first deposit. The pull is
    /// the last fallible step; state commits only after it succeeds.
    pub fn deposit(
        &mut self,
        asset: &mut dyn AssetTransfer,
        staker: &AccountId,
        amount: u128,
    ) -> Result<(), PoolError> {
        if amount == 0 {
            return Err(PoolError::ZeroAmount);
        }
        let mut account = self.stakers.get(staker).cloned().unwrap_or_default();
        account
            .settle(self.acc_reward_per_share)
            .ok_or(PoolError::Overflow)?;
        account.principal = account
            .principal
            .checked_add(amount)
            .ok_or(PoolError::Overflow)?;
        account
            .reset_debt(self.acc_reward_per_share)
            .ok_or(PoolError::Overflow)?;
        let total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(PoolError::Overflow)?;

        asset.pull(staker, amount)?;

        self.stakers.insert(staker.clone(), account);
        self.total_staked = total_staked;
        debug!(staker = %staker, amount, total_staked = self.total_staked, "deposit");
        Ok(())
    }

    /// Unstake `amount` and push it back to the staker's external balance.
    ///
    /// Pays out principal only — reward settled during the withdrawal
    /// stays claimable. State commits before the push; a refused push
    /// rolls the commit back.
    pub fn withdraw(
        &mut self,
        asset: &mut dyn AssetTransfer,
        staker: &AccountId,
        amount: u128,
    ) -> Result<(), PoolError> {
        if amount == 0 {
            return Err(PoolError::ZeroAmount);
        }
        let prev = self
            .stakers
            .get(staker)
            .cloned()
            .ok_or(PoolError::InsufficientBalance {
                needed: amount,
                available: 0,
            })?;
        if prev.principal < amount {
            return Err(PoolError::InsufficientBalance {
                needed: amount,
                available: prev.principal,
            });
        }
        let mut account = prev.clone();
        account
            .settle(self.acc_reward_per_share)
            .ok_or(PoolError::Overflow)?;
        account.principal -= amount;
        account
            .reset_debt(self.acc_reward_per_share)
            .ok_or(PoolError::Overflow)?;
        let prev_total = self.total_staked;
        let total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(PoolError::Overflow)?;

        self.stakers.insert(staker.clone(), account);
        self.total_staked = total_staked;

        if let Err(e) = asset.push(staker, amount) {
            self.stakers.insert(staker.clone(), prev);
            self.total_staked = prev_total;
            return Err(e.into());
        }

        self.prune_dormant(staker);
        debug!(staker = %staker, amount, total_staked = self.total_staked, "withdraw");
        Ok(())
    }

    /// Inject `amount` of reward, split pro rata over current stake.
    ///
    /// Owner-only. Rejected outright when nothing is staked — per-share
    /// accrual is undefined at zero stake, and the reward is not pulled.
    pub fn distribute(
        &mut self,
        asset: &mut dyn AssetTransfer,
        caller: &AccountId,
        amount: u128,
    ) -> Result<(), PoolError> {
        if *caller != self.owner {
            return Err(PoolError::Unauthorized {
                caller: caller.clone(),
            });
        }
        if amount == 0 {
            return Err(PoolError::ZeroAmount);
        }
        if self.total_staked == 0 {
            return Err(PoolError::NoStakers);
        }
        let per_share = mul_div(amount, REWARD_SCALE, self.total_staked).ok_or(PoolError::Overflow)?;
        let acc = self
            .acc_reward_per_share
            .checked_add(per_share)
            .ok_or(PoolError::Overflow)?;
        let total_distributed = self
            .total_distributed
            .checked_add(amount)
            .ok_or(PoolError::Overflow)?;

        asset.pull(caller, amount)?;

        self.acc_reward_per_share = acc;
        self.total_distributed = total_distributed;
        debug!(
            amount,
            acc_reward_per_share = self.acc_reward_per_share,
            total_distributed = self.total_distributed,
            "distribute"
        );
        Ok(())
    }

    /// Settle and pay out the staker's accrued reward. Returns the amount
    /// paid; a zero payout performs no asset call.
    ///
    /// `pending_reward` is zeroed only once the push has succeeded.
    pub fn claim_reward(
        &mut self,
        asset: &mut dyn AssetTransfer,
        staker: &AccountId,
    ) -> Result<u128, PoolError> {
        let prev = match self.stakers.get(staker) {
            Some(account) => account.clone(),
            None => return Ok(0),
        };
        let mut account = prev.clone();
        account
            .settle(self.acc_reward_per_share)
            .ok_or(PoolError::Overflow)?;
        let payout = account.pending_reward;
        if payout == 0 {
            self.stakers.insert(staker.clone(), account);
            return Ok(0);
        }
        account.pending_reward = 0;
        let prev_claimed = self.total_claimed;
        let total_claimed = self
            .total_claimed
            .checked_add(payout)
            .ok_or(PoolError::Overflow)?;

        self.stakers.insert(staker.clone(), account);
        self.total_claimed = total_claimed;

        if let Err(e) = asset.push(staker, payout) {
            self.stakers.insert(staker.clone(), prev);
            self.total_claimed = prev_claimed;
            return Err(e.into());
        }

        self.prune_dormant(staker);
        debug!(staker = %staker, payout, total_claimed = self.total_claimed, "claim");
        Ok(payout)
    }

    /// Currently staked principal. Does not settle and does not reflect
    /// unclaimed reward; 0 for unknown accounts.
    pub fn staked_balance(&self, staker: &AccountId) -> u128 {
        self.stakers.get(staker).map_or(0, |a| a.principal)
    }

    /// Settled plus unsettled reward claimable right now, with checked
    /// arithmetic.
    pub fn pending_reward_checked(&self, staker: &AccountId) -> Option<u128> {
        match self.stakers.get(staker) {
            Some(account) => account.claimable(self.acc_reward_per_share),
            None => Some(0),
        }
    }

    /// Settled plus unsettled reward claimable right now, returning 0 on
    /// overflow.
    pub fn pending_reward(&self, staker: &AccountId) -> u128 {
        self.pending_reward_checked(staker).unwrap_or(0)
    }

    /// Sum of every staker's claimable reward — O(n) over stakers.
    /// Consistency-check helper for audits and tests; saturates on
    /// overflow.
    pub fn outstanding_rewards(&self) -> u128 {
        self.stakers
            .values()
            .map(|a| a.claimable(self.acc_reward_per_share).unwrap_or(0))
            .fold(0u128, u128::saturating_add)
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn total_staked(&self) -> u128 {
        self.total_staked
    }

    pub fn acc_reward_per_share(&self) -> u128 {
        self.acc_reward_per_share
    }

    pub fn total_distributed(&self) -> u128 {
        self.total_distributed
    }

    pub fn total_claimed(&self) -> u128 {
        self.total_claimed
    }

    /// Number of live (non-dormant) staker records.
    pub fn staker_count(&self) -> usize {
        self.stakers.len()
    }

    /// Pool summary statistics.
    pub fn summary(&self) -> PoolSummary {
        PoolSummary {
            stakers: self.stakers.len() as u64,
            total_staked: self.total_staked,
            acc_reward_per_share: self.acc_reward_per_share,
            total_distributed: self.total_distributed,
            total_claimed: self.total_claimed,
        }
    }

    /// Drop the record if it holds nothing and is owed nothing. A dormant
    /// record is equivalent to an absent one; it is recreated lazily on
    /// the next deposit.
    fn prune_dormant(&mut self, staker: &AccountId) {
        if self.stakers.get(staker).is_some_and(|a| a.is_dormant()) {
            self.stakers.remove(staker);
        }
    }
}
