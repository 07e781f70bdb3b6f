//! TOML scenario definitions and the replay loop.
//!
//! A scenario names the pool owner, seeds external balances and
//! allowances, and lists the operations to replay in order. Any
//! operation failure aborts the run — scenarios describe sequences that
//! are expected to succeed end to end.

use std::collections::BTreeMap;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use prorata_asset::{AssetTransfer, InMemoryAsset};
use prorata_engine::{PoolSummary, RewardPool};
use prorata_types::AccountId;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// The account allowed to distribute rewards.
    pub owner: String,

    /// Initial external balances, minted before any operation runs.
    /// TOML integers are 64-bit; amounts widen to `u128` at the engine
    /// boundary.
    #[serde(default)]
    pub balances: BTreeMap<String, u64>,

    /// Pull authorizations granted to the pool before any operation runs.
    #[serde(default)]
    pub approvals: BTreeMap<String, u64>,

    /// Operations, replayed in order.
    #[serde(default, rename = "op")]
    pub ops: Vec<Op>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Op {
    Deposit { account: String, amount: u64 },
    Withdraw { account: String, amount: u64 },
    Distribute { amount: u64 },
    Claim { account: String },
}

/// Final state of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub summary: PoolSummary,
    /// Final external balance of every account the scenario touched.
    pub balances: BTreeMap<String, u128>,
    pub custody: u128,
    pub outstanding: u128,
}

/// Replay a scenario from a fresh pool and asset.
pub fn run(scenario: &Scenario) -> anyhow::Result<RunReport> {
    let owner = AccountId::new(scenario.owner.as_str());
    let mut pool = RewardPool::new(owner.clone());
    let mut asset = InMemoryAsset::new();

    for (account, amount) in &scenario.balances {
        asset.mint(&AccountId::new(account.as_str()), u128::from(*amount));
    }
    for (account, amount) in &scenario.approvals {
        asset.approve(&AccountId::new(account.as_str()), u128::from(*amount));
    }

    for (index, op) in scenario.ops.iter().enumerate() {
        match op {
            Op::Deposit { account, amount } => {
                info!(op = index, account = %account, amount, "deposit");
                pool.deposit(&mut asset, &AccountId::new(account.as_str()), u128::from(*amount))
                    .with_context(|| format!("op {index}: deposit {amount} for {account}"))?;
            }
            Op::Withdraw { account, amount } => {
                info!(op = index, account = %account, amount, "withdraw");
                pool.withdraw(&mut asset, &AccountId::new(account.as_str()), u128::from(*amount))
                    .with_context(|| format!("op {index}: withdraw {amount} for {account}"))?;
            }
            Op::Distribute { amount } => {
                info!(op = index, amount, "distribute");
                pool.distribute(&mut asset, &owner, u128::from(*amount))
                    .with_context(|| format!("op {index}: distribute {amount}"))?;
            }
            Op::Claim { account } => {
                let paid = pool
                    .claim_reward(&mut asset, &AccountId::new(account.as_str()))
                    .with_context(|| format!("op {index}: claim for {account}"))?;
                info!(op = index, account = %account, paid, "claim");
            }
        }
    }

    let mut balances = BTreeMap::new();
    for account in scenario.accounts() {
        let balance = asset.balance_of(&AccountId::new(account.as_str()));
        balances.insert(account, balance);
    }

    Ok(RunReport {
        summary: pool.summary(),
        balances,
        custody: asset.custody(),
        outstanding: pool.outstanding_rewards(),
    })
}

impl Scenario {
    /// Every account the scenario mentions, owner included.
    fn accounts(&self) -> Vec<String> {
        let mut accounts: Vec<String> = self.balances.keys().cloned().collect();
        accounts.push(self.owner.clone());
        for op in &self.ops {
            match op {
                Op::Deposit { account, .. }
                | Op::Withdraw { account, .. }
                | Op::Claim { account } => accounts.push(account.clone()),
                Op::Distribute { .. } => {}
            }
        }
        accounts.sort();
        accounts.dedup();
        accounts
    }
}
