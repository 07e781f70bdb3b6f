//! End-to-end trace of a two-staker lifecycle: balances shift between
//! distributions, and every payout follows stake held at distribution
//! time. All expected numbers derive from the accrual formula by hand.

use prorata_asset::{AssetTransfer, InMemoryAsset};
use prorata_engine::{PoolSnapshot, RewardPool};
use prorata_types::AccountId;

struct Trace {
    pool: RewardPool,
    asset: InMemoryAsset,
    owner: AccountId,
    alice: AccountId,
    bob: AccountId,
}

fn setup() -> Trace {
    let owner = AccountId::new("owner");
    let alice = AccountId::new("alice");
    let bob = AccountId::new("bob");
    let pool = RewardPool::new(owner.clone());
    let mut asset = InMemoryAsset::new();
    for id in [&alice, &bob] {
        asset.mint(id, 2000);
        asset.approve(id, 2000);
    }
    asset.mint(&owner, 1500);
    asset.approve(&owner, 1500);
    Trace {
        pool,
        asset,
        owner,
        alice,
        bob,
    }
}

#[test]
fn two_staker_lifecycle() {
    let Trace {
        mut pool,
        mut asset,
        owner,
        alice,
        bob,
    } = setup();

    // Both stakers enter with 1000.
    pool.deposit(&mut asset, &alice, 1000).unwrap();
    pool.deposit(&mut asset, &bob, 1000).unwrap();
    assert_eq!(pool.staked_balance(&alice), 1000);
    assert_eq!(pool.staked_balance(&bob), 1000);
    assert_eq!(asset.balance_of(&alice), 1000);
    assert_eq!(asset.balance_of(&bob), 1000);

    // 1000 distributed over a 1000:1000 split: 500 each.
    pool.distribute(&mut asset, &owner, 1000).unwrap();
    assert_eq!(pool.pending_reward(&alice), 500);
    assert_eq!(pool.pending_reward(&bob), 500);

    // Alice adds 500; Bob pulls 500 out. The first distribution's
    // accrual is already locked in for both.
    pool.deposit(&mut asset, &alice, 500).unwrap();
    assert_eq!(pool.staked_balance(&alice), 1500);
    assert_eq!(asset.balance_of(&alice), 500);

    pool.withdraw(&mut asset, &bob, 500).unwrap();
    assert_eq!(pool.staked_balance(&bob), 500);
    assert_eq!(asset.balance_of(&bob), 1500);

    // 500 distributed over a 1500:500 split: 375 to 125.
    pool.distribute(&mut asset, &owner, 500).unwrap();
    assert_eq!(pool.pending_reward(&alice), 875);
    assert_eq!(pool.pending_reward(&bob), 625);

    // Alice claims everything she has accrued.
    let paid = pool.claim_reward(&mut asset, &alice).unwrap();
    assert_eq!(paid, 875);
    assert_eq!(asset.balance_of(&alice), 1375);

    // Bob exits his principal; his accrued reward stays claimable.
    pool.withdraw(&mut asset, &bob, 500).unwrap();
    assert_eq!(asset.balance_of(&bob), 2000);
    assert_eq!(pool.pending_reward(&bob), 625);

    let paid = pool.claim_reward(&mut asset, &bob).unwrap();
    assert_eq!(paid, 625);
    assert_eq!(asset.balance_of(&bob), 2625);

    // Alice's 1500 stake is all that remains in custody; this split was
    // exact, so no dust is stranded.
    assert_eq!(pool.total_staked(), 1500);
    assert_eq!(pool.total_distributed(), 1500);
    assert_eq!(pool.total_claimed(), 1500);
    assert_eq!(asset.custody(), 1500);
    assert_eq!(pool.outstanding_rewards(), 0);
    assert_eq!(pool.staker_count(), 1);
}

#[test]
fn lifecycle_survives_snapshot_restore_midway() {
    let Trace {
        mut pool,
        mut asset,
        owner,
        alice,
        bob,
    } = setup();

    pool.deposit(&mut asset, &alice, 1000).unwrap();
    pool.deposit(&mut asset, &bob, 1000).unwrap();
    pool.distribute(&mut asset, &owner, 1000).unwrap();
    pool.deposit(&mut asset, &alice, 500).unwrap();
    pool.withdraw(&mut asset, &bob, 500).unwrap();

    // Freeze the pool mid-trace and bring it back from bytes.
    let bytes = pool.snapshot().to_bytes().unwrap();
    let snapshot = PoolSnapshot::from_bytes(&bytes).unwrap();
    let mut pool = RewardPool::restore(snapshot).unwrap();

    pool.distribute(&mut asset, &owner, 500).unwrap();
    pool.claim_reward(&mut asset, &alice).unwrap();
    pool.withdraw(&mut asset, &bob, 500).unwrap();
    pool.claim_reward(&mut asset, &bob).unwrap();

    assert_eq!(asset.balance_of(&alice), 1375);
    assert_eq!(asset.balance_of(&bob), 2625);
    assert_eq!(pool.total_staked(), 1500);
    assert_eq!(pool.outstanding_rewards(), 0);
}
