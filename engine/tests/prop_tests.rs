use proptest::prelude::*;

use prorata_asset::{AssetTransfer, InMemoryAsset};
use prorata_engine::RewardPool;
use prorata_types::AccountId;

/// Pool with two funded stakers and a funded owner.
fn two_staker_pool() -> (RewardPool, InMemoryAsset, AccountId, AccountId, AccountId) {
    let owner = AccountId::new("owner");
    let alice = AccountId::new("alice");
    let bob = AccountId::new("bob");
    let pool = RewardPool::new(owner.clone());
    let mut asset = InMemoryAsset::new();
    for id in [&alice, &bob] {
        asset.mint(id, 1_000_000);
        asset.approve(id, 1_000_000);
    }
    asset.mint(&owner, 100_000_000);
    asset.approve(&owner, 100_000_000);
    (pool, asset, owner, alice, bob)
}

proptest! {
    /// A distribution splits reward in proportion to stake, short of the
    /// exact rational share by at most the bounded truncation dust.
    #[test]
    fn distribution_is_proportional_up_to_dust(
        principal_a in 1u128..1_000_000,
        principal_b in 1u128..1_000_000,
        reward in 1u128..100_000_000,
    ) {
        let (mut pool, mut asset, owner, alice, bob) = two_staker_pool();
        pool.deposit(&mut asset, &alice, principal_a).unwrap();
        pool.deposit(&mut asset, &bob, principal_b).unwrap();
        pool.distribute(&mut asset, &owner, reward).unwrap();

        let total = principal_a + principal_b;
        for (staker, principal) in [(&alice, principal_a), (&bob, principal_b)] {
            let share = pool.pending_reward(staker);
            let exact = principal * reward / total;
            prop_assert!(share <= exact, "share {} exceeds exact {}", share, exact);
            prop_assert!(exact - share <= 2, "share {} trails exact {} by more than dust", share, exact);
        }
        prop_assert!(pool.pending_reward(&alice) + pool.pending_reward(&bob) <= reward);
    }

    /// Claimable reward never exceeds what was distributed and not yet
    /// claimed, and asset custody always accounts for stake plus
    /// undisbursed reward — across arbitrary operation sequences.
    #[test]
    fn conservation_over_random_operations(
        ops in prop::collection::vec((0u8..4, 1u128..10_000, any::<bool>()), 1..50),
    ) {
        let (mut pool, mut asset, owner, alice, bob) = two_staker_pool();
        for (op, amount, pick_alice) in ops {
            let staker = if pick_alice { &alice } else { &bob };
            let _ = match op {
                0 => pool.deposit(&mut asset, staker, amount),
                1 => pool.withdraw(&mut asset, staker, amount),
                2 => pool.distribute(&mut asset, &owner, amount),
                _ => pool.claim_reward(&mut asset, staker).map(|_| ()),
            };
        }

        let undisbursed = pool.total_distributed() - pool.total_claimed();
        prop_assert_eq!(
            asset.custody(),
            pool.total_staked() + undisbursed,
            "custody must equal stake plus undisbursed reward"
        );
        prop_assert!(pool.outstanding_rewards() <= undisbursed);
        prop_assert_eq!(
            pool.staked_balance(&alice) + pool.staked_balance(&bob),
            pool.total_staked()
        );
    }

    /// Settlement is idempotent: once a claim has paid out, an immediate
    /// second claim pays nothing.
    #[test]
    fn repeated_claim_pays_once(
        principal in 1u128..1_000_000,
        reward in 1u128..1_000_000,
    ) {
        let (mut pool, mut asset, owner, alice, _) = two_staker_pool();
        pool.deposit(&mut asset, &alice, principal).unwrap();
        pool.distribute(&mut asset, &owner, reward).unwrap();

        let first = pool.claim_reward(&mut asset, &alice).unwrap();
        let second = pool.claim_reward(&mut asset, &alice).unwrap();
        prop_assert!(first <= reward);
        prop_assert_eq!(second, 0);
    }

    /// Deposit then withdraw with no intervening distribution restores
    /// the external balance exactly and leaves nothing owed.
    #[test]
    fn deposit_withdraw_round_trip(amount in 1u128..1_000_000) {
        let (mut pool, mut asset, _, alice, _) = two_staker_pool();
        let before = asset.balance_of(&alice);

        pool.deposit(&mut asset, &alice, amount).unwrap();
        pool.withdraw(&mut asset, &alice, amount).unwrap();

        prop_assert_eq!(asset.balance_of(&alice), before);
        prop_assert_eq!(pool.pending_reward(&alice), 0);
        prop_assert_eq!(pool.staker_count(), 0);
        prop_assert_eq!(asset.custody(), 0);
    }

    /// The per-share accumulator never decreases.
    #[test]
    fn accumulator_is_monotonic(
        rewards in prop::collection::vec(1u128..100_000, 1..20),
    ) {
        let (mut pool, mut asset, owner, alice, _) = two_staker_pool();
        pool.deposit(&mut asset, &alice, 1000).unwrap();

        let mut last = pool.acc_reward_per_share();
        for reward in rewards {
            pool.distribute(&mut asset, &owner, reward).unwrap();
            let acc = pool.acc_reward_per_share();
            prop_assert!(acc >= last, "accumulator decreased: {} -> {}", last, acc);
            last = acc;
        }
    }

    /// Stake changes between distributions re-weight later rewards but
    /// never disturb reward already accrued.
    #[test]
    fn accrued_reward_survives_principal_changes(
        principal in 2u128..1_000_000,
        reward in 1u128..1_000_000,
        withdraw_part in 1u128..1_000_000,
    ) {
        let (mut pool, mut asset, owner, alice, _) = two_staker_pool();
        let withdraw_part = withdraw_part % principal + 1;
        pool.deposit(&mut asset, &alice, principal).unwrap();
        pool.distribute(&mut asset, &owner, reward).unwrap();

        let accrued = pool.pending_reward(&alice);
        pool.withdraw(&mut asset, &alice, withdraw_part).unwrap();
        prop_assert_eq!(pool.pending_reward(&alice), accrued);
    }
}
