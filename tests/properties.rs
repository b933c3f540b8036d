//! Randomized property tests for the core invariants.
//!
//! - Conservation: cards are never created or destroyed by zone ops; each
//!   pool's 4-zone sum only moves when a steal crosses pools, and the
//!   global sum never moves at all.
//! - Health bounds: health stays within [0, max] under any damage/heal/
//!   shield sequence.
//! - Shield absorption: the exact split between shield and health.

use proptest::prelude::*;

use tavern_duel::{
    ActorKind, BattleRng, CardPool, InstanceId, Participant, PerPlayer, PlayerId,
};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

/// Zone operations a battle can drive a pair of pools through.
#[derive(Clone, Debug)]
enum PoolOp {
    Draw { player: u8, count: usize },
    DiscardFirst { player: u8 },
    Reshuffle { player: u8 },
    Steal { donor: u8 },
}

fn pool_op() -> impl Strategy<Value = PoolOp> {
    prop_oneof![
        (0u8..2, 0usize..5).prop_map(|(player, count)| PoolOp::Draw { player, count }),
        (0u8..2).prop_map(|player| PoolOp::DiscardFirst { player }),
        (0u8..2).prop_map(|player| PoolOp::Reshuffle { player }),
        (0u8..2).prop_map(|donor| PoolOp::Steal { donor }),
    ]
}

const HAND_LIMIT: usize = 7;
const DECK_SIZE: usize = 12;

fn apply(pools: &mut PerPlayer<CardPool>, rng: &mut BattleRng, op: &PoolOp) {
    match *op {
        PoolOp::Draw { player, count } => {
            pools[PlayerId::new(player)].draw(count, HAND_LIMIT);
        }
        PoolOp::DiscardFirst { player } => {
            let player = PlayerId::new(player);
            if let Some(&first) = pools[player].hand().first() {
                pools[player].discard_from_hand(first).unwrap();
            }
        }
        PoolOp::Reshuffle { player } => {
            let player = PlayerId::new(player);
            pools[player].collect_hand_into_deck();
            pools[player].shuffle(rng);
            pools[player].draw(HAND_LIMIT, HAND_LIMIT);
        }
        PoolOp::Steal { donor } => {
            let donor = PlayerId::new(donor);
            if let Some(taken) = pools[donor].take_random_from_hand(rng) {
                pools[donor.opponent()].receive_into_hand(taken);
            }
        }
    }
}

proptest! {
    /// The 4-zone sum per pool only changes by steals crossing pools, and
    /// the global sum never changes.
    #[test]
    fn conservation_under_zone_ops(seed in any::<u64>(), ops in prop::collection::vec(pool_op(), 1..60)) {
        let mut rng = BattleRng::new(seed);
        let mut pools: PerPlayer<CardPool> = PerPlayer::new(|p| {
            let mut pool = CardPool::new();
            let base = p.index() as u32 * 1000;
            pool.seed_deck((base..base + DECK_SIZE as u32).map(InstanceId::new).collect());
            pool
        });

        let mut expected = [DECK_SIZE, DECK_SIZE];

        for op in &ops {
            let donor_hand_before = match *op {
                PoolOp::Steal { donor } => pools[PlayerId::new(donor)].hand().len(),
                _ => 0,
            };

            apply(&mut pools, &mut rng, op);

            if let PoolOp::Steal { donor } = *op {
                // A steal only moves a card when the donor had one
                if donor_hand_before > 0 {
                    expected[donor as usize] -= 1;
                    expected[1 - donor as usize] += 1;
                }
            }

            for p in PlayerId::both() {
                prop_assert_eq!(pools[p].live_total(), expected[p.index()]);
            }
            prop_assert_eq!(
                pools[P0].live_total() + pools[P1].live_total(),
                2 * DECK_SIZE
            );
        }
    }

    /// Health never leaves [0, max] under arbitrary damage/heal/shield
    /// sequences.
    #[test]
    fn health_stays_in_bounds(
        max_health in 1i32..500,
        ops in prop::collection::vec((0u8..3, 0i32..200), 1..80),
    ) {
        let mut p = Participant::new("Prop", ActorKind::Human, max_health);

        for (kind, amount) in ops {
            match kind {
                0 => {
                    p.take_damage(amount);
                }
                1 => {
                    p.heal(amount);
                }
                _ => p.add_shield(amount),
            }
            prop_assert!(p.health() >= 0);
            prop_assert!(p.health() <= p.max_health());
            prop_assert!(p.shield() >= 0);
        }
    }

    /// Shield absorption splits damage exactly: D <= S leaves health alone
    /// and S - D shield; D > S zeroes the shield and costs D - S health.
    #[test]
    fn shield_absorbs_exactly(shield in 0i32..100, damage in 0i32..200) {
        let mut p = Participant::new("Prop", ActorKind::Human, 1000);
        p.add_shield(shield);

        let breakdown = p.take_damage(damage);

        if damage <= shield {
            prop_assert_eq!(p.health(), 1000);
            prop_assert_eq!(p.shield(), shield - damage);
            prop_assert_eq!(breakdown.absorbed, damage);
            prop_assert_eq!(breakdown.health_lost, 0);
        } else {
            prop_assert_eq!(p.shield(), 0);
            prop_assert_eq!(p.health(), 1000 - (damage - shield));
            prop_assert_eq!(breakdown.absorbed, shield);
            prop_assert_eq!(breakdown.health_lost, damage - shield);
        }
    }
}
