//! Battle settlement: terminal adjudication and rewards.
//!
//! Settlement itself is triggered by the engine (knockout, round cap, or
//! forfeit); this module holds the terminal vocabulary and the reward
//! computation. `compute_rewards` is a pure function of the result and the
//! caller-supplied context, so the economy layer can audit or replay it.

use serde::{Deserialize, Serialize};

use crate::catalog::CardId;
use crate::core::{PerPlayer, PlayerId};

/// Terminal result of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// One side won; the other lost.
    Victory(PlayerId),
    /// Equal health at the round cap.
    Draw,
}

impl Outcome {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, Outcome::Victory(p) if *p == player)
    }

    /// The winning side, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            Outcome::Victory(p) => Some(*p),
            Outcome::Draw => None,
        }
    }
}

/// Why the battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementReason {
    /// A participant's health reached zero.
    Knockout,
    /// The configured round cap was reached.
    RoundCap,
    /// A participant gave up.
    Forfeit(PlayerId),
}

/// Inputs to the reward computation beyond the result itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardContext {
    /// Opponent difficulty tier (0 = pushover).
    pub difficulty: u32,
    /// Consecutive wins going into this battle.
    pub win_streak: u32,
}

/// A material drop granted by a win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialDrop {
    pub material: CardId,
    pub count: u32,
}

/// What the economy layer receives for one side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub gold: i64,
    pub experience: i64,
    pub reputation: i64,
    pub rating_delta: i64,
    pub materials: Vec<MaterialDrop>,
}

/// The full settlement report handed back to the caller exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub outcome: Outcome,
    pub reason: SettlementReason,
    /// Rewards per side; the caller routes its own side's struct to the
    /// economy system.
    pub rewards: PerPlayer<Rewards>,
}

/// Compute one side's rewards for a settled battle.
///
/// Pure: the same result and context always produce the same rewards.
/// Material drops are a fixed function of difficulty so no RNG is needed.
#[must_use]
pub fn compute_rewards(outcome: Outcome, perspective: PlayerId, ctx: RewardContext) -> Rewards {
    let difficulty = i64::from(ctx.difficulty);
    let streak = i64::from(ctx.win_streak);

    match outcome {
        Outcome::Victory(winner) if winner == perspective => Rewards {
            gold: 50 + 25 * difficulty + 10 * streak,
            experience: 30 + 15 * difficulty,
            reputation: 5 + difficulty,
            rating_delta: 16 + 2 * streak,
            materials: victory_drops(ctx.difficulty),
        },
        Outcome::Victory(_) => Rewards {
            gold: 10,
            experience: 10 + 5 * difficulty,
            reputation: 0,
            rating_delta: -12,
            materials: Vec::new(),
        },
        Outcome::Draw => Rewards {
            gold: 20,
            experience: 15 + 5 * difficulty,
            reputation: 1,
            rating_delta: 0,
            materials: Vec::new(),
        },
    }
}

/// Material drops for a win at the given difficulty tier.
fn victory_drops(difficulty: u32) -> Vec<MaterialDrop> {
    use crate::catalog::registry::cards;

    let mut drops = vec![MaterialDrop {
        material: cards::HOPS,
        count: 1 + difficulty,
    }];
    if difficulty >= 1 {
        drops.push(MaterialDrop {
            material: cards::BARLEY,
            count: difficulty,
        });
    }
    if difficulty >= 2 {
        drops.push(MaterialDrop {
            material: cards::NIGHTCAP_MUSHROOM,
            count: difficulty - 1,
        });
    }
    drops
}
