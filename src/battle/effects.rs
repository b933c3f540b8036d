//! Effect resolution - executing card effects on battle state.
//!
//! Every effect in the game is a variant of [`EffectSpec`], and this module
//! is the only place that interprets one. Each `resolve` call is a single
//! atomic mutation: all failure checks happen before anything moves, so a
//! failed effect leaves the state untouched, and a successful one is fully
//! applied before the caller sees the report.
//!
//! ## Damage pipeline
//!
//! 1. The actor's damage-multiplier statuses scale the base amount.
//! 2. The target's shield counter absorbs first; overflow hits health,
//!    which clamps at zero.
//! 3. The target's reflection statuses bounce a percentage of the scaled
//!    amount back at the actor. Reflected damage goes through the shield
//!    and clamp rules but never re-reflects.

use serde::{Deserialize, Serialize};

use crate::catalog::{CardId, EffectSpec, InstanceId, Location, StatusKind};
use crate::core::PlayerId;
use crate::error::PlayError;

use super::state::{BattleState, DamageBreakdown, StatusEffect};

/// Structured result of one effect application, for logging and the UI's
/// animation hooks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectReport {
    Damage {
        target: PlayerId,
        /// Amount after multipliers, before shield.
        inflicted: i32,
        breakdown: DamageBreakdown,
        /// Damage bounced back at the actor (post-shield health loss).
        reflected: i32,
    },
    Healed {
        target: PlayerId,
        gained: i32,
    },
    Shielded {
        target: PlayerId,
        amount: i32,
    },
    StatusApplied {
        target: PlayerId,
        kind: StatusKind,
        magnitude: i32,
        duration: u32,
        /// True when a unique application displaced an existing effect.
        replaced: bool,
    },
    Stolen {
        from: PlayerId,
        to: PlayerId,
        card: InstanceId,
    },
    Peeked {
        target: PlayerId,
        revealed: Vec<InstanceId>,
    },
    Reshuffled {
        player: PlayerId,
        redrawn: usize,
    },
    ExtraTurns {
        player: PlayerId,
        banked: u32,
    },
    MaterialGained {
        player: PlayerId,
        material: CardId,
        count: u32,
    },
}

/// Applies effects to battle state.
pub struct EffectResolver {
    /// Hand-size limit, used by reshuffle's redraw step.
    hand_limit: usize,
}

impl EffectResolver {
    /// Create a resolver for a battle with the given hand limit.
    #[must_use]
    pub fn new(hand_limit: usize) -> Self {
        Self { hand_limit }
    }

    /// Apply one effect from `actor` against `target`.
    ///
    /// `card` is the definition id the effect came from (used by material
    /// gain); `source` is the board instance backing a timed status, if
    /// any.
    pub fn resolve(
        &self,
        state: &mut BattleState,
        actor: PlayerId,
        target: PlayerId,
        card: CardId,
        source: Option<InstanceId>,
        spec: EffectSpec,
    ) -> Result<EffectReport, PlayError> {
        match spec {
            EffectSpec::Damage { amount } => Ok(self.apply_damage(state, actor, target, amount)),

            EffectSpec::Heal { amount } => {
                let gained = state.players[target].heal(amount);
                Ok(EffectReport::Healed { target, gained })
            }

            EffectSpec::Shield { amount } => {
                state.players[target].add_shield(amount);
                Ok(EffectReport::Shielded { target, amount })
            }

            EffectSpec::Status {
                kind,
                magnitude,
                duration,
                unique,
            } => {
                let effect = StatusEffect {
                    kind,
                    magnitude,
                    remaining: duration,
                    source,
                };
                let replaced_source = state.players[target].add_status(effect, unique);
                let replaced = replaced_source.is_some();
                if let Some(old) = replaced_source {
                    retire_instance(state, old);
                }
                Ok(EffectReport::StatusApplied {
                    target,
                    kind,
                    magnitude,
                    duration,
                    replaced,
                })
            }

            EffectSpec::Steal => {
                if state.players[target].pool.hand().is_empty() {
                    return Err(PlayError::NoCardsToSteal);
                }
                let taken = state.players[target]
                    .pool
                    .take_random_from_hand(&mut state.rng)
                    .expect("hand checked non-empty above");
                state.players[actor].pool.receive_into_hand(taken);
                Ok(EffectReport::Stolen {
                    from: target,
                    to: actor,
                    card: taken,
                })
            }

            EffectSpec::Peek { count } => {
                let hand_len = state.players[target].pool.hand().len();
                let picks = state.rng.sample_indices(hand_len, count);
                let revealed: Vec<InstanceId> = picks
                    .into_iter()
                    .map(|i| state.players[target].pool.hand()[i])
                    .collect();
                for &id in &revealed {
                    state.revealed[actor].insert(id);
                }
                Ok(EffectReport::Peeked { target, revealed })
            }

            EffectSpec::Reshuffle => {
                let returned: Vec<InstanceId> = state.players[actor].pool.hand().to_vec();
                state.players[actor].pool.collect_hand_into_deck();
                for id in returned {
                    state.set_location(id, Location::Deck);
                }

                state.players[actor].pool.shuffle(&mut state.rng);

                let outcome = state.players[actor].pool.draw(self.hand_limit, self.hand_limit);
                for &id in &outcome.drawn {
                    state.set_location(id, Location::Hand);
                }
                Ok(EffectReport::Reshuffled {
                    player: actor,
                    redrawn: outcome.drawn.len(),
                })
            }

            EffectSpec::ExtraTurn { count } => {
                state.players[actor].extra_turns += count;
                Ok(EffectReport::ExtraTurns {
                    player: actor,
                    banked: state.players[actor].extra_turns,
                })
            }

            EffectSpec::GainMaterial { count } => {
                state.players[actor].add_material(card, count);
                Ok(EffectReport::MaterialGained {
                    player: actor,
                    material: card,
                    count,
                })
            }
        }
    }

    fn apply_damage(
        &self,
        state: &mut BattleState,
        actor: PlayerId,
        target: PlayerId,
        amount: i32,
    ) -> EffectReport {
        let bonus = state.players[actor].status_magnitude(StatusKind::DamageMultiplier);
        let inflicted = amount.max(0) * (100 + bonus.max(0)) / 100;

        let breakdown = state.players[target].take_damage(inflicted);

        let reflect_pct = state.players[target]
            .status_magnitude(StatusKind::DamageReflection)
            .clamp(0, 100);
        let reflected = if reflect_pct > 0 {
            let bounce = inflicted * reflect_pct / 100;
            state.players[actor].take_damage(bounce).health_lost
        } else {
            0
        };

        EffectReport::Damage {
            target,
            inflicted,
            breakdown,
            reflected,
        }
    }
}

/// Retire a board card whose status has ended, wherever it sits.
///
/// A card can be in either side's in-play pile (stolen cards are played by
/// the thief), so both pools are tried.
pub(crate) fn retire_instance(state: &mut BattleState, id: InstanceId) {
    for player in PlayerId::both() {
        if state.players[player].pool.retire(id) {
            state.set_location(id, Location::Expired);
            return;
        }
    }
}
