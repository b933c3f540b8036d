//! Deterministic intent policy for the non-human side.
//!
//! The engine stays intent-driven either way; `AutoPilot` just picks the
//! next intent for a side. The caller schedules *when* the pick is
//! submitted (the UI delays it to fake thinking time), but the pick itself
//! is synchronous and deterministic.

use crate::catalog::{CardDefinition, EffectSpec, InstanceId, TargetRule};
use crate::core::PlayerId;

use super::engine::{Battle, Intent};
use super::state::Phase;

/// Picks intents for an automated participant.
pub struct AutoPilot;

impl AutoPilot {
    /// The next intent for `player`, or `None` when it is not this side's
    /// moment to act.
    #[must_use]
    pub fn next_intent(battle: &Battle, player: PlayerId) -> Option<Intent> {
        if battle.is_over() || battle.state().active != player {
            return None;
        }

        match battle.state().phase {
            Phase::Draw => Some(Intent::DrawCard),
            Phase::Main => Some(Self::pick_play(battle, player).unwrap_or(Intent::EndTurn)),
            Phase::End => None,
        }
    }

    fn pick_play(battle: &Battle, player: PlayerId) -> Option<Intent> {
        let me = &battle.state().players[player];
        let hurt = me.health() < me.max_health();

        let best = battle
            .playable_cards(player)
            .into_iter()
            .filter_map(|id| {
                let def = definition(battle, id)?;
                let score = score(def, hurt)?;
                Some((score, def.rarity, id))
            })
            .max_by_key(|&(score, rarity, _)| (score, rarity))?;

        let (_, _, instance) = best;
        let def = definition(battle, instance)?;
        let target = matches!(def.target, Some(TargetRule::Any)).then(|| player.opponent());
        Some(Intent::PlayCard { instance, target })
    }
}

fn definition(battle: &Battle, id: InstanceId) -> Option<&CardDefinition> {
    let card_id = battle.state().instance(id)?.card_id;
    battle.registry().get(card_id)
}

/// Rank a playable card; `None` drops it from consideration.
fn score(def: &CardDefinition, hurt: bool) -> Option<i32> {
    match def.effect {
        EffectSpec::Damage { amount } => Some(100 + amount),
        // A heal at full health is a wasted card
        EffectSpec::Heal { amount } => hurt.then_some(80 + amount.min(20)),
        EffectSpec::ExtraTurn { .. } => Some(70),
        EffectSpec::Status { .. } => Some(60),
        EffectSpec::Shield { .. } => Some(50),
        EffectSpec::Steal => Some(40),
        EffectSpec::GainMaterial { .. } => Some(30),
        EffectSpec::Peek { .. } => Some(20),
        EffectSpec::Reshuffle => Some(10),
    }
}
