//! The battle engine: turn/phase state machine and intent entry points.
//!
//! `Battle` is the one authority over a fight. The UI (or the auto actor)
//! sends discrete [`Intent`]s; every rule check and every mutation of
//! [`BattleState`] runs here or in the effect resolver, serialized on the
//! caller's thread. Turn timers are polled countdowns driven through
//! [`Battle::tick`]; a timeout is a forced phase advance, never an error.
//!
//! Phases run `Draw -> Main -> End`; `End` hands the turn to the other side
//! unless the departing side banked an extra turn, which is consumed to take
//! another `Draw` immediately.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    CardDefinition, CardId, CardInstance, CardRegistry, EffectSpec, InstanceId, Location,
    TargetRule,
};
use crate::core::{PerPlayer, PlayerId};
use crate::error::{PlayError, SaveError};

use super::effects::{retire_instance, EffectReport, EffectResolver};
use super::settlement::{compute_rewards, Outcome, RewardContext, Settlement, SettlementReason};
use super::state::{ActorKind, BattleState, Participant, Phase};

/// Rule knobs for one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Health both sides start (and cap) at.
    pub max_health: i32,
    /// Hand-size limit; draws cap against it.
    pub hand_limit: usize,
    /// Cards dealt to each side before turn 1.
    pub starting_hand: usize,
    /// Cards drawn by the draw phase.
    pub draw_per_turn: usize,
    /// Rounds (turn pairs) before the battle is adjudicated on health.
    pub max_rounds: u32,
    /// Per-turn time budget in milliseconds.
    pub turn_budget_ms: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            hand_limit: 7,
            starting_hand: 4,
            draw_per_turn: 1,
            max_rounds: 20,
            turn_budget_ms: 30_000,
        }
    }
}

impl BattleConfig {
    /// Set the starting/maximum health (builder pattern).
    #[must_use]
    pub fn with_max_health(mut self, health: i32) -> Self {
        self.max_health = health;
        self
    }

    /// Set the hand-size limit (builder pattern).
    #[must_use]
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        self.hand_limit = limit;
        self
    }

    /// Set the starting hand size (builder pattern).
    #[must_use]
    pub fn with_starting_hand(mut self, cards: usize) -> Self {
        self.starting_hand = cards;
        self
    }

    /// Set the round cap (builder pattern).
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set the per-turn time budget (builder pattern).
    #[must_use]
    pub fn with_turn_budget_ms(mut self, budget: u64) -> Self {
        self.turn_budget_ms = budget;
        self
    }
}

/// A discrete player action sent by the UI or the auto actor.
///
/// Intents are the only mutation entry points into a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Complete the draw phase.
    DrawCard,
    /// Play a card from hand. `target` names a side for `TargetRule::Any`
    /// cards; fixed-target cards may leave it `None`.
    PlayCard {
        instance: InstanceId,
        target: Option<PlayerId>,
    },
    /// End the main phase.
    EndTurn,
    /// Flip the bluff flag (once per turn).
    ToggleBluff,
    /// Check whether the opponent is bluffing.
    ActivateDetect,
    /// Give up the battle.
    Forfeit,
}

/// What a submitted intent did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionReport {
    /// The draw phase completed.
    Drew { cards: Vec<InstanceId>, shortfall: usize },
    /// A card resolved.
    Played {
        card: InstanceId,
        /// Material cards consumed by a combination requirement.
        consumed: Vec<InstanceId>,
        report: EffectReport,
    },
    /// The turn ended. `next` is `None` when the round cap settled the
    /// battle instead of handing the turn over.
    TurnEnded {
        next: Option<PlayerId>,
        /// True when the same side goes again off a banked extra turn.
        extra: bool,
    },
    /// The bluff flag flipped.
    BluffToggled { bluffing: bool },
    /// Detect read the opponent's bluff flag.
    DetectResult { opponent_bluffing: bool },
    /// The battle was conceded.
    Forfeited,
}

/// What an expired turn clock forced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeoutOutcome {
    /// The draw phase auto-completed.
    AutoDrew { cards: Vec<InstanceId>, shortfall: usize },
    /// The turn auto-ended without a play. `next` is `None` when the round
    /// cap settled the battle.
    AutoEnded { next: Option<PlayerId> },
}

/// Cards moved by a completed draw phase.
struct DrawnCards {
    cards: Vec<InstanceId>,
    shortfall: usize,
}

/// One battle, owning its state, registry, and configuration.
///
/// Nothing here is shared across battles and nothing reads ambient
/// globals: construct one per fight, drive it with intents and `tick`,
/// read the settlement, drop it.
pub struct Battle {
    config: BattleConfig,
    registry: CardRegistry,
    resolver: EffectResolver,
    reward_ctx: RewardContext,
    state: BattleState,
    settlement: Option<Settlement>,
}

/// Assembles a battle: sides, decks, rules, and the seed.
pub struct BattleBuilder {
    config: BattleConfig,
    registry: CardRegistry,
    reward_ctx: RewardContext,
    names: PerPlayer<String>,
    actors: PerPlayer<ActorKind>,
    decks: PerPlayer<Vec<CardId>>,
}

impl Default for BattleBuilder {
    fn default() -> Self {
        Self {
            config: BattleConfig::default(),
            registry: crate::catalog::standard_set(),
            reward_ctx: RewardContext::default(),
            names: PerPlayer::new(|p| format!("Player {}", p.index())),
            actors: PerPlayer::with_value(ActorKind::Human),
            decks: PerPlayer::with_default(),
        }
    }
}

impl BattleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom rule configuration.
    #[must_use]
    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom card registry instead of the standard set.
    #[must_use]
    pub fn registry(mut self, registry: CardRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the reward context reported at settlement.
    #[must_use]
    pub fn reward_context(mut self, ctx: RewardContext) -> Self {
        self.reward_ctx = ctx;
        self
    }

    /// Name a side and choose who drives it.
    #[must_use]
    pub fn side(mut self, player: PlayerId, name: impl Into<String>, actor: ActorKind) -> Self {
        self.names[player] = name.into();
        self.actors[player] = actor;
        self
    }

    /// Set a side's deck list.
    #[must_use]
    pub fn deck(mut self, player: PlayerId, cards: Vec<CardId>) -> Self {
        self.decks[player] = cards;
        self
    }

    /// Build the battle: create instances, shuffle both decks, deal
    /// starting hands, and open turn 1.
    ///
    /// Panics if a deck names a card the registry does not have; deck
    /// lists are assembled by the caller and a bad id is a programming
    /// error, not a game state.
    #[must_use]
    pub fn build(self, seed: u64) -> Battle {
        for (_, deck) in self.decks.iter() {
            for card in deck {
                assert!(
                    self.registry.contains(*card),
                    "deck lists unregistered card {card}"
                );
            }
        }

        let config = self.config;
        let players = PerPlayer::new(|p| {
            Participant::new(self.names[p].clone(), self.actors[p], config.max_health)
        });
        let mut state = BattleState::new(players, seed, config.turn_budget_ms);

        // Create instances and seed the decks
        let mut next_instance = 0u32;
        for player in PlayerId::both() {
            let mut instances = Vec::with_capacity(self.decks[player].len());
            for &card in &self.decks[player] {
                let id = InstanceId::new(next_instance);
                next_instance += 1;
                state.add_instance(CardInstance::new(id, card, player));
                instances.push(id);
            }
            state.players[player].pool.seed_deck(instances);
            state.players[player].pool.shuffle(&mut state.rng);
        }

        // Deal starting hands
        for player in PlayerId::both() {
            let outcome = state.players[player]
                .pool
                .draw(config.starting_hand, config.hand_limit);
            for &id in &outcome.drawn {
                state.set_location(id, Location::Hand);
            }
        }

        state.log_event(format!(
            "Battle begins: {} vs {}",
            state.players[PlayerId::new(0)].name,
            state.players[PlayerId::new(1)].name
        ));

        let mut battle = Battle {
            config,
            resolver: EffectResolver::new(config.hand_limit),
            registry: self.registry,
            reward_ctx: self.reward_ctx,
            state,
            settlement: None,
        };
        battle.open_turn(PlayerId::new(0), true);
        battle
    }
}

impl Battle {
    /// Read-only view of the battle state.
    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// The rule configuration.
    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// The card registry this battle plays with.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Whether the battle has settled.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// The settlement report, once the battle has ended.
    #[must_use]
    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    /// Restore a battle from a deserialized state blob.
    ///
    /// Validates the blob against the registry and the structural
    /// invariants; an inconsistent blob is rejected so the caller can
    /// discard the in-progress battle instead of crashing.
    pub fn resume(
        config: BattleConfig,
        registry: CardRegistry,
        reward_ctx: RewardContext,
        state: BattleState,
    ) -> Result<Self, SaveError> {
        validate_state(&registry, &state)?;
        Ok(Self {
            resolver: EffectResolver::new(config.hand_limit),
            config,
            registry,
            reward_ctx,
            state,
            settlement: None,
        })
    }

    // === Intents ===

    /// Submit a player intent.
    ///
    /// Every rule violation comes back as an `Err(PlayError)`; the state is
    /// untouched in that case.
    pub fn submit(&mut self, player: PlayerId, intent: Intent) -> Result<ActionReport, PlayError> {
        if self.state.is_terminal() {
            return Err(PlayError::BattleAlreadyEnded);
        }
        if self.state.active != player {
            return Err(PlayError::NotYourTurn(player));
        }

        match intent {
            Intent::DrawCard => self.handle_draw(player),
            Intent::PlayCard { instance, target } => self.handle_play(player, instance, target),
            Intent::EndTurn => {
                if self.state.phase != Phase::Main {
                    return Err(PlayError::WrongPhase);
                }
                self.state.log_event(format!("{} ends the turn", self.state.players[player].name));
                let (next, extra) = self.close_turn(player);
                Ok(ActionReport::TurnEnded { next, extra })
            }
            Intent::ToggleBluff => {
                if self.state.phase != Phase::Main {
                    return Err(PlayError::WrongPhase);
                }
                let me = &mut self.state.players[player];
                if !me.can_bluff {
                    return Err(PlayError::BluffSpent);
                }
                me.can_bluff = false;
                me.is_bluffing = !me.is_bluffing;
                let bluffing = me.is_bluffing;
                self.state.log_event(format!(
                    "{} {}",
                    self.state.players[player].name,
                    if bluffing { "starts bluffing" } else { "drops the bluff" }
                ));
                Ok(ActionReport::BluffToggled { bluffing })
            }
            Intent::ActivateDetect => {
                if self.state.phase != Phase::Main {
                    return Err(PlayError::WrongPhase);
                }
                let opponent_bluffing = self.state.players[player.opponent()].is_bluffing;
                self.state
                    .log_event(format!("{} studies the opponent", self.state.players[player].name));
                Ok(ActionReport::DetectResult { opponent_bluffing })
            }
            Intent::Forfeit => {
                self.state
                    .log_event(format!("{} forfeits", self.state.players[player].name));
                self.settle(
                    Outcome::Victory(player.opponent()),
                    SettlementReason::Forfeit(player),
                );
                Ok(ActionReport::Forfeited)
            }
        }
    }

    /// Advance the battle clock by `elapsed_ms`.
    ///
    /// When the active turn's budget runs out, the pending phase is forced
    /// through as an ordinary transition and reported. Returns `None` while
    /// the budget holds (or the battle is over).
    pub fn tick(&mut self, elapsed_ms: u64) -> Option<TimeoutOutcome> {
        if self.state.is_terminal() {
            return None;
        }
        self.state.elapsed_ms += elapsed_ms;
        if !self.state.clock.consume(elapsed_ms) {
            return None;
        }

        let player = self.state.active;
        match self.state.phase {
            Phase::Draw => {
                self.state
                    .log_event(format!("{} ran out of time to draw", self.state.players[player].name));
                let drawn = self.perform_draw(player);
                // The main phase gets a fresh budget; an idle player then
                // times out again there and the turn auto-ends.
                self.state.clock.reset();
                Some(TimeoutOutcome::AutoDrew {
                    cards: drawn.cards,
                    shortfall: drawn.shortfall,
                })
            }
            Phase::Main => {
                self.state
                    .log_event(format!("{} ran out of time", self.state.players[player].name));
                let (next, _) = self.close_turn(player);
                Some(TimeoutOutcome::AutoEnded { next })
            }
            // End is transient; the clock never rests there
            Phase::End => None,
        }
    }

    // === Legality ===

    /// Check whether a card could legally be played right now, without
    /// mutating anything.
    pub fn can_play(&self, player: PlayerId, instance: InstanceId) -> Result<(), PlayError> {
        if self.state.is_terminal() {
            return Err(PlayError::BattleAlreadyEnded);
        }
        if self.state.active != player {
            return Err(PlayError::NotYourTurn(player));
        }
        if self.state.phase != Phase::Main {
            return Err(PlayError::WrongPhase);
        }
        let def = self.definition_in_hand(player, instance)?;
        self.check_requirement(player, def)?;
        if matches!(def.effect, EffectSpec::Steal)
            && self.state.players[player.opponent()].pool.hand().is_empty()
        {
            return Err(PlayError::NoCardsToSteal);
        }
        Ok(())
    }

    /// Instances in the player's hand that are legal to play right now.
    #[must_use]
    pub fn playable_cards(&self, player: PlayerId) -> Vec<InstanceId> {
        self.state.players[player]
            .pool
            .hand()
            .iter()
            .copied()
            .filter(|&id| self.can_play(player, id).is_ok())
            .collect()
    }

    // === Internals ===

    fn handle_draw(&mut self, player: PlayerId) -> Result<ActionReport, PlayError> {
        if self.state.phase != Phase::Draw {
            return Err(PlayError::WrongPhase);
        }
        let drawn = self.perform_draw(player);
        Ok(ActionReport::Drew {
            cards: drawn.cards,
            shortfall: drawn.shortfall,
        })
    }

    /// Complete the draw phase and advance to Main. A short or empty deck
    /// is fine; the shortfall is reported, not raised.
    fn perform_draw(&mut self, player: PlayerId) -> DrawnCards {
        let outcome = self.state.players[player]
            .pool
            .draw(self.config.draw_per_turn, self.config.hand_limit);
        for &id in &outcome.drawn {
            self.state.set_location(id, Location::Hand);
        }
        self.state.log_event(format!(
            "{} draws {} card(s)",
            self.state.players[player].name,
            outcome.drawn.len()
        ));
        self.state.phase = Phase::Main;
        DrawnCards {
            cards: outcome.drawn,
            shortfall: outcome.shortfall,
        }
    }

    fn handle_play(
        &mut self,
        player: PlayerId,
        instance: InstanceId,
        requested: Option<PlayerId>,
    ) -> Result<ActionReport, PlayError> {
        if self.state.phase != Phase::Main {
            return Err(PlayError::WrongPhase);
        }

        let def = self.definition_in_hand(player, instance)?.clone();
        self.check_requirement(player, &def)?;
        let target = self.resolve_target(player, def.target, requested)?;

        // Steal is the one effect with its own precondition; check it
        // before anything moves so a failed play leaves the hand intact.
        if matches!(def.effect, EffectSpec::Steal)
            && self.state.players[target].pool.hand().is_empty()
        {
            return Err(PlayError::NoCardsToSteal);
        }

        // Consume combination materials
        let consumed = self.consume_requirement(player, &def);

        // Move the played card out of the hand
        let timed = def.play_duration().is_some();
        self.state.players[player]
            .pool
            .play_from_hand(instance, timed)
            .expect("presence in hand checked above");
        self.state.set_location(
            instance,
            if timed { Location::InPlay } else { Location::Discard },
        );

        let source = timed.then_some(instance);
        let report = self
            .resolver
            .resolve(&mut self.state, player, target, def.id, source, def.effect)
            .expect("effect preconditions checked above");

        self.state.log_event(format!(
            "{} plays {}",
            self.state.players[player].name, def.name
        ));

        // Knockout settles immediately, on this action
        self.check_knockout();

        Ok(ActionReport::Played {
            card: instance,
            consumed,
            report,
        })
    }

    fn definition_in_hand(
        &self,
        player: PlayerId,
        instance: InstanceId,
    ) -> Result<&CardDefinition, PlayError> {
        let record = self
            .state
            .instance(instance)
            .ok_or(PlayError::UnknownInstance(instance))?;
        if !self.state.players[player].pool.hand_contains(instance) {
            return Err(PlayError::CardNotInHand(instance));
        }
        self.registry
            .get(record.card_id)
            .ok_or(PlayError::UnknownInstance(instance))
    }

    /// Verify a combination requirement against hand contents, counted by
    /// card id.
    fn check_requirement(&self, player: PlayerId, def: &CardDefinition) -> Result<(), PlayError> {
        let Some(requirement) = &def.requirement else {
            return Ok(());
        };
        for entry in requirement.iter() {
            let held = self.count_in_hand(player, entry.material);
            if held < entry.count {
                return Err(PlayError::RequirementNotMet {
                    material: entry.material,
                    missing: entry.count - held,
                });
            }
        }
        Ok(())
    }

    fn count_in_hand(&self, player: PlayerId, card: CardId) -> u32 {
        self.state.players[player]
            .pool
            .hand()
            .iter()
            .filter(|&&id| {
                self.state
                    .instance(id)
                    .is_some_and(|inst| inst.card_id == card)
            })
            .count() as u32
    }

    /// Move the required material cards from hand to discard. The
    /// requirement was checked already, so the counts are guaranteed.
    fn consume_requirement(&mut self, player: PlayerId, def: &CardDefinition) -> Vec<InstanceId> {
        let Some(requirement) = &def.requirement else {
            return Vec::new();
        };

        let mut consumed = Vec::new();
        for entry in requirement.iter() {
            let matching: Vec<InstanceId> = self.state.players[player]
                .pool
                .hand()
                .iter()
                .copied()
                .filter(|&id| {
                    self.state
                        .instance(id)
                        .is_some_and(|inst| inst.card_id == entry.material)
                })
                .take(entry.count as usize)
                .collect();
            debug_assert_eq!(matching.len(), entry.count as usize);
            consumed.extend(matching);
        }

        for &id in &consumed {
            self.state.players[player]
                .pool
                .discard_from_hand(id)
                .expect("requirement counted these cards in hand");
            self.state.set_location(id, Location::Discard);
        }
        consumed
    }

    /// Resolve a card's declared target rule against the requested target.
    fn resolve_target(
        &mut self,
        actor: PlayerId,
        rule: Option<TargetRule>,
        requested: Option<PlayerId>,
    ) -> Result<PlayerId, PlayError> {
        match rule {
            // Untargeted cards act on their owner
            None | Some(TargetRule::Own) => match requested {
                None => Ok(actor),
                Some(p) if p == actor => Ok(actor),
                Some(_) => Err(PlayError::NoLegalTarget),
            },
            Some(TargetRule::Opponent) => match requested {
                None => Ok(actor.opponent()),
                Some(p) if p == actor.opponent() => Ok(p),
                Some(_) => Err(PlayError::NoLegalTarget),
            },
            Some(TargetRule::Any) => requested.ok_or(PlayError::NoLegalTarget),
            Some(TargetRule::Random) => {
                let side = self
                    .state
                    .rng
                    .pick_index(2)
                    .expect("two sides always exist") as u8;
                Ok(PlayerId::new(side))
            }
        }
    }

    /// End the active turn and open the next one. Returns the next active
    /// side (or `None` when the round cap settled the battle) and whether
    /// the same side continues on an extra turn.
    fn close_turn(&mut self, player: PlayerId) -> (Option<PlayerId>, bool) {
        self.state.phase = Phase::End;

        // Round cap: both sides have had max_rounds turns
        if self.state.turn_count >= self.config.max_rounds * 2 {
            let outcome = self.adjudicate_on_health();
            self.settle(outcome, SettlementReason::RoundCap);
            return (None, false);
        }

        let me = &mut self.state.players[player];
        let extra = me.extra_turns > 0;
        let next = if extra {
            me.extra_turns -= 1;
            player
        } else {
            player.opponent()
        };

        self.state.turn_count += 1;
        self.open_turn(next, false);
        if self.state.is_terminal() {
            // Poison on the incoming side ended the battle
            return (None, extra);
        }
        (Some(next), extra)
    }

    /// Start a turn: refill the clock, run the start-of-turn status tick,
    /// retire expired board cards, and auto-complete the draw phase for an
    /// Auto actor.
    fn open_turn(&mut self, player: PlayerId, first: bool) {
        self.state.active = player;
        self.state.phase = Phase::Draw;
        self.state.clock.reset();

        let tick = self.state.players[player].start_turn_tick();
        if tick.poison.health_lost > 0 || tick.poison.absorbed > 0 {
            self.state.log_event(format!(
                "{} suffers {} poison damage",
                self.state.players[player].name,
                tick.poison.absorbed + tick.poison.health_lost
            ));
        }
        for source in tick.retired_sources {
            retire_instance(&mut self.state, source);
        }

        if !first {
            self.state
                .log_event(format!("Turn {}: {}", self.state.turn_count, self.state.players[player].name));
        }

        // Poison can finish the fight before anyone acts
        self.check_knockout();
        if self.state.is_terminal() {
            return;
        }

        if self.state.players[player].actor == ActorKind::Auto {
            self.perform_draw(player);
        }
    }

    fn adjudicate_on_health(&self) -> Outcome {
        let h0 = self.state.players[PlayerId::new(0)].health();
        let h1 = self.state.players[PlayerId::new(1)].health();
        match h0.cmp(&h1) {
            std::cmp::Ordering::Greater => Outcome::Victory(PlayerId::new(0)),
            std::cmp::Ordering::Less => Outcome::Victory(PlayerId::new(1)),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    fn check_knockout(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        let any_down = PlayerId::both().any(|p| self.state.players[p].is_defeated());
        if any_down {
            let outcome = self.adjudicate_on_health();
            self.settle(outcome, SettlementReason::Knockout);
        }
    }

    /// Mark the battle terminal and produce the settlement exactly once.
    fn settle(&mut self, outcome: Outcome, reason: SettlementReason) {
        debug_assert!(self.state.result.is_none(), "settling twice");
        if self.state.result.is_some() {
            return;
        }

        self.state.result = Some(outcome);
        let rewards = PerPlayer::new(|p| compute_rewards(outcome, p, self.reward_ctx));
        self.settlement = Some(Settlement {
            outcome,
            reason,
            rewards,
        });

        let message = match outcome.winner() {
            Some(winner) => format!("{} wins the battle", self.state.players[winner].name),
            None => "The battle ends in a draw".to_string(),
        };
        self.state.log_event(message);
    }
}

/// Structural validation of a deserialized state blob.
fn validate_state(registry: &CardRegistry, state: &BattleState) -> Result<(), SaveError> {
    let mut seen = 0usize;
    for player in PlayerId::both() {
        let participant = &state.players[player];
        if participant.health() < 0 || participant.health() > participant.max_health() {
            return Err(SaveError::HealthOutOfRange);
        }
        if participant.statuses.iter().any(|s| s.remaining == 0) {
            return Err(SaveError::InvalidStatus);
        }

        let pool = &participant.pool;
        let piles: [(&[InstanceId], Location); 5] = [
            (pool.deck(), Location::Deck),
            (pool.hand(), Location::Hand),
            (pool.in_play(), Location::InPlay),
            (pool.discard(), Location::Discard),
            (pool.expired(), Location::Expired),
        ];
        for (pile, location) in piles {
            for &id in pile {
                let Some(instance) = state.instance(id) else {
                    return Err(SaveError::InconsistentZones);
                };
                if instance.location != location {
                    return Err(SaveError::InconsistentZones);
                }
                if !registry.contains(instance.card_id) {
                    return Err(SaveError::UnknownCard(instance.card_id));
                }
                seen += 1;
            }
        }
    }
    if seen != state.instance_count() {
        return Err(SaveError::InconsistentZones);
    }
    Ok(())
}
