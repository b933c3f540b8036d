//! Battle state: participants, status effects, clock, and log.
//!
//! `BattleState` is the complete record of one battle. It is plain serde
//! data end to end, so the whole thing rides in the save blob and a battle
//! can be reconstructed mid-fight. Mutation happens only through the engine
//! ([`crate::battle::Battle`]) and the effect resolver.
//!
//! The log and revealed-card sets use `im` persistent structures: the UI
//! clones snapshots every tick and those clones are O(1).

use im::{HashSet as ImHashSet, Vector};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{CardId, CardInstance, InstanceId, Location, StatusKind};
use crate::core::{BattleRng, PerPlayer, PlayerId};
use crate::pool::CardPool;

use super::settlement::Outcome;

/// One phase of a participant's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Draw,
    Main,
    End,
}

/// Who drives a participant's intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    /// A person clicking the UI; draw must be confirmed explicitly.
    Human,
    /// A policy-driven opponent; the draw phase completes automatically.
    Auto,
}

/// A timed modifier attached to a participant.
///
/// Active effects always have `remaining > 0`; the engine removes an effect
/// the moment its counter reaches zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub magnitude: i32,
    /// Owner turns left, decremented once at the start of each.
    pub remaining: u32,
    /// The board card that created this effect, retired when it expires.
    pub source: Option<InstanceId>,
}

/// What a damage application did, split across shield and health.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    /// Points the shield counter soaked up.
    pub absorbed: i32,
    /// Points that reached health.
    pub health_lost: i32,
}

/// What a start-of-turn status tick did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusTick {
    /// Total poison damage applied (post-shield).
    pub poison: DamageBreakdown,
    /// Board cards whose effects ran out this tick.
    pub retired_sources: Vec<InstanceId>,
}

/// One side of the battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name.
    pub name: String,

    /// Who drives this side.
    pub actor: ActorKind,

    /// Current health, clamped to [0, max_health].
    health: i32,

    /// Health ceiling.
    max_health: i32,

    /// Additive absorption counter, consumed before health by incoming
    /// damage. Never negative.
    shield: i32,

    /// The five card piles.
    pub pool: CardPool,

    /// Material counters credited by played material cards.
    pub materials: FxHashMap<CardId, u32>,

    /// Active timed modifiers.
    pub statuses: Vec<StatusEffect>,

    /// Banked extra turns, consumed one per end-of-turn.
    pub extra_turns: u32,

    /// May still toggle a bluff this turn.
    pub can_bluff: bool,

    /// Currently bluffing.
    pub is_bluffing: bool,
}

impl Participant {
    /// Create a participant at full health with empty piles.
    #[must_use]
    pub fn new(name: impl Into<String>, actor: ActorKind, max_health: i32) -> Self {
        assert!(max_health > 0, "max health must be positive");
        Self {
            name: name.into(),
            actor,
            health: max_health,
            max_health,
            shield: 0,
            pool: CardPool::new(),
            materials: FxHashMap::default(),
            statuses: Vec::new(),
            extra_turns: 0,
            can_bluff: true,
            is_bluffing: false,
        }
    }

    /// Current health.
    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Health ceiling.
    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Current shield counter.
    #[must_use]
    pub fn shield(&self) -> i32 {
        self.shield
    }

    /// Whether this side has been knocked out.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Apply one damage instance: shield absorbs first, overflow hits
    /// health, health clamps at zero.
    pub fn take_damage(&mut self, amount: i32) -> DamageBreakdown {
        let amount = amount.max(0);
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        let overflow = amount - absorbed;
        let health_lost = overflow.min(self.health);
        self.health -= health_lost;
        DamageBreakdown {
            absorbed,
            health_lost,
        }
    }

    /// Restore health, clamped at the ceiling. Returns the points gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let gained = amount.min(self.max_health - self.health);
        self.health += gained;
        gained
    }

    /// Add to the shield counter.
    pub fn add_shield(&mut self, amount: i32) {
        self.shield += amount.max(0);
    }

    /// Credit material counters.
    pub fn add_material(&mut self, material: CardId, count: u32) {
        *self.materials.entry(material).or_insert(0) += count;
    }

    /// How many of a material this side holds.
    #[must_use]
    pub fn material_count(&self, material: CardId) -> u32 {
        self.materials.get(&material).copied().unwrap_or(0)
    }

    /// Attach a status effect.
    ///
    /// Non-unique applications stack independently. A unique application
    /// replaces the existing effect of the same kind; the replaced effect's
    /// source card is returned so the caller can retire it.
    pub fn add_status(&mut self, effect: StatusEffect, unique: bool) -> Option<InstanceId> {
        let mut replaced_source = None;
        if unique {
            if let Some(pos) = self.statuses.iter().position(|s| s.kind == effect.kind) {
                replaced_source = self.statuses.remove(pos).source;
            }
        }
        debug_assert!(effect.remaining > 0, "status must start with duration");
        self.statuses.push(effect);
        replaced_source
    }

    /// Sum of active magnitudes for a status kind.
    #[must_use]
    pub fn status_magnitude(&self, kind: StatusKind) -> i32 {
        self.statuses
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.magnitude)
            .sum()
    }

    /// Start-of-turn bookkeeping: reset the bluff flags, apply poison
    /// ticks, decrement every duration, drop expired effects.
    ///
    /// Each active effect is decremented exactly once; effects reaching
    /// zero are removed immediately and their source cards reported for
    /// retirement.
    pub fn start_turn_tick(&mut self) -> StatusTick {
        self.can_bluff = true;
        self.is_bluffing = false;

        let poison_total: i32 = self
            .statuses
            .iter()
            .filter(|s| s.kind == StatusKind::Poison)
            .map(|s| s.magnitude)
            .sum();
        let poison = if poison_total > 0 {
            self.take_damage(poison_total)
        } else {
            DamageBreakdown::default()
        };

        let mut retired_sources = Vec::new();
        for status in &mut self.statuses {
            status.remaining -= 1;
            if status.remaining == 0 {
                if let Some(source) = status.source {
                    retired_sources.push(source);
                }
            }
        }
        self.statuses.retain(|s| s.remaining > 0);

        StatusTick {
            poison,
            retired_sources,
        }
    }
}

/// One line of the append-only battle log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Battle-clock milliseconds when the event happened.
    pub at_ms: u64,
    /// Turn number when the event happened.
    pub turn: u32,
    /// Human-readable description.
    pub message: String,
}

/// Polled countdown for the active participant's turn.
///
/// The engine never waits on a timer; callers report elapsed wall-clock
/// time through `Battle::tick` and the clock only counts it down.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnClock {
    budget_ms: u64,
    remaining_ms: u64,
}

impl TurnClock {
    /// Create a clock with the given per-turn budget.
    #[must_use]
    pub fn new(budget_ms: u64) -> Self {
        Self {
            budget_ms,
            remaining_ms: budget_ms,
        }
    }

    /// Refill for a new turn.
    pub fn reset(&mut self) {
        self.remaining_ms = self.budget_ms;
    }

    /// Count down by `elapsed_ms`. Returns true when the budget ran out on
    /// this very call (the expiry edge, reported once).
    pub fn consume(&mut self, elapsed_ms: u64) -> bool {
        if self.remaining_ms == 0 {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.remaining_ms == 0
    }

    /// Milliseconds left this turn.
    #[must_use]
    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }
}

/// The complete record of one battle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattleState {
    /// Turn counter, starting at 1.
    pub turn_count: u32,

    /// Whose turn it is.
    pub active: PlayerId,

    /// Current phase of the active participant's turn.
    pub phase: Phase,

    /// Both sides.
    pub players: PerPlayer<Participant>,

    /// Every card instance in the battle, by id.
    instances: FxHashMap<InstanceId, CardInstance>,

    /// Cards each side has had revealed to it by peek effects.
    pub revealed: PerPlayer<ImHashSet<InstanceId>>,

    /// Append-only event log.
    log: Vector<LogEntry>,

    /// Terminal result; `None` while the battle runs.
    pub result: Option<Outcome>,

    /// Battle-owned RNG.
    pub rng: BattleRng,

    /// The active turn's countdown.
    pub clock: TurnClock,

    /// Total battle-clock milliseconds accumulated via `tick`.
    pub elapsed_ms: u64,
}

impl BattleState {
    /// Create a state with both sides at full health and empty piles.
    #[must_use]
    pub fn new(players: PerPlayer<Participant>, seed: u64, turn_budget_ms: u64) -> Self {
        Self {
            turn_count: 1,
            active: PlayerId::new(0),
            phase: Phase::Draw,
            players,
            instances: FxHashMap::default(),
            revealed: PerPlayer::new(|_| ImHashSet::new()),
            log: Vector::new(),
            result: None,
            rng: BattleRng::new(seed),
            clock: TurnClock::new(turn_budget_ms),
            elapsed_ms: 0,
        }
    }

    /// Whether settlement has happened.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }

    // === Instances ===

    /// Register a card instance.
    pub fn add_instance(&mut self, instance: CardInstance) {
        let id = instance.instance_id;
        let prior = self.instances.insert(id, instance);
        debug_assert!(prior.is_none(), "instance {id} registered twice");
    }

    /// Look up a card instance.
    #[must_use]
    pub fn instance(&self, id: InstanceId) -> Option<&CardInstance> {
        self.instances.get(&id)
    }

    /// Update an instance's recorded location after a pile move.
    pub fn set_location(&mut self, id: InstanceId, location: Location) {
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.location = location;
        } else {
            debug_assert!(false, "set_location on unknown instance {id}");
        }
    }

    /// Iterate over all instances.
    pub fn instances(&self) -> impl Iterator<Item = &CardInstance> {
        self.instances.values()
    }

    /// Number of registered instances.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    // === Log ===

    /// Append a log line stamped with the current clock and turn.
    pub fn log_event(&mut self, message: impl Into<String>) {
        self.log.push_back(LogEntry {
            at_ms: self.elapsed_ms,
            turn: self.turn_count,
            message: message.into(),
        });
    }

    /// The battle log, oldest first.
    #[must_use]
    pub fn log(&self) -> &Vector<LogEntry> {
        &self.log
    }
}
