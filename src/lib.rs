//! # tavern-duel
//!
//! The turn-based card battle engine behind the tavern minigame, done once
//! and authoritatively: card catalog, deck/hand lifecycle, turn/phase state
//! machine, status-effect resolution, and win/loss settlement.
//!
//! ## Design Principles
//!
//! 1. **One rulebook**: every rule check and every state mutation runs
//!    through [`battle::Battle`] and the effect resolver. The UI is a pure
//!    consumer of read-only state and submits discrete intents.
//!
//! 2. **No ambient globals**: a battle owns its registry, configuration,
//!    RNG, and state. Construct one per fight, drive it, drop it.
//!
//! 3. **Plain data throughout**: `BattleState` is serde data end to end,
//!    so an in-progress battle rides in the single save blob and can be
//!    resumed, or rejected cleanly when the blob is corrupt.
//!
//! 4. **Expected outcomes are values**: rule violations a player can
//!    trigger come back as [`error::PlayError`] results, never panics.
//!    Timeouts are ordinary forced phase advances.
//!
//! ## Modules
//!
//! - `core`: participant ids, per-side storage, deterministic RNG
//! - `catalog`: card definitions, instances, registry, the built-in set
//! - `pool`: per-side deck/hand/in-play/discard/expired piles
//! - `battle`: state, effect resolver, turn machine, settlement, auto actor
//! - `error`: the failure taxonomy

pub mod battle;
pub mod catalog;
pub mod core;
pub mod error;
pub mod pool;

// Re-export commonly used types
pub use crate::core::{BattleRng, BattleRngState, PerPlayer, PlayerId};

pub use crate::catalog::{
    standard_set, CardCategory, CardDefinition, CardId, CardInstance, CardRegistry, EffectSpec,
    InstanceId, Location, Rarity, Requirement, StatusKind, TargetRule,
};

pub use crate::pool::{CardPool, DrawOutcome};

pub use crate::battle::{
    ActionReport, ActorKind, AutoPilot, Battle, BattleBuilder, BattleConfig, BattleState,
    EffectReport, EffectResolver, Intent, LogEntry, Outcome, Participant, Phase, RewardContext,
    Rewards, Settlement, SettlementReason, StatusEffect, TimeoutOutcome,
};

pub use crate::error::{PlayError, SaveError};
