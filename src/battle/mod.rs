//! The battle engine: state, effects, turn machine, and settlement.
//!
//! ## Key Types
//!
//! - `BattleState`: the complete, serializable record of one fight
//! - `Battle`: the turn/phase state machine and intent entry points
//! - `EffectResolver` / `EffectReport`: the single effect switch
//! - `Settlement` / `Rewards`: terminal adjudication for the economy layer
//! - `AutoPilot`: intent policy for the non-human side

pub mod auto;
pub mod effects;
pub mod engine;
pub mod settlement;
pub mod state;

pub use auto::AutoPilot;
pub use effects::{EffectReport, EffectResolver};
pub use engine::{
    ActionReport, Battle, BattleBuilder, BattleConfig, Intent, TimeoutOutcome,
};
pub use settlement::{
    compute_rewards, MaterialDrop, Outcome, RewardContext, Rewards, Settlement, SettlementReason,
};
pub use state::{
    ActorKind, BattleState, DamageBreakdown, LogEntry, Participant, Phase, StatusEffect,
    TurnClock,
};
