//! Core engine types: participants and deterministic randomness.
//!
//! Everything a battle needs that is not card- or rule-specific lives here.
//! Each battle owns its own instances of these types; there are no ambient
//! globals.

pub mod player;
pub mod rng;

pub use player::{PerPlayer, PlayerId};
pub use rng::{BattleRng, BattleRngState};
