//! Card catalog: definitions, runtime instances, and the registry.
//!
//! ## Key Types
//!
//! - `CardId`: identifier for card definitions
//! - `CardDefinition`: static card data (category, rarity, effect, target,
//!   combination requirement)
//! - `EffectSpec`: the closed effect vocabulary the resolver dispatches on
//! - `CardInstance`: one playable copy (owner, location)
//! - `CardRegistry`: definition lookup; `standard_set` builds the built-in
//!   card set

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{
    CardCategory, CardDefinition, CardId, EffectSpec, Rarity, Requirement, RequirementEntry,
    StatusKind, TargetRule,
};
pub use instance::{CardInstance, InstanceId, Location};
pub use registry::{standard_set, CardRegistry};
