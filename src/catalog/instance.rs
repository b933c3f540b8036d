//! Card instances - runtime card state.
//!
//! `CardInstance` is one drawable, playable copy of a definition inside a
//! battle. It tracks which side owns it and where it currently sits.
//!
//! Invariant: an instance is in exactly one location at any moment. The
//! location field here mirrors pile membership in [`crate::pool::CardPool`];
//! both are updated together by the battle, atomically per move.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::PlayerId;

/// Unique identifier for a card instance within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create a new instance id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// Where a card instance currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// In the owner's draw pile.
    Deck,
    /// In a hand (the stealer's after a steal, otherwise the owner's).
    Hand,
    /// On the board with a live timed effect.
    InPlay,
    /// In the discard pile.
    Discard,
    /// Retired after its timed effect ran out.
    Expired,
}

/// A card instance in a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id of this copy.
    pub instance_id: InstanceId,

    /// Reference to the card definition.
    pub card_id: CardId,

    /// Which side this copy started with.
    pub owner: PlayerId,

    /// Current location.
    pub location: Location,
}

impl CardInstance {
    /// Create a card instance in its owner's deck.
    #[must_use]
    pub fn new(instance_id: InstanceId, card_id: CardId, owner: PlayerId) -> Self {
        Self {
            instance_id,
            card_id,
            owner,
            location: Location::Deck,
        }
    }
}
