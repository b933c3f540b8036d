//! Failure taxonomy for in-battle operations.
//!
//! Every rule violation a player (or the UI) can trigger during normal play
//! is an *expected outcome*: it comes back as an `Err(PlayError)` value for
//! the UI to render as "can't do that right now", and never as a panic.
//! Programming-contract violations (corrupt internal tables) fail loudly via
//! debug assertions instead.
//!
//! Timeouts are not errors at all; they surface as ordinary
//! [`TimeoutOutcome`](crate::battle::TimeoutOutcome) values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CardId, InstanceId};
use crate::core::PlayerId;

/// An expected, non-fatal rule outcome.
///
/// These are normal game states, not crashes. The engine resolves all of
/// them locally; nothing here should ever escape as a panic during play.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PlayError {
    /// The deck held fewer cards than the required minimum.
    #[error("deck has {available} cards, {required} required")]
    InsufficientCards { required: usize, available: usize },

    /// The instance is not in the given hand.
    #[error("card {0} is not in hand")]
    CardNotInHand(InstanceId),

    /// Steal against an empty hand.
    #[error("no cards to steal")]
    NoCardsToSteal,

    /// The card's target rule resolves to nothing legal.
    #[error("no legal target")]
    NoLegalTarget,

    /// The hand is at its size limit.
    #[error("hand is full")]
    HandFull,

    /// A combination requirement is not satisfied by the hand.
    #[error("missing {missing} of material {material}")]
    RequirementNotMet { material: CardId, missing: u32 },

    /// The acting player does not own the turn.
    #[error("not {0}'s turn")]
    NotYourTurn(PlayerId),

    /// The intent is not legal in the current phase.
    #[error("not legal in the current phase")]
    WrongPhase,

    /// Bluff was already toggled this turn.
    #[error("bluff already used this turn")]
    BluffSpent,

    /// The referenced instance does not exist in this battle.
    #[error("unknown card instance {0}")]
    UnknownInstance(InstanceId),

    /// The battle has already settled; no further mutation is accepted.
    #[error("battle already ended")]
    BattleAlreadyEnded,
}

/// Failure while restoring a battle from the save blob.
///
/// Callers recover by discarding the in-progress battle and returning both
/// players to the non-battle state.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The blob references a card definition the registry does not have.
    #[error("save blob references unknown card {0}")]
    UnknownCard(CardId),

    /// An instance id appears in a pile but not in the instance table, or
    /// the recorded location disagrees with the pile holding it.
    #[error("save blob has inconsistent card locations")]
    InconsistentZones,

    /// A participant's health is outside [0, max].
    #[error("save blob has out-of-range health")]
    HealthOutOfRange,

    /// An active status effect carries no remaining duration.
    #[error("save blob has an expired status effect still active")]
    InvalidStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_error_display() {
        let err = PlayError::InsufficientCards {
            required: 3,
            available: 1,
        };
        assert_eq!(err.to_string(), "deck has 1 cards, 3 required");

        assert_eq!(
            PlayError::NoCardsToSteal.to_string(),
            "no cards to steal"
        );
        assert_eq!(
            PlayError::NotYourTurn(PlayerId::new(1)).to_string(),
            "not Player 1's turn"
        );
    }

    #[test]
    fn test_play_error_serializes() {
        let err = PlayError::RequirementNotMet {
            material: CardId::new(3),
            missing: 2,
        };
        let json = serde_json::to_string(&err).unwrap();
        let back: PlayError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}
