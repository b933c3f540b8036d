//! Per-participant card zones and movement.
//!
//! `CardPool` owns the five piles of one battle participant: deck, hand,
//! in-play, discard, and expired. Every zone transition in the crate goes
//! through a method here, and each method removes a card from its old pile
//! and appends it to the new one in a single call, so an instance is never
//! duplicated or dropped.
//!
//! ## Conventions
//!
//! - Decks are ordered; the top of the deck is the *end* of the vector, so
//!   drawing is a `pop`.
//! - Hands keep insertion order (the display order the UI shows).
//! - Cards are never created or destroyed during play, only relocated; the
//!   multiset of instances across all piles is fixed once the deck is built.

use serde::{Deserialize, Serialize};

use crate::catalog::{InstanceId, Location};
use crate::core::BattleRng;
use crate::error::PlayError;

/// Result of a draw: what moved, and how much of the request went unmet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOutcome {
    /// Instances moved from deck top to hand tail, in draw order.
    pub drawn: Vec<InstanceId>,
    /// How many of the requested cards could not be drawn.
    pub shortfall: usize,
}

/// The five piles of one battle participant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPool {
    deck: Vec<InstanceId>,
    hand: Vec<InstanceId>,
    in_play: Vec<InstanceId>,
    discard: Vec<InstanceId>,
    expired: Vec<InstanceId>,
}

impl CardPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the deck with the given instances (bottom to top).
    ///
    /// Panics if the pool already holds cards.
    pub fn seed_deck(&mut self, instances: Vec<InstanceId>) {
        assert!(
            self.tracked_total() == 0,
            "seed_deck on a non-empty pool"
        );
        self.deck = instances;
    }

    // === Accessors ===

    /// The deck, bottom to top.
    #[must_use]
    pub fn deck(&self) -> &[InstanceId] {
        &self.deck
    }

    /// The hand, in insertion order.
    #[must_use]
    pub fn hand(&self) -> &[InstanceId] {
        &self.hand
    }

    /// Cards on the board with live timed effects.
    #[must_use]
    pub fn in_play(&self) -> &[InstanceId] {
        &self.in_play
    }

    /// The discard pile, oldest first.
    #[must_use]
    pub fn discard(&self) -> &[InstanceId] {
        &self.discard
    }

    /// Cards retired after their timed effect ran out.
    #[must_use]
    pub fn expired(&self) -> &[InstanceId] {
        &self.expired
    }

    /// Check whether an instance is currently in the hand.
    #[must_use]
    pub fn hand_contains(&self, instance: InstanceId) -> bool {
        self.hand.contains(&instance)
    }

    /// The pile an instance is in, or `None` if this pool doesn't hold it.
    #[must_use]
    pub fn location_of(&self, instance: InstanceId) -> Option<Location> {
        if self.deck.contains(&instance) {
            Some(Location::Deck)
        } else if self.hand.contains(&instance) {
            Some(Location::Hand)
        } else if self.in_play.contains(&instance) {
            Some(Location::InPlay)
        } else if self.discard.contains(&instance) {
            Some(Location::Discard)
        } else if self.expired.contains(&instance) {
            Some(Location::Expired)
        } else {
            None
        }
    }

    /// Cards across {deck, hand, discard, in_play}: the sum that stays
    /// constant under draw/discard/reshuffle sequences.
    #[must_use]
    pub fn live_total(&self) -> usize {
        self.deck.len() + self.hand.len() + self.discard.len() + self.in_play.len()
    }

    /// Cards across all five piles.
    #[must_use]
    pub fn tracked_total(&self) -> usize {
        self.live_total() + self.expired.len()
    }

    // === Zone transitions ===

    /// Shuffle the deck in place.
    pub fn shuffle(&mut self, rng: &mut BattleRng) {
        rng.shuffle(&mut self.deck);
    }

    /// Draw up to `count` cards from the deck top into the hand.
    ///
    /// The number actually drawn is capped by whichever is smallest:
    /// the request, the deck size, or the remaining hand-limit headroom.
    /// A partial draw (down to zero cards) is a valid outcome; the
    /// shortfall is reported, never an error.
    pub fn draw(&mut self, count: usize, hand_limit: usize) -> DrawOutcome {
        let headroom = hand_limit.saturating_sub(self.hand.len());
        let take = count.min(self.deck.len()).min(headroom);

        let mut drawn = Vec::with_capacity(take);
        for _ in 0..take {
            let instance = self.deck.pop().expect("deck size checked above");
            self.hand.push(instance);
            drawn.push(instance);
        }

        DrawOutcome {
            drawn,
            shortfall: count - take,
        }
    }

    /// Draw exactly `count` cards, failing up front if that is impossible.
    ///
    /// Unlike [`draw`](Self::draw), a deck or hand-limit shortfall here is
    /// reported as an error and nothing moves.
    pub fn draw_required(
        &mut self,
        count: usize,
        hand_limit: usize,
    ) -> Result<Vec<InstanceId>, PlayError> {
        if self.deck.len() < count {
            return Err(PlayError::InsufficientCards {
                required: count,
                available: self.deck.len(),
            });
        }
        if hand_limit.saturating_sub(self.hand.len()) < count {
            return Err(PlayError::HandFull);
        }

        let outcome = self.draw(count, hand_limit);
        debug_assert_eq!(outcome.shortfall, 0);
        Ok(outcome.drawn)
    }

    /// Move a card from the hand to the discard tail.
    pub fn discard_from_hand(&mut self, instance: InstanceId) -> Result<(), PlayError> {
        let pos = self
            .hand
            .iter()
            .position(|&c| c == instance)
            .ok_or(PlayError::CardNotInHand(instance))?;
        let card = self.hand.remove(pos);
        self.discard.push(card);
        Ok(())
    }

    /// Move a played card out of the hand: timed cards go to the board,
    /// instants to the discard tail.
    pub fn play_from_hand(&mut self, instance: InstanceId, timed: bool) -> Result<(), PlayError> {
        let pos = self
            .hand
            .iter()
            .position(|&c| c == instance)
            .ok_or(PlayError::CardNotInHand(instance))?;
        let card = self.hand.remove(pos);
        if timed {
            self.in_play.push(card);
        } else {
            self.discard.push(card);
        }
        Ok(())
    }

    /// Retire a board card whose timed effect ran out.
    ///
    /// Returns false when the instance is not on the board (e.g. already
    /// retired by a replaced unique status).
    pub fn retire(&mut self, instance: InstanceId) -> bool {
        if let Some(pos) = self.in_play.iter().position(|&c| c == instance) {
            let card = self.in_play.remove(pos);
            self.expired.push(card);
            true
        } else {
            false
        }
    }

    /// Remove a uniformly random card from the hand (the steal donor side).
    pub fn take_random_from_hand(&mut self, rng: &mut BattleRng) -> Option<InstanceId> {
        let pos = rng.pick_index(self.hand.len())?;
        Some(self.hand.remove(pos))
    }

    /// Append a card taken from elsewhere to the hand tail (the steal
    /// receiver side).
    pub fn receive_into_hand(&mut self, instance: InstanceId) {
        debug_assert!(
            self.location_of(instance).is_none(),
            "instance already in this pool"
        );
        self.hand.push(instance);
    }

    /// Move the whole hand back into the deck (reshuffle step one).
    ///
    /// Returns how many cards moved. The caller shuffles and redraws.
    pub fn collect_hand_into_deck(&mut self) -> usize {
        let moved = self.hand.len();
        self.deck.append(&mut self.hand);
        moved
    }
}
