//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: what it is,
//! how rare it is, what its effect does, and what it needs to be played.
//! Instance-specific data (location, owner) is stored separately in
//! `CardInstance`.
//!
//! The effect descriptor is a closed tagged enum ([`EffectSpec`]); every
//! effect the game knows is a variant here, and the resolver dispatches on
//! it in exactly one place.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Unique identifier for a card definition.
///
/// Identifies the "kind" of card (e.g. "Ember Brew"), not a specific copy
/// in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card id.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The three card categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    /// Crafting ingredient; playing one credits the material counter.
    Material,
    /// Self-contained consumable (potions, tonics).
    Item,
    /// Powerful card gated behind a combination requirement.
    Special,
}

/// Card rarity tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// Who a card may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRule {
    /// Only the card's owner.
    Own,
    /// Only the opposing participant.
    Opponent,
    /// Either participant; the play intent must name one.
    Any,
    /// A uniformly random participant, resolved by the engine.
    Random,
}

/// Timed modifier kinds a card can attach to a participant.
///
/// Shield is not here: it is an additive absorption counter consumed by
/// incoming damage, not a per-turn-ticking modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Loses `magnitude` health at the start of each of the owner's turns.
    Poison,
    /// Outgoing damage scaled up by `magnitude` percent.
    DamageMultiplier,
    /// `magnitude` percent of incoming damage bounced back at the attacker.
    DamageReflection,
}

/// What a card does when it resolves.
///
/// A closed vocabulary: the resolver has one `match` over this enum and
/// nothing else in the crate interprets effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectSpec {
    /// Deal `amount` damage (shield absorbs first).
    Damage { amount: i32 },
    /// Restore `amount` health, clamped at max.
    Heal { amount: i32 },
    /// Add `amount` to the target's shield counter.
    Shield { amount: i32 },
    /// Attach a timed status effect.
    Status {
        kind: StatusKind,
        magnitude: i32,
        duration: u32,
        /// A unique kind replaces any existing effect of the same kind
        /// instead of stacking alongside it.
        unique: bool,
    },
    /// Take one random card from the target's hand.
    Steal,
    /// Reveal up to `count` random cards from the opponent's hand.
    Peek { count: usize },
    /// Return the player's hand to the deck, shuffle, redraw to the limit.
    Reshuffle,
    /// Bank `count` additional turns, consumed one per end-of-turn.
    ExtraTurn { count: u32 },
    /// Credit `count` to the material counter for this card's id.
    GainMaterial { count: u32 },
}

impl EffectSpec {
    /// Duration of the status this effect attaches, if any.
    ///
    /// Cards whose effect carries a duration sit in play until it runs out;
    /// everything else goes straight to the discard pile.
    #[must_use]
    pub fn status_duration(&self) -> Option<u32> {
        match self {
            EffectSpec::Status { duration, .. } => Some(*duration),
            _ => None,
        }
    }
}

/// One line of a combination requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementEntry {
    /// The material card required.
    pub material: CardId,
    /// How many copies must be in hand.
    pub count: u32,
}

/// A special card's precondition: material cards that must be in hand.
///
/// Requirements are short (one or two materials), so entries live inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    entries: SmallVec<[RequirementEntry; 2]>,
}

impl Requirement {
    /// Start a requirement with one material line.
    #[must_use]
    pub fn of(material: CardId, count: u32) -> Self {
        let mut entries = SmallVec::new();
        entries.push(RequirementEntry { material, count });
        Self { entries }
    }

    /// Add another material line (builder pattern).
    #[must_use]
    pub fn and(mut self, material: CardId, count: u32) -> Self {
        self.entries.push(RequirementEntry { material, count });
        self
    }

    /// Iterate over the required lines.
    pub fn iter(&self) -> impl Iterator<Item = &RequirementEntry> {
        self.entries.iter()
    }

    /// Check if the requirement has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use tavern_duel::catalog::{CardCategory, CardDefinition, CardId, EffectSpec, Rarity, TargetRule};
///
/// let bolt = CardDefinition::new(
///     CardId::new(1),
///     "Scalding Splash",
///     CardCategory::Item,
///     Rarity::Common,
///     EffectSpec::Damage { amount: 10 },
/// )
/// .with_target(TargetRule::Opponent);
///
/// assert_eq!(bolt.effect, EffectSpec::Damage { amount: 10 });
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this definition.
    pub id: CardId,

    /// Card name (for display/logging).
    pub name: String,

    /// Material, item, or special.
    pub category: CardCategory,

    /// Rarity tier.
    pub rarity: Rarity,

    /// What the card does.
    pub effect: EffectSpec,

    /// Who the card may be aimed at. `None` means the card targets its
    /// owner implicitly (reshuffle, extra turn, materials).
    pub target: Option<TargetRule>,

    /// Combination requirement; only meaningful on Special cards.
    pub requirement: Option<Requirement>,
}

impl CardDefinition {
    /// Create a new card definition.
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        category: CardCategory,
        rarity: Rarity,
        effect: EffectSpec,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            rarity,
            effect,
            target: None,
            requirement: None,
        }
    }

    /// Set the target rule (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: TargetRule) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the combination requirement (builder pattern).
    #[must_use]
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = Some(requirement);
        self
    }

    /// Turns this card stays in play once played, if any.
    #[must_use]
    pub fn play_duration(&self) -> Option<u32> {
        self.effect.status_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Rare < Rarity::Legendary);
    }

    #[test]
    fn test_definition_builder() {
        let card = CardDefinition::new(
            CardId::new(1),
            "Venom Vial",
            CardCategory::Item,
            Rarity::Uncommon,
            EffectSpec::Status {
                kind: StatusKind::Poison,
                magnitude: 3,
                duration: 2,
                unique: false,
            },
        )
        .with_target(TargetRule::Opponent);

        assert_eq!(card.name, "Venom Vial");
        assert_eq!(card.target, Some(TargetRule::Opponent));
        assert_eq!(card.play_duration(), Some(2));
        assert!(card.requirement.is_none());
    }

    #[test]
    fn test_instant_cards_have_no_play_duration() {
        let card = CardDefinition::new(
            CardId::new(2),
            "Mended Mug",
            CardCategory::Item,
            Rarity::Common,
            EffectSpec::Heal { amount: 15 },
        )
        .with_target(TargetRule::Own);

        assert_eq!(card.play_duration(), None);
    }

    #[test]
    fn test_requirement_builder() {
        let req = Requirement::of(CardId::new(10), 2).and(CardId::new(11), 1);

        let entries: Vec<_> = req.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].material, CardId::new(10));
        assert_eq!(entries[0].count, 2);
        assert_eq!(entries[1].material, CardId::new(11));
        assert!(!req.is_empty());
    }

    #[test]
    fn test_definition_serialization() {
        let card = CardDefinition::new(
            CardId::new(1),
            "Hop Sack",
            CardCategory::Material,
            Rarity::Common,
            EffectSpec::GainMaterial { count: 1 },
        );

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
