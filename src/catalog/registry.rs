//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores all card definitions available to a battle and
//! provides fast lookup by `CardId`. `standard_set` builds the game's
//! built-in catalog.

use rustc_hash::FxHashMap;

use super::definition::{
    CardCategory, CardDefinition, CardId, EffectSpec, Rarity, Requirement, StatusKind, TargetRule,
};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use tavern_duel::catalog::{CardCategory, CardDefinition, CardId, CardRegistry, EffectSpec, Rarity};
///
/// let mut registry = CardRegistry::new();
///
/// registry.register(CardDefinition::new(
///     CardId::new(1),
///     "Scalding Splash",
///     CardCategory::Item,
///     Rarity::Common,
///     EffectSpec::Damage { amount: 10 },
/// ));
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Scalding Splash");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same id already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Get a card definition by id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Check if a card id is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find cards by category.
    pub fn find_by_category(
        &self,
        category: CardCategory,
    ) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(move |c| c.category == category)
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }
}

/// Well-known ids for the built-in card set.
pub mod cards {
    use super::CardId;

    pub const HOPS: CardId = CardId::new(1);
    pub const BARLEY: CardId = CardId::new(2);
    pub const WILD_HONEY: CardId = CardId::new(3);
    pub const NIGHTCAP_MUSHROOM: CardId = CardId::new(4);

    pub const SCALDING_SPLASH: CardId = CardId::new(10);
    pub const BOTTLE_SMASH: CardId = CardId::new(11);
    pub const MENDED_MUG: CardId = CardId::new(12);
    pub const OAKEN_TANKARD: CardId = CardId::new(13);
    pub const VENOM_VIAL: CardId = CardId::new(14);
    pub const FIREBRAND_BITTERS: CardId = CardId::new(15);
    pub const BRAMBLE_COAT: CardId = CardId::new(16);
    pub const PICKPOCKET_DRAUGHT: CardId = CardId::new(17);
    pub const SPYGLASS_SIP: CardId = CardId::new(18);
    pub const BARREL_ROLL: CardId = CardId::new(19);

    pub const DRAGONS_BREATH_STOUT: CardId = CardId::new(20);
    pub const PHOENIX_TONIC: CardId = CardId::new(21);
    pub const MIDNIGHT_ROUND: CardId = CardId::new(22);
}

/// Build the game's built-in card set.
#[must_use]
pub fn standard_set() -> CardRegistry {
    use cards::*;

    let mut registry = CardRegistry::new();

    // Materials
    for (id, name) in [
        (HOPS, "Hops"),
        (BARLEY, "Barley"),
        (WILD_HONEY, "Wild Honey"),
        (NIGHTCAP_MUSHROOM, "Nightcap Mushroom"),
    ] {
        registry.register(CardDefinition::new(
            id,
            name,
            CardCategory::Material,
            Rarity::Common,
            EffectSpec::GainMaterial { count: 1 },
        ));
    }

    // Items
    registry.register(
        CardDefinition::new(
            SCALDING_SPLASH,
            "Scalding Splash",
            CardCategory::Item,
            Rarity::Common,
            EffectSpec::Damage { amount: 10 },
        )
        .with_target(TargetRule::Opponent),
    );
    registry.register(
        CardDefinition::new(
            BOTTLE_SMASH,
            "Bottle Smash",
            CardCategory::Item,
            Rarity::Uncommon,
            EffectSpec::Damage { amount: 20 },
        )
        .with_target(TargetRule::Opponent),
    );
    registry.register(
        CardDefinition::new(
            MENDED_MUG,
            "Mended Mug",
            CardCategory::Item,
            Rarity::Common,
            EffectSpec::Heal { amount: 15 },
        )
        .with_target(TargetRule::Own),
    );
    registry.register(
        CardDefinition::new(
            OAKEN_TANKARD,
            "Oaken Tankard",
            CardCategory::Item,
            Rarity::Common,
            EffectSpec::Shield { amount: 12 },
        )
        .with_target(TargetRule::Own),
    );
    registry.register(
        CardDefinition::new(
            VENOM_VIAL,
            "Venom Vial",
            CardCategory::Item,
            Rarity::Uncommon,
            EffectSpec::Status {
                kind: StatusKind::Poison,
                magnitude: 4,
                duration: 3,
                unique: false,
            },
        )
        .with_target(TargetRule::Opponent),
    );
    registry.register(
        CardDefinition::new(
            FIREBRAND_BITTERS,
            "Firebrand Bitters",
            CardCategory::Item,
            Rarity::Rare,
            EffectSpec::Status {
                kind: StatusKind::DamageMultiplier,
                magnitude: 50,
                duration: 2,
                unique: true,
            },
        )
        .with_target(TargetRule::Own),
    );
    registry.register(
        CardDefinition::new(
            BRAMBLE_COAT,
            "Bramble Coat",
            CardCategory::Item,
            Rarity::Rare,
            EffectSpec::Status {
                kind: StatusKind::DamageReflection,
                magnitude: 30,
                duration: 2,
                unique: true,
            },
        )
        .with_target(TargetRule::Own),
    );
    registry.register(
        CardDefinition::new(
            PICKPOCKET_DRAUGHT,
            "Pickpocket Draught",
            CardCategory::Item,
            Rarity::Uncommon,
            EffectSpec::Steal,
        )
        .with_target(TargetRule::Opponent),
    );
    registry.register(
        CardDefinition::new(
            SPYGLASS_SIP,
            "Spyglass Sip",
            CardCategory::Item,
            Rarity::Common,
            EffectSpec::Peek { count: 2 },
        )
        .with_target(TargetRule::Opponent),
    );
    registry.register(CardDefinition::new(
        BARREL_ROLL,
        "Barrel Roll",
        CardCategory::Item,
        Rarity::Uncommon,
        EffectSpec::Reshuffle,
    ));

    // Specials
    registry.register(
        CardDefinition::new(
            DRAGONS_BREATH_STOUT,
            "Dragon's Breath Stout",
            CardCategory::Special,
            Rarity::Legendary,
            EffectSpec::Damage { amount: 30 },
        )
        .with_target(TargetRule::Opponent)
        .with_requirement(Requirement::of(HOPS, 2).and(NIGHTCAP_MUSHROOM, 1)),
    );
    registry.register(
        CardDefinition::new(
            PHOENIX_TONIC,
            "Phoenix Tonic",
            CardCategory::Special,
            Rarity::Rare,
            EffectSpec::Heal { amount: 35 },
        )
        .with_target(TargetRule::Own)
        .with_requirement(Requirement::of(WILD_HONEY, 2)),
    );
    registry.register(
        CardDefinition::new(
            MIDNIGHT_ROUND,
            "Midnight Round",
            CardCategory::Special,
            Rarity::Legendary,
            EffectSpec::ExtraTurn { count: 1 },
        )
        .with_requirement(Requirement::of(BARLEY, 1).and(WILD_HONEY, 1)),
    );

    registry
}
