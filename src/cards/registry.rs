//! Card catalog for definition lookup.
//!
//! The `CardCatalog` is built once at process start and then shared
//! read-only (behind an `Arc`) by every match. Registration order is
//! preserved: `all()` is stable and its prefix defines the default deck.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use crate::effects::{AbilityEffect, BoostTarget, TargetSide};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use lane_skirmish::cards::{CardCatalog, CardDefinition, CardId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardDefinition::new(CardId::new(3), "Hulk", 12, 6));
///
/// assert_eq!(catalog.lookup(CardId::new(3)).unwrap().name, "Hulk");
/// assert!(catalog.lookup(CardId::new(99)).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<CardDefinition>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.index.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.index.insert(card.id, self.cards.len());
        self.cards.push(card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn lookup(&self, id: CardId) -> Option<&CardDefinition> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.index.contains_key(&id)
    }

    /// All definitions, in registration order.
    #[must_use]
    pub fn all(&self) -> &[CardDefinition] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The built-in card table.
    ///
    /// The first ten entries form the default deck; the rest are available
    /// to deck selections.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for card in standard_cards() {
            catalog.register(card);
        }
        catalog
    }
}

impl FromIterator<CardDefinition> for CardCatalog {
    fn from_iter<I: IntoIterator<Item = CardDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for card in iter {
            catalog.register(card);
        }
        catalog
    }
}

fn standard_cards() -> Vec<CardDefinition> {
    let boost = |amount| AbilityEffect::PowerBoost {
        amount,
        target: BoostTarget::OtherCardsAtLocation,
    };

    vec![
        CardDefinition::new(CardId::new(1), "Iron Man", 5, 5)
            .ongoing(boost(2), "Ongoing: Your other cards here have +2 Power."),
        CardDefinition::new(CardId::new(2), "Captain America", 3, 3)
            .ongoing(boost(1), "Ongoing: Your other cards here have +1 Power."),
        CardDefinition::new(CardId::new(3), "Hulk", 12, 6),
        CardDefinition::new(CardId::new(4), "Black Widow", 1, 1)
            .on_reveal(AbilityEffect::DrawCards { count: 1 }, "On Reveal: Draw 1 card."),
        CardDefinition::new(CardId::new(5), "Thor", 4, 4)
            .on_reveal(AbilityEffect::DrawCards { count: 2 }, "On Reveal: Draw 2 cards."),
        CardDefinition::new(CardId::new(6), "Spider-Man", 3, 3).ongoing(
            AbilityEffect::ReduceOpponentPower { amount: 1 },
            "Ongoing: Opponent's cards here have -1 Power.",
        ),
        CardDefinition::new(CardId::new(7), "Doctor Strange", 3, 3).ongoing(
            AbilityEffect::ReduceOpponentPower { amount: 2 },
            "Ongoing: Opponent's cards here have -2 Power.",
        ),
        CardDefinition::new(CardId::new(8), "Scarlet Witch", 2, 2)
            .on_reveal(AbilityEffect::DrawCards { count: 1 }, "On Reveal: Draw 1 card."),
        CardDefinition::new(CardId::new(9), "Ant-Man", 1, 1)
            .ongoing(boost(1), "Ongoing: Your other cards here have +1 Power."),
        CardDefinition::new(CardId::new(10), "Wasp", 1, 0),
        CardDefinition::new(CardId::new(11), "Carnage", 2, 2).on_reveal(
            AbilityEffect::DestroyCard {
                count: 1,
                target: TargetSide::Own,
            },
            "On Reveal: Destroy one of your other cards here.",
        ),
        CardDefinition::new(CardId::new(12), "Shang-Chi", 3, 4).on_reveal(
            AbilityEffect::DestroyCard {
                count: 1,
                target: TargetSide::Opponent,
            },
            "On Reveal: Destroy a random enemy card here.",
        ),
        CardDefinition::new(CardId::new(13), "Ares", 9, 4).on_reveal(
            AbilityEffect::IncreaseHandCost { amount: 1 },
            "On Reveal: Cards in your hand cost 1 more for the rest of the game.",
        ),
        CardDefinition::new(CardId::new(14), "Ultron", 8, 5).ongoing(
            AbilityEffect::ReduceAllPower { amount: 1 },
            "Ongoing: All cards here have -1 Power.",
        ),
        CardDefinition::new(CardId::new(15), "Moon Knight", 2, 2).ongoing(
            AbilityEffect::WhenAlone { amount: 4 },
            "Ongoing: If this is your only card here, +4 Power.",
        ),
    ]
}
