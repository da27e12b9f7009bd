//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: base power,
//! base cost and ability. Everything that changes during a match (zone,
//! modified power, effective cost) lives elsewhere.

use serde::{Deserialize, Serialize};

use crate::effects::{Ability, AbilityEffect};

/// Unique identifier for a card definition.
///
/// Identifies the card ("Iron Man"), not a copy of it in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
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

/// Static card definition.
///
/// ## Example
///
/// ```
/// use lane_skirmish::cards::{CardDefinition, CardId};
/// use lane_skirmish::effects::AbilityEffect;
///
/// let widow = CardDefinition::new(CardId::new(4), "Black Widow", 1, 1)
///     .on_reveal(AbilityEffect::DrawCards { count: 1 }, "On Reveal: Draw 1 card.");
///
/// assert_eq!(widow.power, 1);
/// assert!(widow.ability.reveal_effect().is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Base power.
    pub power: i32,

    /// Base energy cost.
    pub cost: i32,

    /// Rules text shown to players.
    pub text: String,

    /// Trigger class and effect.
    pub ability: Ability,
}

impl CardDefinition {
    /// Create a vanilla card.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, power: i32, cost: i32) -> Self {
        debug_assert!(power >= 0 && cost >= 0, "Base power and cost are non-negative");
        Self {
            id,
            name: name.into(),
            power,
            cost,
            text: "No ability.".to_string(),
            ability: Ability::none(),
        }
    }

    /// Attach an on-reveal ability (builder pattern).
    #[must_use]
    pub fn on_reveal(mut self, effect: AbilityEffect, text: impl Into<String>) -> Self {
        self.ability = Ability::on_reveal(effect);
        self.text = text.into();
        self
    }

    /// Attach an ongoing ability (builder pattern).
    #[must_use]
    pub fn ongoing(mut self, effect: AbilityEffect, text: impl Into<String>) -> Self {
        self.ability = Ability::ongoing(effect);
        self.text = text.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{AbilityKind, BoostTarget};

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_vanilla_card() {
        let hulk = CardDefinition::new(CardId::new(3), "Hulk", 12, 6);

        assert_eq!(hulk.ability.kind, AbilityKind::None);
        assert_eq!(hulk.text, "No ability.");
    }

    #[test]
    fn test_ongoing_builder() {
        let card = CardDefinition::new(CardId::new(1), "Iron Man", 5, 5).ongoing(
            AbilityEffect::PowerBoost {
                amount: 2,
                target: BoostTarget::OtherCardsAtLocation,
            },
            "Ongoing: Your other cards here have +2 Power.",
        );

        assert_eq!(card.ability.kind, AbilityKind::Ongoing);
        assert!(card.text.starts_with("Ongoing"));
    }

    #[test]
    fn test_card_definition_serialization() {
        let card = CardDefinition::new(CardId::new(5), "Thor", 4, 4)
            .on_reveal(AbilityEffect::DrawCards { count: 2 }, "On Reveal: Draw 2 cards.");

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
