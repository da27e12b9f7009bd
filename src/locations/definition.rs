//! Location definitions - static lane data.

use serde::{Deserialize, Serialize};

/// Passive field effect of a location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationEffect {
    #[default]
    None,
    /// Every card costs `value` less, wherever it is played.
    CostReduction,
    /// Cards here have `+value` power.
    PowerBoost,
    /// Cards here have `-value` power.
    ReduceAllPower,
    /// Playing a card here draws `value` cards at end of turn.
    DrawCard,
    /// `+value` power while the side has exactly one card here.
    SingleCardBonus,
}

/// Static location definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDefinition {
    /// Display name, unique within a catalog.
    pub name: String,

    /// Rules text shown to players.
    pub text: String,

    pub effect: LocationEffect,

    /// Magnitude of `effect`.
    pub value: i32,
}

impl LocationDefinition {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
        effect: LocationEffect,
        value: i32,
    ) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            effect,
            value,
        }
    }

    /// A location with no field effect.
    #[must_use]
    pub fn plain(name: impl Into<String>) -> Self {
        Self::new(name, "No effect.", LocationEffect::None, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_location() {
        let loc = LocationDefinition::plain("Empty Lot");
        assert_eq!(loc.effect, LocationEffect::None);
        assert_eq!(loc.value, 0);
    }

    #[test]
    fn test_location_serialization() {
        let loc = LocationDefinition::new(
            "Asgard",
            "All cards cost 1 less.",
            LocationEffect::CostReduction,
            1,
        );
        let json = serde_json::to_string(&loc).unwrap();
        let deserialized: LocationDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(loc, deserialized);
    }
}
