//! Card instances - a card definition placed into a match.
//!
//! A `CardInstance` is owned by exactly one zone at a time: a deck, a hand,
//! one side of one location, or a destroyed pile. Moving it means removing
//! it from the source and pushing it onto the destination.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId};
use crate::core::Side;
use crate::effects::Ability;

/// Identifier of a card copy, unique within one match.
///
/// "Other card" checks compare instance ids, so two copies of the same
/// definition are never confused with each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A card in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id for this copy.
    pub instance: InstanceId,

    /// Side whose deck the card started in.
    pub owner: Side,

    /// Frozen copy of the catalog definition.
    pub definition: CardDefinition,
}

impl CardInstance {
    /// Create an instance of a definition for `owner`.
    #[must_use]
    pub fn new(instance: InstanceId, owner: Side, definition: CardDefinition) -> Self {
        Self {
            instance,
            owner,
            definition,
        }
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.definition.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn base_power(&self) -> i32 {
        self.definition.power
    }

    #[must_use]
    pub fn base_cost(&self) -> i32 {
        self.definition.cost
    }

    #[must_use]
    pub fn ability(&self) -> &Ability {
        &self.definition.ability
    }
}
