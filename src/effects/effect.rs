//! Ability definitions.
//!
//! A card's ability is a closed tagged variant. The resolver matches on it
//! exhaustively, so adding an effect kind means one new variant plus one
//! dispatch arm, never a string-keyed branch.

use serde::{Deserialize, Serialize};

/// When an ability acts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Vanilla card.
    #[default]
    None,
    /// Triggers once, when the card is played.
    OnReveal,
    /// Recomputed every time power or cost is queried.
    Ongoing,
}

/// Which side's row a targeted effect reaches into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetSide {
    /// The side that played the card.
    Own,
    /// The opposing side.
    Opponent,
}

/// Recipients of an ongoing power boost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoostTarget {
    /// Every other card the owner has at the same location.
    OtherCardsAtLocation,
}

/// What an ability does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityEffect {
    #[default]
    None,

    /// Draw cards from the owner's deck.
    DrawCards { count: u32 },

    /// Destroy up to `count` random cards at the location, never the source.
    DestroyCard { count: u32, target: TargetSide },

    /// Raise the power of other cards.
    PowerBoost { amount: i32, target: BoostTarget },

    /// Lower the power of every opposing card at the location.
    ReduceOpponentPower { amount: i32 },

    /// Lower the power of every card at the location, both sides, itself included.
    ReduceAllPower { amount: i32 },

    /// Extra power while the card is its owner's only card at the location.
    WhenAlone { amount: i32 },

    /// Raise the cost of the owner's hand for the rest of the match.
    IncreaseHandCost { amount: u32 },
}

impl AbilityEffect {
    /// True for on-reveal effects that resolve at play time rather than at end of turn.
    #[must_use]
    pub fn resolves_immediately(&self) -> bool {
        matches!(
            self,
            AbilityEffect::DestroyCard { .. } | AbilityEffect::IncreaseHandCost { .. }
        )
    }
}

/// A card's ability: trigger class plus effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ability {
    pub kind: AbilityKind,
    pub effect: AbilityEffect,
}

impl Ability {
    /// No ability.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            kind: AbilityKind::None,
            effect: AbilityEffect::None,
        }
    }

    #[must_use]
    pub const fn on_reveal(effect: AbilityEffect) -> Self {
        Self {
            kind: AbilityKind::OnReveal,
            effect,
        }
    }

    #[must_use]
    pub const fn ongoing(effect: AbilityEffect) -> Self {
        Self {
            kind: AbilityKind::Ongoing,
            effect,
        }
    }

    /// The effect, if this ability is ongoing.
    #[must_use]
    pub fn ongoing_effect(&self) -> Option<&AbilityEffect> {
        (self.kind == AbilityKind::Ongoing).then_some(&self.effect)
    }

    /// The effect, if this ability triggers on reveal and does something.
    #[must_use]
    pub fn reveal_effect(&self) -> Option<&AbilityEffect> {
        (self.kind == AbilityKind::OnReveal && self.effect != AbilityEffect::None)
            .then_some(&self.effect)
    }
}
