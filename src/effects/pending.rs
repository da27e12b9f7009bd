//! Deferred effects awaiting end-of-turn resolution.
//!
//! On-reveal effects outside the immediate class and location draws are
//! queued at play time. `EffectResolver::resolve_pending` drains the reveal
//! queue first, in play order, then the location draws, in accrual order.

use serde::{Deserialize, Serialize};

use super::effect::AbilityEffect;
use crate::cards::{CardId, InstanceId};
use crate::core::Side;

/// An on-reveal effect queued by a played card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReveal {
    /// The card that triggered it.
    pub instance: InstanceId,
    pub card: CardId,
    pub effect: AbilityEffect,
    /// Index of the location the card was played to.
    pub location: usize,
    pub side: Side,
}

/// A draw owed by a location's DrawCard effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLocationDraw {
    pub side: Side,
    pub count: u32,
    /// Index of the location that granted it.
    pub location: usize,
}
