//! Match actions and their history records.
//!
//! Every successful mutating operation appends an `ActionRecord` to the
//! match history. The history is part of the persisted state and is enough
//! to audit how a board was reached.

use serde::{Deserialize, Serialize};

use super::side::Side;
use crate::cards::{CardId, InstanceId};

/// A mutating operation that succeeded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchAction {
    /// A card moved from hand to a location.
    PlayCard {
        side: Side,
        card: CardId,
        instance: InstanceId,
        location: usize,
        cost: u32,
    },

    /// A side declared itself ready (synchronized matches).
    Ready { side: Side },

    /// The turn advanced, or the final turn was scored.
    EndTurn,

    /// An on-reveal destroy removed a card from the board.
    Destroyed {
        instance: InstanceId,
        owner: Side,
        location: usize,
    },

    /// The match was ended from outside the rules.
    Terminated,
}

/// A recorded action with sequencing metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Turn number when the action happened.
    pub turn: u32,

    /// Position in the match history (0-based).
    pub sequence: u32,

    /// The action.
    pub action: MatchAction,
}
