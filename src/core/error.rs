//! Error taxonomy.
//!
//! Every failure here is expected and recoverable: callers report it and
//! carry on. Validation always completes before a match is mutated, so an
//! `Err` means the state is exactly as it was.

use serde::{Deserialize, Serialize};

/// Rejection of a match operation by the rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum PlayError {
    /// The match has already completed.
    #[display("Game is over")]
    GameOver,

    /// A hand or location index is out of range.
    #[display("Invalid index")]
    InvalidIndex,

    /// The card costs more than the side has available.
    #[display("Not enough energy: costs {}, {} available", cost, available)]
    InsufficientEnergy { cost: u32, available: u32 },

    /// The side already holds the maximum number of cards at that location.
    #[display("Location is full")]
    LocationFull,

    /// The acting side does not hold the turn (synchronized matches).
    #[display("Not your turn")]
    NotYourTurn,
}

impl std::error::Error for PlayError {}

/// Failure at the session boundary: lookups and matchmaking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum DirectoryError {
    /// The player is not registered in any match.
    #[display("Player is not in a match")]
    PlayerNotInMatch,

    /// No match is registered under the id.
    #[display("Match not found")]
    MatchNotFound,

    /// The player is already on the wait-list.
    #[display("Already in queue")]
    AlreadyQueued,

    /// The player is already playing a match.
    #[display("Already in a game")]
    AlreadyInMatch,

    /// The player is not on the wait-list.
    #[display("Not in queue")]
    NotQueued,
}

impl std::error::Error for DirectoryError {}

/// Failure encoding or decoding a persisted match.
#[derive(Debug, derive_more::Display)]
pub enum PersistError {
    #[display("Failed to encode match state: {}", _0)]
    Encode(bincode::Error),

    #[display("Failed to decode match state: {}", _0)]
    Decode(bincode::Error),
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Encode(e) | PersistError::Decode(e) => Some(e.as_ref()),
        }
    }
}
