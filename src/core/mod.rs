//! Core match types: sides, state, actions, RNG, configuration, errors.
//!
//! Everything above this module (effects, rules, sync, session) reads and
//! mutates a `MatchState`; nothing here knows the rules of play.

pub mod action;
pub mod config;
pub mod error;
pub mod rng;
pub mod side;
pub mod state;

pub use action::{ActionRecord, MatchAction};
pub use config::{MatchConfig, MatchConfigBuilder};
pub use error::{DirectoryError, PersistError, PlayError};
pub use rng::{GameRng, GameRngState};
pub use side::{Side, SideMap};
pub use state::{MatchPhase, MatchState, TerminationReason, TurnGate, Winner};
