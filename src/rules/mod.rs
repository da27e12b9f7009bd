//! Match rules.
//!
//! - `MatchEngine`: setup, plays, turn advancement, scoring, termination
//! - `MatchSnapshot`: computed read-only view for clients
//! - `random_opponent_play`: the single-player opponent
//!
//! A match moves `Setup → InProgress → Complete`. No operation succeeds once
//! it is complete.

pub mod engine;
mod opponent;
pub mod snapshot;

pub use engine::{MatchEngine, PlayReport, TurnReport};
pub use snapshot::{BoardCardView, HandCardView, LocationView, MatchSnapshot};
