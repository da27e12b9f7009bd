//! Turn gating for two-player real-time matches.
//!
//! In a synchronized match the sides alternate: the side holding the turn
//! may play cards and then ends its half of the turn, which hands the turn
//! to the other side. When both sides have ended, the engine advances the
//! turn and side A acts first again.

mod synchronizer;

pub use synchronizer::{SyncOutcome, TurnSynchronizer};
