//! # lane-skirmish
//!
//! A turn-based card battle engine. Two sides play cards from their hands
//! onto three locations over a fixed number of turns. Each location goes to
//! the side with more power there, and the match goes to the side holding
//! more locations.
//!
//! ## Design Principles
//!
//! 1. **Data-driven content**: cards and locations are catalog entries with
//!    closed ability variants. Adding a card is a data change.
//!
//! 2. **Computed, never stored**: power and cost are recomputed from the
//!    board on every query, so ongoing effects cannot drift.
//!
//! 3. **Deterministic**: every random decision draws from a seeded,
//!    serializable `GameRng`. Same seed, same match.
//!
//! 4. **No globals**: matches live in a `MatchRegistry` keyed by id, each
//!    behind its own lock.
//!
//! ## Modules
//!
//! - `core`: sides, match state, actions, RNG, configuration, errors
//! - `cards`: card definitions, instances and the card catalog
//! - `locations`: location definitions, catalog and in-match state
//! - `effects`: abilities, pending queues and the effect resolver
//! - `rules`: the match engine, snapshots and the random opponent
//! - `sync`: turn gating for two-player matches
//! - `session`: match registry, player directory and notifications
//!
//! ## Example
//!
//! ```
//! use lane_skirmish::{MatchEngine, Side};
//!
//! let engine = MatchEngine::standard();
//! let mut state = engine.create_match(None, 42);
//!
//! while !state.game_over {
//!     engine.end_turn(&mut state).unwrap();
//! }
//! assert_eq!(state.turn, state.max_turns);
//! assert_eq!(state.hands[Side::A].len(), 7);
//! ```

pub mod cards;
pub mod core;
pub mod effects;
pub mod locations;
pub mod rules;
pub mod session;
pub mod sync;

pub use crate::core::{
    ActionRecord, DirectoryError, GameRng, GameRngState, MatchAction, MatchConfig,
    MatchConfigBuilder, MatchPhase, MatchState, PersistError, PlayError, Side, SideMap,
    TerminationReason, TurnGate, Winner,
};

pub use crate::cards::{CardCatalog, CardDefinition, CardId, CardInstance, InstanceId};

pub use crate::locations::{LocationCatalog, LocationDefinition, LocationEffect, LocationState};

pub use crate::effects::{
    Ability, AbilityEffect, AbilityKind, BoostTarget, EffectResolver, PendingLocationDraw,
    PendingReveal, RevealOutcome, TargetSide,
};

pub use crate::rules::{
    BoardCardView, HandCardView, LocationView, MatchEngine, MatchSnapshot, PlayReport, TurnReport,
};

pub use crate::sync::{SyncOutcome, TurnSynchronizer};

pub use crate::session::{
    ActionOutcome, MatchHandle, MatchId, MatchRegistry, Notification, Notifier, NullNotifier,
    PlayerKey, QueueStatus, Seat, SessionDirectory,
};
