//! Match state: the aggregate root of one game.
//!
//! `MatchState` is plain serializable data. The rules live in
//! `rules::MatchEngine` and `effects::EffectResolver`; this module only
//! offers zone bookkeeping that every rule needs (allocating instances,
//! drawing, recording history) and the persistence codec.
//!
//! ## Zones
//!
//! Every `CardInstance` sits in exactly one of:
//! - `decks[side]` (top of deck = end of the vector)
//! - `hands[side]` (insertion order = display order)
//! - one row of one `LocationState`
//! - `destroyed[side]`
//!
//! Decks, hands and history are `im::Vector`s, so cloning a state for a
//! snapshot or a persisted copy shares structure instead of copying it.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{ActionRecord, MatchAction};
use super::config::MatchConfig;
use super::error::PersistError;
use super::rng::GameRng;
use super::side::{Side, SideMap};
use crate::cards::{CardDefinition, CardInstance, InstanceId};
use crate::effects::{PendingLocationDraw, PendingReveal};
use crate::locations::LocationState;

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Decks and locations being assembled.
    Setup,
    /// Accepting plays and turn ends.
    InProgress,
    /// Terminal: scored or terminated.
    Complete,
}

/// Outcome of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    SideA,
    SideB,
    Tie,
    /// Not scored (still running, or terminated early).
    Undetermined,
}

impl Winner {
    #[must_use]
    pub const fn from_side(side: Side) -> Self {
        match side {
            Side::A => Winner::SideA,
            Side::B => Winner::SideB,
        }
    }
}

/// Why a match was ended outside the rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// A participant left or disconnected.
    Abandoned { by: Side },
    /// Ended by the hosting service.
    Cancelled { reason: String },
}

/// Turn gating for synchronized two-player matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnGate {
    /// Side allowed to act.
    pub current: Side,
    /// Sides that have ended the current turn.
    pub ready: SideMap<bool>,
}

impl TurnGate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Side::A,
            ready: SideMap::with_value(false),
        }
    }

    #[must_use]
    pub fn both_ready(&self) -> bool {
        self.ready[Side::A] && self.ready[Side::B]
    }

    /// Clear both flags and give the turn back to side A.
    pub fn reset(&mut self) {
        self.current = Side::A;
        self.ready = SideMap::with_value(false);
    }
}

impl Default for TurnGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete state of one match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: MatchPhase,

    /// Current turn, 1-based.
    pub turn: u32,

    pub max_turns: u32,

    pub decks: SideMap<Vector<CardInstance>>,

    pub hands: SideMap<Vector<CardInstance>>,

    /// Cards removed from the board by destroy effects.
    pub destroyed: SideMap<Vector<CardInstance>>,

    pub energy: SideMap<u32>,

    /// Energy left over when the previous turn ended.
    pub unused_energy: SideMap<u32>,

    /// Accumulated hand-cost increases, permanent for the match.
    pub hand_cost_increase: SideMap<i32>,

    /// Chosen once at setup.
    pub locations: Vec<LocationState>,

    pub pending_reveals: Vector<PendingReveal>,

    pub pending_location_draws: Vector<PendingLocationDraw>,

    /// Present for synchronized matches.
    pub gate: Option<TurnGate>,

    pub game_over: bool,

    pub winner: Winner,

    pub termination: Option<TerminationReason>,

    pub history: Vector<ActionRecord>,

    /// Source of every random decision in this match.
    pub rng: GameRng,

    next_instance: u32,
}

impl MatchState {
    /// Create an empty match in `Setup` with the given locations.
    #[must_use]
    pub fn new(config: &MatchConfig, locations: Vec<LocationState>, rng: GameRng) -> Self {
        Self {
            phase: MatchPhase::Setup,
            turn: 1,
            max_turns: config.max_turns,
            decks: SideMap::default(),
            hands: SideMap::default(),
            destroyed: SideMap::default(),
            energy: SideMap::with_value(config.starting_energy),
            unused_energy: SideMap::with_value(0),
            hand_cost_increase: SideMap::with_value(0),
            locations,
            pending_reveals: Vector::new(),
            pending_location_draws: Vector::new(),
            gate: None,
            game_over: false,
            winner: Winner::Undetermined,
            termination: None,
            history: Vector::new(),
            rng,
            next_instance: 1,
        }
    }

    /// True once the match is terminal.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.game_over || self.phase == MatchPhase::Complete
    }

    // === Instances ===

    /// Allocate a new instance id.
    pub fn alloc_instance(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    /// Put a fresh copy of `definition` on top of a side's deck.
    pub fn add_to_deck(&mut self, side: Side, definition: &CardDefinition) -> InstanceId {
        let instance = self.alloc_instance();
        self.decks[side].push_back(CardInstance::new(instance, side, definition.clone()));
        instance
    }

    /// Put a fresh copy of `definition` at the end of a side's hand.
    pub fn add_to_hand(&mut self, side: Side, definition: &CardDefinition) -> InstanceId {
        let instance = self.alloc_instance();
        self.hands[side].push_back(CardInstance::new(instance, side, definition.clone()));
        instance
    }

    /// Shuffle a side's deck with the match RNG.
    pub fn shuffle_deck(&mut self, side: Side) {
        let mut cards: Vec<_> = self.decks[side].iter().cloned().collect();
        self.rng.shuffle(&mut cards);
        self.decks[side] = cards.into_iter().collect();
    }

    /// Draw up to `count` cards from the top of a side's deck.
    ///
    /// Stops early on an empty deck. Returns the number drawn.
    pub fn draw(&mut self, side: Side, count: u32) -> u32 {
        let mut drawn = 0;
        while drawn < count {
            let Some(card) = self.decks[side].pop_back() else {
                break;
            };
            self.hands[side].push_back(card);
            drawn += 1;
        }
        drawn
    }

    /// Every card in the match, across all zones.
    pub fn all_cards(&self) -> impl Iterator<Item = &CardInstance> {
        Side::all()
            .flat_map(move |side| {
                self.decks[side]
                    .iter()
                    .chain(self.hands[side].iter())
                    .chain(self.destroyed[side].iter())
            })
            .chain(self.locations.iter().flat_map(|loc| loc.cards()))
    }

    // === History ===

    /// Append an action to the history.
    pub fn record(&mut self, action: MatchAction) {
        let sequence = self.history.len() as u32;
        self.history.push_back(ActionRecord {
            turn: self.turn,
            sequence,
            action,
        });
    }

    // === Persistence ===

    /// Encode the full state, RNG position included.
    pub fn encode(&self) -> Result<Vec<u8>, PersistError> {
        bincode::serialize(self).map_err(PersistError::Encode)
    }

    /// Decode a state produced by `encode`.
    pub fn decode(bytes: &[u8]) -> Result<Self, PersistError> {
        bincode::deserialize(bytes).map_err(PersistError::Decode)
    }
}
