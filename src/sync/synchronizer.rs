use tracing::debug;

use crate::core::{MatchAction, MatchState, PlayError, Side, TurnGate};
use crate::rules::{MatchEngine, PlayReport, TurnReport};

/// Result of a synchronized `end_turn`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// This side is done; the other side now holds the turn.
    Waiting,
    /// Both sides were done and the engine ended the turn.
    Advanced(TurnReport),
}

/// Applies turn gating in front of a `MatchEngine`.
///
/// Matches without a `TurnGate` pass straight through to the engine.
pub struct TurnSynchronizer<'a> {
    engine: &'a MatchEngine,
}

impl<'a> TurnSynchronizer<'a> {
    #[must_use]
    pub fn new(engine: &'a MatchEngine) -> Self {
        Self { engine }
    }

    /// Put a match under turn gating, side A to act.
    pub fn enable(state: &mut MatchState) {
        state.gate.get_or_insert_with(TurnGate::new);
    }

    /// Play a card if `side` holds the turn.
    pub fn play_card(
        &self,
        state: &mut MatchState,
        hand_index: usize,
        location_index: usize,
        side: Side,
    ) -> Result<PlayReport, PlayError> {
        if state.is_complete() {
            return Err(PlayError::GameOver);
        }
        Self::check_turn(state, side)?;
        self.engine.play_card(state, hand_index, location_index, side)
    }

    /// End `side`'s half of the turn.
    ///
    /// The first side to end hands the turn over and gets `Waiting`. The
    /// second triggers the engine's `end_turn`.
    pub fn end_turn(&self, state: &mut MatchState, side: Side) -> Result<SyncOutcome, PlayError> {
        if state.is_complete() {
            return Err(PlayError::GameOver);
        }
        Self::check_turn(state, side)?;

        let both_ready = match state.gate.as_mut() {
            Some(gate) => {
                gate.ready[side] = true;
                let both = gate.both_ready();
                if !both {
                    gate.current = side.other();
                }
                both
            }
            None => true,
        };
        state.record(MatchAction::Ready { side });

        if !both_ready {
            debug!(%side, "Side ready, waiting for opponent");
            return Ok(SyncOutcome::Waiting);
        }

        let report = self.engine.end_turn(state)?;
        if let Some(gate) = state.gate.as_mut() {
            gate.reset();
        }
        Ok(SyncOutcome::Advanced(report))
    }

    fn check_turn(state: &MatchState, side: Side) -> Result<(), PlayError> {
        match &state.gate {
            Some(gate) if gate.current != side => Err(PlayError::NotYourTurn),
            _ => Ok(()),
        }
    }
}
