//! Random opponent for single-player matches.

use tracing::trace;

use super::engine::{MatchEngine, PlayReport};
use crate::core::{GameRng, MatchState, Side};
use crate::effects::EffectResolver;

impl MatchEngine {
    /// Play one uniformly random affordable card to a random open location.
    ///
    /// Returns `None` when the match is over or no legal play exists.
    pub fn random_opponent_play(
        &self,
        state: &mut MatchState,
        side: Side,
        rng: &mut GameRng,
    ) -> Option<PlayReport> {
        if state.is_complete() {
            return None;
        }

        let energy = state.energy[side];
        let affordable: Vec<usize> = state.hands[side]
            .iter()
            .enumerate()
            .filter(|(_, card)| {
                EffectResolver::card_cost(card, &state.locations, state.hand_cost_increase[side])
                    <= energy
            })
            .map(|(i, _)| i)
            .collect();
        let open: Vec<usize> = (0..state.locations.len())
            .filter(|&i| !state.locations[i].is_full(side))
            .collect();

        let hand_index = *rng.pick(&affordable)?;
        let location_index = *rng.pick(&open)?;
        trace!(%side, hand_index, location_index, "Opponent move chosen");

        self.play_card(state, hand_index, location_index, side).ok()
    }
}
