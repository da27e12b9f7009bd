//! The match engine: setup, plays, turn advancement and scoring.
//!
//! `MatchEngine` owns no match state. It holds the shared catalogs and the
//! ruleset, and every operation takes the `MatchState` it acts on, so one
//! engine serves any number of matches.
//!
//! ## Validation
//!
//! Every precondition is checked before anything is touched. An `Err` leaves
//! the state exactly as it was.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::cards::{CardCatalog, CardDefinition, CardId, InstanceId};
use crate::core::{
    GameRng, MatchAction, MatchConfig, MatchPhase, MatchState, PlayError, Side, SideMap,
    TerminationReason, Winner,
};
use crate::effects::{EffectResolver, RevealOutcome};
use crate::locations::{LocationCatalog, LocationState};

/// Result of a successful `play_card`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayReport {
    pub card: CardId,
    pub instance: InstanceId,
    pub location: usize,
    /// Energy paid.
    pub cost: u32,
    /// Energy left afterwards.
    pub energy_left: u32,
    pub reveal: RevealOutcome,
}

/// Result of a successful `end_turn`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// The turn now in progress (unchanged when the match just ended).
    pub turn: u32,
    /// Cards drawn by each side, pending effects and turn draw included.
    pub drawn: SideMap<u32>,
    /// Set when this call scored the final turn.
    pub winner: Option<Winner>,
}

impl TurnReport {
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.winner.is_some()
    }
}

/// Rules engine shared by every match.
#[derive(Clone, Debug)]
pub struct MatchEngine {
    cards: Arc<CardCatalog>,
    locations: Arc<LocationCatalog>,
    config: MatchConfig,
}

impl MatchEngine {
    #[must_use]
    pub fn new(cards: Arc<CardCatalog>, locations: Arc<LocationCatalog>, config: MatchConfig) -> Self {
        Self {
            cards,
            locations,
            config,
        }
    }

    /// Engine over the built-in catalogs and the default ruleset.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            Arc::new(CardCatalog::standard()),
            Arc::new(LocationCatalog::standard()),
            MatchConfig::default(),
        )
    }

    #[must_use]
    pub fn cards(&self) -> &CardCatalog {
        &self.cards
    }

    #[must_use]
    pub fn locations(&self) -> &LocationCatalog {
        &self.locations
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    // === Setup ===

    /// The deck used when no selection is given.
    #[must_use]
    pub fn default_deck(&self) -> Vec<CardDefinition> {
        self.cards
            .all()
            .iter()
            .take(self.config.deck_size)
            .cloned()
            .collect()
    }

    /// Build a deck from a selection of card ids.
    ///
    /// Unknown ids are skipped, the selection is cut to the deck size, and
    /// any shortfall is filled with random catalog cards not already chosen.
    pub fn build_deck(&self, selection: &[CardId], rng: &mut GameRng) -> Vec<CardDefinition> {
        let mut deck: Vec<CardDefinition> = Vec::with_capacity(self.config.deck_size);
        for &id in selection {
            if deck.len() == self.config.deck_size {
                break;
            }
            match self.cards.lookup(id) {
                Some(card) => deck.push(card.clone()),
                None => warn!(card = %id, "Unknown card in deck selection, skipping"),
            }
        }

        let missing = self.config.deck_size - deck.len();
        if missing > 0 {
            let remaining: Vec<&CardDefinition> = self
                .cards
                .all()
                .iter()
                .filter(|card| !deck.iter().any(|chosen| chosen.id == card.id))
                .collect();
            let picks = rng.sample_indices(remaining.len(), missing);
            deck.extend(picks.into_iter().map(|i| remaining[i].clone()));
            debug!(padded = deck.len(), missing, "Deck padded from catalog");
        }
        deck
    }

    /// Set up a new match.
    ///
    /// Side A plays `selection` (or the default deck), side B the default
    /// deck. Both decks are shuffled, each side draws its opening hand, and
    /// distinct locations are drawn from the catalog.
    #[instrument(skip(self, selection), fields(selected = selection.map_or(0, <[CardId]>::len)))]
    pub fn create_match(&self, selection: Option<&[CardId]>, seed: u64) -> MatchState {
        let mut rng = GameRng::new(seed);

        let deck_a = match selection {
            Some(ids) => self.build_deck(ids, &mut rng),
            None => self.default_deck(),
        };
        let deck_b = self.default_deck();

        let locations = self.choose_locations(&mut rng);
        let mut state = MatchState::new(&self.config, locations, rng);

        for (side, deck) in [(Side::A, deck_a), (Side::B, deck_b)] {
            for card in &deck {
                state.add_to_deck(side, card);
            }
            state.shuffle_deck(side);
            state.draw(side, self.config.starting_hand as u32);
        }

        state.phase = MatchPhase::InProgress;
        info!(
            locations = ?state.locations.iter().map(LocationState::name).collect::<Vec<_>>(),
            "Match created"
        );
        state
    }

    fn choose_locations(&self, rng: &mut GameRng) -> Vec<LocationState> {
        let all = self.locations.all();
        rng.sample_indices(all.len(), self.config.location_count)
            .into_iter()
            .map(|i| LocationState::new(&all[i], self.config.max_cards_per_side))
            .collect()
    }

    // === Play ===

    /// Play the card at `hand_index` of `side`'s hand to `location_index`.
    ///
    /// Checks, in order: match over, hand index, location index, energy,
    /// location capacity.
    #[instrument(skip(self, state), fields(turn = state.turn))]
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
        let card = state.hands[side]
            .get(hand_index)
            .ok_or(PlayError::InvalidIndex)?;
        if location_index >= state.locations.len() {
            return Err(PlayError::InvalidIndex);
        }
        let cost = EffectResolver::card_cost(card, &state.locations, state.hand_cost_increase[side]);
        let available = state.energy[side];
        if cost > available {
            return Err(PlayError::InsufficientEnergy { cost, available });
        }
        if state.locations[location_index].is_full(side) {
            return Err(PlayError::LocationFull);
        }

        let card = state.hands[side].remove(hand_index);
        let played = card.clone();
        if let Err(card) = state.locations[location_index].place(side, card) {
            state.hands[side].insert(hand_index, card);
            return Err(PlayError::LocationFull);
        }
        state.energy[side] -= cost;

        state.record(MatchAction::PlayCard {
            side,
            card: played.card_id(),
            instance: played.instance,
            location: location_index,
            cost,
        });
        EffectResolver::on_location_entered(state, location_index, side);
        let reveal = EffectResolver::apply_on_reveal(state, &played, location_index, side);

        debug!(
            card = played.name(),
            location = state.locations[location_index].name(),
            cost,
            "Card played"
        );

        Ok(PlayReport {
            card: played.card_id(),
            instance: played.instance,
            location: location_index,
            cost,
            energy_left: state.energy[side],
            reveal,
        })
    }

    // === Turns ===

    /// End the current turn for both sides.
    ///
    /// Resolves pending effects, then either advances the turn (carrying
    /// unspent energy over and drawing one card each) or, on the final turn,
    /// scores the board and completes the match.
    #[instrument(skip(self, state), fields(turn = state.turn))]
    pub fn end_turn(&self, state: &mut MatchState) -> Result<TurnReport, PlayError> {
        if state.is_complete() {
            return Err(PlayError::GameOver);
        }

        let mut drawn = EffectResolver::resolve_pending(state);
        state.record(MatchAction::EndTurn);

        if state.turn < state.max_turns {
            state.turn += 1;
            let grant = self.config.turn_energy(state.turn);
            for side in Side::all() {
                let carry = state.energy[side];
                state.unused_energy[side] = carry;
                state.energy[side] = grant + carry;
                drawn[side] += self.draw(state, side, 1);
            }
            debug!(
                turn = state.turn,
                energy_a = state.energy[Side::A],
                energy_b = state.energy[Side::B],
                "Turn advanced"
            );
            return Ok(TurnReport {
                turn: state.turn,
                drawn,
                winner: None,
            });
        }

        let winner = Self::score(state);
        state.winner = winner;
        state.game_over = true;
        state.phase = MatchPhase::Complete;
        info!(?winner, "Match complete");

        Ok(TurnReport {
            turn: state.turn,
            drawn,
            winner: Some(winner),
        })
    }

    /// Draw up to `count` cards for `side`; stops at an empty deck.
    pub fn draw(&self, state: &mut MatchState, side: Side, count: u32) -> u32 {
        state.draw(side, count)
    }

    // === Outcome ===

    /// Score the board: each location goes to the side with strictly more
    /// power, and the side holding more locations wins.
    #[must_use]
    pub fn score(state: &MatchState) -> Winner {
        let mut held = SideMap::with_value(0usize);
        for location in &state.locations {
            let a = EffectResolver::side_power(location, Side::A);
            let b = EffectResolver::side_power(location, Side::B);
            if a > b {
                held[Side::A] += 1;
            } else if b > a {
                held[Side::B] += 1;
            }
        }

        let leader = match held[Side::A].cmp(&held[Side::B]) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        };
        leader.map_or(Winner::Tie, Winner::from_side)
    }

    /// End a match outside the rules. The winner stays undetermined.
    #[instrument(skip(self, state))]
    pub fn terminate_match(
        &self,
        state: &mut MatchState,
        reason: TerminationReason,
    ) -> Result<(), PlayError> {
        if state.is_complete() {
            return Err(PlayError::GameOver);
        }
        state.game_over = true;
        state.phase = MatchPhase::Complete;
        state.winner = Winner::Undetermined;
        state.termination = Some(reason);
        state.record(MatchAction::Terminated);
        info!("Match terminated");
        Ok(())
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::standard()
    }
}
