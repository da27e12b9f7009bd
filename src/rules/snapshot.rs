//! Read-only views of a match for clients.
//!
//! A snapshot carries computed values (current power, location totals, hand
//! costs) so a client never has to reimplement the rules to render a board.
//! Both hands are exposed; hiding the opponent's hand is the transport's job.

use serde::{Deserialize, Serialize};

use super::engine::MatchEngine;
use crate::cards::{CardId, CardInstance, InstanceId};
use crate::core::{MatchPhase, MatchState, Side, SideMap, TerminationReason, Winner};
use crate::effects::{AbilityKind, EffectResolver};
use crate::locations::{LocationEffect, LocationState};

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCardView {
    pub instance: InstanceId,
    pub card: CardId,
    pub name: String,
    pub text: String,
    pub ability: AbilityKind,
    pub base_power: i32,
    /// Power with every modifier applied.
    pub power: i32,
}

/// A card in a hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandCardView {
    pub instance: InstanceId,
    pub card: CardId,
    pub name: String,
    pub text: String,
    pub ability: AbilityKind,
    pub power: i32,
    pub base_cost: i32,
    /// Cost to play at each location, in board order. Filled for the
    /// perspective side's hand only.
    pub costs: Option<Vec<u32>>,
}

/// A location with both rows and their totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationView {
    pub name: String,
    pub text: String,
    pub effect: LocationEffect,
    pub value: i32,
    pub cards: SideMap<Vec<BoardCardView>>,
    pub power: SideMap<i32>,
}

/// Everything a client needs to render a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub perspective: Side,
    pub phase: MatchPhase,
    pub turn: u32,
    pub max_turns: u32,
    pub energy: SideMap<u32>,
    pub hand_cost_increase: SideMap<i32>,
    pub deck_sizes: SideMap<usize>,
    pub hands: SideMap<Vec<HandCardView>>,
    pub locations: Vec<LocationView>,
    /// Side allowed to act, for synchronized matches.
    pub current: Option<Side>,
    pub ready: Option<SideMap<bool>>,
    pub game_over: bool,
    pub winner: Winner,
    pub termination: Option<TerminationReason>,
}

impl MatchSnapshot {
    /// Capture a match as seen by `perspective` (side A when `None`).
    #[must_use]
    pub fn capture(state: &MatchState, perspective: Option<Side>) -> Self {
        let perspective = perspective.unwrap_or(Side::A);

        let hands = SideMap::new(|side| {
            state.hands[side]
                .iter()
                .map(|card| hand_view(state, card, side, side == perspective))
                .collect()
        });

        Self {
            perspective,
            phase: state.phase,
            turn: state.turn,
            max_turns: state.max_turns,
            energy: state.energy.clone(),
            hand_cost_increase: state.hand_cost_increase.clone(),
            deck_sizes: state.decks.map(|_, deck| deck.len()),
            hands,
            locations: state.locations.iter().map(location_view).collect(),
            current: state.gate.as_ref().map(|gate| gate.current),
            ready: state.gate.as_ref().map(|gate| gate.ready.clone()),
            game_over: state.game_over,
            winner: state.winner,
            termination: state.termination.clone(),
        }
    }

    /// Total power a side has at a location, if the location exists.
    #[must_use]
    pub fn location_power(&self, location: usize, side: Side) -> Option<i32> {
        self.locations.get(location).map(|loc| loc.power[side])
    }
}

fn hand_view(state: &MatchState, card: &CardInstance, side: Side, with_costs: bool) -> HandCardView {
    let costs = with_costs.then(|| {
        let cost = EffectResolver::card_cost(card, &state.locations, state.hand_cost_increase[side]);
        vec![cost; state.locations.len()]
    });
    HandCardView {
        instance: card.instance,
        card: card.card_id(),
        name: card.name().to_string(),
        text: card.definition.text.clone(),
        ability: card.ability().kind,
        power: card.base_power(),
        base_cost: card.base_cost(),
        costs,
    }
}

fn location_view(location: &LocationState) -> LocationView {
    let cards = SideMap::new(|side| {
        location
            .row(side)
            .iter()
            .map(|card| BoardCardView {
                instance: card.instance,
                card: card.card_id(),
                name: card.name().to_string(),
                text: card.definition.text.clone(),
                ability: card.ability().kind,
                base_power: card.base_power(),
                power: EffectResolver::card_power(card, location, side),
            })
            .collect()
    });
    LocationView {
        name: location.name().to_string(),
        text: location.text().to_string(),
        effect: location.effect(),
        value: location.value(),
        cards,
        power: SideMap::new(|side| EffectResolver::side_power(location, side)),
    }
}

impl MatchEngine {
    /// Snapshot a match from `perspective` (side A when `None`).
    #[must_use]
    pub fn snapshot(&self, state: &MatchState, perspective: Option<Side>) -> MatchSnapshot {
        MatchSnapshot::capture(state, perspective)
    }
}
