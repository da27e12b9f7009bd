//! Match engine scenario tests.
//!
//! These drive full matches through the public engine API with catalogs
//! narrowed down so the board is predictable.

use std::sync::Arc;

use lane_skirmish::cards::{CardCatalog, CardId};
use lane_skirmish::core::{MatchConfig, MatchState, PlayError, Side, Winner};
use lane_skirmish::effects::{EffectResolver, RevealOutcome};
use lane_skirmish::locations::{LocationCatalog, LocationDefinition, LocationEffect};
use lane_skirmish::rules::MatchEngine;

fn engine_with(locations: Vec<LocationDefinition>) -> MatchEngine {
    MatchEngine::new(
        Arc::new(CardCatalog::standard()),
        Arc::new(locations.into_iter().collect::<LocationCatalog>()),
        MatchConfig::default(),
    )
}

fn plain_engine() -> MatchEngine {
    engine_with(vec![
        LocationDefinition::plain("North"),
        LocationDefinition::plain("Centre"),
        LocationDefinition::plain("South"),
    ])
}

/// Put a catalog card at the end of a side's hand and return its hand index.
fn give(engine: &MatchEngine, state: &mut MatchState, side: Side, id: u32) -> usize {
    let def = engine.cards().lookup(CardId::new(id)).cloned().unwrap();
    state.add_to_hand(side, &def);
    state.hands[side].len() - 1
}

fn location_named(state: &MatchState, name: &str) -> usize {
    state
        .locations
        .iter()
        .position(|l| l.name() == name)
        .unwrap()
}

/// Iron Man boosts the card already beside him, not himself.
#[test]
fn test_power_boost_scenario() {
    let engine = plain_engine();
    let mut state = engine.create_match(None, 42);
    state.energy[Side::A] = 6;

    let ant = give(&engine, &mut state, Side::A, 9);
    engine.play_card(&mut state, ant, 0, Side::A).unwrap();
    let iron = give(&engine, &mut state, Side::A, 1);
    engine.play_card(&mut state, iron, 0, Side::A).unwrap();

    let loc = &state.locations[0];
    let powers: Vec<i32> = loc
        .row(Side::A)
        .iter()
        .map(|c| EffectResolver::card_power(c, loc, Side::A))
        .collect();

    // Ant-Man 1 + Iron Man's 2; Iron Man 5 + Ant-Man's 1.
    assert_eq!(powers, vec![3, 6]);
    assert_eq!(EffectResolver::side_power(loc, Side::A), 9);
    assert_eq!(state.energy[Side::A], 0);
}

/// Asgard on the board makes a 3-cost card cost 2.
#[test]
fn test_cost_reduction_scenario() {
    let engine = engine_with(vec![
        LocationDefinition::new("Asgard", "All cards cost 1 less.", LocationEffect::CostReduction, 1),
        LocationDefinition::plain("Centre"),
        LocationDefinition::plain("South"),
    ]);
    let mut state = engine.create_match(None, 9);
    state.energy[Side::A] = 2;
    let cap = give(&engine, &mut state, Side::A, 2);
    let target = location_named(&state, "Centre");

    let report = engine.play_card(&mut state, cap, target, Side::A).unwrap();

    assert_eq!(report.cost, 2);
    assert_eq!(report.energy_left, 0);
}

/// Carnage destroys one of its owner's other cards and survives.
#[test]
fn test_destroy_own_scenario() {
    let engine = plain_engine();
    let mut state = engine.create_match(None, 3);
    state.energy[Side::A] = 6;

    let wasp = give(&engine, &mut state, Side::A, 10);
    engine.play_card(&mut state, wasp, 1, Side::A).unwrap();
    let carnage = give(&engine, &mut state, Side::A, 11);
    let report = engine.play_card(&mut state, carnage, 1, Side::A).unwrap();

    assert_eq!(report.reveal, RevealOutcome::Destroyed(vec![state.destroyed[Side::A][0].instance]));
    assert_eq!(state.locations[1].count(Side::A), 1);
    assert_eq!(state.locations[1].row(Side::A)[0].card_id(), CardId::new(11));
    assert_eq!(state.all_cards().count(), 22);
}

/// Shang-Chi reaches across to the opponent's row.
#[test]
fn test_destroy_opponent() {
    let engine = plain_engine();
    let mut state = engine.create_match(None, 3);
    state.energy[Side::B] = 6;

    let hulk = give(&engine, &mut state, Side::A, 3);
    state.energy[Side::A] = 6;
    engine.play_card(&mut state, hulk, 2, Side::A).unwrap();
    let shang = give(&engine, &mut state, Side::B, 12);
    engine.play_card(&mut state, shang, 2, Side::B).unwrap();

    assert_eq!(state.locations[2].count(Side::A), 0);
    assert_eq!(state.destroyed[Side::A].len(), 1);
    assert_eq!(state.locations[2].count(Side::B), 1);
}

/// Ares raises the cost of every later card for its owner only.
#[test]
fn test_hand_cost_increase() {
    let engine = plain_engine();
    let mut state = engine.create_match(None, 3);
    state.energy[Side::A] = 10;

    let ares = give(&engine, &mut state, Side::A, 13);
    engine.play_card(&mut state, ares, 0, Side::A).unwrap();
    let wasp = give(&engine, &mut state, Side::A, 10);
    let report = engine.play_card(&mut state, wasp, 1, Side::A).unwrap();

    assert_eq!(report.cost, 1);
    assert_eq!(state.hand_cost_increase[Side::A], 1);
    assert_eq!(state.hand_cost_increase[Side::B], 0);
}

/// Thor's draw waits for end of turn, then lands before the turn draw.
#[test]
fn test_deferred_draw_resolves_at_end_of_turn() {
    let engine = plain_engine();
    let mut state = engine.create_match(None, 5);
    state.energy[Side::A] = 4;
    let thor = give(&engine, &mut state, Side::A, 5);
    engine.play_card(&mut state, thor, 0, Side::A).unwrap();
    let hand_before = state.hands[Side::A].len();

    assert_eq!(state.pending_reveals.len(), 1);
    let report = engine.end_turn(&mut state).unwrap();

    assert_eq!(report.drawn[Side::A], 3);
    assert_eq!(state.hands[Side::A].len(), hand_before + 3);
    assert!(state.pending_reveals.is_empty());
}

/// New York queues a draw for whoever plays there.
#[test]
fn test_location_draw() {
    let engine = engine_with(vec![
        LocationDefinition::new("New York", "Draw a card.", LocationEffect::DrawCard, 1),
        LocationDefinition::plain("Centre"),
        LocationDefinition::plain("South"),
    ]);
    let mut state = engine.create_match(None, 5);
    let ny = location_named(&state, "New York");
    let wasp = give(&engine, &mut state, Side::B, 10);
    engine.play_card(&mut state, wasp, ny, Side::B).unwrap();

    assert_eq!(state.pending_location_draws.len(), 1);
    let report = engine.end_turn(&mut state).unwrap();
    assert_eq!(report.drawn[Side::B], 2);
    assert_eq!(report.drawn[Side::A], 1);
}

/// Unspent energy carries into the next turn.
#[test]
fn test_energy_carry_over() {
    let engine = plain_engine();
    let mut state = engine.create_match(None, 1);

    for expected in [3, 6, 10, 15] {
        engine.end_turn(&mut state).unwrap();
        assert_eq!(state.energy[Side::A], expected);
    }
}

/// A play that fails validation changes nothing.
#[test]
fn test_failed_play_is_atomic() {
    let engine = plain_engine();
    let mut state = engine.create_match(None, 1);
    let hulk = give(&engine, &mut state, Side::A, 3);
    let before = state.clone();

    assert!(matches!(
        engine.play_card(&mut state, hulk, 0, Side::A),
        Err(PlayError::InsufficientEnergy { cost: 6, available: 1 })
    ));
    assert_eq!(state.hands, before.hands);
    assert_eq!(state.locations, before.locations);
    assert_eq!(state.energy, before.energy);
    assert_eq!(state.history.len(), before.history.len());
}

/// A full match ends with a decided result and then refuses everything.
#[test]
fn test_full_match_reaches_result() {
    let engine = MatchEngine::standard();
    let mut state = engine.create_match(None, 77);
    let mut opponent_rng = state.rng.stream("opponent");

    for _ in 0..state.max_turns {
        for side in Side::all() {
            while engine
                .random_opponent_play(&mut state, side, &mut opponent_rng)
                .is_some()
            {}
        }
        engine.end_turn(&mut state).unwrap();
    }

    assert!(state.game_over);
    assert!(matches!(state.winner, Winner::SideA | Winner::SideB | Winner::Tie));
    assert_eq!(state.winner, MatchEngine::score(&state));
    assert_eq!(engine.play_card(&mut state, 0, 0, Side::A), Err(PlayError::GameOver));
}

/// A persisted match resumes exactly where it left off.
#[test]
fn test_persisted_match_resumes_identically() {
    let engine = MatchEngine::standard();
    let mut state = engine.create_match(None, 21);
    engine.end_turn(&mut state).unwrap();

    let mut restored = MatchState::decode(&state.encode().unwrap()).unwrap();

    engine.end_turn(&mut state).unwrap();
    engine.end_turn(&mut restored).unwrap();
    assert_eq!(state.hands, restored.hands);
    assert_eq!(state.decks, restored.decks);
    assert_eq!(state.energy, restored.energy);
    assert_eq!(state.rng.state(), restored.rng.state());
}

/// Deck selection drives side A's cards; side B keeps the default deck.
#[test]
fn test_selected_deck() {
    let engine = MatchEngine::standard();
    let selection: Vec<CardId> = (6..=15).map(CardId::new).collect();
    let state = engine.create_match(Some(&selection), 8);

    let ids_a: Vec<CardId> = state.decks[Side::A]
        .iter()
        .chain(state.hands[Side::A].iter())
        .map(|c| c.card_id())
        .collect();
    assert_eq!(ids_a.len(), 10);
    assert!(ids_a.iter().all(|id| selection.contains(id)));

    assert!(state.decks[Side::B]
        .iter()
        .chain(state.hands[Side::B].iter())
        .all(|c| c.card_id().raw() <= 10));
}
