//! Effect resolution: power, cost and on-reveal execution.
//!
//! `EffectResolver` is stateless. Power and cost queries are pure functions
//! of the board; the mutating entry points take the `MatchState` explicitly
//! and draw any randomness from the match RNG.
//!
//! ## Power
//!
//! A card's power is its base power plus the sum of every modifier that
//! reaches it. Modifiers are summed, so the order cards were played in never
//! changes the result, and there is no floor: power may go negative.
//!
//! ## Cost
//!
//! A card's cost is its base cost plus the owner's hand-cost increase plus
//! one `cost_modifier` per location on the board, clamped at zero.

use tracing::{debug, trace};

use super::effect::{AbilityEffect, BoostTarget, TargetSide};
use super::pending::{PendingLocationDraw, PendingReveal};
use crate::cards::{CardInstance, InstanceId};
use crate::core::{MatchAction, MatchState, Side, SideMap};
use crate::locations::{LocationEffect, LocationState};

/// What an on-reveal trigger did at play time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The card has no on-reveal ability.
    Nothing,
    /// Deferred to end of turn.
    Queued,
    /// Cards removed from the board, in removal order.
    Destroyed(Vec<InstanceId>),
    /// The side's hand-cost increase, after the trigger.
    HandCostIncreased { side: Side, total: i32 },
}

/// Stateless effect resolver.
pub struct EffectResolver;

impl EffectResolver {
    // === Power ===

    /// Sum of every modifier affecting `card` at `location`.
    ///
    /// `own_side` is the row `card` sits in; `opposing_side` is the other row
    /// at the same location.
    #[must_use]
    pub fn power_modifier(
        card: &CardInstance,
        location: &LocationState,
        own_side: &[CardInstance],
        opposing_side: &[CardInstance],
    ) -> i32 {
        let alone = own_side.len() == 1;
        let mut modifier = 0;

        match location.effect() {
            LocationEffect::PowerBoost => modifier += location.value(),
            LocationEffect::ReduceAllPower => modifier -= location.value(),
            LocationEffect::SingleCardBonus if alone => modifier += location.value(),
            _ => {}
        }

        for other in own_side.iter().filter(|c| c.instance != card.instance) {
            if let Some(AbilityEffect::PowerBoost {
                amount,
                target: BoostTarget::OtherCardsAtLocation,
            }) = other.ability().ongoing_effect()
            {
                modifier += amount;
            }
        }

        if let Some(AbilityEffect::WhenAlone { amount }) = card.ability().ongoing_effect() {
            if alone {
                modifier += amount;
            }
        }

        for opponent in opposing_side {
            if let Some(AbilityEffect::ReduceOpponentPower { amount }) =
                opponent.ability().ongoing_effect()
            {
                modifier -= amount;
            }
        }

        for any in own_side.iter().chain(opposing_side) {
            if let Some(AbilityEffect::ReduceAllPower { amount }) = any.ability().ongoing_effect() {
                modifier -= amount;
            }
        }

        modifier
    }

    /// Current power of a card sitting in `side`'s row at `location`.
    #[must_use]
    pub fn card_power(card: &CardInstance, location: &LocationState, side: Side) -> i32 {
        card.base_power()
            + Self::power_modifier(card, location, location.row(side), location.row(side.other()))
    }

    /// Total power of one side at a location.
    #[must_use]
    pub fn side_power(location: &LocationState, side: Side) -> i32 {
        location
            .row(side)
            .iter()
            .map(|card| Self::card_power(card, location, side))
            .sum()
    }

    // === Cost ===

    /// Cost adjustment contributed by one location.
    #[must_use]
    pub fn cost_modifier(location: &LocationState) -> i32 {
        match location.effect() {
            LocationEffect::CostReduction => -location.value(),
            _ => 0,
        }
    }

    /// Energy needed to play `card`, given the board and its owner's
    /// hand-cost increase.
    #[must_use]
    pub fn card_cost(card: &CardInstance, locations: &[LocationState], hand_cost_increase: i32) -> u32 {
        let modifiers: i32 = locations.iter().map(Self::cost_modifier).sum();
        (card.base_cost() + hand_cost_increase + modifiers).max(0) as u32
    }

    // === Triggers ===

    /// Run `card`'s on-reveal ability after it was placed at `location`.
    ///
    /// Destroy and hand-cost effects apply now; every other on-reveal effect
    /// is queued for end of turn.
    pub fn apply_on_reveal(
        state: &mut MatchState,
        card: &CardInstance,
        location: usize,
        side: Side,
    ) -> RevealOutcome {
        let Some(effect) = card.ability().reveal_effect().copied() else {
            return RevealOutcome::Nothing;
        };

        if !effect.resolves_immediately() {
            state.pending_reveals.push_back(PendingReveal {
                instance: card.instance,
                card: card.card_id(),
                effect,
                location,
                side,
            });
            trace!(source = %card.instance, ?effect, "On-reveal queued");
            return RevealOutcome::Queued;
        }

        match effect {
            AbilityEffect::DestroyCard { count, target } => {
                let target_side = match target {
                    TargetSide::Own => side,
                    TargetSide::Opponent => side.other(),
                };
                let destroyed =
                    Self::destroy_random(state, card.instance, location, target_side, count);
                debug!(
                    source = %card.instance,
                    location,
                    target = %target_side,
                    destroyed = destroyed.len(),
                    "Destroy resolved"
                );
                RevealOutcome::Destroyed(destroyed)
            }
            AbilityEffect::IncreaseHandCost { amount } => {
                state.hand_cost_increase[side] += amount as i32;
                let total = state.hand_cost_increase[side];
                debug!(%side, amount, total, "Hand cost increased");
                RevealOutcome::HandCostIncreased { side, total }
            }
            _ => RevealOutcome::Nothing,
        }
    }

    /// Remove up to `count` random cards from `target`'s row, never `source`.
    fn destroy_random(
        state: &mut MatchState,
        source: InstanceId,
        location: usize,
        target: Side,
        count: u32,
    ) -> Vec<InstanceId> {
        let Some(loc) = state.locations.get(location) else {
            return Vec::new();
        };
        let candidates: Vec<usize> = loc
            .row(target)
            .iter()
            .enumerate()
            .filter(|(_, c)| c.instance != source)
            .map(|(i, _)| i)
            .collect();

        let mut picked: Vec<usize> = state
            .rng
            .sample_indices(candidates.len(), count as usize)
            .into_iter()
            .map(|i| candidates[i])
            .collect();
        // Highest index first so earlier removals don't shift later ones.
        picked.sort_unstable_by(|a, b| b.cmp(a));

        let mut destroyed = Vec::with_capacity(picked.len());
        for index in picked {
            let Some(victim) = state.locations[location].take(target, index) else {
                continue;
            };
            let (instance, owner) = (victim.instance, victim.owner);
            state.destroyed[owner].push_back(victim);
            state.record(MatchAction::Destroyed {
                instance,
                owner,
                location,
            });
            destroyed.push(instance);
        }
        destroyed
    }

    /// Queue the location's draw, if it grants one, for a side that just
    /// played there.
    pub fn on_location_entered(state: &mut MatchState, location: usize, side: Side) {
        let Some(loc) = state.locations.get(location) else {
            return;
        };
        if loc.effect() == LocationEffect::DrawCard {
            let count = loc.value().max(0) as u32;
            state.pending_location_draws.push_back(PendingLocationDraw {
                side,
                count,
                location,
            });
            trace!(%side, location, count, "Location draw queued");
        }
    }

    /// Drain both pending queues: reveals in play order, then location draws
    /// in accrual order.
    ///
    /// Returns the number of cards each side drew.
    pub fn resolve_pending(state: &mut MatchState) -> SideMap<u32> {
        let mut drawn = SideMap::with_value(0);

        let reveals = std::mem::take(&mut state.pending_reveals);
        for reveal in reveals {
            match reveal.effect {
                AbilityEffect::DrawCards { count } => {
                    drawn[reveal.side] += state.draw(reveal.side, count);
                }
                // Ongoing-only and immediate effects have nothing left to do here.
                AbilityEffect::None
                | AbilityEffect::DestroyCard { .. }
                | AbilityEffect::PowerBoost { .. }
                | AbilityEffect::ReduceOpponentPower { .. }
                | AbilityEffect::ReduceAllPower { .. }
                | AbilityEffect::WhenAlone { .. }
                | AbilityEffect::IncreaseHandCost { .. } => {}
            }
        }

        let draws = std::mem::take(&mut state.pending_location_draws);
        for draw in draws {
            drawn[draw.side] += state.draw(draw.side, draw.count);
        }

        if drawn[Side::A] > 0 || drawn[Side::B] > 0 {
            debug!(a = drawn[Side::A], b = drawn[Side::B], "Pending effects resolved");
        }
        drawn
    }
}
