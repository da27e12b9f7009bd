//! Match configuration.
//!
//! The engine never hardcodes turn counts, deck sizes or board capacity.
//! `MatchConfig` carries them, and `MatchConfigBuilder` overrides individual
//! values on top of the standard ruleset.

use serde::{Deserialize, Serialize};

/// Tunable rules for a match.
///
/// ## Example
///
/// ```
/// use lane_skirmish::core::MatchConfig;
///
/// let config = MatchConfig::builder().max_turns(6).build();
/// assert_eq!(config.max_turns, 6);
/// assert_eq!(config.deck_size, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of turns; the final `end_turn` scores the board.
    pub max_turns: u32,

    /// Cards drawn by each side at match start.
    pub starting_hand: usize,

    /// Cards in a constructed deck.
    pub deck_size: usize,

    /// Locations chosen at setup.
    pub location_count: usize,

    /// Cards one side may hold at a single location.
    pub max_cards_per_side: usize,

    /// Highest per-turn energy grant (carry-over may exceed it).
    pub energy_cap: u32,

    /// Energy on turn 1.
    pub starting_energy: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_turns: 5,
            starting_hand: 3,
            deck_size: 10,
            location_count: 3,
            max_cards_per_side: 4,
            energy_cap: 6,
            starting_energy: 1,
        }
    }
}

impl MatchConfig {
    /// Start a builder from the standard ruleset.
    #[must_use]
    pub fn builder() -> MatchConfigBuilder {
        MatchConfigBuilder::default()
    }

    /// Energy granted at the start of `turn`, before carry-over.
    #[must_use]
    pub fn turn_energy(&self, turn: u32) -> u32 {
        turn.min(self.energy_cap)
    }
}

/// Builder for `MatchConfig`.
#[derive(Clone, Debug, Default)]
pub struct MatchConfigBuilder {
    config: MatchConfig,
}

impl MatchConfigBuilder {
    pub fn max_turns(mut self, turns: u32) -> Self {
        assert!(turns >= 1, "A match needs at least one turn");
        self.config.max_turns = turns;
        self
    }

    pub fn starting_hand(mut self, size: usize) -> Self {
        self.config.starting_hand = size;
        self
    }

    pub fn deck_size(mut self, size: usize) -> Self {
        self.config.deck_size = size;
        self
    }

    pub fn location_count(mut self, count: usize) -> Self {
        assert!(count >= 1, "A match needs at least one location");
        self.config.location_count = count;
        self
    }

    pub fn max_cards_per_side(mut self, max: usize) -> Self {
        self.config.max_cards_per_side = max;
        self
    }

    pub fn energy_cap(mut self, cap: u32) -> Self {
        self.config.energy_cap = cap;
        self
    }

    pub fn starting_energy(mut self, energy: u32) -> Self {
        self.config.starting_energy = energy;
        self
    }

    #[must_use]
    pub fn build(self) -> MatchConfig {
        self.config
    }
}
