//! Location state inside a match.
//!
//! The definition fields are copied in at setup and have no setters; only
//! the two card rows change during play.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{LocationDefinition, LocationEffect};
use crate::cards::CardInstance;
use crate::core::{Side, SideMap};

/// One side's cards at a location, in play order.
pub type SideRow = SmallVec<[CardInstance; 4]>;

/// A location frozen into a match, with both sides' card rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationState {
    definition: LocationDefinition,
    capacity: usize,
    rows: SideMap<SideRow>,
}

impl LocationState {
    /// Freeze a definition into a fresh, empty location.
    #[must_use]
    pub fn new(definition: &LocationDefinition, capacity: usize) -> Self {
        Self {
            definition: definition.clone(),
            capacity,
            rows: SideMap::default(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.definition.text
    }

    #[must_use]
    pub fn effect(&self) -> LocationEffect {
        self.definition.effect
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.definition.value
    }

    #[must_use]
    pub fn definition(&self) -> &LocationDefinition {
        &self.definition
    }

    /// Cards a single side may hold here.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// A side's row, in play order.
    #[must_use]
    pub fn row(&self, side: Side) -> &[CardInstance] {
        &self.rows[side]
    }

    #[must_use]
    pub fn count(&self, side: Side) -> usize {
        self.rows[side].len()
    }

    #[must_use]
    pub fn is_full(&self, side: Side) -> bool {
        self.rows[side].len() >= self.capacity
    }

    /// Append a card to a side's row.
    ///
    /// Hands the card back if the row is full.
    pub fn place(&mut self, side: Side, card: CardInstance) -> Result<(), CardInstance> {
        if self.is_full(side) {
            return Err(card);
        }
        self.rows[side].push(card);
        Ok(())
    }

    /// Remove and return the card at `index` of a side's row.
    pub(crate) fn take(&mut self, side: Side, index: usize) -> Option<CardInstance> {
        (index < self.rows[side].len()).then(|| self.rows[side].remove(index))
    }

    /// Every card here, side A's row first.
    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.rows[Side::A].iter().chain(self.rows[Side::B].iter())
    }
}
