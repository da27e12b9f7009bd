//! Location catalog.
//!
//! Same shape as the card catalog: built once, shared read-only, stable
//! order. Matches draw their locations from it at setup.

use rustc_hash::FxHashMap;

use super::definition::{LocationDefinition, LocationEffect};

/// Registry of location definitions, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct LocationCatalog {
    locations: Vec<LocationDefinition>,
    index: FxHashMap<String, usize>,
}

impl LocationCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location definition.
    ///
    /// Panics if a location with the same name already exists.
    pub fn register(&mut self, location: LocationDefinition) {
        if self.index.contains_key(&location.name) {
            panic!("Location {:?} already registered", location.name);
        }
        self.index.insert(location.name.clone(), self.locations.len());
        self.locations.push(location);
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&LocationDefinition> {
        self.index.get(name).map(|&i| &self.locations[i])
    }

    /// All definitions, in registration order.
    #[must_use]
    pub fn all(&self) -> &[LocationDefinition] {
        &self.locations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// The built-in location table.
    #[must_use]
    pub fn standard() -> Self {
        [
            LocationDefinition::new(
                "Asgard",
                "All cards cost 1 less.",
                LocationEffect::CostReduction,
                1,
            ),
            LocationDefinition::new(
                "Wakanda",
                "Add 1 power to all cards here.",
                LocationEffect::PowerBoost,
                1,
            ),
            LocationDefinition::new("New York", "Draw a card.", LocationEffect::DrawCard, 1),
            LocationDefinition::new(
                "Sanctum Sanctorum",
                "If you have one card here, +5 power.",
                LocationEffect::SingleCardBonus,
                5,
            ),
            LocationDefinition::new(
                "Negative Zone",
                "Cards here have -1 power.",
                LocationEffect::ReduceAllPower,
                1,
            ),
        ]
        .into_iter()
        .collect()
    }
}

impl FromIterator<LocationDefinition> for LocationCatalog {
    fn from_iter<I: IntoIterator<Item = LocationDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for location in iter {
            catalog.register(location);
        }
        catalog
    }
}
