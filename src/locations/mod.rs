//! Locations: the per-match board lanes.
//!
//! - `LocationDefinition`: catalog entry (name, text, passive effect)
//! - `LocationCatalog`: read-only registry matches draw from
//! - `LocationState`: a definition frozen into a match, plus its card rows

pub mod definition;
pub mod registry;
pub mod state;

pub use definition::{LocationDefinition, LocationEffect};
pub use registry::LocationCatalog;
pub use state::{LocationState, SideRow};
