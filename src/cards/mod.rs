//! Card system: definitions, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data (power, cost, ability)
//! - `InstanceId`: Identifier of one copy inside a match
//! - `CardInstance`: A definition copy owned by exactly one zone
//! - `CardCatalog`: Read-only definition lookup

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardDefinition, CardId};
pub use instance::{CardInstance, InstanceId};
pub use registry::CardCatalog;
