//! Card and location abilities.
//!
//! - `Ability` / `AbilityEffect`: closed description of what a card does
//! - `PendingReveal` / `PendingLocationDraw`: effects deferred to end of turn
//! - `EffectResolver`: power and cost computation, on-reveal execution
//!
//! Power and cost are never stored. They are recomputed from the board on
//! every query, so ongoing effects switch on and off as cards come and go.

mod effect;
mod pending;
mod resolver;

pub use effect::{Ability, AbilityEffect, AbilityKind, BoostTarget, TargetSide};
pub use pending::{PendingLocationDraw, PendingReveal};
pub use resolver::{EffectResolver, RevealOutcome};
