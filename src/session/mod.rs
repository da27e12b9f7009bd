//! Session layer: live matches, seated players, matchmaking.
//!
//! - `MatchRegistry`: match id to an independently lockable match
//! - `SessionDirectory`: player to seat, wait-list pairing, leaving
//! - `Notifier`: host-supplied delivery of `Notification`s
//!
//! Transport, authentication and storage belong to the host.

pub mod directory;
pub mod notify;
pub mod registry;

pub use directory::{QueueStatus, Seat, SessionDirectory};
pub use notify::{Notification, Notifier, NullNotifier, PlayerKey};
pub use registry::{ActionOutcome, MatchHandle, MatchId, MatchRegistry};
