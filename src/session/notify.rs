//! Outbound notifications to connected players.
//!
//! The directory never talks to a transport. It hands `Notification`s to a
//! `Notifier` supplied by the host, which routes them however it likes.

use serde::{Deserialize, Serialize};

use super::registry::MatchId;
use crate::core::{Side, TerminationReason, Winner};
use crate::rules::MatchSnapshot;

/// Identity of a player as known to the host (session id, account name...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerKey(pub String);

impl PlayerKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl std::fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// The player was paired and seated.
    MatchFound { match_id: MatchId, side: Side },
    /// The match changed; the snapshot is from the recipient's side.
    SnapshotUpdated(Box<MatchSnapshot>),
    /// The final turn was scored.
    MatchComplete { winner: Winner },
    /// The match was ended outside the rules.
    MatchTerminated { reason: TerminationReason },
}

/// Delivery capability supplied by the host.
pub trait Notifier: Send + Sync {
    fn notify(&self, player: &PlayerKey, notification: Notification);
}

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _player: &PlayerKey, _notification: Notification) {}
}
