//! Player directory and matchmaking.
//!
//! `SessionDirectory` maps player keys to seats and keeps the wait-list.
//! Both live under one lock, so pairing is atomic: two queued players are
//! removed, one synchronized match is created and both seats are recorded
//! before any other request sees the directory.
//!
//! Lock order is directory, then registry, then match. Notifications are
//! sent after the directory lock is released.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::notify::{Notification, Notifier, PlayerKey};
use super::registry::{lock, ActionOutcome, MatchId, MatchRegistry};
use crate::cards::CardId;
use crate::core::{DirectoryError, Side, TerminationReason};
use crate::rules::MatchSnapshot;

/// Where a player sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub match_id: MatchId,
    pub side: Side,
}

/// A player's standing with the directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueStatus {
    /// Neither queued nor playing.
    Idle,
    /// Waiting; `position` is 1-based.
    Queued { position: usize, queue_size: usize },
    /// Seated in a match.
    InMatch(Seat),
}

#[derive(Clone, Debug)]
struct Waiting {
    player: PlayerKey,
    selection: Option<Vec<CardId>>,
}

#[derive(Debug, Default)]
struct DirectoryInner {
    seats: FxHashMap<PlayerKey, Seat>,
    queue: VecDeque<Waiting>,
}

impl DirectoryInner {
    fn queue_position(&self, player: &PlayerKey) -> Option<usize> {
        self.queue.iter().position(|w| &w.player == player)
    }

    fn opponent(&self, seat: Seat) -> Option<PlayerKey> {
        self.seats
            .iter()
            .find(|(_, s)| s.match_id == seat.match_id && s.side != seat.side)
            .map(|(player, _)| player.clone())
    }

    fn status(&self, player: &PlayerKey) -> QueueStatus {
        if let Some(seat) = self.seats.get(player) {
            return QueueStatus::InMatch(*seat);
        }
        match self.queue_position(player) {
            Some(index) => QueueStatus::Queued {
                position: index + 1,
                queue_size: self.queue.len(),
            },
            None => QueueStatus::Idle,
        }
    }
}

/// Player directory over a shared `MatchRegistry`.
pub struct SessionDirectory {
    registry: Arc<MatchRegistry>,
    notifier: Arc<dyn Notifier>,
    inner: Mutex<DirectoryInner>,
}

impl SessionDirectory {
    #[must_use]
    pub fn new(registry: Arc<MatchRegistry>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            registry,
            notifier,
            inner: Mutex::new(DirectoryInner::default()),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &MatchRegistry {
        &self.registry
    }

    // === Matchmaking ===

    /// Put a player on the wait-list, pairing the first two waiting players.
    ///
    /// The earlier of a pair sits on side A with their deck selection; side B
    /// plays the default deck. A seat in a match that has already ended is
    /// released so the player can queue again, and the match is dropped once
    /// nobody is left seated in it.
    pub fn enqueue(
        &self,
        player: PlayerKey,
        selection: Option<Vec<CardId>>,
    ) -> Result<QueueStatus, DirectoryError> {
        let (status, paired) = {
            let mut inner = lock(&self.inner);

            if let Some(seat) = inner.seats.get(&player).copied() {
                let finished = self
                    .registry
                    .with_match(seat.match_id, |_, state| state.is_complete())
                    .unwrap_or(true);
                if !finished {
                    return Err(DirectoryError::AlreadyInMatch);
                }
                inner.seats.remove(&player);
                if !inner.seats.values().any(|s| s.match_id == seat.match_id) {
                    self.registry.remove(seat.match_id);
                }
            }
            if inner.queue_position(&player).is_some() {
                return Err(DirectoryError::AlreadyQueued);
            }

            inner.queue.push_back(Waiting {
                player: player.clone(),
                selection,
            });
            debug!(%player, queue_size = inner.queue.len(), "Player queued");

            let paired = self.try_pair(&mut inner);
            (inner.status(&player), paired)
        };

        if let Some((match_id, seated)) = paired {
            for (who, side) in seated {
                self.notifier
                    .notify(&who, Notification::MatchFound { match_id, side });
                self.send_snapshot(&who, match_id, side);
            }
        }
        Ok(status)
    }

    fn try_pair(&self, inner: &mut DirectoryInner) -> Option<(MatchId, [(PlayerKey, Side); 2])> {
        if inner.queue.len() < 2 {
            return None;
        }
        let first = inner.queue.pop_front()?;
        let second = inner.queue.pop_front()?;

        let match_id = self
            .registry
            .create_match(first.selection.as_deref(), true);
        inner.seats.insert(
            first.player.clone(),
            Seat {
                match_id,
                side: Side::A,
            },
        );
        inner.seats.insert(
            second.player.clone(),
            Seat {
                match_id,
                side: Side::B,
            },
        );
        info!(%match_id, a = %first.player, b = %second.player, "Players paired");

        Some((match_id, [(first.player, Side::A), (second.player, Side::B)]))
    }

    /// Take a player off the wait-list.
    pub fn dequeue(&self, player: &PlayerKey) -> Result<(), DirectoryError> {
        let mut inner = lock(&self.inner);
        let index = inner
            .queue_position(player)
            .ok_or(DirectoryError::NotQueued)?;
        inner.queue.remove(index);
        debug!(%player, "Player dequeued");
        Ok(())
    }

    #[must_use]
    pub fn queue_status(&self, player: &PlayerKey) -> QueueStatus {
        lock(&self.inner).status(player)
    }

    /// The seat a player holds.
    pub fn seat(&self, player: &PlayerKey) -> Result<Seat, DirectoryError> {
        lock(&self.inner)
            .seats
            .get(player)
            .copied()
            .ok_or(DirectoryError::PlayerNotInMatch)
    }

    // === Play ===

    pub fn play_card(
        &self,
        player: &PlayerKey,
        hand_index: usize,
        location_index: usize,
    ) -> Result<ActionOutcome, DirectoryError> {
        let (seat, opponent) = self.seat_and_opponent(player)?;
        let outcome =
            self.registry
                .play_card(seat.match_id, hand_index, location_index, seat.side)?;
        self.broadcast(player, seat, opponent.as_ref(), &outcome);
        Ok(outcome)
    }

    /// End the player's half of the current turn.
    pub fn end_turn(&self, player: &PlayerKey) -> Result<ActionOutcome, DirectoryError> {
        let (seat, opponent) = self.seat_and_opponent(player)?;
        let outcome = self.registry.end_turn(seat.match_id, Some(seat.side))?;
        self.broadcast(player, seat, opponent.as_ref(), &outcome);
        Ok(outcome)
    }

    /// The player's match, from their side.
    pub fn snapshot(&self, player: &PlayerKey) -> Result<MatchSnapshot, DirectoryError> {
        let seat = self.seat(player)?;
        self.registry.snapshot(seat.match_id, Some(seat.side))
    }

    /// Leave the wait-list or the current match.
    ///
    /// Leaving a match terminates it, releases both seats and drops it from
    /// the registry. The opponent is told why.
    pub fn leave(&self, player: &PlayerKey) -> Result<(), DirectoryError> {
        let (seat, opponent) = {
            let mut inner = lock(&self.inner);
            if let Some(index) = inner.queue_position(player) {
                inner.queue.remove(index);
                debug!(%player, "Player left the queue");
                return Ok(());
            }
            let seat = inner
                .seats
                .remove(player)
                .ok_or(DirectoryError::PlayerNotInMatch)?;
            let opponent = inner.opponent(seat);
            if let Some(other) = &opponent {
                inner.seats.remove(other);
            }
            (seat, opponent)
        };

        let reason = TerminationReason::Abandoned { by: seat.side };
        // The match may already be gone; the seats are released either way.
        let _ = self.registry.terminate_match(seat.match_id, reason.clone());
        self.registry.remove(seat.match_id);
        info!(%player, match_id = %seat.match_id, "Player left match");

        if let Some(other) = opponent {
            self.notifier
                .notify(&other, Notification::MatchTerminated { reason });
        }
        Ok(())
    }

    fn seat_and_opponent(&self, player: &PlayerKey) -> Result<(Seat, Option<PlayerKey>), DirectoryError> {
        let inner = lock(&self.inner);
        let seat = *inner
            .seats
            .get(player)
            .ok_or(DirectoryError::PlayerNotInMatch)?;
        Ok((seat, inner.opponent(seat)))
    }

    fn send_snapshot(&self, player: &PlayerKey, match_id: MatchId, side: Side) {
        if let Ok(snapshot) = self.registry.snapshot(match_id, Some(side)) {
            self.notifier
                .notify(player, Notification::SnapshotUpdated(Box::new(snapshot)));
        }
    }

    fn broadcast(&self, player: &PlayerKey, seat: Seat, opponent: Option<&PlayerKey>, outcome: &ActionOutcome) {
        if !outcome.ok {
            return;
        }
        self.notifier.notify(
            player,
            Notification::SnapshotUpdated(Box::new(outcome.snapshot.clone())),
        );
        if let Some(other) = opponent {
            self.send_snapshot(other, seat.match_id, seat.side.other());
        }

        if outcome.snapshot.game_over {
            let winner = outcome.snapshot.winner;
            self.notifier
                .notify(player, Notification::MatchComplete { winner });
            if let Some(other) = opponent {
                self.notifier
                    .notify(other, Notification::MatchComplete { winner });
            }
            self.retire(seat.match_id);
        }
    }

    /// Release every seat in a finished match and drop it from the registry.
    fn retire(&self, match_id: MatchId) {
        lock(&self.inner)
            .seats
            .retain(|_, seat| seat.match_id != match_id);
        self.registry.remove(match_id);
        info!(%match_id, "Finished match retired");
    }
}
