//! Live matches keyed by id.
//!
//! The outer map lock is held only long enough to find or insert a match.
//! Each match has its own lock, and every engine call on it happens under
//! that lock, so different matches never contend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::CardId;
use crate::core::{DirectoryError, GameRng, MatchState, PlayError, Side, TerminationReason};
use crate::rules::{MatchEngine, MatchSnapshot};
use crate::sync::TurnSynchronizer;

/// Identifier of a match in a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl MatchId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Match({})", self.0)
    }
}

/// Result of a player action at the session boundary.
///
/// Rule rejections are not errors here: they come back with `ok == false`
/// and the reason, next to a fresh snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub ok: bool,
    pub reason: Option<PlayError>,
    pub snapshot: MatchSnapshot,
}

impl ActionOutcome {
    fn from_result<T>(result: Result<T, PlayError>, snapshot: MatchSnapshot) -> Self {
        match result {
            Ok(_) => Self {
                ok: true,
                reason: None,
                snapshot,
            },
            Err(reason) => Self {
                ok: false,
                reason: Some(reason),
                snapshot,
            },
        }
    }
}

/// Shared handle to one match.
pub type MatchHandle = Arc<Mutex<MatchState>>;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registry of live matches.
pub struct MatchRegistry {
    engine: MatchEngine,
    matches: Mutex<FxHashMap<MatchId, MatchHandle>>,
    next_id: AtomicU64,
    root_rng: Mutex<GameRng>,
}

impl MatchRegistry {
    /// Create a registry. Every match seed is forked from `seed`.
    #[must_use]
    pub fn new(engine: MatchEngine, seed: u64) -> Self {
        Self {
            engine,
            matches: Mutex::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
            root_rng: Mutex::new(GameRng::new(seed)),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.matches).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create and register a match.
    ///
    /// Synchronized matches gate turns between the two sides.
    pub fn create_match(&self, selection: Option<&[CardId]>, synchronized: bool) -> MatchId {
        let seed = lock(&self.root_rng).fork().seed();
        let mut state = self.engine.create_match(selection, seed);
        if synchronized {
            TurnSynchronizer::enable(&mut state);
        }
        let id = self.insert(state);
        info!(%id, synchronized, "Match registered");
        id
    }

    /// Register an existing match, for example one restored from storage.
    pub fn insert(&self, state: MatchState) -> MatchId {
        let id = MatchId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.matches).insert(id, Arc::new(Mutex::new(state)));
        id
    }

    /// Drop a match from the registry.
    pub fn remove(&self, id: MatchId) -> Option<MatchHandle> {
        let removed = lock(&self.matches).remove(&id);
        if removed.is_some() {
            debug!(%id, "Match removed");
        }
        removed
    }

    /// Handle to a match.
    pub fn get(&self, id: MatchId) -> Result<MatchHandle, DirectoryError> {
        lock(&self.matches)
            .get(&id)
            .cloned()
            .ok_or(DirectoryError::MatchNotFound)
    }

    /// Run `f` with the match locked.
    pub fn with_match<R>(
        &self,
        id: MatchId,
        f: impl FnOnce(&MatchEngine, &mut MatchState) -> R,
    ) -> Result<R, DirectoryError> {
        let handle = self.get(id)?;
        let mut state = lock(&handle);
        Ok(f(&self.engine, &mut state))
    }

    /// Play a card for `side`, respecting turn gating.
    pub fn play_card(
        &self,
        id: MatchId,
        hand_index: usize,
        location_index: usize,
        side: Side,
    ) -> Result<ActionOutcome, DirectoryError> {
        self.with_match(id, |engine, state| {
            let result =
                TurnSynchronizer::new(engine).play_card(state, hand_index, location_index, side);
            ActionOutcome::from_result(result, engine.snapshot(state, Some(side)))
        })
    }

    /// End a turn.
    ///
    /// `None` advances the turn directly (single-player); `Some(side)` marks
    /// that side ready in a synchronized match.
    pub fn end_turn(&self, id: MatchId, side: Option<Side>) -> Result<ActionOutcome, DirectoryError> {
        self.with_match(id, |engine, state| match side {
            Some(side) => {
                let result = TurnSynchronizer::new(engine).end_turn(state, side);
                ActionOutcome::from_result(result, engine.snapshot(state, Some(side)))
            }
            None => {
                let result = engine.end_turn(state);
                ActionOutcome::from_result(result, engine.snapshot(state, None))
            }
        })
    }

    pub fn snapshot(&self, id: MatchId, perspective: Option<Side>) -> Result<MatchSnapshot, DirectoryError> {
        self.with_match(id, |engine, state| engine.snapshot(state, perspective))
    }

    /// Terminate a match. Already-complete matches are left as they are.
    pub fn terminate_match(&self, id: MatchId, reason: TerminationReason) -> Result<(), DirectoryError> {
        self.with_match(id, |engine, state| {
            // GameOver only means it already ended.
            let _ = engine.terminate_match(state, reason);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Winner;

    fn registry() -> MatchRegistry {
        MatchRegistry::new(MatchEngine::standard(), 42)
    }

    #[test]
    fn test_ids_are_monotonic() {
        let registry = registry();
        let first = registry.create_match(None, false);
        let second = registry.create_match(None, false);

        assert!(second > first);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_matches_get_distinct_seeds() {
        let registry = registry();
        let first = registry.create_match(None, false);
        let second = registry.create_match(None, false);

        let seed_a = registry.with_match(first, |_, s| s.rng.seed()).unwrap();
        let seed_b = registry.with_match(second, |_, s| s.rng.seed()).unwrap();
        assert_ne!(seed_a, seed_b);
    }

    #[test]
    fn test_unknown_match() {
        let registry = registry();
        assert_eq!(
            registry.snapshot(MatchId(99), None).unwrap_err(),
            DirectoryError::MatchNotFound
        );
    }

    #[test]
    fn test_rejection_is_an_outcome() {
        let registry = registry();
        let id = registry.create_match(None, true);

        let outcome = registry.play_card(id, 0, 0, Side::B).unwrap();
        assert!(!outcome.ok);
        assert_eq!(outcome.reason, Some(PlayError::NotYourTurn));
        assert_eq!(outcome.snapshot.perspective, Side::B);
    }

    #[test]
    fn test_solo_end_turn() {
        let registry = registry();
        let id = registry.create_match(None, false);

        let outcome = registry.end_turn(id, None).unwrap();
        assert!(outcome.ok);
        assert_eq!(outcome.snapshot.turn, 2);
    }

    #[test]
    fn test_terminate_twice_is_harmless() {
        let registry = registry();
        let id = registry.create_match(None, false);

        registry
            .terminate_match(id, TerminationReason::Cancelled { reason: "shutdown".into() })
            .unwrap();
        registry
            .terminate_match(id, TerminationReason::Abandoned { by: Side::A })
            .unwrap();

        let snapshot = registry.snapshot(id, None).unwrap();
        assert!(snapshot.game_over);
        assert_eq!(snapshot.winner, Winner::Undetermined);
        assert_eq!(
            snapshot.termination,
            Some(TerminationReason::Cancelled { reason: "shutdown".into() })
        );
    }
}
