//! Seeded randomness for matches.
//!
//! A match owns one `GameRng` and every random rule (shuffles, location
//! draw, destroy targets, deck padding) pulls from it. Callers that need
//! randomness of their own, such as the single-player opponent, get a
//! separate labelled stream so they never disturb the match sequence.
//!
//! The generator persists as a `GameRngState`: its seed, its position in
//! the ChaCha8 keystream and its fork count. Restoring seeks straight to
//! that position.
//!
//! ```
//! use lane_skirmish::core::GameRng;
//!
//! let mut registry_root = GameRng::new(42);
//! let first = registry_root.fork();
//! let second = registry_root.fork();
//! assert_ne!(first.seed(), second.seed());
//!
//! let mut again = GameRng::new(42);
//! assert_eq!(again.fork().seed(), first.seed());
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

const FORK_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 generator with forking and labelled streams.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "GameRngState", into = "GameRngState")]
pub struct GameRng {
    core: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::at(seed, 0, 0)
    }

    fn at(seed: u64, position: u128, forks: u64) -> Self {
        let mut core = ChaCha8Rng::seed_from_u64(seed);
        if position > 0 {
            core.set_word_pos(position);
        }
        Self { core, seed, forks }
    }

    /// Derive the next child generator.
    ///
    /// Children depend only on the parent's seed and how many children it
    /// has produced, never on how much of the parent stream was consumed.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STEP)))
    }

    /// A stream keyed by `label`, independent of this generator's position.
    #[must_use]
    pub fn stream(&self, label: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        label.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        self.core.gen_range(0..bound)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.core);
    }

    /// Uniform pick from a slice; `None` when it is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.core)
    }

    /// `amount` distinct indices from `0..length`, clamped to `length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.core, length, amount.min(length)).into_vec()
    }

    /// Persistable position of this generator.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.core.get_word_pos(),
            fork_counter: self.forks,
        }
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        Self::at(state.seed, state.word_pos, state.fork_counter)
    }
}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        Self::from_state(&state)
    }
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

/// Serialized form of a `GameRng`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// Position in the ChaCha8 keystream, in 32-bit words.
    pub word_pos: u128,
    /// Children forked so far.
    pub fork_counter: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(rng: &mut GameRng, n: usize) -> Vec<usize> {
        (0..n).map(|_| rng.below(1000)).collect()
    }

    #[test]
    fn test_same_seed_same_match() {
        let mut left = GameRng::new(5);
        let mut right = GameRng::new(5);
        assert_eq!(draws(&mut left, 50), draws(&mut right, 50));
    }

    #[test]
    fn test_forks_ignore_parent_consumption() {
        let mut fresh = GameRng::new(5);
        let mut used = GameRng::new(5);
        draws(&mut used, 20);

        let mut a = fresh.fork();
        let mut b = used.fork();
        assert_eq!(draws(&mut a, 10), draws(&mut b, 10));

        let mut c = fresh.fork();
        assert_ne!(a.seed(), c.seed());
        assert_ne!(draws(&mut c, 10), draws(&mut GameRng::new(5), 10));
    }

    #[test]
    fn test_labelled_streams() {
        let base = GameRng::new(5);
        let mut opponent = base.stream("opponent");
        let mut other = base.stream("audit");
        assert_ne!(draws(&mut opponent, 10), draws(&mut other, 10));

        let mut replay = GameRng::new(5).stream("opponent");
        let mut opponent = base.stream("opponent");
        assert_eq!(draws(&mut opponent, 10), draws(&mut replay, 10));
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = GameRng::new(8);
        let mut deck: Vec<u32> = (1..=10).collect();
        rng.shuffle(&mut deck);

        let mut sorted = deck.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_sample_indices() {
        let mut rng = GameRng::new(7);

        let mut picked = rng.sample_indices(5, 3);
        assert!(picked.iter().all(|&i| i < 5));
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 3);

        assert_eq!(rng.sample_indices(2, 10).len(), 2);
        assert!(rng.sample_indices(0, 1).is_empty());
    }

    #[test]
    fn test_pick() {
        let mut rng = GameRng::new(3);
        let lanes = ["north", "centre", "south"];
        assert!(lanes.contains(rng.pick(&lanes).unwrap()));
        assert!(rng.pick::<u8>(&[]).is_none());
    }

    #[test]
    fn test_restore_resumes_sequence() {
        let mut rng = GameRng::new(13);
        draws(&mut rng, 37);
        let _ = rng.fork();

        let saved = rng.state();
        let mut restored = GameRng::from_state(&saved);

        assert_eq!(restored.state(), saved);
        assert_eq!(draws(&mut rng, 10), draws(&mut restored, 10));
        assert_eq!(rng.fork().seed(), restored.fork().seed());
    }

    #[test]
    fn test_serde_goes_through_state() {
        let mut rng = GameRng::new(9);
        draws(&mut rng, 3);

        let json = serde_json::to_string(&rng).unwrap();
        let mut back: GameRng = serde_json::from_str(&json).unwrap();
        assert_eq!(back.state(), rng.state());
        assert_eq!(back.below(100), rng.below(100));
    }
}
