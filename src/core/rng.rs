//! Deterministic random number generation for battles and packs.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Forkable**: Hand each battle its own independent stream
//! - **Serializable**: O(1) state capture, so a restored battle keeps rolling
//!   the same sequence it would have rolled in memory
//! - **Context streams**: Independent sequences for different services
//!
//! ```
//! use card_duel::core::GameRng;
//!
//! let master = GameRng::new(42);
//! let mut battles = master.for_context("battles");
//! let mut duel = battles.fork();
//!
//! let roll = duel.roll(1..=100);
//! assert!((1..=100).contains(&roll));
//! ```

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Deterministic RNG with forking.
///
/// Uses ChaCha8 for speed while maintaining good statistical quality.
/// Serializes through [`GameRngState`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "GameRngState", from = "GameRngState")]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Create from an optional seed, falling back to entropy.
    #[must_use]
    pub fn seeded_or_random(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self::new(context_seed)
    }

    /// Draw a uniform integer from an inclusive range.
    pub fn roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        GameRng::from_state(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll(1..=100), rng2.roll(1..=100));
        }
    }

    #[test]
    fn test_roll_stays_in_range() {
        let mut rng = GameRng::new(7);
        let mut seen_low = false;
        let mut seen_high = false;

        for _ in 0..10_000 {
            let roll = rng.roll(1..=100);
            assert!((1..=100).contains(&roll));
            seen_low |= roll == 1;
            seen_high |= roll == 100;
        }

        assert!(seen_low && seen_high, "both range ends should be reachable");
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = GameRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..10).map(|_| rng.roll(0..=1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked.roll(0..=1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();

        assert_eq!(forked1.seed, forked2.seed);
    }

    #[test]
    fn test_context_streams_differ() {
        let rng = GameRng::new(42);
        let mut packs = rng.for_context("packs");
        let mut battles = rng.for_context("battles");

        let seq1: Vec<_> = (0..10).map(|_| packs.roll(0..=1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| battles.roll(0..=1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.choose(&items);
        assert!(chosen.is_some());
        assert!(items.contains(chosen.unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_state_roundtrip_continues_sequence() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.roll(0..=1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll(0..=1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll(0..=1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_serde_goes_through_state() {
        let mut rng = GameRng::new(9);
        rng.roll(1..=100);
        let _ = rng.fork();

        let json = serde_json::to_string(&rng).unwrap();
        let restored: GameRng = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.state(), rng.state());
        assert_eq!(restored.state().fork_counter, 1);
    }
}
