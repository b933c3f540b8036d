//! Deterministic random number generation for battles.
//!
//! ## Key Features
//!
//! - **Deterministic**: the same seed produces an identical battle
//! - **Serializable**: O(1) state capture, so an in-progress battle can be
//!   written to the save blob and resumed mid-shuffle-sequence
//! - **Uniform shuffles**: Fisher–Yates through `rand`'s `SliceRandom`
//!
//! The RNG serializes through [`BattleRngState`], which records the seed and
//! the ChaCha8 word position rather than the whole keystream.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Deterministic RNG owned by a single battle.
///
/// Uses ChaCha8 for speed while keeping high-quality randomness. Each battle
/// owns its own `BattleRng`; nothing is shared across battles.
#[derive(Clone, Debug)]
pub struct BattleRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl BattleRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Shuffle a slice in place (uniform Fisher–Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Pick a uniformly random index below `len`.
    ///
    /// Returns `None` when `len` is 0.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.inner.gen_range(0..len))
        }
    }

    /// Pick a uniformly random element from a slice.
    #[must_use]
    pub fn pick<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Sample up to `count` distinct indices below `len`, in random order.
    pub fn sample_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        use rand::seq::index::sample;
        let take = count.min(len);
        if take == 0 {
            return Vec::new();
        }
        sample(&mut self.inner, len, take).into_vec()
    }

    /// Get the current state for the save blob.
    #[must_use]
    pub fn state(&self) -> BattleRngState {
        BattleRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &BattleRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl Serialize for BattleRng {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.state().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BattleRng {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let state = BattleRngState::deserialize(deserializer)?;
        Ok(Self::from_state(&state))
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of how
/// many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = BattleRng::new(42);
        let mut rng2 = BattleRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.pick_index(1000), rng2.pick_index(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = BattleRng::new(1);
        let mut rng2 = BattleRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.pick_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.pick_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_shuffle() {
        let mut rng = BattleRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Same elements, different order (very likely)
        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_pick() {
        let mut rng = BattleRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.pick(&items);
        assert!(chosen.is_some());
        assert!(items.contains(chosen.unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.pick(&empty).is_none());
    }

    #[test]
    fn test_pick_index_empty() {
        let mut rng = BattleRng::new(42);
        assert_eq!(rng.pick_index(0), None);
    }

    #[test]
    fn test_sample_indices() {
        let mut rng = BattleRng::new(42);

        let sampled = rng.sample_indices(10, 3);
        assert_eq!(sampled.len(), 3);
        let mut unique = sampled.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 3);

        // Count is capped by len
        assert_eq!(rng.sample_indices(2, 5).len(), 2);
        assert!(rng.sample_indices(0, 5).is_empty());
    }

    #[test]
    fn test_state_roundtrip() {
        let mut rng = BattleRng::new(42);

        // Advance the RNG
        for _ in 0..100 {
            rng.pick_index(1000);
        }

        let state = rng.state();

        // Continue generating
        let expected: Vec<_> = (0..10).map(|_| rng.pick_index(1000)).collect();

        // Restore and verify
        let mut restored = BattleRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.pick_index(1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut rng = BattleRng::new(7);
        for _ in 0..13 {
            rng.pick_index(100);
        }

        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: BattleRng = serde_json::from_str(&json).unwrap();

        let expected: Vec<_> = (0..10).map(|_| rng.pick_index(100)).collect();
        let actual: Vec<_> = (0..10).map(|_| restored.pick_index(100)).collect();
        assert_eq!(expected, actual);
    }
}
