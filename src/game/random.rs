//! Uniform random source port.
//!
//! Level generation and bug movement draw every random number through
//! [`RandomSource`], so a seeded source replays a game exactly.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Produces uniform values in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let scaled = (self.next_f64() * len as f64) as usize;
        scaled.min(len.saturating_sub(1))
    }

    /// Fisher-Yates shuffle driven by this source.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

impl RandomSource for StdRng {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl RandomSource for ThreadRng {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl RandomSource for Box<dyn RandomSource> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Deterministic `StdRng` seeded from a fixed value.
pub fn seeded(seed: u64) -> Box<dyn RandomSource> {
    Box::new(StdRng::seed_from_u64(seed))
}

/// Thread-local OS-seeded generator.
pub fn thread() -> Box<dyn RandomSource> {
    Box::new(rand::rng())
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Used by tests to force specific generation and movement outcomes.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_cycles() {
        let mut source = SequenceSource::new(vec![0.1, 0.5]);
        assert_eq!(source.next_f64(), 0.1);
        assert_eq!(source.next_f64(), 0.5);
        assert_eq!(source.next_f64(), 0.1);
    }

    #[test]
    fn index_stays_in_range() {
        let mut source = SequenceSource::new(vec![0.0, 0.999_999, 1.0]);
        for _ in 0..3 {
            assert!(source.index(4) < 4);
        }
    }

    #[test]
    fn seeded_sources_agree() {
        let mut a = seeded(7);
        let mut b = seeded(7);
        for _ in 0..16 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut source = seeded(3);
        let mut items = [1, 2, 3, 4, 5];
        source.shuffle(&mut items);
        let mut sorted = items;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5]);
    }
}
