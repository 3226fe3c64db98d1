//! Randomness abstraction for puzzle generation and shuffling.
//!
//! Everything that draws randomness takes a `RandomSource` so tests can run
//! against a seeded generator and observe identical puzzles. Production code
//! uses `ThreadRandom`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A uniform source of floats in `[0, 1)`.
pub trait RandomSource: Send {
  fn next(&mut self) -> f64;
}

/// Thread-local RNG, the default at runtime.
#[derive(Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
  fn next(&mut self) -> f64 {
    rand::thread_rng().gen::<f64>()
  }
}

/// Deterministic source for reproducible puzzles (and tests).
pub struct SeededRandom {
  rng: StdRng,
}

impl SeededRandom {
  pub fn new(seed: u64) -> Self {
    Self { rng: StdRng::seed_from_u64(seed) }
  }
}

impl RandomSource for SeededRandom {
  fn next(&mut self) -> f64 {
    self.rng.gen::<f64>()
  }
}

/// Draw a uniform index in `[0, bound)`.
pub fn random_index(rng: &mut dyn RandomSource, bound: usize) -> usize {
  debug_assert!(bound > 0);
  let i = (rng.next() * bound as f64) as usize;
  // next() < 1.0, but guard the cast boundary anyway
  i.min(bound - 1)
}

/// Fisher–Yates, driven by the supplied source: for `i` from `len-1` down to
/// 1, swap element `i` with a uniform element of `[0, i]`.
pub fn fisher_yates<T>(items: &mut [T], rng: &mut dyn RandomSource) {
  for i in (1..items.len()).rev() {
    let j = random_index(rng, i + 1);
    items.swap(i, j);
  }
}
