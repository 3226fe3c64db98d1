//! Puzzle generation: tokenize a quote, pick revealed hint positions, and
//! jumble the remaining words.
//!
//! Generation is a pure function of the quote plus the draws taken from the
//! supplied `RandomSource`, so a seeded source reproduces the same puzzle.

use serde::Serialize;
use tracing::debug;

use crate::domain::{GameError, Quote};
use crate::rng::{fisher_yates, RandomSource};

/// A token of the quote plus its 0-based position in the original ordering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Word {
  pub text: String,
  pub original_index: usize,
}

/// A generated puzzle: the full target ordering, the hint positions, and the
/// initial jumbled pool. Immutable once generated; the live pool is owned by
/// the arrangement tracker.
#[derive(Clone, Debug)]
pub struct Puzzle {
  pub quote: Quote,
  pub target_words: Vec<Word>,
  /// Ascending. Sorting is cosmetic (stable rendering order), it does not
  /// affect selection fairness.
  pub revealed_indices: Vec<usize>,
  pub jumbled_pool: Vec<Word>,
}

impl Puzzle {
  pub fn generate(quote: &Quote, rng: &mut dyn RandomSource) -> Result<Self, GameError> {
    let target_words: Vec<Word> = quote
      .text
      .split_whitespace()
      .enumerate()
      .map(|(i, w)| Word { text: w.to_string(), original_index: i })
      .collect();
    if target_words.is_empty() {
      return Err(GameError::InvalidQuote);
    }
    let n = target_words.len();

    let num_revealed = num_revealed_for(n);
    let mut indices: Vec<usize> = (0..n).collect();
    fisher_yates(&mut indices, rng);
    indices.truncate(num_revealed);
    indices.sort_unstable();
    let revealed_indices = indices;

    let mut jumbled_pool: Vec<Word> = target_words
      .iter()
      .filter(|w| !revealed_indices.contains(&w.original_index))
      .cloned()
      .collect();
    fisher_yates(&mut jumbled_pool, rng);

    debug!(target: "engine", words = n, revealed = num_revealed, pool = jumbled_pool.len(), "Puzzle generated");

    Ok(Self {
      quote: quote.clone(),
      target_words,
      revealed_indices,
      jumbled_pool,
    })
  }

  pub fn word_count(&self) -> usize {
    self.target_words.len()
  }

  pub fn is_revealed(&self, index: usize) -> bool {
    self.revealed_indices.binary_search(&index).is_ok()
  }
}

/// Tiered hint count: a fraction of the word count, floored, with a per-tier
/// minimum, clamped to the word count.
fn num_revealed_for(n: usize) -> usize {
  let (fraction, min) = match n {
    0..=5 => (0.60, 3),
    6..=10 => (0.50, 5),
    11..=15 => (0.45, 7),
    16..=20 => (0.40, 9),
    _ => (0.40, 10),
  };
  let by_fraction = (n as f64 * fraction).floor() as usize;
  by_fraction.max(min).min(n)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::rng::SeededRandom;

  fn quote(text: &str) -> Quote {
    Quote::new(text, "Test")
  }

  #[test]
  fn empty_or_whitespace_quote_is_rejected() {
    let mut rng = SeededRandom::new(1);
    assert_eq!(Puzzle::generate(&quote(""), &mut rng).unwrap_err(), GameError::InvalidQuote);
    assert_eq!(Puzzle::generate(&quote("   "), &mut rng).unwrap_err(), GameError::InvalidQuote);
  }

  #[test]
  fn hint_count_follows_tier_table() {
    assert_eq!(num_revealed_for(8), 5); // floor(8*0.5)=4, minimum 5 wins
    assert_eq!(num_revealed_for(22), 10); // max(10, floor(22*0.4)=8)
    assert_eq!(num_revealed_for(3), 3); // clamped to n
    assert_eq!(num_revealed_for(5), 3);
    assert_eq!(num_revealed_for(15), 7); // floor(15*0.45)=6, minimum 7
    assert_eq!(num_revealed_for(20), 9); // floor(20*0.4)=8, minimum 9
    assert_eq!(num_revealed_for(30), 12); // floor(30*0.4)=12 beats minimum 10
  }

  #[test]
  fn revealed_and_pool_cover_all_indices_disjointly() {
    let q = quote("one two three four five six seven eight nine ten eleven twelve");
    for seed in 0..20 {
      let p = Puzzle::generate(&q, &mut SeededRandom::new(seed)).unwrap();
      let n = p.word_count();
      let mut seen = vec![0usize; n];
      for &i in &p.revealed_indices {
        seen[i] += 1;
      }
      for w in &p.jumbled_pool {
        seen[w.original_index] += 1;
      }
      assert!(seen.iter().all(|&c| c == 1), "seed {seed}: coverage broken: {seen:?}");
    }
  }

  #[test]
  fn revealed_indices_are_sorted_ascending() {
    let q = quote("a b c d e f g h i j k l m n o p q r s t u v");
    let p = Puzzle::generate(&q, &mut SeededRandom::new(3)).unwrap();
    assert!(p.revealed_indices.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(p.revealed_indices.len(), 10);
  }

  #[test]
  fn same_seed_reproduces_the_same_puzzle() {
    let q = quote("Joy is a natural phenomenon. Misery is your creation.");
    let a = Puzzle::generate(&q, &mut SeededRandom::new(42)).unwrap();
    let b = Puzzle::generate(&q, &mut SeededRandom::new(42)).unwrap();
    assert_eq!(a.revealed_indices, b.revealed_indices);
    assert_eq!(a.jumbled_pool, b.jumbled_pool);
  }

  #[test]
  fn target_words_keep_original_order_and_punctuation() {
    let q = quote("Reactivity is enslavement. Responsibility is freedom.");
    let p = Puzzle::generate(&q, &mut SeededRandom::new(5)).unwrap();
    assert_eq!(p.target_words[2].text, "enslavement.");
    assert!(p.target_words.iter().enumerate().all(|(i, w)| w.original_index == i));
  }
}
