//! Player arrangement state: one slot per target word plus the live jumbled
//! pool, kept mutually consistent.
//!
//! Invariant: every non-revealed word is in exactly one of {pool, one slot}
//! at all times. Revealed slots are fixed for the puzzle's lifetime.

use tracing::debug;

use crate::domain::GameError;
use crate::puzzle::{Puzzle, Word};
use crate::rng::{fisher_yates, RandomSource};

#[derive(Clone, Debug)]
pub struct Arrangement {
  slots: Vec<Option<Word>>,
  pool: Vec<Word>,
  revealed: Vec<usize>,
}

impl Arrangement {
  /// Initial arrangement for a puzzle: revealed slots pre-filled with their
  /// word, every other slot empty, pool as generated.
  pub fn new(puzzle: &Puzzle) -> Self {
    let mut slots: Vec<Option<Word>> = vec![None; puzzle.word_count()];
    for &i in &puzzle.revealed_indices {
      slots[i] = Some(puzzle.target_words[i].clone());
    }
    Self {
      slots,
      pool: puzzle.jumbled_pool.clone(),
      revealed: puzzle.revealed_indices.clone(),
    }
  }

  pub fn slots(&self) -> &[Option<Word>] {
    &self.slots
  }

  pub fn pool(&self) -> &[Word] {
    &self.pool
  }

  fn is_revealed(&self, index: usize) -> bool {
    self.revealed.binary_search(&index).is_ok()
  }

  /// A slot index past the end is never placeable, removable, or movable;
  /// it is treated like a revealed slot by all operations below.
  fn is_open(&self, index: usize) -> bool {
    index < self.slots.len() && !self.is_revealed(index)
  }

  /// Take the word with `original_index` out of the pool and put it into an
  /// empty, non-revealed slot.
  pub fn place(&mut self, original_index: usize, slot_index: usize) -> Result<(), GameError> {
    if !self.is_open(slot_index) || self.slots[slot_index].is_some() {
      return Err(GameError::SlotOccupiedOrRevealed);
    }
    let pool_pos = self
      .pool
      .iter()
      .position(|w| w.original_index == original_index)
      .ok_or(GameError::WordNotInPool)?;
    let word = self.pool.remove(pool_pos);
    debug!(target: "engine", word = %word.text, slot = slot_index, "word placed");
    self.slots[slot_index] = Some(word);
    Ok(())
  }

  /// Send a slot's word back to the pool. An already-empty open slot is an
  /// Ok no-op.
  pub fn remove_from_slot(&mut self, slot_index: usize) -> Result<(), GameError> {
    if !self.is_open(slot_index) {
      return Err(GameError::CannotRemoveRevealed);
    }
    if let Some(word) = self.slots[slot_index].take() {
      debug!(target: "engine", word = %word.text, slot = slot_index, "word returned to pool");
      self.pool.push(word);
    }
    Ok(())
  }

  /// Relocate a word between open slots. An empty source slot is an Ok
  /// no-op. If the destination holds a word, that word is evicted back into
  /// the pool (drop-replace, not a swap).
  pub fn move_within_slots(&mut self, from_index: usize, to_index: usize) -> Result<(), GameError> {
    if !self.is_open(from_index) || !self.is_open(to_index) {
      return Err(GameError::CannotMoveRevealed);
    }
    let word = match self.slots[from_index].take() {
      Some(w) => w,
      None => return Ok(()),
    };
    if let Some(displaced) = self.slots[to_index].take() {
      self.pool.push(displaced);
    }
    self.slots[to_index] = Some(word);
    Ok(())
  }

  /// Reorder the pool in place. Slots are untouched.
  pub fn shuffle_pool(&mut self, rng: &mut dyn RandomSource) {
    fisher_yates(&mut self.pool, rng);
  }

  /// Permute the contents of the filled, non-revealed slots among the same
  /// set of positions. No-op with fewer than two such words.
  pub fn shuffle_filled_slots(&mut self, rng: &mut dyn RandomSource) {
    let filled: Vec<usize> = (0..self.slots.len())
      .filter(|&i| !self.is_revealed(i) && self.slots[i].is_some())
      .collect();
    if filled.len() < 2 {
      return;
    }
    let mut words: Vec<Word> = filled.iter().filter_map(|&i| self.slots[i].take()).collect();
    fisher_yates(&mut words, rng);
    for (&i, word) in filled.iter().zip(words) {
      self.slots[i] = Some(word);
    }
  }

  /// True iff every non-revealed slot holds a word.
  pub fn is_complete(&self) -> bool {
    self
      .slots
      .iter()
      .enumerate()
      .all(|(i, slot)| self.is_revealed(i) || slot.is_some())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Quote;
  use crate::rng::SeededRandom;

  fn puzzle(text: &str, seed: u64) -> Puzzle {
    Puzzle::generate(&Quote::new(text, "Test"), &mut SeededRandom::new(seed)).unwrap()
  }

  fn conservation_holds(a: &Arrangement, p: &Puzzle) -> bool {
    let filled_open = a
      .slots()
      .iter()
      .enumerate()
      .filter(|(i, s)| !p.is_revealed(*i) && s.is_some())
      .count();
    a.pool().len() + filled_open == p.word_count() - p.revealed_indices.len()
  }

  fn first_open_empty(a: &Arrangement, p: &Puzzle) -> usize {
    (0..p.word_count())
      .find(|&i| !p.is_revealed(i) && a.slots()[i].is_none())
      .unwrap()
  }

  #[test]
  fn place_moves_word_from_pool_to_slot() {
    let p = puzzle("one two three four five six seven eight", 2);
    let mut a = Arrangement::new(&p);
    let word = a.pool()[0].clone();
    let slot = first_open_empty(&a, &p);
    a.place(word.original_index, slot).unwrap();
    assert_eq!(a.slots()[slot].as_ref(), Some(&word));
    assert!(!a.pool().iter().any(|w| w.original_index == word.original_index));
    assert!(conservation_holds(&a, &p));
  }

  #[test]
  fn place_rejects_occupied_revealed_and_missing_words() {
    let p = puzzle("one two three four five six seven eight", 2);
    let mut a = Arrangement::new(&p);
    let slot = first_open_empty(&a, &p);
    let w0 = a.pool()[0].original_index;
    a.place(w0, slot).unwrap();

    let w1 = a.pool()[0].original_index;
    assert_eq!(a.place(w1, slot).unwrap_err(), GameError::SlotOccupiedOrRevealed);
    assert_eq!(a.place(w1, p.revealed_indices[0]).unwrap_err(), GameError::SlotOccupiedOrRevealed);
    // w0 is in a slot now, not the pool
    let empty = first_open_empty(&a, &p);
    assert_eq!(a.place(w0, empty).unwrap_err(), GameError::WordNotInPool);
    assert!(conservation_holds(&a, &p));
  }

  #[test]
  fn remove_on_empty_open_slot_is_an_idempotent_noop() {
    let p = puzzle("one two three four five six seven eight", 4);
    let mut a = Arrangement::new(&p);
    let slot = first_open_empty(&a, &p);
    let before = a.pool().len();
    a.remove_from_slot(slot).unwrap();
    a.remove_from_slot(slot).unwrap();
    assert_eq!(a.pool().len(), before);
    assert!(a.slots()[slot].is_none());
  }

  #[test]
  fn remove_returns_word_to_pool() {
    let p = puzzle("one two three four five six seven eight", 4);
    let mut a = Arrangement::new(&p);
    let word = a.pool()[1].clone();
    let slot = first_open_empty(&a, &p);
    a.place(word.original_index, slot).unwrap();
    a.remove_from_slot(slot).unwrap();
    assert!(a.slots()[slot].is_none());
    assert_eq!(a.pool().last(), Some(&word));
    assert!(conservation_holds(&a, &p));
  }

  #[test]
  fn revealed_slots_are_immutable_under_every_operation() {
    let p = puzzle("one two three four five six seven eight nine ten", 6);
    let mut a = Arrangement::new(&p);
    let revealed = p.revealed_indices[0];
    let open = first_open_empty(&a, &p);
    let snapshot = a.slots().to_vec();

    let w = a.pool()[0].original_index;
    assert_eq!(a.place(w, revealed).unwrap_err(), GameError::SlotOccupiedOrRevealed);
    assert_eq!(a.remove_from_slot(revealed).unwrap_err(), GameError::CannotRemoveRevealed);
    assert_eq!(a.move_within_slots(revealed, open).unwrap_err(), GameError::CannotMoveRevealed);
    assert_eq!(a.move_within_slots(open, revealed).unwrap_err(), GameError::CannotMoveRevealed);
    assert_eq!(a.slots(), &snapshot[..]);
  }

  #[test]
  fn move_to_occupied_slot_evicts_the_displaced_word() {
    let p = puzzle("one two three four five six seven eight nine ten", 8);
    let mut a = Arrangement::new(&p);
    let first = a.pool()[0].clone();
    let second = a.pool()[1].clone();
    let s1 = first_open_empty(&a, &p);
    a.place(first.original_index, s1).unwrap();
    let s2 = first_open_empty(&a, &p);
    a.place(second.original_index, s2).unwrap();

    a.move_within_slots(s1, s2).unwrap();
    assert!(a.slots()[s1].is_none());
    assert_eq!(a.slots()[s2].as_ref(), Some(&first));
    assert_eq!(a.pool().last(), Some(&second));
    assert!(conservation_holds(&a, &p));
  }

  #[test]
  fn move_from_empty_slot_is_a_noop() {
    let p = puzzle("one two three four five six seven eight", 8);
    let mut a = Arrangement::new(&p);
    let s1 = first_open_empty(&a, &p);
    let word = a.pool()[0].clone();
    let s2 = {
      a.place(word.original_index, s1).unwrap();
      first_open_empty(&a, &p)
    };
    a.move_within_slots(s2, s1).unwrap();
    assert_eq!(a.slots()[s1].as_ref(), Some(&word));
    assert!(a.slots()[s2].is_none());
  }

  #[test]
  fn shuffle_filled_slots_permutes_contents_in_place() {
    let p = puzzle("one two three four five six seven eight nine ten eleven twelve", 9);
    let mut a = Arrangement::new(&p);
    // fill three open slots
    for _ in 0..3 {
      let w = a.pool()[0].original_index;
      let slot = first_open_empty(&a, &p);
      a.place(w, slot).unwrap();
    }
    let filled_before: Vec<usize> = (0..p.word_count())
      .filter(|&i| !p.is_revealed(i) && a.slots()[i].is_some())
      .collect();
    let mut words_before: Vec<Word> =
      filled_before.iter().map(|&i| a.slots()[i].clone().unwrap()).collect();

    a.shuffle_filled_slots(&mut SeededRandom::new(11));

    let filled_after: Vec<usize> = (0..p.word_count())
      .filter(|&i| !p.is_revealed(i) && a.slots()[i].is_some())
      .collect();
    assert_eq!(filled_before, filled_after);
    let mut words_after: Vec<Word> =
      filled_after.iter().map(|&i| a.slots()[i].clone().unwrap()).collect();
    words_before.sort_by_key(|w| w.original_index);
    words_after.sort_by_key(|w| w.original_index);
    assert_eq!(words_before, words_after);
    assert!(conservation_holds(&a, &p));
  }

  #[test]
  fn shuffle_filled_slots_with_one_word_is_a_noop() {
    let p = puzzle("one two three four five six seven eight", 10);
    let mut a = Arrangement::new(&p);
    let w = a.pool()[0].original_index;
    let slot = first_open_empty(&a, &p);
    a.place(w, slot).unwrap();
    let before = a.slots().to_vec();
    a.shuffle_filled_slots(&mut SeededRandom::new(1));
    assert_eq!(a.slots(), &before[..]);
  }

  #[test]
  fn shuffle_pool_does_not_touch_slots() {
    let p = puzzle("one two three four five six seven eight nine ten", 3);
    let mut a = Arrangement::new(&p);
    let slots_before = a.slots().to_vec();
    let mut pool_before: Vec<Word> = a.pool().to_vec();
    a.shuffle_pool(&mut SeededRandom::new(2));
    assert_eq!(a.slots(), &slots_before[..]);
    let mut pool_after = a.pool().to_vec();
    pool_before.sort_by_key(|w| w.original_index);
    pool_after.sort_by_key(|w| w.original_index);
    assert_eq!(pool_before, pool_after);
  }

  #[test]
  fn completeness_tracks_open_slots_only() {
    let p = puzzle("one two three four five six seven eight", 12);
    let mut a = Arrangement::new(&p);
    assert!(!a.is_complete());
    while !a.pool().is_empty() {
      let w = a.pool()[0].original_index;
      let slot = first_open_empty(&a, &p);
      a.place(w, slot).unwrap();
    }
    assert!(a.is_complete());
  }
}
