//! Domain models shared across the engine and the backend: quotes and the
//! engine error taxonomy.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry of the quote corpus. Immutable, externally supplied.
/// `text` is a non-empty, space-delimited sentence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
  pub text: String,
  pub category: String,
}

impl Quote {
  pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
    Self { text: text.into(), category: category.into() }
  }
}

/// Every way an engine operation can fail. All of these are local validation
/// failures surfaced synchronously to the caller; the transport layer decides
/// user-facing messaging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
  /// Quote text was empty or all-whitespace.
  InvalidQuote,
  /// Target slot is revealed or already holds a word.
  SlotOccupiedOrRevealed,
  /// The word to place is not currently in the jumbled pool.
  WordNotInPool,
  /// Revealed hint slots can never be emptied.
  CannotRemoveRevealed,
  /// Moves may not source from or target a revealed slot.
  CannotMoveRevealed,
  /// `check` requires every open slot to be filled.
  IncompleteArrangement,
  /// A run cannot start without a player name.
  MissingPlayerName,
}

impl fmt::Display for GameError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let msg = match self {
      GameError::InvalidQuote => "quote text is empty or all-whitespace",
      GameError::SlotOccupiedOrRevealed => "slot is revealed or already occupied",
      GameError::WordNotInPool => "word is not in the jumbled pool",
      GameError::CannotRemoveRevealed => "cannot remove a revealed hint word",
      GameError::CannotMoveRevealed => "cannot move a revealed hint word",
      GameError::IncompleteArrangement => "fill all blanks before checking",
      GameError::MissingPlayerName => "player name is required",
    };
    f.write_str(msg)
  }
}

impl Error for GameError {}
