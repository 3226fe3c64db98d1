//! Answer checking and score calculation.
//!
//! Two correctness signals are computed independently, exactly as the game
//! has always done it:
//!   1. whole-string match of the normalized reconstructed sentence, and
//!   2. a per-slot positional word count.
//! They can disagree on punctuation/whitespace edge cases; the whole-string
//! match decides `is_correct`, the positional count feeds partial accuracy.

use serde::Serialize;
use tracing::debug;

use crate::arrangement::Arrangement;
use crate::domain::GameError;
use crate::util::{normalize_sentence, normalize_token};

/// Additive score components. All non-negative; `total` is their sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
  pub base_score: u32,
  pub time_bonus: u32,
  pub accuracy_bonus: u32,
  pub speed_bonus: u32,
  pub total: u32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
  pub is_correct: bool,
  /// 1.0 on an exact match, otherwise the fraction of positionally correct
  /// slots.
  pub accuracy: f64,
  pub breakdown: ScoreBreakdown,
}

/// Validate a completed arrangement against the original quote text and
/// score it. `elapsed_seconds` is captured by the caller at the moment of
/// the check action.
pub fn check(
  arrangement: &Arrangement,
  quote_text: &str,
  elapsed_seconds: f64,
) -> Result<CheckResult, GameError> {
  if !arrangement.is_complete() {
    return Err(GameError::IncompleteArrangement);
  }

  let candidate = normalize_sentence(
    &arrangement
      .slots()
      .iter()
      .map(|s| s.as_ref().map(|w| w.text.as_str()).unwrap_or(""))
      .collect::<Vec<_>>()
      .join(" "),
  );
  let target = normalize_sentence(quote_text);
  let is_exact_match = candidate == target;

  let original_tokens: Vec<String> = quote_text.split_whitespace().map(normalize_token).collect();
  let correct_count = arrangement
    .slots()
    .iter()
    .enumerate()
    .filter(|(i, slot)| {
      slot
        .as_ref()
        .map(|w| Some(normalize_token(&w.text)) == original_tokens.get(*i).cloned())
        .unwrap_or(false)
    })
    .count();

  let n = arrangement.slots().len();
  let (is_correct, accuracy) = if is_exact_match {
    (true, 1.0)
  } else {
    (false, correct_count as f64 / n as f64)
  };

  let breakdown = calculate_score(elapsed_seconds, accuracy, is_correct);
  debug!(
    target: "engine",
    is_correct,
    accuracy,
    correct_count,
    total = breakdown.total,
    "arrangement checked"
  );

  Ok(CheckResult { is_correct, accuracy, breakdown })
}

/// Score formula, floored to integers and never negative:
/// base 500 (scaled by accuracy when wrong), time bonus up to 60s, accuracy
/// bonus, and a speed bonus for correct answers under 30s.
pub fn calculate_score(time_taken: f64, accuracy: f64, is_correct: bool) -> ScoreBreakdown {
  let base_score = if is_correct { 500 } else { (500.0 * accuracy).floor() as u32 };

  let time_bonus = if time_taken <= 60.0 {
    (1000.0 * (1.0 - time_taken / 60.0)).floor() as u32
  } else {
    0
  };

  let accuracy_bonus = (300.0 * accuracy).floor() as u32;

  let speed_bonus = if is_correct && time_taken <= 30.0 {
    (500.0 * (1.0 - time_taken / 30.0)).floor() as u32
  } else {
    0
  };

  let total = base_score + time_bonus + accuracy_bonus + speed_bonus;
  ScoreBreakdown { base_score, time_bonus, accuracy_bonus, speed_bonus, total }
}
