//! One game run: cumulative score, quote progression, and the derived level,
//! over at most `MAX_QUOTES_PER_GAME` puzzles.

use std::collections::HashSet;

use tracing::info;

use crate::domain::{GameError, Quote};
use crate::rng::{random_index, RandomSource};
use crate::scoring::ScoreBreakdown;

pub const MAX_QUOTES_PER_GAME: u32 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
  NotStarted,
  InProgress,
  Completed,
}

/// What `advance` decided: serve another quote, or the run is over.
#[derive(Clone, Debug)]
pub enum Advance {
  Next(Quote),
  Completed,
}

/// Owned, explicit session state. One instance per run; outlives individual
/// puzzles and is handed to the leaderboard on completion.
#[derive(Clone, Debug)]
pub struct GameSession {
  phase: SessionPhase,
  pub player_name: String,
  pub total_score: u32,
  pub quotes_completed: u32,
  pub level: u32,
  used_quote_texts: HashSet<String>,
}

impl GameSession {
  pub fn new() -> Self {
    Self {
      phase: SessionPhase::NotStarted,
      player_name: String::new(),
      total_score: 0,
      quotes_completed: 0,
      level: 1,
      used_quote_texts: HashSet::new(),
    }
  }

  pub fn phase(&self) -> SessionPhase {
    self.phase
  }

  /// Begin a run under `player_name`, resetting all totals.
  pub fn start(&mut self, player_name: &str) -> Result<(), GameError> {
    let name = player_name.trim();
    if name.is_empty() {
      return Err(GameError::MissingPlayerName);
    }
    self.player_name = name.to_string();
    self.total_score = 0;
    self.quotes_completed = 0;
    self.level = 1;
    self.used_quote_texts.clear();
    self.phase = SessionPhase::InProgress;
    info!(target: "engine", player = %self.player_name, "game run started");
    Ok(())
  }

  /// Fold one checked puzzle into the run totals.
  pub fn record_completion(&mut self, breakdown: &ScoreBreakdown) {
    self.total_score += breakdown.total;
    self.quotes_completed += 1;
    self.level = self.quotes_completed / 5 + 1;
  }

  /// Either pick the next quote (uniform among quotes not yet used this run,
  /// clearing the used-set once the whole corpus has been seen) or finish
  /// the run.
  pub fn advance(&mut self, corpus: &[Quote], rng: &mut dyn RandomSource) -> Advance {
    if self.quotes_completed >= MAX_QUOTES_PER_GAME {
      self.phase = SessionPhase::Completed;
      info!(
        target: "engine",
        player = %self.player_name,
        total = self.total_score,
        level = self.level,
        "game run completed"
      );
      return Advance::Completed;
    }

    let available: Vec<&Quote> = corpus
      .iter()
      .filter(|q| !self.used_quote_texts.contains(&q.text))
      .collect();
    let chosen = if available.is_empty() {
      // Whole corpus used this run; repeats become possible again.
      self.used_quote_texts.clear();
      corpus[random_index(rng, corpus.len())].clone()
    } else {
      available[random_index(rng, available.len())].clone()
    };
    self.used_quote_texts.insert(chosen.text.clone());
    Advance::Next(chosen)
  }
}

impl Default for GameSession {
  fn default() -> Self {
    Self::new()
  }
}
