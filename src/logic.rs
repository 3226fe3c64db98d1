//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Recording a finished run on the leaderboard
//!   - Leaderboard paging with the original service's defaults
//!   - The authoritative can-play decision

use tracing::{info, instrument, warn};

use crate::session::GameSession;
use crate::state::{AppState, ScoreRow, SubmitError};

const DEFAULT_PAGE_LIMIT: usize = 100;

/// Record a completed run for its player. Submission failure is non-fatal to
/// the run; the caller still reports the final totals to the player.
#[instrument(level = "info", skip(state, session), fields(player = %session.player_name))]
pub async fn submit_final_score(
  state: &AppState,
  session: &GameSession,
  total_time: f64,
) -> Result<u64, SubmitError> {
  let result = state
    .submit_score(
      &session.player_name,
      session.total_score as i64,
      session.quotes_completed,
      session.level,
      Some(total_time),
    )
    .await;
  match &result {
    Ok(id) => info!(target: "leaderboard", score_id = id, total = session.total_score, "Final score recorded"),
    Err(e) => warn!(target: "leaderboard", error = %e, "Final score not recorded"),
  }
  result
}

#[instrument(level = "info", skip(state))]
pub async fn leaderboard_page(state: &AppState, limit: Option<usize>, offset: Option<usize>) -> Vec<ScoreRow> {
  state
    .leaderboard_page(limit.unwrap_or(DEFAULT_PAGE_LIMIT), offset.unwrap_or(0))
    .await
}

#[instrument(level = "info", skip(state), fields(%username))]
pub async fn check_can_play(state: &AppState, username: &str) -> bool {
  state.can_play(username).await
}
