//! HTTP endpoint handlers. These are thin wrappers that forward to core
//! behaviors and map errors onto status codes.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::{info, instrument};

use crate::logic::{check_can_play, leaderboard_page};
use crate::protocol::*;
use crate::state::{AppState, SubmitError};

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, body), fields(%body.username, body.score))]
pub async fn http_post_score(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SubmitScoreIn>,
) -> impl IntoResponse {
  let result = state
    .submit_score(
      &body.username,
      body.score,
      body.quotes_completed,
      body.level.unwrap_or(1),
      body.time_taken,
    )
    .await;

  match result {
    Ok(score_id) => {
      info!(target: "leaderboard", score_id, "HTTP score accepted");
      (
        StatusCode::OK,
        Json(SubmitScoreOut { message: "Score saved successfully".into(), score_id }),
      )
        .into_response()
    }
    Err(SubmitError::MissingUsername) => (
      StatusCode::BAD_REQUEST,
      Json(ApiErrorOut { error: SubmitError::MissingUsername.to_string(), already_played: None }),
    )
      .into_response(),
    Err(SubmitError::AlreadyPlayed) => (
      StatusCode::FORBIDDEN,
      Json(ApiErrorOut { error: SubmitError::AlreadyPlayed.to_string(), already_played: Some(true) }),
    )
      .into_response(),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_leaderboard(
  State(state): State<Arc<AppState>>,
  Query(q): Query<LeaderboardQuery>,
) -> impl IntoResponse {
  let rows = leaderboard_page(&state, q.limit, q.offset).await;
  info!(target: "leaderboard", rows = rows.len(), "HTTP leaderboard served");
  let total = rows.len();
  Json(LeaderboardOut { leaderboard: rows, total })
}

#[instrument(level = "info", skip(state), fields(%username))]
pub async fn http_can_play(
  State(state): State<Arc<AppState>>,
  Path(username): Path<String>,
) -> impl IntoResponse {
  let can_play = check_can_play(&state, &username).await;
  Json(CanPlayOut { can_play })
}
