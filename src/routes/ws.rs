//! WebSocket upgrade + per-connection game loop. Each client message is one
//! player gesture; it is parsed as JSON, applied to the connection's game
//! state, and answered with a single JSON message.
//!
//! The authoritative elapsed time for scoring is captured here, at the
//! moment the check gesture is handled, never from a client-side timer.

use std::sync::Arc;
use std::time::Instant;

use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::arrangement::Arrangement;
use crate::domain::GameError;
use crate::logic::submit_final_score;
use crate::protocol::{arrangement_to_out, puzzle_to_out, ClientWsMessage, ServerWsMessage};
use crate::puzzle::Puzzle;
use crate::rng::{RandomSource, ThreadRandom};
use crate::scoring::{check, ScoreBreakdown};
use crate::session::{Advance, GameSession, SessionPhase};
use crate::state::AppState;

struct ActivePuzzle {
  puzzle: Puzzle,
  arrangement: Arrangement,
  /// Start of this puzzle's clock; elapsed seconds are read at check time.
  served_at: Instant,
}

/// All game state owned by one WebSocket connection.
struct WsGame {
  session: GameSession,
  current: Option<ActivePuzzle>,
  game_started_at: Option<Instant>,
  last_breakdown: Option<ScoreBreakdown>,
}

impl WsGame {
  fn new() -> Self {
    Self {
      session: GameSession::new(),
      current: None,
      game_started_at: None,
      last_breakdown: None,
    }
  }
}

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "quotebuilder_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  let conn_id = Uuid::new_v4();
  info!(target: "quotebuilder_backend", %conn_id, "WebSocket connected");
  let mut game = WsGame::new();
  let mut rng = ThreadRandom;

  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "quotebuilder_backend", %conn_id, "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state, &mut game, &mut rng).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "quotebuilder_backend", %conn_id, error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  // Leaving mid-puzzle simply discards the arrangement; nothing persists.
  info!(target: "quotebuilder_backend", %conn_id, "WebSocket disconnected");
}

#[instrument(level = "info", skip(state, game, rng))]
async fn handle_client_ws(
  msg: ClientWsMessage,
  state: &AppState,
  game: &mut WsGame,
  rng: &mut dyn RandomSource,
) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::StartGame { player_name } => {
      if let Err(e) = game.session.start(&player_name) {
        return ServerWsMessage::Error { message: e.to_string() };
      }
      if !state.can_play(&player_name).await {
        game.session = GameSession::new();
        return ServerWsMessage::Error {
          message: "You have already completed a game! One score per player.".into(),
        };
      }
      game.current = None;
      game.last_breakdown = None;
      game.game_started_at = Some(Instant::now());
      serve_next(state, game, rng).await
    }

    ClientWsMessage::PlaceWord { word_index, slot_index } => {
      mutate_arrangement(game, |a| a.place(word_index, slot_index))
    }

    ClientWsMessage::RemoveWord { slot_index } => {
      mutate_arrangement(game, |a| a.remove_from_slot(slot_index))
    }

    ClientWsMessage::MoveWord { from_index, to_index } => {
      mutate_arrangement(game, |a| a.move_within_slots(from_index, to_index))
    }

    ClientWsMessage::ShufflePool => mutate_arrangement(game, |a| {
      a.shuffle_pool(rng);
      Ok(())
    }),

    ClientWsMessage::ShuffleSlots => mutate_arrangement(game, |a| {
      a.shuffle_filled_slots(rng);
      Ok(())
    }),

    ClientWsMessage::CheckQuote => {
      let active = match game.current.take() {
        Some(a) => a,
        None => return ServerWsMessage::Error { message: "No puzzle in play.".into() },
      };
      let elapsed = active.served_at.elapsed().as_secs_f64();
      match check(&active.arrangement, &active.puzzle.quote.text, elapsed) {
        Ok(result) => {
          game.session.record_completion(&result.breakdown);
          game.last_breakdown = Some(result.breakdown);
          info!(
            target: "engine",
            player = %game.session.player_name,
            correct = result.is_correct,
            total = result.breakdown.total,
            "WS check evaluated"
          );
          ServerWsMessage::CheckResult {
            result,
            quote_text: active.puzzle.quote.text.clone(),
            total_score: game.session.total_score,
            quotes_completed: game.session.quotes_completed,
            level: game.session.level,
          }
        }
        Err(e) => {
          // Arrangement stays live so the player can keep filling it.
          game.current = Some(active);
          ServerWsMessage::Error { message: e.to_string() }
        }
      }
    }

    ClientWsMessage::NextQuote => {
      if game.current.is_some() {
        return ServerWsMessage::Error { message: "Check the current quote before moving on.".into() };
      }
      if game.session.phase() != SessionPhase::InProgress {
        return ServerWsMessage::Error { message: "No game in progress.".into() };
      }
      serve_next(state, game, rng).await
    }
  }
}

/// Ask the session for the next quote and serve its puzzle, or finish the
/// run and record the final score.
async fn serve_next(state: &AppState, game: &mut WsGame, rng: &mut dyn RandomSource) -> ServerWsMessage {
  match game.session.advance(&state.corpus, rng) {
    Advance::Next(quote) => match Puzzle::generate(&quote, rng) {
      Ok(puzzle) => {
        let arrangement = Arrangement::new(&puzzle);
        let out = puzzle_to_out(&puzzle, &arrangement);
        game.current = Some(ActivePuzzle { puzzle, arrangement, served_at: Instant::now() });
        ServerWsMessage::Puzzle { puzzle: out }
      }
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },
    Advance::Completed => {
      let time_taken = game
        .game_started_at
        .map(|t| t.elapsed().as_secs_f64())
        .unwrap_or(0.0);
      let submission = submit_final_score(state, &game.session, time_taken).await;
      // The final totals stay in the reply even when submission is refused.
      ServerWsMessage::GameOver {
        total_score: game.session.total_score,
        quotes_completed: game.session.quotes_completed,
        level: game.session.level,
        time_taken,
        final_breakdown: game.last_breakdown,
        submitted: submission.is_ok(),
        score_id: submission.as_ref().ok().copied(),
        message: submission.err().map(|e| e.to_string()),
      }
    }
  }
}

/// Apply one gesture to the live arrangement and echo the updated layout,
/// or map the engine error to a wire error.
fn mutate_arrangement(
  game: &mut WsGame,
  op: impl FnOnce(&mut Arrangement) -> Result<(), GameError>,
) -> ServerWsMessage {
  match game.current.as_mut() {
    Some(active) => match op(&mut active.arrangement) {
      Ok(()) => ServerWsMessage::Arrangement { arrangement: arrangement_to_out(&active.arrangement) },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },
    None => ServerWsMessage::Error { message: "No puzzle in play.".into() },
  }
}
