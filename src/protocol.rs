//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::arrangement::Arrangement;
use crate::puzzle::{Puzzle, Word};
use crate::scoring::{CheckResult, ScoreBreakdown};
use crate::state::ScoreRow;

/// Messages the client can send over WebSocket. One message per discrete
/// player gesture.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    StartGame {
        #[serde(rename = "playerName")]
        player_name: String,
    },
    /// Drag a word from the jumbled pool into an open slot.
    PlaceWord {
        #[serde(rename = "wordIndex")]
        word_index: usize,
        #[serde(rename = "slotIndex")]
        slot_index: usize,
    },
    /// Tap a placed word to send it back to the pool.
    RemoveWord {
        #[serde(rename = "slotIndex")]
        slot_index: usize,
    },
    /// Drag a placed word onto another slot.
    MoveWord {
        #[serde(rename = "fromIndex")]
        from_index: usize,
        #[serde(rename = "toIndex")]
        to_index: usize,
    },
    ShufflePool,
    ShuffleSlots,
    CheckQuote,
    NextQuote,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Puzzle {
        puzzle: PuzzleOut,
    },
    Arrangement {
        arrangement: ArrangementOut,
    },
    CheckResult {
        result: CheckResult,
        #[serde(rename = "quoteText")]
        quote_text: String,
        #[serde(rename = "totalScore")]
        total_score: u32,
        #[serde(rename = "quotesCompleted")]
        quotes_completed: u32,
        level: u32,
    },
    GameOver {
        #[serde(rename = "totalScore")]
        total_score: u32,
        #[serde(rename = "quotesCompleted")]
        quotes_completed: u32,
        level: u32,
        #[serde(rename = "timeTaken")]
        time_taken: f64,
        #[serde(rename = "finalBreakdown")]
        final_breakdown: Option<ScoreBreakdown>,
        submitted: bool,
        #[serde(rename = "scoreId", skip_serializing_if = "Option::is_none")]
        score_id: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Error {
        message: String,
    },
}

/// One word as the client sees it: display text plus the id it echoes back
/// in gesture messages.
#[derive(Debug, Serialize)]
pub struct WordOut {
    pub text: String,
    pub index: usize,
}

fn word_to_out(w: &Word) -> WordOut {
    WordOut { text: w.text.clone(), index: w.original_index }
}

/// DTO for a freshly served puzzle.
#[derive(Debug, Serialize)]
pub struct PuzzleOut {
    pub category: String,
    #[serde(rename = "wordCount")]
    pub word_count: usize,
    #[serde(rename = "revealedIndices")]
    pub revealed_indices: Vec<usize>,
    pub slots: Vec<Option<WordOut>>,
    pub pool: Vec<WordOut>,
}

pub fn puzzle_to_out(puzzle: &Puzzle, arrangement: &Arrangement) -> PuzzleOut {
    PuzzleOut {
        category: puzzle.quote.category.clone(),
        word_count: puzzle.word_count(),
        revealed_indices: puzzle.revealed_indices.clone(),
        slots: arrangement.slots().iter().map(|s| s.as_ref().map(word_to_out)).collect(),
        pool: arrangement.pool().iter().map(word_to_out).collect(),
    }
}

/// DTO for the arrangement after a mutation.
#[derive(Debug, Serialize)]
pub struct ArrangementOut {
    pub slots: Vec<Option<WordOut>>,
    pub pool: Vec<WordOut>,
    pub complete: bool,
}

pub fn arrangement_to_out(arrangement: &Arrangement) -> ArrangementOut {
    ArrangementOut {
        slots: arrangement.slots().iter().map(|s| s.as_ref().map(word_to_out)).collect(),
        pool: arrangement.pool().iter().map(word_to_out).collect(),
        complete: arrangement.is_complete(),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct SubmitScoreIn {
    pub score: i64,
    pub quotes_completed: u32,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub time_taken: Option<f64>,
    pub username: String,
}

#[derive(Serialize)]
pub struct SubmitScoreOut {
    pub message: String,
    #[serde(rename = "scoreId")]
    pub score_id: u64,
}

#[derive(Serialize)]
pub struct ApiErrorOut {
    pub error: String,
    #[serde(rename = "alreadyPlayed", skip_serializing_if = "Option::is_none")]
    pub already_played: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Serialize)]
pub struct LeaderboardOut {
    pub leaderboard: Vec<ScoreRow>,
    pub total: usize,
}

#[derive(Serialize)]
pub struct CanPlayOut {
    #[serde(rename = "canPlay")]
    pub can_play: bool,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
