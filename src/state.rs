//! Application state: the quote corpus and the in-memory leaderboard store.
//!
//! This module owns:
//!   - the merged quote corpus (TOML bank + built-ins, short quotes dropped)
//!   - the leaderboard rows behind an RwLock
//!   - the one-score-per-player rule, enforced at submit time
//!
//! The store is authoritative for the can-play decision; any client-side
//! cache is best-effort only.

use std::cmp::Ordering;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::config::load_quotes_config_from_env;
use crate::domain::Quote;
use crate::quotes::{built_in_quotes, playable_quotes};
use crate::util::normalize_username;

const MAX_USERNAME_CHARS: usize = 50;

/// One accepted leaderboard entry.
#[derive(Clone, Debug, Serialize)]
pub struct ScoreRow {
    pub username: String,
    pub score: i64,
    pub quotes_completed: u32,
    pub level: u32,
    pub time_taken: Option<f64>,
    /// Unix seconds at acceptance.
    pub created_at: u64,
    #[serde(skip)]
    pub id: u64,
}

/// Why a submission was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    MissingUsername,
    /// This (case-insensitive, trimmed) name already has a score.
    AlreadyPlayed,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::MissingUsername => f.write_str("Username is required"),
            SubmitError::AlreadyPlayed => {
                f.write_str("You have already completed a game. Only one score per player is allowed.")
            }
        }
    }
}

impl Error for SubmitError {}

#[derive(Debug, Default)]
struct LeaderboardStore {
    rows: Vec<ScoreRow>,
    next_id: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub corpus: Vec<Quote>,
    leaderboard: Arc<RwLock<LeaderboardStore>>,
}

impl AppState {
    /// Build state from env: load the optional TOML bank, merge with the
    /// built-in corpus, drop unplayable quotes.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let bank: Vec<Quote> = load_quotes_config_from_env()
            .map(|cfg| cfg.quotes.into_iter().map(|q| q.into_quote()).collect())
            .unwrap_or_default();
        let bank_len = bank.len();

        let mut all = bank;
        all.extend(built_in_quotes());
        let total = all.len();
        let corpus = playable_quotes(all);
        if corpus.len() < total {
            warn!(target: "quotebuilder_backend", dropped = total - corpus.len(), "Dropped quotes with fewer than 3 words");
        }
        info!(target: "quotebuilder_backend", bank = bank_len, corpus = corpus.len(), "Startup quote inventory");

        Self {
            corpus,
            leaderboard: Arc::new(RwLock::new(LeaderboardStore::default())),
        }
    }

    /// Accept one final score per player. Returns the new row id.
    #[instrument(level = "info", skip(self), fields(%username, score))]
    pub async fn submit_score(
        &self,
        username: &str,
        score: i64,
        quotes_completed: u32,
        level: u32,
        time_taken: Option<f64>,
    ) -> Result<u64, SubmitError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(SubmitError::MissingUsername);
        }
        let sanitized: String = trimmed.chars().take(MAX_USERNAME_CHARS).collect();
        let normalized = normalize_username(&sanitized);

        let mut store = self.leaderboard.write().await;
        if store
            .rows
            .iter()
            .any(|r| normalize_username(&r.username) == normalized)
        {
            warn!(target: "leaderboard", username = %sanitized, "Rejected duplicate submission");
            return Err(SubmitError::AlreadyPlayed);
        }

        store.next_id += 1;
        let id = store.next_id;
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        store.rows.push(ScoreRow {
            username: sanitized.clone(),
            score,
            quotes_completed,
            level,
            time_taken,
            created_at,
            id,
        });
        info!(target: "leaderboard", username = %sanitized, score, id, "Score saved");
        Ok(id)
    }

    /// A page of the leaderboard, ordered by score DESC, quotes_completed
    /// DESC, time_taken ASC (absent times first, as SQLite sorted NULLs),
    /// created_at ASC.
    #[instrument(level = "debug", skip(self))]
    pub async fn leaderboard_page(&self, limit: usize, offset: usize) -> Vec<ScoreRow> {
        let store = self.leaderboard.read().await;
        let mut rows: Vec<ScoreRow> = store.rows.clone();
        rows.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.quotes_completed.cmp(&a.quotes_completed))
                .then(cmp_time_asc(a.time_taken, b.time_taken))
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        rows.into_iter().skip(offset).take(limit).collect()
    }

    /// True iff no row matches the case-insensitive trimmed username.
    #[instrument(level = "debug", skip(self), fields(%username))]
    pub async fn can_play(&self, username: &str) -> bool {
        let normalized = normalize_username(username);
        let store = self.leaderboard.read().await;
        !store
            .rows
            .iter()
            .any(|r| normalize_username(&r.username) == normalized)
    }
}

fn cmp_time_asc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState {
            corpus: built_in_quotes(),
            leaderboard: Arc::new(RwLock::new(LeaderboardStore::default())),
        }
    }

    #[tokio::test]
    async fn one_score_per_normalized_username() {
        let s = state();
        s.submit_score("Alice", 1000, 7, 2, Some(120.0)).await.unwrap();
        assert_eq!(
            s.submit_score("  alice ", 2000, 7, 2, Some(90.0)).await.unwrap_err(),
            SubmitError::AlreadyPlayed
        );
        assert!(!s.can_play("ALICE").await);
        assert!(s.can_play("Bob").await);
    }

    #[tokio::test]
    async fn blank_usernames_are_rejected() {
        let s = state();
        assert_eq!(
            s.submit_score("   ", 10, 1, 1, None).await.unwrap_err(),
            SubmitError::MissingUsername
        );
    }

    #[tokio::test]
    async fn long_usernames_are_truncated_to_fifty_chars() {
        let s = state();
        let long = "x".repeat(80);
        s.submit_score(&long, 10, 1, 1, None).await.unwrap();
        let rows = s.leaderboard_page(10, 0).await;
        assert_eq!(rows[0].username.chars().count(), 50);
    }

    #[tokio::test]
    async fn page_ordering_breaks_ties_by_quotes_then_time() {
        let s = state();
        s.submit_score("slow", 1000, 7, 2, Some(300.0)).await.unwrap();
        s.submit_score("fast", 1000, 7, 2, Some(100.0)).await.unwrap();
        s.submit_score("fewer", 1000, 5, 2, Some(50.0)).await.unwrap();
        s.submit_score("top", 2000, 7, 2, Some(400.0)).await.unwrap();

        let names: Vec<String> = s
            .leaderboard_page(10, 0)
            .await
            .into_iter()
            .map(|r| r.username)
            .collect();
        assert_eq!(names, vec!["top", "fast", "slow", "fewer"]);
    }

    #[tokio::test]
    async fn paging_honors_limit_and_offset() {
        let s = state();
        for (name, score) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
            s.submit_score(name, score, 7, 2, None).await.unwrap();
        }
        let page = s.leaderboard_page(2, 1).await;
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].username, "c");
        assert_eq!(page[1].username, "b");
    }
}
