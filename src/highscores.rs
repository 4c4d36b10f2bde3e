//! High score leaderboard
//!
//! Persisted under the `"scores"` key as a JSON array of
//! `{ "score": .., "date": .. }`, best first, at most 5 entries.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore, StorageError};
use crate::platform::clock::Clock;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// Storage key of the leaderboard
pub const STORAGE_KEY: &str = "scores";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Display-formatted time the score was saved
    pub date: String,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rebuild a leaderboard from stored entries, restoring order and cap
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Check if a score would survive on the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Ties with the last entry lose: older entries stay ahead
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Append a score, re-sort best first, keep the top entries.
    ///
    /// Equal scores keep their insertion order. Returns the rank achieved
    /// (1-indexed) or None if the entry fell off the end.
    pub fn add_score(&mut self, score: u64, date: String) -> Option<usize> {
        let rank = self.potential_rank(score);

        self.entries.push(HighScoreEntry { score, date });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);

        rank
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Scores only, best first
    pub fn scores(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.score).collect()
    }
}

/// Durable top-5 leaderboard on top of a key-value store
pub struct ScoreStore<S, C> {
    storage: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> ScoreStore<S, C> {
    pub fn new(storage: S, clock: C) -> Self {
        Self { storage, clock }
    }

    /// Read-modify-write: add `score` stamped with the current time.
    ///
    /// Missing or corrupt stored data counts as an empty leaderboard. Read
    /// failures are returned before anything is written, so the stored
    /// entries survive; write failures are returned and leave nothing
    /// half-written.
    pub fn record_score(&mut self, score: u64) -> Result<HighScores, StorageError> {
        let stored: Option<Vec<HighScoreEntry>> =
            persistence::try_load_json(&self.storage, STORAGE_KEY)?;
        let mut scores = stored.map(HighScores::from_entries).unwrap_or_default();
        let date = self.clock.format_date(self.clock.now_millis());

        match scores.add_score(score, date) {
            Some(rank) => log::info!("Score {} entered the leaderboard at #{}", score, rank),
            None => log::info!("Score {} did not make the leaderboard", score),
        }

        persistence::save_json(&mut self.storage, STORAGE_KEY, &scores)?;
        log::info!("High scores saved ({} entries)", scores.len());
        Ok(scores)
    }

    /// Current leaderboard; never writes
    pub fn load_leaderboard(&self) -> HighScores {
        match persistence::load_json::<Vec<HighScoreEntry>>(&self.storage, STORAGE_KEY) {
            Some(entries) => HighScores::from_entries(entries),
            None => HighScores::new(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}
