//! High score leaderboard
//!
//! Tracks the top 10 finished runs. The best score is simply the top entry.
//! Storage lives behind [`crate::persistence::ScoreStore`].

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Largest tile on the board when the run was recorded
    pub highest_tile: u32,
    /// Accepted moves in the run
    pub moves: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp_ms: u64,
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Insert a finished run. Returns the rank achieved (1-indexed) or None.
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Best score, 0 when nothing is recorded
    pub fn best_score(&self) -> u64 {
        self.top_score().unwrap_or(0)
    }
}

/// Milliseconds since the Unix epoch (0 if the clock is before it)
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
