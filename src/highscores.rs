//! High score leaderboard system
//!
//! One top-10 table per difficulty tier, persisted as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};
use crate::sim::DifficultyTier;

/// Maximum number of high scores kept per tier
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Scores for one tier, sorted descending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<HighScoreEntry>,
}

impl Leaderboard {
    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
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

    /// Insert a score if it qualifies. Returns the rank achieved (1-indexed).
    /// Ties rank below the entries already present.
    pub fn add_score(&mut self, score: u64, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries
            .insert(rank - 1, HighScoreEntry { score, timestamp });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Restore ordering and size after loading a hand-edited file
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

/// Leaderboards for every tier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    pub easy: Leaderboard,
    pub medium: Leaderboard,
    pub hard: Leaderboard,
}

impl HighScores {
    /// Create empty leaderboards
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self, tier: DifficultyTier) -> &Leaderboard {
        match tier {
            DifficultyTier::Easy => &self.easy,
            DifficultyTier::Medium => &self.medium,
            DifficultyTier::Hard => &self.hard,
        }
    }

    pub fn board_mut(&mut self, tier: DifficultyTier) -> &mut Leaderboard {
        match tier {
            DifficultyTier::Easy => &mut self.easy,
            DifficultyTier::Medium => &mut self.medium,
            DifficultyTier::Hard => &mut self.hard,
        }
    }

    pub fn entries(&self, tier: DifficultyTier) -> &[HighScoreEntry] {
        &self.board(tier).entries
    }

    pub fn qualifies(&self, tier: DifficultyTier, score: u64) -> bool {
        self.board(tier).qualifies(score)
    }

    pub fn potential_rank(&self, tier: DifficultyTier, score: u64) -> Option<usize> {
        self.board(tier).potential_rank(score)
    }

    /// Record a finished run. Returns the rank achieved on that tier's board.
    pub fn add_score(&mut self, tier: DifficultyTier, score: u64, timestamp: f64) -> Option<usize> {
        let rank = self.board_mut(tier).add_score(score, timestamp);
        if let Some(rank) = rank {
            log::info!("New {} high score {} at rank {}", tier, score, rank);
        }
        rank
    }

    pub fn top_score(&self, tier: DifficultyTier) -> Option<u64> {
        self.board(tier).top_score()
    }

    pub fn is_empty(&self) -> bool {
        DifficultyTier::ALL.iter().all(|&t| self.board(t).is_empty())
    }

    /// Load high scores; a missing or corrupt file yields empty boards
    pub fn load(path: &Path) -> Self {
        let mut scores: HighScores = persistence::load_or_default(path, "high scores");
        for tier in DifficultyTier::ALL {
            scores.board_mut(tier).normalize();
        }
        scores
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)?;
        log::info!(
            "High scores saved ({} entries)",
            DifficultyTier::ALL
                .iter()
                .map(|&t| self.entries(t).len())
                .sum::<usize>()
        );
        Ok(())
    }
}

/// How long ago a run was recorded, coarsest unit first
const AGE_UNITS: [(u64, &str); 4] = [
    (7 * 86_400, "week"),
    (86_400, "day"),
    (3_600, "hour"),
    (60, "minute"),
];

/// Age of a leaderboard entry relative to `now` (both Unix ms), e.g. "3 days ago"
pub fn format_age(timestamp: f64, now: f64) -> String {
    let elapsed = ((now - timestamp) / 1000.0).max(0.0) as u64;
    AGE_UNITS
        .iter()
        .find(|(secs, _)| elapsed >= *secs)
        .map(|&(secs, unit)| {
            let n = elapsed / secs;
            let plural = if n == 1 { "" } else { "s" };
            format!("{n} {unit}{plural} ago")
        })
        .unwrap_or_else(|| "just now".to_string())
}
