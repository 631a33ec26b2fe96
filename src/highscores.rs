//! Best tower heights leaderboard
//!
//! Persisted as a JSON file, tracks the top 10 runs by height, then by
//! longest perfect streak.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Blocks placed
    pub score: u32,
    /// Longest perfect streak in the run
    pub best_combo: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScoreEntry {
    /// Ranking key: taller tower first, longer perfect streak breaks ties
    fn rank_key(&self) -> (u32, u32) {
        (self.score, self.best_combo)
    }
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Index a run would take. Equal runs go after the ones already listed.
    fn slot(&self, score: u32, best_combo: u32) -> usize {
        let key = (score, best_combo);
        self.entries.partition_point(|e| e.rank_key() >= key)
    }

    /// Whether a run makes the table (an empty tower never does)
    pub fn qualifies(&self, score: u32, best_combo: u32) -> bool {
        score > 0 && self.slot(score, best_combo) < MAX_HIGH_SCORES
    }

    /// 1-based rank the run would get, `None` if it misses the table
    pub fn potential_rank(&self, score: u32, best_combo: u32) -> Option<usize> {
        self.qualifies(score, best_combo)
            .then(|| self.slot(score, best_combo) + 1)
    }

    /// Record a finished run and return its 1-based rank
    pub fn add_score(&mut self, score: u32, best_combo: u32, timestamp: u64) -> Option<usize> {
        let rank = self.potential_rank(score, best_combo)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                best_combo,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Tallest recorded run
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Load from a JSON file. A missing file is an empty leaderboard.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No high scores at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let json = std::fs::read_to_string(path)?;
        let scores: HighScores = serde_json::from_str(&json)?;
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    /// Save to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
