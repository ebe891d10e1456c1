//! High score leaderboard system
//!
//! Persisted as a JSON file under the home directory, tracks top 10 scores.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u32,
    /// Level reached (1-indexed)
    pub level: u32,
    /// Coins collected over the run
    pub coins: u32,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
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

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
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
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(
        &mut self,
        score: u32,
        level: u32,
        coins: u32,
        timestamp: u64,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            level,
            coins,
            timestamp,
        };

        // Find insertion point (sorted descending by score, ties rank below)
        let pos = self.entries.iter().position(|e| score > e.score);
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

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    fn storage_path() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(".meadow-run").join("highscores.json"))
            .unwrap_or_else(|| PathBuf::from("highscores.json"))
    }

    /// Load from the default location. Missing or corrupt files yield an
    /// empty board rather than an error.
    pub fn load() -> Self {
        Self::load_from(&Self::storage_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(err) => {
                    log::warn!("high score file {:?} is corrupt: {}", path, err);
                    Self::new()
                }
            },
            // A missing file is the normal first run.
            Err(_) => Self::new(),
        }
    }

    /// Save to the default location. Best effort; failures are logged.
    pub fn save(&self) {
        self.save_to(&Self::storage_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if let Err(err) = fs::create_dir_all(dir) {
                log::warn!("could not create {:?}: {}", dir, err);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("could not write high scores to {:?}: {}", path, err);
                } else {
                    log::info!("high scores saved ({} entries)", self.entries.len());
                }
            }
            Err(err) => log::warn!("could not serialize high scores: {}", err),
        }
    }
}
