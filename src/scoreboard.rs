//! Top-5 scoreboard
//!
//! Persisted as a JSON array under a single storage key, sorted by score
//! descending.

use serde::{Deserialize, Serialize};

use crate::consts::SCOREBOARD_CAPACITY;
use crate::persistence::{Storage, StorageError, read_item};
use crate::sim::Difficulty;

/// A single scoreboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    /// Money at round end (may be negative)
    pub score: i64,
    /// ISO-8601 timestamp
    pub date: String,
    /// Entries saved before tiers existed default to the easiest tier
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// Scoreboard, best first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scoreboard {
    entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "truttihunt-scoreboard";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse stored JSON, re-sorting and capping whatever was written
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut board: Scoreboard = serde_json::from_str(json)?;
        board.entries.sort_by(|a, b| b.score.cmp(&a.score));
        board.entries.truncate(SCOREBOARD_CAPACITY);
        Ok(board)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }

    /// A score makes the board if there is room or it beats the lowest entry
    pub fn qualifies(&self, score: i64) -> bool {
        if self.entries.len() < SCOREBOARD_CAPACITY {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would take (1-indexed), if it qualifies
    pub fn potential_rank(&self, score: i64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert an entry. Returns the rank achieved, or None if it didn't place.
    pub fn add(&mut self, entry: ScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Ties keep the earlier entry ahead
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

        self.entries.truncate(SCOREBOARD_CAPACITY);

        Some(rank)
    }

    /// Load from storage. Missing or corrupt data yields an empty board.
    pub fn load(storage: &dyn Storage) -> Self {
        let Some(json) = read_item(storage, Self::STORAGE_KEY) else {
            return Self::new();
        };
        match Self::from_json(&json) {
            Ok(board) => {
                log::info!("Loaded {} scoreboard entries", board.len());
                board
            }
            Err(e) => {
                log::warn!("Discarding unreadable scoreboard: {}", e);
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let json = self.to_json()?;
        storage.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Scoreboard saved ({} entries)", self.entries.len());
        Ok(())
    }
}
