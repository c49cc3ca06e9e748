//! High score leaderboard
//!
//! Kept in memory for the session; the host may persist the JSON form.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 8;

/// Name recorded when the player confirms an empty name
pub const DEFAULT_NAME: &str = "NoName";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Would `score` make it onto the board?
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Ties rank below existing entries
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Insert a score after any existing entries with the same score.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn insert(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            log::debug!("Score {score} does not make the leaderboard");
            return None;
        }

        let name = match name.trim() {
            "" => DEFAULT_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, HighScoreEntry { name, score });
        self.entries.truncate(MAX_HIGH_SCORES);

        log::info!("Score {score} placed at rank {}", pos + 1);
        Some(pos + 1)
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a saved board, re-sorting and trimming whatever was stored
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(scores: &HighScores) -> Vec<&str> {
        scores.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending_with_rank() {
        let mut scores = HighScores::new();
        assert_eq!(scores.insert("a", 50), Some(1));
        assert_eq!(scores.insert("b", 120), Some(1));
        assert_eq!(scores.insert("c", 80), Some(2));
        assert_eq!(names(&scores), vec!["b", "c", "a"]);
        assert_eq!(scores.top_score(), Some(120));
    }

    #[test]
    fn test_ties_go_after_existing() {
        let mut scores = HighScores::new();
        scores.insert("first", 30);
        scores.insert("second", 30);
        assert_eq!(scores.insert("third", 30), Some(3));
        assert_eq!(names(&scores), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_name_defaults() {
        let mut scores = HighScores::new();
        scores.insert("   ", 10);
        assert_eq!(scores.entries()[0].name, DEFAULT_NAME);
    }

    #[test]
    fn test_full_board_rejects_ties_with_last() {
        let mut scores = HighScores::new();
        for i in 0..MAX_HIGH_SCORES as u64 {
            scores.insert("p", 100 - i * 10);
        }
        let lowest = 100 - (MAX_HIGH_SCORES as u64 - 1) * 10;
        assert!(!scores.qualifies(lowest));
        assert_eq!(scores.insert("late", lowest), None);
        assert_eq!(scores.insert("new", lowest + 1), Some(MAX_HIGH_SCORES));
        assert_eq!(scores.entries().len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_json_reload_sorts_and_trims() {
        let json = r#"{"entries":[
            {"name":"a","score":1},{"name":"b","score":9},{"name":"c","score":5},
            {"name":"d","score":2},{"name":"e","score":3},{"name":"f","score":4},
            {"name":"g","score":6},{"name":"h","score":7},{"name":"i","score":8}
        ]}"#;
        let scores = HighScores::from_json(json).unwrap();
        assert_eq!(scores.entries().len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(9));
        assert_eq!(scores.entries().last().map(|e| e.score), Some(2));

        let again = HighScores::from_json(&scores.to_json().unwrap()).unwrap();
        assert_eq!(again, scores);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            HighScores::from_json("{"),
            Err(GameError::SettingsFormat(_))
        ));
    }

    proptest! {
        #[test]
        fn board_stays_sorted_and_bounded(values in prop::collection::vec(0u64..200, 0..40)) {
            let mut scores = HighScores::new();
            for v in &values {
                scores.insert("p", *v);
            }
            let entries = scores.entries();
            prop_assert!(entries.len() <= MAX_HIGH_SCORES);
            prop_assert_eq!(entries.len(), values.len().min(MAX_HIGH_SCORES));
            prop_assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }
}
