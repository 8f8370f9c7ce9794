//! High score leaderboard
//!
//! Persisted to LocalStorage, keeps the top 5 distinct scores.

use serde::{Deserialize, Serialize};

use crate::platform::ScoreBoard;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: i64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Top scores, sorted descending, one entry per score value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snake_rush_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored JSON, dropping entries that are not a numeric
    /// score with a timestamp. Unparseable input yields an empty board.
    pub fn from_json(json: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Discarding unreadable high scores: {}", e);
                return Self::new();
            }
        };

        let raw = value
            .get("entries")
            .and_then(|entries| entries.as_array())
            .or_else(|| value.as_array())
            .cloned()
            .unwrap_or_default();

        let valid: Vec<ScoreEntry> = raw
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<ScoreEntry>(entry).ok())
            .filter(|entry| entry.timestamp.is_finite())
            .collect();

        let mut board = Self { entries: valid };
        board.normalize();
        board
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{\"entries\":[]}".to_string())
    }

    /// Dedupe by score (latest timestamp wins), sort descending, truncate
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.timestamp.total_cmp(&a.timestamp))
        });
        self.entries.dedup_by_key(|e| e.score);
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Would `score` make the board
    pub fn qualifies(&self, score: i64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Record `score`; returns its 1-based rank, or None if it fell off the board
    pub fn add_entry(&mut self, score: i64, timestamp: f64) -> Option<usize> {
        self.entries.push(ScoreEntry { score, timestamp });
        self.normalize();
        self.entries
            .iter()
            .position(|e| e.score == score)
            .map(|i| i + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let board = Self::from_json(&json);
                log::info!("Loaded {} high scores", board.entries.len());
                return board;
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        match storage {
            Some(storage) => {
                if storage.set_item(Self::STORAGE_KEY, &self.to_json()).is_err() {
                    log::warn!("Failed to save high scores");
                }
            }
            None => log::warn!("LocalStorage unavailable, high scores not saved"),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        log::debug!("High scores not persisted on native ({} entries)", self.entries.len());
    }
}

impl ScoreBoard for Leaderboard {
    fn is_high_score(&self, score: i64) -> bool {
        self.qualifies(score)
    }

    fn add_score(&mut self, score: i64) -> Option<usize> {
        let rank = self.add_entry(score, now_timestamp());
        self.save();
        rank
    }
}

#[cfg(target_arch = "wasm32")]
fn now_timestamp() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_timestamp() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(scores: &[i64]) -> Leaderboard {
        let mut board = Leaderboard::new();
        for (i, &score) in scores.iter().enumerate() {
            board.add_entry(score, i as f64);
        }
        board
    }

    fn scores(board: &Leaderboard) -> Vec<i64> {
        board.entries.iter().map(|e| e.score).collect()
    }

    #[test]
    fn test_sorted_and_capped() {
        let board = board(&[10, 50, 30, 20, 40, 60, 5]);
        assert_eq!(scores(&board), vec![60, 50, 40, 30, 20]);
        assert_eq!(board.top_score(), Some(60));
    }

    #[test]
    fn test_duplicate_score_keeps_latest() {
        let mut board = board(&[100, 80]);
        assert_eq!(board.add_entry(100, 50.0), Some(1));
        assert_eq!(board.entries.len(), 2);
        assert_eq!(board.entries[0].timestamp, 50.0);

        // An older duplicate does not replace the newer one
        board.add_entry(100, 1.0);
        assert_eq!(board.entries[0].timestamp, 50.0);
    }

    #[test]
    fn test_qualifies() {
        let mut board = board(&[10, 20, 30, 40]);
        assert!(board.qualifies(-5), "board not full yet");
        board.add_entry(50, 9.0);
        assert!(!board.qualifies(10));
        assert!(board.qualifies(11));
    }

    #[test]
    fn test_rank_of_new_score() {
        let mut board = board(&[100, 50, 20]);
        assert_eq!(board.add_entry(70, 10.0), Some(2));
        assert_eq!(board.add_entry(5, 11.0), Some(5));
        assert_eq!(board.add_entry(1, 12.0), None);
    }

    #[test]
    fn test_from_json_filters_invalid_entries() {
        let json = r#"{"entries":[
            {"score": 120, "timestamp": 1.0},
            {"score": "lots", "timestamp": 2.0},
            {"score": 80},
            null,
            {"score": 120, "timestamp": 5.0},
            {"score": 40, "timestamp": 3.0}
        ]}"#;
        let board = Leaderboard::from_json(json);
        assert_eq!(scores(&board), vec![120, 40]);
        assert_eq!(board.entries[0].timestamp, 5.0);
    }

    #[test]
    fn test_from_json_accepts_bare_array() {
        let board = Leaderboard::from_json(r#"[{"score": 7, "timestamp": 1.0}]"#);
        assert_eq!(scores(&board), vec![7]);
    }

    #[test]
    fn test_from_json_garbage_is_empty() {
        assert!(Leaderboard::from_json("not json").is_empty());
        assert!(Leaderboard::from_json("{\"entries\": 3}").is_empty());
    }

    #[test]
    fn test_json_roundtrip_preserves_order() {
        let original = board(&[3, 9, 6]);
        let restored = Leaderboard::from_json(&original.to_json());
        assert_eq!(scores(&restored), vec![9, 6, 3]);
    }

    #[test]
    fn test_score_board_trait() {
        let mut board = Leaderboard::new();
        assert!(board.is_high_score(0));
        assert_eq!(ScoreBoard::add_score(&mut board, 25), Some(1));
        assert!(board.entries[0].timestamp > 0.0);
    }
}
