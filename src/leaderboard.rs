//! Score leaderboard.
//!
//! Accepts session results, keeps the top entries sorted by score, and
//! persists them to LocalStorage on wasm. Wire names are camelCase so
//! stored JSON matches the browser-side score records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of entries retained in the store
pub const MAX_ENTRIES: usize = 10;
/// Maximum number of entries a leaderboard query returns
pub const QUERY_LIMIT: usize = 50;

/// A session result offered for storage. Only `player_name` and `score`
/// are required; the run stats are free-form extras.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words_destroyed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_survived: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<u32>,
}

impl ScoreSubmission {
    pub fn new(player_name: impl Into<String>, score: f64) -> Self {
        Self {
            player_name: player_name.into(),
            score: Some(score),
            ..Self::default()
        }
    }
}

/// A stored entry: the submission plus an assigned id and timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub id: u64,
    pub player_name: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words_destroyed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_survived: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<u32>,
    /// Unix timestamp (ms) assigned when the entry was stored
    pub played_at: f64,
}

/// Rejection of a malformed submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// `player_name` empty or `score` absent
    MissingFields,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::MissingFields => write!(f, "Missing required fields"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Top-score store, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<ScoreRecord>,
    next_id: u64,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Leaderboard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "word_storm_leaderboard";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Store a session result. Any numeric score is accepted, zero and
    /// negative included; only absent fields are rejected. Returns the
    /// stored record with its assigned id and timestamp.
    pub fn submit(
        &mut self,
        submission: ScoreSubmission,
        now_ms: f64,
    ) -> Result<ScoreRecord, SubmitError> {
        let Some(score) = submission.score else {
            return Err(SubmitError::MissingFields);
        };
        if submission.player_name.is_empty() {
            return Err(SubmitError::MissingFields);
        }

        let record = ScoreRecord {
            id: self.next_id,
            player_name: submission.player_name,
            score,
            words_destroyed: submission.words_destroyed,
            time_survived: submission.time_survived,
            difficulty_level: submission.difficulty_level,
            played_at: now_ms,
        };
        self.next_id += 1;

        // Insert sorted descending, then trim to the retention cap
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, record.clone());
        self.entries.truncate(MAX_ENTRIES);

        log::info!("stored score {} for {:?}", record.score, record.player_name);
        Ok(record)
    }

    /// Stored entries, best first, capped at [`QUERY_LIMIT`]
    pub fn top(&self) -> &[ScoreRecord] {
        &self.entries[..self.entries.len().min(QUERY_LIMIT)]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the leaderboard from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(board) = serde_json::from_str::<Leaderboard>(&json) {
                    log::info!("Loaded {} leaderboard entries", board.entries.len());
                    return board;
                }
            }
        }

        log::info!("No stored leaderboard, starting fresh");
        Self::new()
    }

    /// Save the leaderboard to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                match storage.set_item(Self::STORAGE_KEY, &json) {
                    Ok(()) => log::info!("Leaderboard saved ({} entries)", self.entries.len()),
                    Err(_) => log::warn!("Failed to persist leaderboard"),
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}
