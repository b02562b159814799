use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("save file i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence for the single best-score scalar.
pub trait ScoreStore {
    /// Stored best score, or 0 if none can be read.
    fn load_high_score(&self) -> u32;
    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError>;
}

#[derive(Serialize, Deserialize, Default)]
struct SaveData {
    // Fixed storage key of the best score.
    #[serde(rename = "snake-high-score")]
    best_score: u32,
}

/// Best score in a small JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<Option<SaveData>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }
}

impl ScoreStore for JsonFileStore {
    fn load_high_score(&self) -> u32 {
        match self.read() {
            Ok(Some(data)) => data.best_score,
            Ok(None) => {
                debug!(path = %self.path.display(), "no save file yet");
                0
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable save file");
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        let data = SaveData { best_score: score };
        fs::write(&self.path, serde_json::to_string_pretty(&data)?)?;
        Ok(())
    }
}

/// In-process store for loop tests.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryStore {
    best: Option<u32>,
    writes: usize,
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) fn with_score(score: u32) -> Self {
        Self { best: Some(score), writes: 0 }
    }

    pub(crate) fn stored(&self) -> Option<u32> {
        self.best
    }

    /// Number of successful saves.
    pub(crate) fn writes(&self) -> usize {
        self.writes
    }
}

#[cfg(test)]
impl ScoreStore for MemoryStore {
    fn load_high_score(&self) -> u32 {
        self.best.unwrap_or(0)
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        self.best = Some(score);
        self.writes += 1;
        Ok(())
    }
}
