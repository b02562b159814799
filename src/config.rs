use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::grid::Grid;

pub const CONFIG_ENV: &str = "SNAKE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "snake_config.json";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid must be at least 2x2, got {cols}x{rows}")]
    GridTooSmall { cols: i32, rows: i32 },
    #[error("min_speed_ms must be positive")]
    ZeroMinSpeed,
}

/// Tunables for one game. Every field may be omitted from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cols: i32,
    pub rows: i32,
    /// Tick interval at score 0, in milliseconds.
    pub initial_speed_ms: u32,
    /// Milliseconds shaved off the interval per food eaten.
    pub speed_increment_ms: u32,
    pub min_speed_ms: u32,
    /// Gestures shorter than this on both axes count as taps.
    pub swipe_threshold_px: f32,
    pub max_board_px: f32,
    /// Show the on-screen d-pad before any touch has been seen.
    pub touch_controls: bool,
    pub save_path: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 20,
            rows: 20,
            initial_speed_ms: 150,
            speed_increment_ms: 2,
            min_speed_ms: 60,
            swipe_threshold_px: 20.0,
            max_board_px: 400.0,
            touch_controls: false,
            save_path: "snake_save.json".to_string(),
        }
    }
}

impl GameConfig {
    pub fn grid(&self) -> Grid {
        Grid::new(self.cols, self.rows)
    }

    /// Rejects settings the game cannot run with: a grid the starting
    /// snake would fill, or a zero tick interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols < 2 || self.rows < 2 {
            return Err(ConfigError::GridTooSmall { cols: self.cols, rows: self.rows });
        }
        if self.min_speed_ms == 0 {
            return Err(ConfigError::ZeroMinSpeed);
        }
        Ok(())
    }

    pub fn speed_for(&self, score: u32) -> u32 {
        self.initial_speed_ms
            .saturating_sub(score.saturating_mul(self.speed_increment_ms))
            .max(self.min_speed_ms)
    }
}

pub fn config_path() -> String {
    std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_config(path: impl AsRef<Path>) -> GameConfig {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return GameConfig::default();
    }
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), %err, "unreadable config, using defaults");
            return GameConfig::default();
        }
    };
    let config: GameConfig = match serde_json::from_str(&text) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), %err, "malformed config, using defaults");
            return GameConfig::default();
        }
    };
    match config.validate() {
        Ok(()) => config,
        Err(err) => {
            warn!(path = %path.display(), %err, "invalid config, using defaults");
            GameConfig::default()
        }
    }
}
