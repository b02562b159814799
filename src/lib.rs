//! Grid snake on a macroquad canvas.
//!
//! - `grid`, `game`: cells, directions and the tick rules
//! - `schedule`, `session`: tick timing and the run/pause/game-over machine
//! - `input`: keys, swipes and d-pad presses turned into intents
//! - `store`, `config`: best-score file and tunables
//! - `layout`, `render`, `app`: everything that touches the screen

pub mod app;
pub mod config;
pub mod game;
pub mod grid;
pub mod input;
pub mod layout;
pub mod render;
pub mod schedule;
pub mod session;
pub mod store;
