//! Slide 2048 - a 4x4 sliding-tile merge puzzle
//!
//! Core modules:
//! - `sim`: Pure move engine, stalemate check, and the run state machine
//! - `platform`: Key/swipe/command classification
//! - `persistence`: Leaderboard storage and save files
//! - `highscores`: Top-10 leaderboard (best score)
//! - `settings`: Player preferences
//!
//! ```
//! use slide_2048::sim::{Direction, Grid, is_terminal, resolve_move};
//!
//! let grid = Grid::from_rows(vec![
//!     vec![2, 2, 0, 0],
//!     vec![4, 0, 4, 0],
//!     vec![0, 0, 0, 0],
//!     vec![8, 8, 8, 8],
//! ])?;
//! let out = resolve_move(&grid, Direction::Left);
//! assert!(out.moved);
//! assert_eq!(out.score_gained, 44);
//! assert!(!is_terminal(&out.grid));
//! # Ok::<(), slide_2048::sim::GridError>(())
//! ```

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Board side length
    pub const GRID_SIZE: usize = 4;
    /// Tiles placed on a fresh board
    pub const START_TILES: usize = 2;
    /// Reaching this tile wins the run
    pub const WIN_TILE: u32 = 2048;
    /// Largest tile a 4x4 board can hold; two of these never merge
    pub const MAX_TILE: u32 = 1 << 17;
    /// Chance that a spawned tile is a 4
    pub const DEFAULT_FOUR_CHANCE: f64 = 0.1;
    /// Swipes shorter than this (pixels, dominant axis) are ignored
    pub const MIN_SWIPE_DISTANCE: f32 = 30.0;
}
