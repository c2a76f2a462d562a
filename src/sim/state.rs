//! Game state and the move/spawn/check loop
//!
//! `GameState` is the owner of the authoritative grid and score. It asks the
//! pure engine for an outcome, commits it, spawns a tile, and decides whether
//! the run is won or over. Everything needed to resume a run, RNG included,
//! is serializable.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::engine::resolve_move;
use super::grid::Grid;
use super::spawn::spawn_tile;
use super::terminal::is_terminal;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting moves
    Playing,
    /// The win tile appeared; waiting for the player to continue
    Won,
    /// No move can change the grid
    GameOver,
}

/// Things that happened during one step, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Tiles merged, earning `score` points
    Merged { score: u64 },
    /// A new tile appeared
    Spawned { row: usize, col: usize, value: u32 },
    /// The win tile was reached for the first time
    Won,
    /// The run ended
    GameOver,
}

/// Summary of a single [`GameState::step`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub moved: bool,
    pub score_gained: u64,
    pub events: Vec<GameEvent>,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current board
    pub grid: Grid,
    /// Cumulative score (never decreases)
    pub score: u64,
    /// Accepted moves so far
    pub moves: u32,
    pub phase: GamePhase,
    /// Set once the win tile has been reached, so `Won` fires only once
    pub has_won: bool,
    /// Keep going past the win tile without pausing
    pub keep_playing: bool,
    /// Probability that a spawned tile is a 4
    pub four_chance: f64,
    rng: Pcg32,
}

impl GameState {
    /// Fresh run: empty grid plus the starting tiles
    pub fn new(seed: u64, four_chance: f64) -> Self {
        let mut state = Self {
            seed,
            grid: Grid::EMPTY,
            score: 0,
            moves: 0,
            phase: GamePhase::Playing,
            has_won: false,
            keep_playing: false,
            four_chance,
            rng: Pcg32::seed_from_u64(seed),
        };

        for _ in 0..START_TILES {
            state.spawn();
        }

        log::debug!("New game (seed {}):\n{}", seed, state.grid);
        state
    }

    /// Start over with a new seed, keeping preferences
    pub fn restart(&mut self, seed: u64) {
        let keep_playing = self.keep_playing;
        *self = Self::new(seed, self.four_chance);
        self.keep_playing = keep_playing;
    }

    fn spawn(&mut self) -> Option<GameEvent> {
        let spawn = spawn_tile(&self.grid, &mut self.rng, self.four_chance)?;
        self.grid = spawn.grid;
        Some(GameEvent::Spawned {
            row: spawn.row,
            col: spawn.col,
            value: spawn.value,
        })
    }

    /// Apply one move. Ignored unless the phase is `Playing`.
    pub fn step(&mut self, direction: Direction) -> StepReport {
        if self.phase != GamePhase::Playing {
            log::debug!("Ignoring {} in phase {:?}", direction, self.phase);
            return StepReport::default();
        }

        let outcome = resolve_move(&self.grid, direction);
        if !outcome.moved {
            log::debug!("Move {} changed nothing", direction);
            return StepReport::default();
        }

        let mut events = Vec::new();
        self.grid = outcome.grid;
        self.score += outcome.score_gained;
        self.moves += 1;
        if outcome.score_gained > 0 {
            events.push(GameEvent::Merged {
                score: outcome.score_gained,
            });
        }

        if let Some(event) = self.spawn() {
            events.push(event);
        }

        if !self.has_won && self.grid.contains_tile(WIN_TILE) {
            self.has_won = true;
            events.push(GameEvent::Won);
            log::info!("Reached {} after {} moves (score {})", WIN_TILE, self.moves, self.score);
            if !self.keep_playing {
                self.phase = GamePhase::Won;
            }
        }

        if is_terminal(&self.grid) {
            self.phase = GamePhase::GameOver;
            events.push(GameEvent::GameOver);
            log::info!(
                "Game over after {} moves: score {}, highest tile {}",
                self.moves,
                self.score,
                self.grid.highest_tile()
            );
        }

        StepReport {
            moved: true,
            score_gained: outcome.score_gained,
            events,
        }
    }

    /// Resume play after the win pause
    pub fn continue_after_win(&mut self) {
        if self.phase == GamePhase::Won {
            self.keep_playing = true;
            self.phase = GamePhase::Playing;
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[cfg(test)]
    pub(crate) fn with_grid(seed: u64, grid: Grid) -> Self {
        let mut state = Self::new(seed, DEFAULT_FOUR_CHANCE);
        state.grid = grid;
        state
    }
}
