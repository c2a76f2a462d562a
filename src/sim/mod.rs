//! Deterministic game core
//!
//! All gameplay logic lives here. The move engine and stalemate check are pure
//! functions over `Grid` values:
//! - No I/O, no global state
//! - Randomness only through an injected RNG (`spawn`)
//! - `GameState` is the single owner of mutable run state

pub mod direction;
pub mod engine;
pub mod grid;
pub mod spawn;
pub mod state;
pub mod terminal;
pub mod transform;

pub use direction::{Direction, ParseDirectionError};
pub use engine::{MoveOutcome, available_moves, merge_row, resolve_move};
pub use grid::{Grid, GridError, Row, can_merge};
pub use spawn::{Spawn, spawn_tile};
pub use state::{GameEvent, GamePhase, GameState, StepReport};
pub use terminal::is_terminal;
pub use transform::{from_canonical, reverse_rows, to_canonical, transpose};
