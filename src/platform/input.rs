//! Key, swipe and command classification

use std::str::FromStr;

use crate::consts::MIN_SWIPE_DISTANCE;
use crate::sim::{Direction, ParseDirectionError};

/// Map a key name (DOM-style `ArrowUp` or a WASD letter) to a direction
pub fn direction_from_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

/// Classify a swipe from its start-to-end delta (screen coordinates, +y down).
///
/// The dominant axis wins; ties count as vertical. The dominant delta must
/// exceed [`MIN_SWIPE_DISTANCE`] or the gesture is ignored.
pub fn swipe_direction(dx: f32, dy: f32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        if dx.abs() > MIN_SWIPE_DISTANCE {
            return Some(if dx > 0.0 { Direction::Right } else { Direction::Left });
        }
    } else if dy.abs() > MIN_SWIPE_DISTANCE {
        return Some(if dy > 0.0 { Direction::Down } else { Direction::Up });
    }
    None
}

/// A line of input from the terminal front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    NewGame,
    Continue,
    Save,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(direction) = direction_from_key(s) {
            return Ok(Command::Move(direction));
        }
        match s.to_lowercase().as_str() {
            "n" | "new" => Ok(Command::NewGame),
            "c" | "continue" => Ok(Command::Continue),
            "save" => Ok(Command::Save),
            "h" | "?" | "help" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            _ => s.parse::<Direction>().map(Command::Move),
        }
    }
}
