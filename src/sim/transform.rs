//! Reorientation between a move direction and the canonical "slide left" view
//!
//! Every direction is handled as a leftward slide: the grid is flipped and/or
//! transposed so that the move runs toward column 0, processed, then put back.

use super::direction::Direction;
use super::grid::Grid;
use crate::consts::GRID_SIZE;

/// A primitive reorientation. Both are involutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Transpose,
    ReverseRows,
}

/// Steps taking a grid into canonical orientation, applied in order
const fn steps(direction: Direction) -> &'static [Step] {
    match direction {
        Direction::Left => &[],
        Direction::Right => &[Step::ReverseRows],
        Direction::Up => &[Step::Transpose],
        Direction::Down => &[Step::Transpose, Step::ReverseRows],
    }
}

fn apply(grid: &Grid, step: Step) -> Grid {
    match step {
        Step::Transpose => transpose(grid),
        Step::ReverseRows => reverse_rows(grid),
    }
}

/// Swap (row, col) with (col, row)
pub fn transpose(grid: &Grid) -> Grid {
    let src = grid.rows();
    let mut cells = [[0; GRID_SIZE]; GRID_SIZE];
    for (r, row) in cells.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = src[c][r];
        }
    }
    Grid::from_cells_unchecked(cells)
}

/// Mirror each row left-to-right
pub fn reverse_rows(grid: &Grid) -> Grid {
    let mut cells = *grid.rows();
    for row in cells.iter_mut() {
        row.reverse();
    }
    Grid::from_cells_unchecked(cells)
}

/// View `grid` so that a move in `direction` becomes a leftward slide
pub fn to_canonical(grid: &Grid, direction: Direction) -> Grid {
    steps(direction)
        .iter()
        .fold(*grid, |g, &step| apply(&g, step))
}

/// Inverse of [`to_canonical`] for the same direction
pub fn from_canonical(grid: &Grid, direction: Direction) -> Grid {
    steps(direction)
        .iter()
        .rev()
        .fold(*grid, |g, &step| apply(&g, step))
}
