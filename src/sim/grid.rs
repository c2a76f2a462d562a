//! The board: a fixed 4x4 arrangement of tile values
//!
//! `0` marks an empty cell; every other cell holds a power of two >= 2.
//! A `Grid` is a plain value. Every transformation returns a new grid.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_SIZE, MAX_TILE};

/// One row (or column, in canonical orientation) of the board
pub type Row = [u32; GRID_SIZE];

/// Structural problems found when building a grid from untrusted data
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must have {expected} rows, got {got}")]
    RowCount { expected: usize, got: usize },
    #[error("row {row} must have {expected} cells, got {len}")]
    RowLength { row: usize, expected: usize, len: usize },
    #[error("cell ({row}, {col}) holds {value}, which is not a tile value")]
    InvalidTile { row: usize, col: usize, value: u32 },
}

/// The game board (row-major)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct Grid {
    cells: [Row; GRID_SIZE],
}

/// True for the values a cell may legally hold
#[inline]
pub fn is_cell_value(value: u32) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

/// Two tiles merge when they are equal and below [`MAX_TILE`]
#[inline]
pub fn can_merge(a: u32, b: u32) -> bool {
    a == b && a != 0 && a < MAX_TILE
}

impl Grid {
    /// All cells empty
    pub const EMPTY: Grid = Grid {
        cells: [[0; GRID_SIZE]; GRID_SIZE],
    };

    /// Build a grid from fixed-size rows, rejecting non-tile values
    pub fn from_cells(cells: [Row; GRID_SIZE]) -> Result<Self, GridError> {
        for (row, values) in cells.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if !is_cell_value(value) {
                    return Err(GridError::InvalidTile { row, col, value });
                }
            }
        }
        Ok(Self { cells })
    }

    /// Build a grid from nested rows, rejecting wrong shapes and non-tile values
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, GridError> {
        if rows.len() != GRID_SIZE {
            return Err(GridError::RowCount {
                expected: GRID_SIZE,
                got: rows.len(),
            });
        }

        let mut cells = [[0; GRID_SIZE]; GRID_SIZE];
        for (i, row) in rows.iter().enumerate() {
            cells[i] = row
                .as_slice()
                .try_into()
                .map_err(|_| GridError::RowLength {
                    row: i,
                    expected: GRID_SIZE,
                    len: row.len(),
                })?;
        }
        Self::from_cells(cells)
    }

    /// Used by the transforms and the engine, which only ever permute or
    /// merge values that were already valid.
    pub(crate) const fn from_cells_unchecked(cells: [Row; GRID_SIZE]) -> Self {
        Self { cells }
    }

    /// Rows in top-to-bottom order
    #[inline]
    pub fn rows(&self) -> &[Row; GRID_SIZE] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row][col]
    }

    /// Copy of this grid with one cell replaced
    pub fn with_tile(&self, row: usize, col: usize, value: u32) -> Result<Self, GridError> {
        if !is_cell_value(value) {
            return Err(GridError::InvalidTile { row, col, value });
        }
        let mut cells = self.cells;
        cells[row][col] = value;
        Ok(Self { cells })
    }

    /// Positions of empty cells, row-major
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value == 0 {
                    out.push((r, c));
                }
            }
        }
        out
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Largest tile on the board (0 for an empty board)
    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn contains_tile(&self, value: u32) -> bool {
        self.cells.iter().flatten().any(|&v| v == value)
    }

    /// Checks the cell invariant. Cheap; used for debug assertions.
    pub fn is_well_formed(&self) -> bool {
        self.cells.iter().flatten().all(|&v| is_cell_value(v))
    }
}

impl TryFrom<Vec<Vec<u32>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self, Self::Error> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<u32>> {
    fn from(grid: Grid) -> Self {
        grid.cells.iter().map(|row| row.to_vec()).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.highest_tile().to_string().len().max(4);
        for row in &self.cells {
            let line: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == 0 {
                        format!("{:>width$}", ".")
                    } else {
                        format!("{v:>width$}")
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
