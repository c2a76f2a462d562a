//! Stalemate detection

use super::grid::{Grid, can_merge};
use crate::consts::GRID_SIZE;

/// True when the board is full and no two neighbours (either axis) can merge.
///
/// Works on the natural orientation; no canonicalisation is needed since both
/// axes are scanned.
pub fn is_terminal(grid: &Grid) -> bool {
    let rows = grid.rows();

    if rows.iter().flatten().any(|&v| v == 0) {
        return false;
    }

    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            let value = rows[r][c];
            if c + 1 < GRID_SIZE && can_merge(rows[r][c + 1], value) {
                return false;
            }
            if r + 1 < GRID_SIZE && can_merge(rows[r + 1][c], value) {
                return false;
            }
        }
    }

    true
}
