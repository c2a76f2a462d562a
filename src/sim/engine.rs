//! Move resolution
//!
//! A move is resolved entirely in canonical orientation: each row is compacted
//! toward column 0, equal neighbours merge once, and the row is padded back
//! to full width. Nothing here touches the score, the RNG, or any I/O.

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::grid::{Grid, Row, can_merge};
use super::transform::{from_canonical, to_canonical};
use crate::consts::GRID_SIZE;

/// Result of sliding a grid in one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Grid after the move, in its natural orientation
    pub grid: Grid,
    /// True iff any cell changed
    pub moved: bool,
    /// Sum of the values of all tiles created by merges
    pub score_gained: u64,
}

/// Compact and merge one row toward index 0.
///
/// Returns the new row and the points it earned. A freshly merged tile never
/// merges again in the same pass: `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]`.
/// Two `MAX_TILE` tiles slide but never merge, so results stay in range.
pub fn merge_row(row: Row) -> (Row, u64) {
    let mut out = [0; GRID_SIZE];
    let mut len = 0;
    let mut score = 0u64;
    let mut pending: Option<u32> = None;

    for value in row.into_iter().filter(|&v| v != 0) {
        match pending {
            Some(prev) if can_merge(prev, value) => {
                let merged = prev * 2;
                out[len] = merged;
                len += 1;
                score += u64::from(merged);
                pending = None;
            }
            Some(prev) => {
                out[len] = prev;
                len += 1;
                pending = Some(value);
            }
            None => pending = Some(value),
        }
    }
    if let Some(last) = pending {
        out[len] = last;
    }

    (out, score)
}

/// Slide every tile of `grid` toward `direction`.
///
/// `moved` compares each canonical row element-wise with its merged result,
/// so a packed row with no equal neighbours counts as unmoved.
pub fn resolve_move(grid: &Grid, direction: Direction) -> MoveOutcome {
    debug_assert!(grid.is_well_formed(), "malformed grid passed to resolve_move");

    let canonical = to_canonical(grid, direction);
    let mut rows = *canonical.rows();
    let mut moved = false;
    let mut score_gained = 0;

    for row in rows.iter_mut() {
        let (merged, score) = merge_row(*row);
        if merged != *row {
            moved = true;
        }
        score_gained += score;
        *row = merged;
    }

    let grid = if moved {
        from_canonical(&Grid::from_cells_unchecked(rows), direction)
    } else {
        *grid
    };

    MoveOutcome {
        grid,
        moved,
        score_gained,
    }
}

/// Directions that would change `grid`
pub fn available_moves(grid: &Grid) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&d| resolve_move(grid, d).moved)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_TILE;

    fn grid(cells: [Row; GRID_SIZE]) -> Grid {
        Grid::from_cells(cells).unwrap()
    }

    #[test]
    fn test_merge_row_cases() {
        assert_eq!(merge_row([0, 2, 0, 0]), ([2, 0, 0, 0], 0));
        assert_eq!(merge_row([2, 2, 0, 0]), ([4, 0, 0, 0], 4));
        assert_eq!(merge_row([4, 0, 4, 0]), ([8, 0, 0, 0], 8));
        assert_eq!(merge_row([2, 2, 2, 0]), ([4, 2, 0, 0], 4));
        assert_eq!(merge_row([8, 8, 8, 8]), ([16, 16, 0, 0], 32));
        assert_eq!(merge_row([2, 4, 2, 4]), ([2, 4, 2, 4], 0));
        assert_eq!(merge_row([4, 4, 8, 0]), ([8, 8, 0, 0], 8));
        assert_eq!(merge_row([0, 0, 0, 0]), ([0, 0, 0, 0], 0));
    }

    #[test]
    fn test_max_tiles_do_not_merge() {
        let half = MAX_TILE / 2;
        assert_eq!(merge_row([half, half, 0, 0]), ([MAX_TILE, 0, 0, 0], u64::from(MAX_TILE)));
        assert_eq!(merge_row([0, MAX_TILE, 0, MAX_TILE]), ([MAX_TILE, MAX_TILE, 0, 0], 0));

        let g = grid([[MAX_TILE, MAX_TILE, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let out = resolve_move(&g, Direction::Left);
        assert!(!out.moved);
        assert_eq!(out.grid, g);
        let out = resolve_move(&g, Direction::Right);
        assert!(out.moved);
        assert_eq!(out.grid.rows()[0], [0, 0, MAX_TILE, MAX_TILE]);
        assert!(out.grid.is_well_formed());
    }

    #[test]
    fn test_move_left_scenario() {
        let g = grid([[2, 2, 0, 0], [4, 0, 4, 0], [0, 0, 0, 0], [8, 8, 8, 8]]);
        let out = resolve_move(&g, Direction::Left);
        assert!(out.moved);
        assert_eq!(out.score_gained, 44);
        assert_eq!(
            out.grid.rows(),
            &[[4, 0, 0, 0], [8, 0, 0, 0], [0, 0, 0, 0], [16, 16, 0, 0]]
        );
    }

    #[test]
    fn test_move_right() {
        let g = grid([[2, 2, 0, 0], [0, 4, 0, 4], [2, 0, 0, 0], [0; 4]]);
        let out = resolve_move(&g, Direction::Right);
        assert!(out.moved);
        assert_eq!(out.score_gained, 12);
        assert_eq!(
            out.grid.rows(),
            &[[0, 0, 0, 4], [0, 0, 0, 8], [0, 0, 0, 2], [0; 4]]
        );
    }

    #[test]
    fn test_move_up_scenario() {
        let g = grid([[2, 0, 4, 8], [2, 0, 4, 8], [0; 4], [0; 4]]);
        let out = resolve_move(&g, Direction::Up);
        assert!(out.moved);
        assert_eq!(out.score_gained, 28);
        assert_eq!(
            out.grid.rows(),
            &[[4, 0, 8, 16], [0; 4], [0; 4], [0; 4]]
        );
    }

    #[test]
    fn test_move_down() {
        let g = grid([[2, 0, 0, 0], [2, 0, 0, 4], [0, 0, 0, 0], [2, 0, 0, 0]]);
        let out = resolve_move(&g, Direction::Down);
        assert!(out.moved);
        assert_eq!(out.score_gained, 4);
        assert_eq!(
            out.grid.rows(),
            &[[0; 4], [0; 4], [2, 0, 0, 0], [4, 0, 0, 4]]
        );
    }

    #[test]
    fn test_empty_grid_does_not_move() {
        let out = resolve_move(&Grid::EMPTY, Direction::Left);
        assert!(!out.moved);
        assert_eq!(out.score_gained, 0);
        assert_eq!(out.grid, Grid::EMPTY);
    }

    #[test]
    fn test_blocked_full_grid_does_not_move() {
        let g = grid([
            [2, 4, 8, 16],
            [4, 8, 16, 32],
            [8, 16, 32, 64],
            [16, 32, 64, 128],
        ]);
        for d in Direction::ALL {
            let out = resolve_move(&g, d);
            assert!(!out.moved, "direction {d}");
            assert_eq!(out.grid, g);
            assert_eq!(out.score_gained, 0);
        }
        assert!(available_moves(&g).is_empty());
    }

    #[test]
    fn test_packed_row_moves_only_in_open_directions() {
        // Left column packed, nothing mergeable: left is a no-op, right is not.
        let g = grid([[2, 0, 0, 0], [4, 0, 0, 0], [8, 0, 0, 0], [16, 0, 0, 0]]);
        assert!(!resolve_move(&g, Direction::Left).moved);
        assert!(!resolve_move(&g, Direction::Up).moved);
        assert!(!resolve_move(&g, Direction::Down).moved);
        assert!(resolve_move(&g, Direction::Right).moved);
        assert_eq!(available_moves(&g), vec![Direction::Right]);
    }

    #[test]
    fn test_full_grid_merge_scores() {
        let g = grid([[2, 2, 2, 2], [4, 4, 4, 4], [8, 8, 8, 8], [16, 16, 16, 16]]);
        let out = resolve_move(&g, Direction::Left);
        assert!(out.moved);
        assert_eq!(out.score_gained, 120);

        let g = grid([
            [2, 2, 4, 4],
            [8, 8, 16, 16],
            [32, 32, 64, 64],
            [128, 128, 256, 256],
        ]);
        let out = resolve_move(&g, Direction::Left);
        assert_eq!(out.score_gained, 4 + 8 + 16 + 32 + 64 + 128 + 256 + 512);
    }

    #[test]
    fn test_input_grid_is_untouched() {
        let g = grid([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = g;
        let _ = resolve_move(&g, Direction::Left);
        assert_eq!(g, before);
    }
}
