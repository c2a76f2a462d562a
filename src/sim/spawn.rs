//! Random tile placement
//!
//! The only source of randomness in play. The RNG is always passed in so the
//! caller decides between a seeded generator (replays, tests) and anything else.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// A tile placed by [`spawn_tile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub grid: Grid,
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// Place a 2 (or, with probability `four_chance`, a 4) on a uniformly chosen
/// empty cell. Returns `None` when the grid is full.
pub fn spawn_tile<R: Rng + ?Sized>(grid: &Grid, rng: &mut R, four_chance: f64) -> Option<Spawn> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return None;
    }

    let (row, col) = empty[rng.random_range(0..empty.len())];
    let value = if rng.random_bool(four_chance.clamp(0.0, 1.0)) { 4 } else { 2 };

    // Position comes from empty_cells and value is 2 or 4, so this cannot fail.
    let grid = grid.with_tile(row, col, value).ok()?;
    Some(Spawn {
        grid,
        row,
        col,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_fills_one_empty_cell() {
        let mut rng = Pcg32::seed_from_u64(7);
        let s = spawn_tile(&Grid::EMPTY, &mut rng, 0.1).unwrap();
        assert_eq!(s.grid.count_empty(), 15);
        assert_eq!(s.grid.get(s.row, s.col), s.value);
        assert!(s.value == 2 || s.value == 4);
    }

    #[test]
    fn test_spawn_on_full_grid_is_none() {
        let full = Grid::from_cells([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(spawn_tile(&full, &mut rng, 0.1).is_none());
    }

    #[test]
    fn test_spawn_only_uses_the_last_hole() {
        let g = Grid::from_cells([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 2]]).unwrap();
        let mut rng = Pcg32::seed_from_u64(99);
        let s = spawn_tile(&g, &mut rng, 0.1).unwrap();
        assert_eq!((s.row, s.col), (2, 2));
        assert_eq!(s.grid.count_empty(), 0);
    }

    #[test]
    fn test_four_chance_extremes() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(spawn_tile(&Grid::EMPTY, &mut rng, 0.0).unwrap().value, 2);
            assert_eq!(spawn_tile(&Grid::EMPTY, &mut rng, 1.0).unwrap().value, 4);
        }
    }

    #[test]
    fn test_same_seed_same_spawn() {
        let a = spawn_tile(&Grid::EMPTY, &mut Pcg32::seed_from_u64(42), 0.1);
        let b = spawn_tile(&Grid::EMPTY, &mut Pcg32::seed_from_u64(42), 0.1);
        assert_eq!(a, b);
    }
}
