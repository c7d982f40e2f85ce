//! End-of-game detection.

use super::shift::shift;
use crate::direction::Direction;
use crate::grid::Grid;
use strum::IntoEnumIterator;
use tracing::instrument;

/// Checks whether at least one direction would change the grid.
///
/// Returns `false` exactly when the game is over: every slide leaves
/// the grid as it is.
#[instrument(skip(grid))]
pub fn has_moves(grid: &Grid) -> bool {
    Direction::iter().any(|direction| shift(grid, direction).changed)
}

/// Lists the directions whose slide would change the grid.
#[instrument(skip(grid))]
pub fn movable_directions(grid: &Grid) -> Vec<Direction> {
    Direction::iter()
        .filter(|&direction| shift(grid, direction).changed)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coord;
    use crate::types::{Cell, Tile};

    fn grid_from(rows: &[&[u32]]) -> Grid {
        let mut grid = Grid::new(rows.len());
        for (row, cols) in rows.iter().enumerate() {
            for (col, &value) in cols.iter().enumerate() {
                if value != 0 {
                    grid.set(
                        Coord::new(row, col),
                        Cell::Tile(Tile::new(value).unwrap()),
                    )
                    .unwrap();
                }
            }
        }
        grid
    }

    #[test]
    fn test_single_tile_always_has_moves() {
        let grid = grid_from(&[&[2, 0], &[0, 0]]);
        assert!(has_moves(&grid));
    }

    #[test]
    fn test_checkerboard_is_stuck() {
        let grid = grid_from(&[&[2, 4], &[4, 2]]);
        assert!(!has_moves(&grid));
        assert!(movable_directions(&grid).is_empty());

        let grid = grid_from(&[
            &[2, 4, 2, 4],
            &[4, 2, 4, 2],
            &[2, 4, 2, 4],
            &[4, 2, 4, 2],
        ]);
        assert!(!has_moves(&grid));
    }

    #[test]
    fn test_full_grid_with_merge_available() {
        let grid = grid_from(&[&[2, 2], &[4, 8]]);
        assert!(has_moves(&grid));
    }

    #[test]
    fn test_movable_directions_for_corner_tile() {
        // A lone tile in the top-left corner can only travel down or right.
        let grid = grid_from(&[&[2, 0], &[0, 0]]);
        assert_eq!(
            movable_directions(&grid),
            vec![Direction::Down, Direction::Right]
        );
    }
}
