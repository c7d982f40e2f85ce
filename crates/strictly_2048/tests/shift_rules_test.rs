//! Shift and merge rules exercised through the public API, with
//! hand-computed expected layouts for every direction.

use strictly_2048::{Cell, Coord, Direction, Grid, Tile, has_moves, movable_directions, shift};

fn grid_from(rows: &[&[u32]]) -> Grid {
    let size = rows
        .iter()
        .map(|cols| cols.len())
        .max()
        .unwrap_or(0)
        .max(rows.len());
    let mut grid = Grid::new(size);
    for (row, cols) in rows.iter().enumerate() {
        for (col, &value) in cols.iter().enumerate() {
            if value != 0 {
                grid.set(Coord::new(row, col), Cell::Tile(Tile::new(value).unwrap()))
                    .unwrap();
            }
        }
    }
    grid
}

#[test]
fn test_full_row_of_equal_tiles_merges_each_pair_once() {
    let outcome = shift(&grid_from(&[&[2, 2, 2, 2]]), Direction::Left);
    assert_eq!(outcome.grid, grid_from(&[&[4, 4, 0, 0]]));
    assert_eq!(outcome.score_delta, 8);
}

#[test]
fn test_merge_prefers_the_pair_nearest_the_travel_edge() {
    let left = shift(&grid_from(&[&[0, 2, 2, 2]]), Direction::Left);
    assert_eq!(left.grid, grid_from(&[&[4, 2, 0, 0]]));
    assert_eq!(left.score_delta, 4);

    let right = shift(&grid_from(&[&[2, 2, 2, 0]]), Direction::Right);
    assert_eq!(right.grid, grid_from(&[&[0, 0, 2, 4]]));
    assert_eq!(right.score_delta, 4);
}

#[test]
fn test_merged_tile_never_chains_into_a_second_merge() {
    let outcome = shift(&grid_from(&[&[4, 4, 8, 0]]), Direction::Left);
    // The fresh 8 stops next to the old 8 instead of merging again.
    assert_eq!(outcome.grid, grid_from(&[&[8, 8, 0, 0]]));
    assert_eq!(outcome.score_delta, 8);
}

#[test]
fn test_every_direction_on_a_mixed_grid() {
    let start = grid_from(&[&[2, 2, 0], &[4, 0, 4], &[0, 8, 8]]);

    let left = shift(&start, Direction::Left);
    assert_eq!(left.grid, grid_from(&[&[4, 0, 0], &[8, 0, 0], &[16, 0, 0]]));
    assert_eq!(left.score_delta, 28);

    let right = shift(&start, Direction::Right);
    assert_eq!(
        right.grid,
        grid_from(&[&[0, 0, 4], &[0, 0, 8], &[0, 0, 16]])
    );
    assert_eq!(right.score_delta, 28);

    let up = shift(&start, Direction::Up);
    assert_eq!(up.grid, grid_from(&[&[2, 2, 4], &[4, 8, 8], &[0, 0, 0]]));
    assert_eq!(up.score_delta, 0);

    let down = shift(&start, Direction::Down);
    assert_eq!(
        down.grid,
        grid_from(&[&[0, 0, 0], &[2, 2, 4], &[4, 8, 8]])
    );
    assert_eq!(down.score_delta, 0);
}

#[test]
fn test_shift_leaves_its_input_untouched() {
    let start = grid_from(&[&[2, 2, 0], &[4, 0, 4], &[0, 8, 8]]);
    let copy = start.clone();

    let first = shift(&start, Direction::Left);
    let second = shift(&start, Direction::Left);
    assert_eq!(start, copy);
    assert_eq!(first.grid, second.grid);
    assert_eq!(first.score_delta, second.score_delta);
}

#[test]
fn test_unchanged_shift_reports_no_change_and_no_score() {
    let packed = grid_from(&[&[2, 0, 0, 0]]);
    let outcome = shift(&packed, Direction::Left);
    assert!(!outcome.changed);
    assert_eq!(outcome.grid, packed);
    assert_eq!(outcome.score_delta, 0);
}

#[test]
fn test_movable_directions_agree_with_shift() {
    let layouts = [
        grid_from(&[&[2, 0], &[0, 0]]),
        grid_from(&[&[2, 4], &[4, 2]]),
        grid_from(&[&[2, 2], &[4, 8]]),
        grid_from(&[&[0, 0, 0], &[0, 8, 0], &[0, 0, 0]]),
    ];

    for layout in &layouts {
        let expected: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&direction| shift(layout, direction).changed)
            .collect();
        assert_eq!(movable_directions(layout), expected);
        assert_eq!(has_moves(layout), !expected.is_empty());
    }
}

#[test]
fn test_checkerboard_grid_is_stuck() {
    let stuck = grid_from(&[&[2, 4, 2, 4], &[4, 2, 4, 2], &[2, 4, 2, 4], &[4, 2, 4, 2]]);
    assert!(!has_moves(&stuck));
    assert!(movable_directions(&stuck).is_empty());
}
