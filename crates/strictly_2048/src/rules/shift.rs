//! Slide-and-merge resolution.

use crate::direction::Direction;
use crate::grid::{Coord, Grid};
use crate::types::{Cell, Tile};
use tracing::instrument;

/// Outcome of resolving a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftOutcome {
    /// The grid after sliding and merging. Bit-identical to the input
    /// when `changed` is false.
    pub grid: Grid,
    /// Whether the slide altered the grid.
    pub changed: bool,
    /// Sum of the values of tiles created by merges.
    pub score_delta: u32,
}

/// Resolves a slide of the whole grid in one direction.
///
/// Pure: no randomness, no history, the input grid is untouched. Each
/// line is handled independently: tiles slide toward the travel edge,
/// adjacent equal tiles merge with the pair nearest the edge taking
/// priority, and a merged tile never merges again in the same move.
#[instrument(skip(grid))]
pub fn shift(grid: &Grid, direction: Direction) -> ShiftOutcome {
    let mut next = grid.clone();
    let mut score_delta = 0u32;
    for line in line_coords(grid.size(), direction) {
        let tiles: Vec<Tile> = line
            .iter()
            .filter_map(|&coord| grid.cell(coord).tile())
            .collect();
        let (merged, line_delta) = merge_line(&tiles);
        score_delta += line_delta;
        for (slot, &coord) in line.iter().enumerate() {
            let cell = match merged.get(slot) {
                Some(&tile) => Cell::Tile(tile),
                None => Cell::Empty,
            };
            next.set_cell(coord, cell);
        }
    }
    let changed = next != *grid;
    // A merge always changes its line, so an unchanged shift scores nothing.
    debug_assert!(changed || score_delta == 0);
    ShiftOutcome {
        grid: next,
        changed,
        score_delta,
    }
}

/// Coordinates of each line, ordered from the travel edge inward.
fn line_coords(size: usize, direction: Direction) -> Vec<Vec<Coord>> {
    (0..size)
        .map(|line| {
            (0..size)
                .map(|slot| match direction {
                    Direction::Left => Coord::new(line, slot),
                    Direction::Right => Coord::new(line, size - 1 - slot),
                    Direction::Up => Coord::new(slot, line),
                    Direction::Down => Coord::new(size - 1 - slot, line),
                })
                .collect()
        })
        .collect()
}

/// Merges a compacted line of tiles, travel edge first.
///
/// Returns the surviving tiles in travel order and the score gained.
/// Each input tile participates in at most one merge per call.
fn merge_line(tiles: &[Tile]) -> (Vec<Tile>, u32) {
    let mut merged = Vec::with_capacity(tiles.len());
    let mut delta = 0u32;
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            let tile = tiles[i].doubled();
            delta += tile.value();
            merged.push(tile);
            i += 2;
        } else {
            merged.push(tiles[i]);
            i += 1;
        }
    }
    (merged, delta)
}
