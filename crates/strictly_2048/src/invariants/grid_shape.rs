//! Grid shape invariant: cell storage always matches the side length.

use super::Invariant;
use crate::game::GameState;
use crate::grid::Grid;

/// Invariant: the live grid and every snapshot hold exactly
/// `size * size` cells, and snapshots share the live grid's size.
///
/// The side length is fixed at construction, so a mismatch anywhere
/// means storage was corrupted or a foreign grid was smuggled in.
pub struct GridShapeInvariant;

fn well_formed(grid: &Grid) -> bool {
    grid.size()
        .checked_mul(grid.size())
        .is_some_and(|cells| cells == grid.cells().len())
}

impl Invariant<GameState> for GridShapeInvariant {
    fn holds(state: &GameState) -> bool {
        let size = state.grid().size();
        well_formed(state.grid())
            && state.history().iter().all(|snapshot| {
                snapshot.grid().size() == size && well_formed(snapshot.grid())
            })
    }

    fn description() -> &'static str {
        "Grid and snapshot storage match the fixed side length"
    }
}
