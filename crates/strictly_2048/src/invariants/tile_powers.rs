//! Tile validity invariant: every tile value is a power of two.

use super::Invariant;
use crate::game::GameState;
use crate::grid::Grid;

/// Invariant: every tile on the live grid and in every snapshot is a
/// power of two, at least 2.
///
/// Construction and deserialization both enforce this, so a violation
/// means a forged value reached the state.
pub struct TilePowersInvariant;

fn grid_holds(grid: &Grid) -> bool {
    grid.cells()
        .iter()
        .filter_map(|cell| cell.tile())
        .all(|tile| tile.value() >= 2 && tile.value().is_power_of_two())
}

impl Invariant<GameState> for TilePowersInvariant {
    fn holds(state: &GameState) -> bool {
        grid_holds(state.grid())
            && state
                .history()
                .iter()
                .all(|snapshot| grid_holds(snapshot.grid()))
    }

    fn description() -> &'static str {
        "Every tile value is a power of two, at least 2"
    }
}
