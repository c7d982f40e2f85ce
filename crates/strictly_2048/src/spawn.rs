//! Random tile spawning.

use crate::grid::{Coord, Grid};
use crate::types::Tile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A placement chosen by the spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpawn {
    /// Where the tile lands.
    pub coord: Coord,
    /// The spawned tile.
    pub tile: Tile,
}

/// Error produced when no cell can take a spawned tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SpawnError {
    /// Every cell already holds a tile.
    #[display("No empty cell available for spawning")]
    NoEmptyCell,
}

impl std::error::Error for SpawnError {}

fn default_rng() -> StdRng {
    StdRng::from_entropy()
}

/// Seeded source of spawned tiles.
///
/// The random source is per-instance, so independent games never share
/// state. It is excluded from serialization; a deserialized spawner
/// re-seeds from entropy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Probability of spawning a doubled base tile instead of the base.
    four_tile_chance: f64,
    #[serde(skip, default = "default_rng")]
    rng: StdRng,
}

impl Spawner {
    /// Creates a spawner. `None` seeds from entropy; a fixed seed gives
    /// a reproducible spawn sequence.
    pub fn new(seed: Option<u64>, four_tile_chance: f64) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => default_rng(),
        };
        Self {
            four_tile_chance,
            rng,
        }
    }

    /// Returns the chance of spawning a doubled base tile.
    pub fn four_tile_chance(&self) -> f64 {
        self.four_tile_chance
    }

    /// Chooses a tile value and an empty cell to hold it.
    ///
    /// The grid is not mutated; the caller applies the placement. The
    /// cell is uniform over the empty cells, the value is the base tile
    /// unless the four-tile roll hits.
    #[instrument(skip(self, grid))]
    pub fn spawn(&mut self, grid: &Grid) -> Result<TileSpawn, SpawnError> {
        let empty = grid.empty_coords();
        if empty.is_empty() {
            return Err(SpawnError::NoEmptyCell);
        }
        let coord = empty[self.rng.gen_range(0..empty.len())];
        let tile = if self.rng.gen_range(0.0..1.0) < self.four_tile_chance {
            Tile::BASE.doubled()
        } else {
            Tile::BASE
        };
        debug!(%coord, %tile, "spawned tile");
        Ok(TileSpawn { coord, tile })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_seeded_spawners_repeat_their_sequence() {
        let grid = Grid::new(4);
        let mut first = Spawner::new(Some(7), 0.1);
        let mut second = Spawner::new(Some(7), 0.1);
        for _ in 0..16 {
            assert_eq!(first.spawn(&grid).unwrap(), second.spawn(&grid).unwrap());
        }
    }

    #[test]
    fn test_full_grid_yields_no_empty_cell() {
        let mut grid = Grid::new(2);
        for coord in grid.empty_coords() {
            grid.set(coord, Cell::Tile(Tile::BASE)).unwrap();
        }
        let mut spawner = Spawner::new(Some(1), 0.1);
        assert_eq!(spawner.spawn(&grid), Err(SpawnError::NoEmptyCell));
    }

    #[test]
    fn test_spawn_lands_on_the_only_empty_cell() {
        let mut grid = Grid::new(2);
        for coord in [Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 0)] {
            grid.set(coord, Cell::Tile(Tile::BASE)).unwrap();
        }
        let mut spawner = Spawner::new(None, 0.1);
        let spawn = spawner.spawn(&grid).unwrap();
        assert_eq!(spawn.coord, Coord::new(1, 1));
    }

    #[test]
    fn test_chance_extremes_pin_the_value() {
        let grid = Grid::new(3);
        let mut never_four = Spawner::new(Some(9), 0.0);
        let mut always_four = Spawner::new(Some(9), 1.0);
        for _ in 0..20 {
            assert_eq!(never_four.spawn(&grid).unwrap().tile, Tile::BASE);
            assert_eq!(
                always_four.spawn(&grid).unwrap().tile,
                Tile::BASE.doubled()
            );
        }
    }

    #[test]
    fn test_serialization_skips_the_rng() {
        let spawner = Spawner::new(Some(3), 0.25);
        let json = serde_json::to_string(&spawner).unwrap();
        assert!(!json.contains("rng"));
        let mut back: Spawner = serde_json::from_str(&json).unwrap();
        assert_eq!(back.four_tile_chance(), 0.25);
        assert!(back.spawn(&Grid::new(2)).is_ok());
    }
}
