//! Game configuration.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Configuration error.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum ConfigError {
    /// The grid side length is outside the supported range.
    #[display("Grid size {} out of range: supported side lengths are 2 through 64", size)]
    GridSize {
        /// The rejected side length.
        size: usize,
    },
    /// The number of starting tiles does not fit the grid.
    #[display(
        "Initial tile count {} out of range: a {}-cell grid seeds 1 through {} tiles",
        count,
        cells,
        cells
    )]
    InitialTiles {
        /// The rejected count.
        count: usize,
        /// Cells available on the configured grid.
        cells: usize,
    },
    /// The four-tile chance is not a probability.
    #[display("Four-tile chance {} out of range: must lie in [0, 1]", chance)]
    SpawnChance {
        /// The rejected chance.
        chance: f64,
    },
    /// A resumed grid does not match the configured size.
    #[display("Grid of size {} does not match configured size {}", actual, expected)]
    GridMismatch {
        /// Side length of the supplied grid.
        actual: usize,
        /// Side length the configuration expects.
        expected: usize,
    },
}

impl std::error::Error for ConfigError {}

/// Configuration for a new game.
///
/// Serde defaults let a harness supply only the fields it cares about;
/// an empty JSON object deserializes to the standard 4x4 game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid.
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,

    /// Number of tiles spawned at the start of a game.
    #[serde(default = "default_initial_tiles")]
    pub initial_tiles: usize,

    /// Probability that a spawned tile is the doubled base value.
    #[serde(default = "default_four_tile_chance")]
    pub four_tile_chance: f64,

    /// Seed for the spawner. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Undo depth cap. `None` keeps every snapshot.
    #[serde(default)]
    pub history_limit: Option<usize>,
}

#[instrument]
fn default_grid_size() -> usize {
    4
}

#[instrument]
fn default_initial_tiles() -> usize {
    2
}

#[instrument]
fn default_four_tile_chance() -> f64 {
    0.1
}

impl GameConfig {
    /// Checks the configuration against the rules of the game.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=64).contains(&self.grid_size) {
            return Err(ConfigError::GridSize {
                size: self.grid_size,
            });
        }
        let cells = self.grid_size * self.grid_size;
        if self.initial_tiles == 0 || self.initial_tiles > cells {
            return Err(ConfigError::InitialTiles {
                count: self.initial_tiles,
                cells,
            });
        }
        if !self.four_tile_chance.is_finite()
            || !(0.0..=1.0).contains(&self.four_tile_chance)
        {
            return Err(ConfigError::SpawnChance {
                chance: self.four_tile_chance,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            initial_tiles: default_initial_tiles(),
            four_tile_chance: default_four_tile_chance(),
            seed: None,
            history_limit: None,
        }
    }
}
