//! Composed game state: grid, score, history, and spawner.

use crate::config::{ConfigError, GameConfig};
use crate::direction::Direction;
use crate::grid::Grid;
use crate::history::{HistoryError, HistoryStack, Snapshot};
use crate::invariants::{GameInvariants, InvariantSet, InvariantViolation};
use crate::rules;
use crate::spawn::{SpawnError, Spawner};
use crate::types::{Cell, Tile};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Report returned by [`GameState::make_move`].
///
/// A move that would not change the grid is rejected in-band, never as
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// Whether the move changed the grid and was applied.
    pub accepted: bool,
    /// Score gained by merges in this move.
    pub score_delta: u32,
    /// Whether any move remains after this one.
    pub game_over: bool,
}

/// Error produced when a serialized game state cannot be loaded.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum LoadError {
    /// The payload was not valid JSON for a game state.
    #[display("Malformed game state: {}", _0)]
    #[from]
    Json(serde_json::Error),
    /// The embedded configuration fails validation.
    #[display("Loaded configuration is invalid: {}", _0)]
    #[from]
    Config(ConfigError),
    /// The loaded components disagree with the embedded configuration.
    #[display("Loaded state is inconsistent: {}", reason)]
    Inconsistent {
        /// What disagreed.
        reason: String,
    },
    /// The loaded state violates a game invariant.
    #[display("Loaded state violates {} game invariant(s)", _0.len())]
    Invariant(Vec<InvariantViolation>),
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Json(err) => Some(err),
            LoadError::Config(err) => Some(err),
            LoadError::Inconsistent { .. } | LoadError::Invariant(_) => None,
        }
    }
}

/// Complete game state.
///
/// Owns its grid, score, undo history, and random source. Instances
/// are independent: two games never share state, and a fixed seed
/// makes a game fully reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// The grid.
    pub(crate) grid: Grid,
    /// Accumulated score.
    pub(crate) score: u32,
    /// Undo history.
    pub(crate) history: HistoryStack,
    /// Tile source.
    pub(crate) spawner: Spawner,
    /// The configuration the game was created with.
    pub(crate) config: GameConfig,
}

impl GameState {
    /// Creates a new game from a validated configuration.
    #[instrument(skip(config), fields(grid_size = config.grid_size, seed = ?config.seed))]
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = Self {
            grid: Grid::new(config.grid_size),
            score: 0,
            history: HistoryStack::new(config.history_limit),
            spawner: Spawner::new(config.seed, config.four_tile_chance),
            config,
        };
        state.seed_initial_tiles();
        info!(tiles = state.config.initial_tiles, "Created new game");
        Ok(state)
    }

    /// Adopts an existing position, for puzzle setups and deterministic
    /// tests.
    ///
    /// The grid is taken as-is with no starting tiles spawned, history
    /// begins empty, and the spawner starts fresh from the configured
    /// seed. The grid must match the configured size.
    #[instrument(skip(grid, config), fields(grid_size = grid.size()))]
    pub fn resume(grid: Grid, score: u32, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if grid.size() != config.grid_size {
            return Err(ConfigError::GridMismatch {
                actual: grid.size(),
                expected: config.grid_size,
            });
        }
        Ok(Self {
            grid,
            score,
            history: HistoryStack::new(config.history_limit),
            spawner: Spawner::new(config.seed, config.four_tile_chance),
            config,
        })
    }

    /// Returns the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the accumulated score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns the undo history.
    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Returns the configuration the game was created with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the largest tile on the grid, if any.
    ///
    /// Harnesses apply their own win threshold to this; the engine
    /// keeps playing past any particular tile.
    pub fn max_tile(&self) -> Option<Tile> {
        self.grid.max_tile()
    }

    /// Derived end-of-game status: true when no direction would change
    /// the grid. Never cached.
    pub fn is_game_over(&self) -> bool {
        !rules::has_moves(&self.grid)
    }

    /// Lists the directions that would currently change the grid.
    pub fn movable_directions(&self) -> Vec<Direction> {
        rules::movable_directions(&self.grid)
    }

    /// Applies a move in the given direction.
    ///
    /// A move that would not change the grid is rejected: the report
    /// carries `accepted: false` and the state is left exactly as it
    /// was, with nothing spawned and nothing recorded. An accepted move
    /// first records the pre-move state for undo, then adopts the
    /// slide-and-merge outcome and spawns one tile.
    #[instrument(skip(self))]
    pub fn make_move(&mut self, direction: Direction) -> MoveReport {
        #[cfg(debug_assertions)]
        let before = self.clone();

        let outcome = rules::shift(&self.grid, direction);
        let report = if !outcome.changed {
            debug!("Rejected move: no tile would slide or merge");
            MoveReport {
                accepted: false,
                score_delta: 0,
                game_over: self.is_game_over(),
            }
        } else {
            self.history.push(Snapshot::new(self.grid.clone(), self.score));
            self.grid = outcome.grid;
            self.score = self.score.saturating_add(outcome.score_delta);
            match self.spawner.spawn(&self.grid) {
                Ok(spawn) => self.grid.set_cell(spawn.coord, Cell::Tile(spawn.tile)),
                // A changed slide always leaves room for the spawn.
                Err(SpawnError::NoEmptyCell) => {
                    warn!("No empty cell after an accepted move")
                }
            }
            let game_over = self.is_game_over();
            info!(
                score_delta = outcome.score_delta,
                score = self.score,
                game_over,
                "Applied move"
            );
            MoveReport {
                accepted: true,
                score_delta: outcome.score_delta,
                game_over,
            }
        };

        #[cfg(debug_assertions)]
        crate::contracts::assert_move_contract(&before, self, &report);

        report
    }

    /// Restores the newest snapshot, undoing the last accepted move.
    ///
    /// The undone move's spawned tile disappears with it. With no
    /// history to pop, the call fails and changes nothing.
    #[instrument(skip(self))]
    pub fn undo_move(&mut self) -> Result<(), HistoryError> {
        let snapshot = self.history.pop()?;
        let (grid, score) = snapshot.into_parts();
        self.grid = grid;
        self.score = score;
        info!(
            score = self.score,
            remaining = self.history.len(),
            "Restored snapshot"
        );
        Ok(())
    }

    /// Restarts from the stored configuration.
    ///
    /// Score returns to zero, history is dropped, and a seeded game
    /// resets to its identical opening layout.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.grid = Grid::new(self.config.grid_size);
        self.score = 0;
        self.history.clear();
        self.spawner = Spawner::new(self.config.seed, self.config.four_tile_chance);
        self.seed_initial_tiles();
        info!("Reset game to its starting position");
    }

    /// Serializes the observable state to JSON. The random source is
    /// excluded.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Loads a game state from JSON, re-validating the configuration,
    /// the component consistency, and the full invariant set.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let state: GameState = serde_json::from_str(json)?;
        state.config.validate()?;
        state.verify_loaded()?;
        GameInvariants::check_all(&state).map_err(LoadError::Invariant)?;
        debug!(score = state.score, "Loaded game state from JSON");
        Ok(state)
    }

    fn verify_loaded(&self) -> Result<(), LoadError> {
        if self.grid.size() != self.config.grid_size {
            return Err(LoadError::Inconsistent {
                reason: format!(
                    "grid size {} but configured size {}",
                    self.grid.size(),
                    self.config.grid_size
                ),
            });
        }
        if self.history.limit() != self.config.history_limit {
            return Err(LoadError::Inconsistent {
                reason: format!(
                    "history cap {:?} but configured cap {:?}",
                    self.history.limit(),
                    self.config.history_limit
                ),
            });
        }
        if self.spawner.four_tile_chance() != self.config.four_tile_chance {
            return Err(LoadError::Inconsistent {
                reason: format!(
                    "spawner chance {} but configured chance {}",
                    self.spawner.four_tile_chance(),
                    self.config.four_tile_chance
                ),
            });
        }
        Ok(())
    }

    fn seed_initial_tiles(&mut self) {
        for _ in 0..self.config.initial_tiles {
            match self.spawner.spawn(&self.grid) {
                Ok(spawn) => self.grid.set_cell(spawn.coord, Cell::Tile(spawn.tile)),
                // Validation caps the count at the cell count.
                Err(SpawnError::NoEmptyCell) => {
                    warn!("Ran out of empty cells while seeding the grid");
                    break;
                }
            }
        }
    }
}

impl PartialEq for GameState {
    /// Observable-state equality: grid, score, history, and config.
    /// The spawner's random source is deliberately excluded, so a game
    /// restored by undo compares equal to its earlier self.
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
            && self.score == other.score
            && self.history == other.history
            && self.config == other.config
    }
}

impl std::fmt::Display for GameState {
    /// Renders the score line and the bordered grid. A pure function of
    /// observable state: structurally equal games render identically.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        write!(f, "{}", self.grid)
    }
}
