//! Strictly 2048 library - pure sliding-tile game logic
//!
//! This library provides the complete rules engine for a 2048-style
//! puzzle: deterministic move resolution, seeded tile spawning, undo
//! history, and stable textual serialization. Harnesses (CLI, server,
//! TUI, or test driver) own the I/O loop and drive the engine through
//! [`GameState`].
//!
//! # Architecture
//!
//! - **Grid**: bounds-checked square cell storage
//! - **Rules**: pure slide-and-merge resolution and end-of-game detection
//! - **Spawner**: seeded random tile placement
//! - **History**: LIFO snapshots with an optional depth cap
//! - **GameState**: the composed state machine with undo and JSON round-trip
//! - **Invariants & Contracts**: runtime-checked system guarantees
//!
//! # Example
//!
//! ```
//! use strictly_2048::{Direction, GameConfig, GameState};
//!
//! let config = GameConfig {
//!     seed: Some(42),
//!     ..GameConfig::default()
//! };
//! let mut game = GameState::new(config).expect("valid configuration");
//!
//! let report = game.make_move(Direction::Left);
//! if report.accepted {
//!     game.undo_move().expect("one move to undo");
//! }
//! println!("{game}");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod contracts;
mod direction;
mod game;
mod grid;
mod history;
mod invariants;
mod rules;
mod spawn;
mod types;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Domain types
pub use direction::{Direction, InvalidDirection};
pub use grid::{Coord, Grid, GridError};
pub use types::{Cell, InvalidTile, Tile};

// Crate-level exports - Rules
pub use rules::{ShiftOutcome, has_moves, movable_directions, shift};

// Crate-level exports - Spawning
pub use spawn::{SpawnError, Spawner, TileSpawn};

// Crate-level exports - History
pub use history::{HistoryError, HistoryStack, Snapshot};

// Crate-level exports - Game state
pub use game::{GameState, LoadError, MoveReport};

// Crate-level exports - Invariants and contracts
pub use contracts::{MoveContract, assert_move_contract};
pub use invariants::{
    GameInvariants, GridShapeInvariant, HistoryBoundedInvariant, Invariant, InvariantSet,
    InvariantViolation, TilePowersInvariant,
};
