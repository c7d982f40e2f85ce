//! Core domain types for the sliding-tile puzzle.

use serde::{Deserialize, Serialize};

/// Error produced when a raw value cannot become a [`Tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("Invalid tile value {}: must be a power of two at least 2", value)]
pub struct InvalidTile {
    /// The rejected raw value.
    pub value: u32,
}

impl std::error::Error for InvalidTile {}

/// Value of a single tile: always a power of two, at least 2.
///
/// The invariant is enforced at every construction site, including
/// deserialization.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Tile(pub(crate) u32);

impl Tile {
    /// The smallest tile value, spawned most of the time.
    pub const BASE: Tile = Tile(2);

    /// Creates a tile, rejecting values that are not powers of two at least 2.
    pub fn new(value: u32) -> Result<Self, InvalidTile> {
        if value >= 2 && value.is_power_of_two() {
            Ok(Tile(value))
        } else {
            Err(InvalidTile { value })
        }
    }

    /// Returns the raw value.
    pub fn value(self) -> u32 {
        self.0
    }

    /// The tile produced by merging two tiles of this value.
    ///
    /// Saturates at 2^31, the largest power of two representable in `u32`.
    pub fn doubled(self) -> Tile {
        Tile(self.0.checked_mul(2).unwrap_or(1 << 31))
    }
}

impl TryFrom<u32> for Tile {
    type Error = InvalidTile;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Tile::new(value)
    }
}

impl From<Tile> for u32 {
    fn from(tile: Tile) -> Self {
        tile.0
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell holding a tile.
    Tile(Tile),
}

impl Cell {
    /// Checks whether the cell is empty.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the tile in the cell, if any.
    pub fn tile(self) -> Option<Tile> {
        match self {
            Cell::Empty => None,
            Cell::Tile(tile) => Some(tile),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}
