//! Square grid storage with bounds-checked access.

use crate::types::{Cell, Tile};
use serde::{Deserialize, Serialize};

/// A zero-indexed grid coordinate, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Row index, 0 at the top.
    pub row: usize,
    /// Column index, 0 at the left.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Errors produced by grid access and construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GridError {
    /// A coordinate fell outside the grid.
    #[display("Coordinate {} out of bounds for {}x{} grid", coord, size, size)]
    OutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// The grid's side length.
        size: usize,
    },
    /// A deserialized grid did not hold `size * size` cells.
    #[display("Malformed grid: {} cells for side length {}", cells, size)]
    MalformedShape {
        /// Number of cells carried by the payload.
        cells: usize,
        /// The claimed side length.
        size: usize,
    },
}

impl std::error::Error for GridError {}

/// An N-by-N grid of cells, row-major. The side length is fixed at
/// construction.
///
/// Deserialization rejects payloads whose cell count disagrees with the
/// side length, so a loaded grid always has the declared shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    /// Side length.
    pub(crate) size: usize,
    /// Cells in row-major order, `size * size` of them.
    pub(crate) cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of the given side length with every cell empty.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Returns the side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the cell at a coordinate.
    pub fn get(&self, coord: Coord) -> Result<Cell, GridError> {
        self.check(coord)?;
        Ok(self.cells[self.index(coord)])
    }

    /// Sets the cell at a coordinate.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> Result<(), GridError> {
        self.check(coord)?;
        let index = self.index(coord);
        self.cells[index] = cell;
        Ok(())
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Lists the coordinates of all empty cells in row-major order.
    pub fn empty_coords(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(i, _)| Coord::new(i / self.size, i % self.size))
            .collect()
    }

    /// Checks whether every cell holds a tile.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Returns the largest tile on the grid, if any tile exists.
    pub fn max_tile(&self) -> Option<Tile> {
        self.cells.iter().filter_map(|cell| cell.tile()).max()
    }

    /// Direct access for coordinates valid by construction. Rule code
    /// generates its coordinates from the grid's own size; a violation
    /// here is a defect, not a recoverable condition.
    pub(crate) fn cell(&self, coord: Coord) -> Cell {
        self.cells[coord.row * self.size + coord.col]
    }

    /// Direct mutation for coordinates valid by construction.
    pub(crate) fn set_cell(&mut self, coord: Coord, cell: Cell) {
        let index = coord.row * self.size + coord.col;
        self.cells[index] = cell;
    }

    fn check(&self, coord: Coord) -> Result<(), GridError> {
        if coord.row >= self.size || coord.col >= self.size {
            return Err(GridError::OutOfBounds {
                coord,
                size: self.size,
            });
        }
        Ok(())
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row * self.size + coord.col
    }
}

/// Serde-side representation; conversion enforces the shape invariant.
#[derive(Deserialize)]
struct RawGrid {
    size: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        if raw.size.checked_mul(raw.size) != Some(raw.cells.len()) {
            return Err(GridError::MalformedShape {
                cells: raw.cells.len(),
                size: raw.size,
            });
        }
        Ok(Grid {
            size: raw.size,
            cells: raw.cells,
        })
    }
}

impl std::fmt::Display for Grid {
    /// Renders the bordered text grid. The rendering is a pure function
    /// of the cells, so structurally equal grids always render the same.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let border = format!("+{}", "------+".repeat(self.size));
        for row in self.rows() {
            writeln!(f, "{border}")?;
            for cell in row {
                match cell.tile() {
                    Some(tile) => write!(f, "|{:^6}", tile.value())?,
                    None => write!(f, "|      ")?,
                }
            }
            writeln!(f, "|")?;
        }
        write!(f, "{border}")
    }
}
