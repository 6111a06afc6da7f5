//! Bounded cell grid for the Game of Life.
//!
//! Cells are stored in a flat row-major buffer indexed by `row * cols + col`.
//! The grid is a finite plane: neighbours past an edge do not exist and are
//! never wrapped around.

use std::fmt;

/// Moore neighbourhood offsets as (row delta, col delta).
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, -1),  // left
    (0, 1),   // right
    (-1, 0),  // top
    (-1, -1), // top-left
    (-1, 1),  // top-right
    (1, 0),   // bottom
    (1, -1),  // bottom-left
    (1, 1),   // bottom-right
];

/// Which coordinate of a cell access exceeded the grid extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// Grid access and allocation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error(
        "Cell index out of range: {axis} coordinate is too big (row {row}, col {col} on a {rows}x{cols} grid)"
    )]
    OutOfRange {
        axis: Axis,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Failed allocating memory for a {rows}x{cols} cell grid")]
    Allocation { rows: usize, cols: usize },
    #[error("Grid dimensions must be non-zero (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },
}

/// Rectangular grid of boolean cells. Every coordinate inside the extent
/// holds an explicit value; dead cells are `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Allocate a `rows x cols` grid with every cell dead.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }

        let len = rows
            .checked_mul(cols)
            .ok_or(GridError::Allocation { rows, cols })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GridError::Allocation { rows, cols })?;
        cells.resize(len, false);

        Ok(Self { rows, cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the state of the cell at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Set the state of the cell at (row, col).
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Count alive cells among the in-bounds Moore neighbours of (row, col).
    ///
    /// Edge cells have at most 5 candidate neighbours and corner cells at
    /// most 3, so the result is always in `0..=8`.
    pub fn count_alive_neighbors(&self, row: usize, col: usize) -> Result<u8, GridError> {
        self.index(row, col)?;
        Ok(self.alive_neighbors(row, col))
    }

    /// Iterate over every cell in row-major order as `(row, col, alive)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &alive)| (idx / cols, idx % cols, alive))
    }

    /// Borrow a single row.
    pub fn row(&self, row: usize) -> Result<&[bool], GridError> {
        self.index(row, 0)?;
        let start = row * self.cols;
        Ok(&self.cells[start..start + self.cols])
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Cell state for a coordinate already known to be in bounds.
    #[inline]
    pub(crate) fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    /// Neighbour count for a coordinate already known to be in bounds.
    pub(crate) fn alive_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for &(dr, dc) in &NEIGHBOR_OFFSETS {
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };
            if r >= self.rows || c >= self.cols {
                continue;
            }
            if self.is_alive(r, c) {
                count += 1;
            }
        }
        count
    }

    /// Mutable row-major cell buffer, used when building the next generation.
    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    /// Convert (row, col) to a flat index, rejecting anything at or beyond the extent.
    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        let axis = if row >= self.rows {
            Axis::Row
        } else if col >= self.cols {
            Axis::Column
        } else {
            return Ok(row * self.cols + col);
        };
        Err(GridError::OutOfRange {
            axis,
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        })
    }
}
