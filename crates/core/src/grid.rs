//! The 9×9 Sudoku grid.
//!
//! A [`Grid`] holds digits `0..=9` where `0` marks a blank cell. On the wire
//! and in the `boards` table a grid is a JSON array of nine rows, each an
//! array of nine integers. Deserialization rejects any other shape.

use serde::{Deserialize, Serialize};

/// Number of rows and columns in a grid.
pub const GRID_SIZE: usize = 9;

/// Side length of one 3×3 box.
const BOX_SIZE: usize = 3;

/// Value stored in a blank cell.
pub const BLANK: u8 = 0;

/// Reasons a nested list of integers is not a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("expected 9 rows, got {0}")]
    RowCount(usize),

    #[error("row {row} has {len} cells, expected 9")]
    ColumnCount { row: usize, len: usize },

    #[error("cell ({row}, {col}) holds {value}, expected a digit 0-9")]
    OutOfRange { row: usize, col: usize, value: i64 },
}

/// A 9×9 grid of digits, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<u8>>")]
pub struct Grid([[u8; GRID_SIZE]; GRID_SIZE]);

impl Grid {
    /// A grid with every cell blank.
    pub const fn empty() -> Self {
        Self([[BLANK; GRID_SIZE]; GRID_SIZE])
    }

    /// Build a grid from fixed-size rows. Digits above 9 are rejected.
    pub fn from_rows(rows: [[u8; GRID_SIZE]; GRID_SIZE]) -> Result<Self, GridError> {
        for (row, cells) in rows.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value > 9 {
                    return Err(GridError::OutOfRange {
                        row,
                        col,
                        value: i64::from(value),
                    });
                }
            }
        }
        Ok(Self(rows))
    }

    /// Value at `(row, col)`. Panics if either index is outside `0..9`.
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.0[row][col]
    }

    /// Return a copy with `(row, col)` set to `value`.
    pub fn with_cell(mut self, row: usize, col: usize, value: u8) -> Self {
        self.0[row][col] = value;
        self
    }

    /// Position of the first blank cell in row-major order.
    pub fn first_blank(&self) -> Option<(usize, usize)> {
        self.0.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|&value| value == BLANK)
                .map(|col| (row, col))
        })
    }

    pub fn blank_count(&self) -> usize {
        self.0
            .iter()
            .flatten()
            .filter(|&&value| value == BLANK)
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.first_blank().is_none()
    }

    /// True when the grid is complete and every row, column and box holds
    /// each digit 1-9 exactly once.
    pub fn is_valid_solution(&self) -> bool {
        if !self.is_complete() {
            return false;
        }

        let groups = (0..GRID_SIZE).flat_map(|i| {
            let row: Vec<(usize, usize)> = (0..GRID_SIZE).map(|c| (i, c)).collect();
            let col: Vec<(usize, usize)> = (0..GRID_SIZE).map(|r| (r, i)).collect();
            let (box_row, box_col) = ((i / BOX_SIZE) * BOX_SIZE, (i % BOX_SIZE) * BOX_SIZE);
            let boxed: Vec<(usize, usize)> = (0..GRID_SIZE)
                .map(|k| (box_row + k / BOX_SIZE, box_col + k % BOX_SIZE))
                .collect();
            [row, col, boxed]
        });

        groups.into_iter().all(|cells| {
            let mut seen = [false; GRID_SIZE + 1];
            cells.into_iter().all(|(r, c)| {
                let digit = usize::from(self.0[r][c]);
                !std::mem::replace(&mut seen[digit], true)
            })
        })
    }

    /// True when every filled cell of `self` equals `solution` at the same
    /// position. Blank cells are unconstrained.
    pub fn is_consistent_with(&self, solution: &Grid) -> bool {
        self.0
            .iter()
            .flatten()
            .zip(solution.0.iter().flatten())
            .all(|(&given, &solved)| given == BLANK || given == solved)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<Vec<i64>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        if rows.len() != GRID_SIZE {
            return Err(GridError::RowCount(rows.len()));
        }

        let mut grid = [[BLANK; GRID_SIZE]; GRID_SIZE];
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != GRID_SIZE {
                return Err(GridError::ColumnCount {
                    row,
                    len: cells.len(),
                });
            }
            for (col, &value) in cells.iter().enumerate() {
                grid[row][col] = u8::try_from(value)
                    .ok()
                    .filter(|digit| *digit <= 9)
                    .ok_or(GridError::OutOfRange { row, col, value })?;
            }
        }

        Ok(Self(grid))
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.0.iter().map(|row| row.to_vec()).collect()
    }
}

/// Shared test grids, also exported to other crates' tests through the
/// `test-fixtures` feature.
#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures {
    use super::*;

    /// A valid completed grid.
    pub const SOLVED: [[u8; 9]; 9] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    pub fn solved() -> Grid {
        Grid(SOLVED)
    }
}
