//! Solution checking and single-cell hints.
//!
//! Both operations compare a client-submitted grid against the stored
//! solution for the same board. Neither looks at the stored unsolved grid.

use serde::Serialize;

use crate::grid::Grid;

/// Outcome of comparing a submitted grid with the solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Solved,
    NotSolved,
}

/// Position and value of the cell to reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hint {
    pub row: usize,
    pub col: usize,
    pub value: u8,
}

/// Cell-by-cell, row-major equality check.
pub fn verify(solution: &Grid, submitted: &Grid) -> Verdict {
    if submitted == solution {
        Verdict::Solved
    } else {
        Verdict::NotSolved
    }
}

/// Reveal the first blank cell of `submitted`, scanning rows top to bottom
/// and columns left to right.
///
/// Returns `None` when the submitted grid has no blank cell. Filled cells are
/// not checked against the solution.
pub fn hint(solution: &Grid, submitted: &Grid) -> Option<Hint> {
    submitted.first_blank().map(|(row, col)| Hint {
        row,
        col,
        value: solution.cell(row, col),
    })
}
