use waffle_core::difficulty::Difficulty;
use waffle_core::grid::{Grid, GridError};

/// Errors from fetching or decoding a single puzzle.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The generator returned a non-2xx status code.
    #[error("Puzzle API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The response decoded but does not describe a usable puzzle.
    #[error("Malformed puzzle: {0}")]
    Malformed(String),
}

impl From<GridError> for SourceError {
    fn from(err: GridError) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// A puzzle as delivered by the source, checked but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPuzzle {
    pub unsolved: Grid,
    pub solution: Grid,
    pub difficulty: Difficulty,
}

impl FetchedPuzzle {
    /// Accept a puzzle only if the solution is a complete valid grid and
    /// every given of `unsolved` agrees with it.
    pub fn validated(
        unsolved: Grid,
        solution: Grid,
        difficulty: Difficulty,
    ) -> Result<Self, SourceError> {
        if !solution.is_valid_solution() {
            return Err(SourceError::Malformed(
                "solution is not a completed valid grid".to_string(),
            ));
        }
        if !unsolved.is_consistent_with(&solution) {
            return Err(SourceError::Malformed(
                "puzzle givens disagree with the solution".to_string(),
            ));
        }

        Ok(Self {
            unsolved,
            solution,
            difficulty,
        })
    }
}
