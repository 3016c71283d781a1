//! Board models and DTOs.

use sqlx::types::Json;
use sqlx::FromRow;
use waffle_core::difficulty::Difficulty;
use waffle_core::grid::Grid;
use waffle_core::types::{DbId, Timestamp};

use crate::store::StoreError;

// ---------------------------------------------------------------------------
// Entity structs
// ---------------------------------------------------------------------------

/// A stored puzzle: the grid handed to players and its solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub id: DbId,
    pub unsolved: Grid,
    pub solution: Grid,
    pub difficulty: Difficulty,
    pub is_daily: bool,
    pub created_at: Timestamp,
}

/// A row from the `boards` table as sqlx decodes it.
#[derive(Debug, FromRow)]
pub struct BoardRow {
    pub id: DbId,
    pub unsolved: Json<Grid>,
    pub solution: Json<Grid>,
    pub difficulty: String,
    pub is_daily: bool,
    pub created_at: Timestamp,
}

impl TryFrom<BoardRow> for Board {
    type Error = StoreError;

    fn try_from(row: BoardRow) -> Result<Self, Self::Error> {
        let difficulty = Difficulty::parse(&row.difficulty).map_err(|e| StoreError::Corrupt {
            id: row.id,
            reason: e.to_string(),
        })?;

        Ok(Self {
            id: row.id,
            unsolved: row.unsolved.0,
            solution: row.solution.0,
            difficulty,
            is_daily: row.is_daily,
            created_at: row.created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for inserting a new board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBoard {
    pub unsolved: Grid,
    pub solution: Grid,
    pub difficulty: Difficulty,
    pub is_daily: bool,
}
