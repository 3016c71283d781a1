use std::sync::Arc;

use async_trait::async_trait;
use waffle_core::calendar::DayWindow;
use waffle_core::difficulty::Difficulty;
use waffle_core::grid::Grid;
use waffle_core::types::DbId;

use crate::models::board::{Board, CreateBoard};

/// Failures from a board store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database rejected or failed the operation.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be turned back into a board.
    #[error("Corrupt board row {id}: {reason}")]
    Corrupt { id: DbId, reason: String },
}

/// Storage operations for boards.
///
/// Boards are append-only: there is no update or delete.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Persist a new board and return its assigned id.
    async fn insert(&self, board: &CreateBoard) -> Result<DbId, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Board>, StoreError>;

    /// Earliest board of `difficulty` created inside `window`.
    ///
    /// With `daily_only`, only boards written by the daily refresh match.
    async fn find_for_day(
        &self,
        difficulty: &Difficulty,
        daily_only: bool,
        window: DayWindow,
    ) -> Result<Option<Board>, StoreError>;

    /// Solution grid for a board, regardless of when it was created.
    async fn find_solution_by_id(&self, id: DbId) -> Result<Option<Grid>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Store handle shared across handlers and background tasks.
pub type SharedStore = Arc<dyn BoardStore>;
