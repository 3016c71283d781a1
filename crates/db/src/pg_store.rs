//! PostgreSQL-backed [`BoardStore`].

use async_trait::async_trait;
use waffle_core::calendar::DayWindow;
use waffle_core::difficulty::Difficulty;
use waffle_core::grid::Grid;
use waffle_core::types::DbId;

use crate::models::board::{Board, CreateBoard};
use crate::repositories::BoardRepo;
use crate::store::{BoardStore, StoreError};
use crate::DbPool;

/// Board store over a shared connection pool.
#[derive(Clone)]
pub struct PgBoardStore {
    pool: DbPool,
}

impl PgBoardStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BoardStore for PgBoardStore {
    async fn insert(&self, board: &CreateBoard) -> Result<DbId, StoreError> {
        Ok(BoardRepo::create(&self.pool, board).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Board>, StoreError> {
        BoardRepo::find_by_id(&self.pool, id)
            .await?
            .map(Board::try_from)
            .transpose()
    }

    async fn find_for_day(
        &self,
        difficulty: &Difficulty,
        daily_only: bool,
        window: DayWindow,
    ) -> Result<Option<Board>, StoreError> {
        BoardRepo::find_for_day(&self.pool, difficulty, daily_only, window)
            .await?
            .map(Board::try_from)
            .transpose()
    }

    async fn find_solution_by_id(&self, id: DbId) -> Result<Option<Grid>, StoreError> {
        Ok(BoardRepo::find_solution_by_id(&self.pool, id).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
