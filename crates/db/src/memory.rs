//! In-process [`BoardStore`] used when no database is configured.
//!
//! Boards live in a `Vec` behind a `tokio::sync::RwLock` and vanish when the
//! process exits. Query semantics match [`crate::PgBoardStore`]: day lookups
//! return the earliest matching board by `(created_at, id)`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use waffle_core::calendar::DayWindow;
use waffle_core::difficulty::Difficulty;
use waffle_core::grid::Grid;
use waffle_core::types::DbId;

use crate::models::board::{Board, CreateBoard};
use crate::store::{BoardStore, StoreError};

#[derive(Default)]
pub struct MemoryBoardStore {
    boards: RwLock<Vec<Board>>,
}

impl MemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fully specified board, keeping its id and timestamp.
    ///
    /// Later inserts continue numbering after the highest id seen.
    pub async fn seed(&self, board: Board) {
        self.boards.write().await.push(board);
    }

    /// Snapshot of every stored board in insertion order.
    pub async fn all(&self) -> Vec<Board> {
        self.boards.read().await.clone()
    }
}

#[async_trait]
impl BoardStore for MemoryBoardStore {
    async fn insert(&self, board: &CreateBoard) -> Result<DbId, StoreError> {
        let mut boards = self.boards.write().await;
        let id = boards.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        boards.push(Board {
            id,
            unsolved: board.unsolved,
            solution: board.solution,
            difficulty: board.difficulty.clone(),
            is_daily: board.is_daily,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Board>, StoreError> {
        let boards = self.boards.read().await;
        Ok(boards.iter().find(|b| b.id == id).cloned())
    }

    async fn find_for_day(
        &self,
        difficulty: &Difficulty,
        daily_only: bool,
        window: DayWindow,
    ) -> Result<Option<Board>, StoreError> {
        let boards = self.boards.read().await;
        Ok(boards
            .iter()
            .filter(|b| &b.difficulty == difficulty)
            .filter(|b| window.contains(b.created_at))
            .filter(|b| !daily_only || b.is_daily)
            .min_by_key(|b| (b.created_at, b.id))
            .cloned())
    }

    async fn find_solution_by_id(&self, id: DbId) -> Result<Option<Grid>, StoreError> {
        let boards = self.boards.read().await;
        Ok(boards.iter().find(|b| b.id == id).map(|b| b.solution))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
