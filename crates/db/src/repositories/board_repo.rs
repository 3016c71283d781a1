//! Repository for the `boards` table.

use sqlx::types::Json;
use sqlx::PgPool;
use waffle_core::calendar::DayWindow;
use waffle_core::difficulty::Difficulty;
use waffle_core::grid::Grid;
use waffle_core::types::DbId;

use crate::models::board::{BoardRow, CreateBoard};

/// Column list for `boards` queries.
const COLUMNS: &str = "id, unsolved, solution, difficulty, is_daily, created_at";

/// Provides data access for boards.
pub struct BoardRepo;

impl BoardRepo {
    /// Insert a board, returning the new id.
    pub async fn create(pool: &PgPool, dto: &CreateBoard) -> Result<DbId, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO boards (unsolved, solution, difficulty, is_daily) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(Json(&dto.unsolved))
        .bind(Json(&dto.solution))
        .bind(dto.difficulty.as_str())
        .bind(dto.is_daily)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BoardRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boards WHERE id = $1");
        sqlx::query_as::<_, BoardRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Earliest board of a difficulty created within `window`.
    ///
    /// `difficulty` is compared against the stored uppercase form.
    pub async fn find_for_day(
        pool: &PgPool,
        difficulty: &Difficulty,
        daily_only: bool,
        window: DayWindow,
    ) -> Result<Option<BoardRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM boards \
             WHERE difficulty = $1 \
               AND created_at >= $2 AND created_at < $3 \
               AND ($4 = FALSE OR is_daily) \
             ORDER BY created_at, id \
             LIMIT 1"
        );
        sqlx::query_as::<_, BoardRow>(&query)
            .bind(difficulty.as_str())
            .bind(window.start)
            .bind(window.end)
            .bind(daily_only)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_solution_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Grid>, sqlx::Error> {
        let row: Option<(Json<Grid>,)> =
            sqlx::query_as("SELECT solution FROM boards WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(solution,)| solution.0))
    }
}
