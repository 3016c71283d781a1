//! Handlers for puzzle boards.
//!
//! Response bodies follow the shapes existing clients expect: grids are
//! returned as `value`/`board`, hints as `parentCellIndex` (row),
//! `innerCellIndex` (column) and `hint`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use waffle_core::calendar::DayWindow;
use waffle_core::difficulty::Difficulty;
use waffle_core::error::CoreError;
use waffle_core::grid::Grid;
use waffle_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::query::DifficultyParams;
use crate::services::verification;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /solve`, `POST /solved` and `POST /hint`.
#[derive(Debug, Deserialize)]
pub struct BoardSubmission {
    #[serde(rename = "boardID")]
    pub board_id: Option<DbId>,
    pub board: Option<Vec<Vec<i64>>>,
}

impl BoardSubmission {
    /// Pull out the board id and grid, rejecting missing or malformed input
    /// before any store access.
    fn into_parts(self) -> AppResult<(DbId, Grid)> {
        let board_id = self
            .board_id
            .ok_or_else(|| CoreError::Validation("boardID is required".to_string()))?;
        let rows = self
            .board
            .ok_or_else(|| CoreError::Validation("board is required".to_string()))?;
        let grid = Grid::try_from(rows)
            .map_err(|e| CoreError::Validation(format!("board is not a valid grid: {e}")))?;
        Ok((board_id, grid))
    }
}

#[derive(Debug, Serialize)]
pub struct RandomBoardResponse {
    pub id: DbId,
    pub value: Grid,
    pub difficulty: Difficulty,
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub id: DbId,
    pub value: Grid,
}

#[derive(Debug, Serialize)]
pub struct SolvedResponse {
    pub message: &'static str,
    pub board: Grid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HintResponse {
    pub parent_cell_index: usize,
    pub inner_cell_index: usize,
    pub hint: u8,
}

// ---------------------------------------------------------------------------
// Retrieval
// ---------------------------------------------------------------------------

/// GET /random
///
/// Fetch a new puzzle of any difficulty from the source, store it and return it.
/// Gives up with a 500 once the on-demand budget runs out, before the request
/// timeout would turn the failure into a 408.
pub async fn random_board(State(state): State<AppState>) -> AppResult<Json<RandomBoardResponse>> {
    let budget = state.config.on_demand_budget();
    let board = tokio::time::timeout(budget, state.acquisition.acquire_random())
        .await
        .map_err(|_| {
            CoreError::SourceUnavailable(format!(
                "no puzzle acquired within {}s",
                budget.as_secs()
            ))
        })??;

    Ok(Json(RandomBoardResponse {
        id: board.id,
        value: board.unsolved,
        difficulty: board.difficulty,
    }))
}

/// GET /daily?difficulty=
///
/// Today's daily board for a difficulty.
pub async fn daily_board(
    State(state): State<AppState>,
    params: Result<Query<DifficultyParams>, QueryRejection>,
) -> AppResult<Json<BoardResponse>> {
    let Query(params) = params?;
    board_for_today(&state, &params, true).await
}

/// GET /board?difficulty=
///
/// The first board of a difficulty created today, daily or not.
pub async fn today_board(
    State(state): State<AppState>,
    params: Result<Query<DifficultyParams>, QueryRejection>,
) -> AppResult<Json<BoardResponse>> {
    let Query(params) = params?;
    board_for_today(&state, &params, false).await
}

/// GET /board/{id}
pub async fn get_board(
    State(state): State<AppState>,
    board_id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<RandomBoardResponse>> {
    let Path(board_id) = board_id?;
    let board = state
        .store
        .find_by_id(board_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Board",
            id: board_id,
        }))?;

    Ok(Json(RandomBoardResponse {
        id: board.id,
        value: board.unsolved,
        difficulty: board.difficulty,
    }))
}

async fn board_for_today(
    state: &AppState,
    params: &DifficultyParams,
    daily_only: bool,
) -> AppResult<Json<BoardResponse>> {
    let difficulty = params.difficulty()?;

    let board = state
        .store
        .find_for_day(&difficulty, daily_only, DayWindow::today())
        .await?
        .ok_or_else(|| CoreError::NoBoardToday {
            difficulty: difficulty.to_string(),
        })?;

    Ok(Json(BoardResponse {
        id: board.id,
        value: board.unsolved,
    }))
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// POST /solve (also mounted at /solved)
///
/// Compare the submitted grid with the stored solution. A match echoes the
/// solution back; anything else is a 400.
pub async fn solve_board(
    State(state): State<AppState>,
    payload: Result<Json<BoardSubmission>, JsonRejection>,
) -> AppResult<Json<SolvedResponse>> {
    let Json(submission) = payload?;
    let (board_id, grid) = submission.into_parts()?;

    let solution = verification::check_solution(state.store.as_ref(), board_id, &grid).await?;

    Ok(Json(SolvedResponse {
        message: "Board solved",
        board: solution,
    }))
}

/// POST /hint
///
/// Reveal the first blank cell of the submitted grid.
pub async fn hint(
    State(state): State<AppState>,
    payload: Result<Json<BoardSubmission>, JsonRejection>,
) -> AppResult<Json<HintResponse>> {
    let Json(submission) = payload?;
    let (board_id, grid) = submission.into_parts()?;

    let hint = verification::hint_for(state.store.as_ref(), board_id, &grid).await?;

    Ok(Json(HintResponse {
        parent_cell_index: hint.row,
        inner_cell_index: hint.col,
        hint: hint.value,
    }))
}
