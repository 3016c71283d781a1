//! Checking submitted grids against stored solutions.

use waffle_core::error::CoreError;
use waffle_core::grid::Grid;
use waffle_core::types::DbId;
use waffle_core::verification::{self, Hint, Verdict};
use waffle_db::BoardStore;

use crate::error::AppResult;

/// Confirm `submitted` equals the solution of board `id`.
///
/// Returns the solution when solved, [`CoreError::NotSolved`] otherwise.
pub async fn check_solution(store: &dyn BoardStore, id: DbId, submitted: &Grid) -> AppResult<Grid> {
    let solution = load_solution(store, id).await?;

    match verification::verify(&solution, submitted) {
        Verdict::Solved => {
            tracing::info!(board_id = id, "Board solved");
            Ok(solution)
        }
        Verdict::NotSolved => Err(CoreError::NotSolved.into()),
    }
}

/// Reveal the first blank cell of `submitted` using board `id`'s solution.
pub async fn hint_for(store: &dyn BoardStore, id: DbId, submitted: &Grid) -> AppResult<Hint> {
    let solution = load_solution(store, id).await?;

    let hint = verification::hint(&solution, submitted).ok_or(CoreError::NoHintAvailable)?;
    tracing::debug!(board_id = id, row = hint.row, col = hint.col, "Hint issued");
    Ok(hint)
}

async fn load_solution(store: &dyn BoardStore, id: DbId) -> AppResult<Grid> {
    let solution = store
        .find_solution_by_id(id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Board", id })?;
    Ok(solution)
}
