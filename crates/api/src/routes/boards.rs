//! Route definitions for puzzle boards.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::boards;
use crate::state::AppState;

/// Board routes, mounted at the root.
///
/// ```text
/// GET  /random      -> random_board
/// GET  /daily       -> daily_board   (?difficulty=)
/// GET  /board       -> today_board   (?difficulty=)
/// GET  /board/{id}  -> get_board
/// POST /solve       -> solve_board
/// POST /solved      -> solve_board
/// POST /hint        -> hint
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/random", get(boards::random_board))
        .route("/daily", get(boards::daily_board))
        .route("/board", get(boards::today_board))
        .route("/board/{id}", get(boards::get_board))
        .route("/solve", post(boards::solve_board))
        .route("/solved", post(boards::solve_board))
        .route("/hint", post(boards::hint))
}
