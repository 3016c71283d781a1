pub mod boards;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the puzzle route tree.
///
/// ```text
/// /random                       new board of any difficulty (GET)
/// /daily?difficulty=            today's daily board (GET)
/// /board?difficulty=            first board created today (GET)
/// /board/{id}                   board by id (GET)
/// /solve, /solved               check a submitted grid (POST)
/// /hint                         reveal the first blank cell (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(boards::router())
}
