//! HTTP-level integration tests for the board endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! over an in-memory store and a scripted puzzle source.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, solution, solution_json, FakeSource, TestApp};
use serde_json::json;
use waffle_api::config::ServerConfig;
use waffle_core::calendar::DayWindow;
use waffle_core::difficulty::Difficulty;
use waffle_core::grid::Grid;

fn zeros() -> serde_json::Value {
    serde_json::to_value(Grid::empty()).unwrap()
}

// ---------------------------------------------------------------------------
// GET /random
// ---------------------------------------------------------------------------

#[tokio::test]
async fn random_board_is_fetched_stored_and_returned() {
    let app = TestApp::new(FakeSource::always(Difficulty::Hard));

    let response = get(app.router(), "/random").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["difficulty"], "HARD");
    assert_eq!(json["value"], serde_json::to_value(common::unsolved()).unwrap());

    let stored = app.store.all().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(json["id"], stored[0].id);
    assert!(!stored[0].is_daily);
}

#[tokio::test]
async fn random_board_retries_past_source_failures() {
    let app = TestApp::new(FakeSource::new(vec![None, None, Some(Difficulty::Easy)]));

    let response = get(app.router(), "/random").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.source.calls(), 3);
}

#[tokio::test]
async fn random_board_returns_500_when_source_gives_up() {
    let app = TestApp::new(FakeSource::new(vec![None]));

    let response = get(app.router(), "/random").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(app.store.all().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn random_board_gives_up_with_500_before_request_timeout_under_defaults() {
    let app = TestApp::with_config(ServerConfig::from_lookup(|_| None), FakeSource::new(vec![None]));

    let response = get(app.router(), "/random").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    // 3s backoff under a 19s on-demand deadline: attempts at 0, 3, ..., 18.
    assert_eq!(app.source.calls(), 7);
}

#[tokio::test(start_paused = true)]
async fn random_board_with_hanging_source_returns_500_not_408() {
    let app = TestApp::with_config(ServerConfig::from_lookup(|_| None), FakeSource::hanging());

    let response = get(app.router(), "/random").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(app.source.calls(), 1);
    assert!(app.store.all().await.is_empty());
}

// ---------------------------------------------------------------------------
// GET /daily and /board
// ---------------------------------------------------------------------------

#[tokio::test]
async fn daily_without_board_returns_404() {
    let app = TestApp::new(FakeSource::always(Difficulty::Easy));

    let response = get(app.router(), "/daily?difficulty=easy").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    // Lookups never fall through to the source.
    assert_eq!(app.source.calls(), 0);
}

#[tokio::test]
async fn daily_returns_todays_daily_board() {
    let app = TestApp::new(FakeSource::always(Difficulty::Easy));
    app.seed(1, Difficulty::Easy, false).await;
    app.seed(2, Difficulty::Easy, true).await;

    let response = get(app.router(), "/daily?difficulty=Easy").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], 2);
    assert!(json["value"].is_array());
}

#[tokio::test]
async fn board_returns_first_board_of_today_daily_or_not() {
    let app = TestApp::new(FakeSource::always(Difficulty::Easy));
    app.seed(5, Difficulty::Medium, false).await;
    app.seed(6, Difficulty::Medium, true).await;
    app.seed(7, Difficulty::Hard, false).await;

    let response = get(app.router(), "/board?difficulty=MEDIUM").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], 5);
}

#[tokio::test]
async fn boards_from_before_local_midnight_are_not_served_today() {
    let app = TestApp::new(FakeSource::always(Difficulty::Easy));
    let yesterday = DayWindow::today().start - chrono::Duration::minutes(1);
    app.seed_at(1, Difficulty::Easy, true, yesterday).await;
    app.seed_at(2, Difficulty::Easy, false, yesterday).await;

    for uri in ["/daily?difficulty=easy", "/board?difficulty=easy"] {
        let response = get(app.router(), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");

        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn repeated_difficulty_parameter_returns_json_400() {
    let app = TestApp::new(FakeSource::always(Difficulty::Easy));

    for uri in ["/daily?difficulty=easy&difficulty=hard", "/board?difficulty=easy&difficulty=hard"] {
        let response = get(app.router(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json["error"].as_str().unwrap().contains("difficulty"));
    }
}

#[tokio::test]
async fn daily_without_difficulty_returns_400() {
    let app = common::build_test_app();

    let response = get(app, "/daily").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn get_board_by_id() {
    let app = TestApp::new(FakeSource::always(Difficulty::Easy));
    app.seed(11, Difficulty::Hard, false).await;

    let response = get(app.router(), "/board/11").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], 11);
    assert_eq!(json["difficulty"], "HARD");
    // Only the unsolved grid is ever served.
    assert!(json.get("solution").is_none());
}

#[tokio::test]
async fn non_numeric_board_id_returns_json_400() {
    let app = common::build_test_app();

    let response = get(app, "/board/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn get_unknown_board_returns_404() {
    let app = common::build_test_app();

    let response = get(app, "/board/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// POST /solve and /solved
// ---------------------------------------------------------------------------

#[tokio::test]
async fn solve_with_zeros_is_not_solved() {
    let app = TestApp::new(FakeSource::always(Difficulty::Easy));
    app.seed(1, Difficulty::Easy, true).await;

    let response = post_json(
        app.router(),
        "/solve",
        json!({"boardID": 1, "board": zeros()}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Board not solved");
}

#[tokio::test]
async fn solve_with_solution_echoes_it() {
    let app = TestApp::new(FakeSource::always(Difficulty::Easy));
    app.seed(1, Difficulty::Easy, true).await;

    for path in ["/solve", "/solved"] {
        let response = post_json(
            app.router(),
            path,
            json!({"boardID": 1, "board": solution_json()}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK, "{path}");
        let json = body_json(response).await;
        assert_eq!(json["message"], "Board solved");
        assert_eq!(json["board"], solution_json());
    }
}

#[tokio::test]
async fn solve_with_one_wrong_cell_is_not_solved() {
    let app = TestApp::new(FakeSource::always(Difficulty::Easy));
    app.seed(1, Difficulty::Easy, true).await;
    let wrong = solution().with_cell(8, 8, 1);

    let response = post_json(
        app.router(),
        "/solve",
        json!({"boardID": 1, "board": wrong}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn solve_unknown_board_returns_404() {
    let app = common::build_test_app();

    let response = post_json(
        app,
        "/solve",
        json!({"boardID": 12345, "board": solution_json()}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn solve_without_board_returns_400() {
    let app = common::build_test_app();

    let response = post_json(app, "/solve", json!({"boardID": 1})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn solve_with_malformed_grid_returns_400() {
    let app = TestApp::new(FakeSource::always(Difficulty::Easy));
    app.seed(1, Difficulty::Easy, true).await;

    let response = post_json(
        app.router(),
        "/solve",
        json!({"boardID": 1, "board": [[1, 2, 3]]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn solve_with_non_json_body_returns_400() {
    let app = common::build_test_app();

    let response = post_json(app, "/solve", json!("not an object")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// POST /hint
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hint_reveals_the_only_blank_cell() {
    let app = TestApp::new(FakeSource::always(Difficulty::Easy));
    app.seed(1, Difficulty::Easy, true).await;
    let board = solution().with_cell(3, 5, 0);

    let response = post_json(
        app.router(),
        "/hint",
        json!({"boardID": 1, "board": board}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["parentCellIndex"], 3);
    assert_eq!(json["innerCellIndex"], 5);
    assert_eq!(json["hint"], common::SOLVED[3][5]);
}

#[tokio::test]
async fn hint_picks_first_blank_in_row_major_order() {
    let app = TestApp::new(FakeSource::always(Difficulty::Easy));
    app.seed(1, Difficulty::Easy, true).await;
    let board = solution().with_cell(6, 0, 0).with_cell(2, 7, 0);

    let response = post_json(
        app.router(),
        "/hint",
        json!({"boardID": 1, "board": board}),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["parentCellIndex"], 2);
    assert_eq!(json["innerCellIndex"], 7);
    assert_eq!(json["hint"], common::SOLVED[2][7]);
}

#[tokio::test]
async fn hint_without_blanks_returns_400() {
    let app = TestApp::new(FakeSource::always(Difficulty::Easy));
    app.seed(1, Difficulty::Easy, true).await;

    let response = post_json(
        app.router(),
        "/hint",
        json!({"boardID": 1, "board": solution_json()}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NO_HINT");
}

#[tokio::test]
async fn hint_for_unknown_board_returns_404() {
    let app = common::build_test_app();

    let response = post_json(
        app,
        "/hint",
        json!({"boardID": 77, "board": zeros()}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
