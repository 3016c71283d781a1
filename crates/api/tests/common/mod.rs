#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use waffle_api::config::{DailyRefreshConfig, ServerConfig, SourceConfig};
use waffle_api::router::build_app_router;
use waffle_api::services::acquisition::Acquisition;
use waffle_api::state::AppState;
use waffle_core::difficulty::Difficulty;
use waffle_core::grid::Grid;
use waffle_core::types::DbId;
use waffle_db::models::board::Board;
use waffle_db::MemoryBoardStore;
use waffle_source::{FetchedPuzzle, PuzzleSource, SourceError};

pub use waffle_core::grid::fixtures::{solved as solution, SOLVED};

/// The solution with the first two cells of every row blanked.
pub fn unsolved() -> Grid {
    let mut rows = SOLVED;
    for row in rows.iter_mut() {
        row[0] = 0;
        row[1] = 0;
    }
    Grid::from_rows(rows).unwrap()
}

/// Solution rows as JSON, ready to drop into a request body.
pub fn solution_json() -> serde_json::Value {
    serde_json::to_value(solution()).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        database_url: None,
        database_max_connections: 1,
        source: SourceConfig {
            api_url: "http://puzzles.invalid/api".to_string(),
            request_timeout_secs: 1,
            backoff_secs: 0,
            max_attempts: 5,
            deadline_secs: 0,
        },
        daily: DailyRefreshConfig {
            enabled: false,
            run_on_startup: false,
        },
    }
}

/// Puzzle source that replays a script of difficulties (`None` = failure),
/// repeating the last entry once the script runs out.
pub struct FakeSource {
    script: Mutex<VecDeque<Option<Difficulty>>>,
    calls: Mutex<u32>,
    hangs: bool,
}

impl FakeSource {
    pub fn new(script: Vec<Option<Difficulty>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(0),
            hangs: false,
        })
    }

    /// A source whose every fetch never completes.
    pub fn hanging() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(0),
            hangs: true,
        })
    }

    /// A source that always hands out `difficulty`.
    pub fn always(difficulty: Difficulty) -> Arc<Self> {
        Self::new(vec![Some(difficulty)])
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl PuzzleSource for FakeSource {
    async fn fetch(&self) -> Result<FetchedPuzzle, SourceError> {
        *self.calls.lock().unwrap() += 1;
        if self.hangs {
            return std::future::pending().await;
        }
        let mut script = self.script.lock().unwrap();
        let next = if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap()
        };
        match next {
            Some(difficulty) => Ok(FetchedPuzzle {
                unsolved: unsolved(),
                solution: solution(),
                difficulty,
            }),
            None => Err(SourceError::ApiError {
                status: 503,
                body: "generator unavailable".to_string(),
            }),
        }
    }
}

/// Everything a test needs to drive and inspect the app.
pub struct TestApp {
    pub store: Arc<MemoryBoardStore>,
    pub source: Arc<FakeSource>,
    pub acquisition: Arc<Acquisition>,
    config: ServerConfig,
}

impl TestApp {
    pub fn new(source: Arc<FakeSource>) -> Self {
        Self::with_config(test_config(), source)
    }

    /// Build over `config`, wiring the retry policies the way `main.rs` does.
    pub fn with_config(config: ServerConfig, source: Arc<FakeSource>) -> Self {
        let store = Arc::new(MemoryBoardStore::new());
        let acquisition = Arc::new(Acquisition::from_config(store.clone(), source.clone(), &config));
        Self {
            store,
            source,
            acquisition,
            config,
        }
    }

    /// A fresh router over the shared store and source.
    ///
    /// This uses the same builder as `main.rs`, so tests exercise the
    /// production middleware stack.
    pub fn router(&self) -> Router {
        let state = AppState {
            store: self.store.clone(),
            acquisition: Arc::clone(&self.acquisition),
            config: Arc::new(self.config.clone()),
        };
        build_app_router(state, &self.config)
    }

    /// Insert a board created now.
    pub async fn seed(&self, id: DbId, difficulty: Difficulty, is_daily: bool) -> Board {
        self.seed_at(id, difficulty, is_daily, Utc::now()).await
    }

    /// Insert a board with an explicit creation time.
    pub async fn seed_at(
        &self,
        id: DbId,
        difficulty: Difficulty,
        is_daily: bool,
        created_at: DateTime<Utc>,
    ) -> Board {
        let board = Board {
            id,
            unsolved: unsolved(),
            solution: solution(),
            difficulty,
            is_daily,
            created_at,
        };
        self.store.seed(board.clone()).await;
        board
    }
}

/// Build a router over an empty in-memory store.
pub fn build_test_app() -> Router {
    TestApp::new(FakeSource::always(Difficulty::Medium)).router()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
