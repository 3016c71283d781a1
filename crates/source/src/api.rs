//! HTTP client for the Dosuku puzzle generator.
//!
//! A single `GET` returns one freshly generated puzzle:
//!
//! ```text
//! {"newboard": {"grids": [{"value": [[..]], "solution": [[..]], "difficulty": "Medium"}],
//!               "results": 1, "message": "All Ok"}}
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use waffle_core::difficulty::Difficulty;
use waffle_core::grid::Grid;

use crate::adapter::PuzzleSource;
use crate::puzzle::{FetchedPuzzle, SourceError};

/// Public Dosuku endpoint.
pub const DEFAULT_API_URL: &str = "https://sudoku-api.vercel.app/api/dosuku";

/// Raw response envelope.
#[derive(Debug, Deserialize)]
pub struct NewBoardResponse {
    pub newboard: NewBoard,
}

#[derive(Debug, Deserialize)]
pub struct NewBoard {
    pub grids: Vec<RawGrid>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One puzzle as the generator spells it.
#[derive(Debug, Deserialize)]
pub struct RawGrid {
    pub value: Vec<Vec<i64>>,
    pub solution: Vec<Vec<i64>>,
    pub difficulty: String,
}

/// HTTP client for a Dosuku-compatible endpoint.
pub struct DosukuApi {
    client: reqwest::Client,
    api_url: String,
}

impl DosukuApi {
    /// Create a client with a per-request timeout.
    pub fn new(api_url: String, request_timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self { client, api_url })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetch and validate one puzzle.
    pub async fn fetch_board(&self) -> Result<FetchedPuzzle, SourceError> {
        let response = self.client.get(&self.api_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SourceError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let payload: NewBoardResponse = response.json().await?;
        into_puzzle(payload)
    }
}

#[async_trait]
impl PuzzleSource for DosukuApi {
    async fn fetch(&self) -> Result<FetchedPuzzle, SourceError> {
        self.fetch_board().await
    }
}

/// Convert a decoded response into a checked puzzle.
///
/// Only the first grid is used; the generator returns one per call.
pub fn into_puzzle(payload: NewBoardResponse) -> Result<FetchedPuzzle, SourceError> {
    let NewBoard { grids, message } = payload.newboard;
    let raw = grids.into_iter().next().ok_or_else(|| {
        SourceError::Malformed(format!(
            "response contained no grids (message: {})",
            message.as_deref().unwrap_or("none")
        ))
    })?;

    let unsolved = Grid::try_from(raw.value)?;
    let solution = Grid::try_from(raw.solution)?;
    let difficulty =
        Difficulty::parse(&raw.difficulty).map_err(|e| SourceError::Malformed(e.to_string()))?;

    FetchedPuzzle::validated(unsolved, solution, difficulty)
}
