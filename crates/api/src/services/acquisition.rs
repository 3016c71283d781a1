//! Fetch-and-store workflows.
//!
//! On-demand boards take whatever difficulty the source hands out. Daily
//! boards are fetched once per calendar day for each of Easy, Medium and
//! Hard and flagged `is_daily`. The two paths retry under separate policies:
//! on-demand fetches must finish inside an HTTP request, the daily refresh
//! has no caller waiting.

use std::sync::Arc;

use waffle_core::calendar::DayWindow;
use waffle_core::difficulty::{Difficulty, DifficultyFilter, DAILY_DIFFICULTIES};
use waffle_core::grid::Grid;
use waffle_core::types::DbId;
use waffle_db::models::board::CreateBoard;
use waffle_db::SharedStore;
use waffle_source::{FetchedPuzzle, PuzzleSource, RetryingSource};

use crate::config::ServerConfig;
use crate::error::AppResult;

/// A freshly stored board as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredBoard {
    pub id: DbId,
    pub unsolved: Grid,
    pub difficulty: Difficulty,
}

/// What happened to one difficulty during a daily refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyOutcome {
    /// A new daily board was stored.
    Inserted(DbId),
    /// Today's daily board already existed; nothing was fetched.
    AlreadyPresent(DbId),
    /// Fetching or storing failed. The other difficulties were still tried.
    Failed(String),
}

/// Per-difficulty outcomes of one daily refresh, in refresh order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub outcomes: Vec<(Difficulty, DailyOutcome)>,
}

impl RefreshReport {
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, DailyOutcome::Failed(_)))
            .count()
    }

    pub fn inserted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, DailyOutcome::Inserted(_)))
            .count()
    }

    pub fn outcome(&self, difficulty: &Difficulty) -> Option<&DailyOutcome> {
        self.outcomes
            .iter()
            .find(|(d, _)| d == difficulty)
            .map(|(_, outcome)| outcome)
    }
}

/// Coordinates the puzzle source and the board store.
pub struct Acquisition {
    store: SharedStore,
    on_demand: RetryingSource,
    daily: RetryingSource,
}

impl Acquisition {
    pub fn new(store: SharedStore, on_demand: RetryingSource, daily: RetryingSource) -> Self {
        Self {
            store,
            on_demand,
            daily,
        }
    }

    /// Wire both retry paths to `source` with the policies from `config`.
    pub fn from_config(store: SharedStore, source: Arc<dyn PuzzleSource>, config: &ServerConfig) -> Self {
        Self::new(
            store,
            RetryingSource::new(Arc::clone(&source), config.on_demand_policy()),
            RetryingSource::new(source, config.source.retry_policy()),
        )
    }

    /// Fetch a puzzle of any difficulty and store it as a non-daily board.
    pub async fn acquire_random(&self) -> AppResult<AcquiredBoard> {
        let puzzle = self.on_demand.fetch(&DifficultyFilter::Any).await?;
        let id = self.store_puzzle(&puzzle, false).await?;

        tracing::info!(board_id = id, difficulty = %puzzle.difficulty, "Random board acquired");

        Ok(AcquiredBoard {
            id,
            unsolved: puzzle.unsolved,
            difficulty: puzzle.difficulty,
        })
    }

    /// Make sure each daily difficulty has a board for the day `window`.
    ///
    /// Difficulties that already have one are skipped, so repeated runs on
    /// the same day never add a second daily board. A failure on one
    /// difficulty is logged and the remaining ones are still attempted.
    pub async fn refresh_daily(&self, window: DayWindow) -> RefreshReport {
        let mut report = RefreshReport::default();

        for difficulty in DAILY_DIFFICULTIES {
            let outcome = match self.refresh_one(&difficulty, window).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(%difficulty, error = %e, "Daily refresh failed for difficulty");
                    DailyOutcome::Failed(e.to_string())
                }
            };
            report.outcomes.push((difficulty, outcome));
        }

        tracing::info!(
            inserted = report.inserted(),
            failed = report.failures(),
            "Daily refresh finished"
        );
        report
    }

    async fn refresh_one(&self, difficulty: &Difficulty, window: DayWindow) -> AppResult<DailyOutcome> {
        if let Some(existing) = self.store.find_for_day(difficulty, true, window).await? {
            tracing::debug!(%difficulty, board_id = existing.id, "Daily board already present");
            return Ok(DailyOutcome::AlreadyPresent(existing.id));
        }

        let filter = DifficultyFilter::Exactly(difficulty.clone());
        let puzzle = self.daily.fetch(&filter).await?;
        let id = self.store_puzzle(&puzzle, true).await?;

        tracing::info!(%difficulty, board_id = id, "Daily board stored");
        Ok(DailyOutcome::Inserted(id))
    }

    async fn store_puzzle(&self, puzzle: &FetchedPuzzle, is_daily: bool) -> AppResult<DbId> {
        let dto = CreateBoard {
            unsolved: puzzle.unsolved,
            solution: puzzle.solution,
            difficulty: puzzle.difficulty.clone(),
            is_daily,
        };
        Ok(self.store.insert(&dto).await?)
    }
}
