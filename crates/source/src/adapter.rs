//! Difficulty-matching retry loop over a [`PuzzleSource`].
//!
//! The generator picks the difficulty, not the caller. To get a puzzle of a
//! given difficulty the adapter keeps asking, sleeping a fixed backoff after
//! every mismatch or failure. The loop suspends only the calling task.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Instant;
use waffle_core::difficulty::DifficultyFilter;
use waffle_core::error::CoreError;
use waffle_core::retry::RetryPolicy;

use crate::puzzle::{FetchedPuzzle, SourceError};

/// Something that yields one puzzle per call.
#[async_trait]
pub trait PuzzleSource: Send + Sync {
    async fn fetch(&self) -> Result<FetchedPuzzle, SourceError>;
}

/// Polls a source until it returns an acceptable puzzle.
#[derive(Clone)]
pub struct RetryingSource {
    source: Arc<dyn PuzzleSource>,
    policy: RetryPolicy,
}

impl RetryingSource {
    pub fn new(source: Arc<dyn PuzzleSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    /// Fetch a puzzle accepted by `filter`.
    ///
    /// Never returns a puzzle the filter rejects. Gives up with
    /// [`CoreError::SourceUnavailable`] once the policy's attempt cap or
    /// deadline is reached.
    pub async fn fetch(&self, filter: &DifficultyFilter) -> Result<FetchedPuzzle, CoreError> {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            let failure = match self.source.fetch().await {
                Ok(puzzle) if filter.accepts(&puzzle.difficulty) => {
                    tracing::debug!(
                        attempt = attempts,
                        difficulty = %puzzle.difficulty,
                        "Puzzle source returned acceptable puzzle"
                    );
                    return Ok(puzzle);
                }
                Ok(puzzle) => {
                    tracing::debug!(
                        attempt = attempts,
                        wanted = %filter,
                        got = %puzzle.difficulty,
                        "Puzzle difficulty mismatch, retrying"
                    );
                    format!("last difficulty was {}", puzzle.difficulty)
                }
                Err(e) => {
                    tracing::warn!(
                        attempt = attempts,
                        wanted = %filter,
                        error = %e,
                        "Puzzle fetch failed, retrying"
                    );
                    e.to_string()
                }
            };

            if self.policy.attempts_exhausted(attempts)
                || self.policy.deadline_exceeded(started.elapsed())
            {
                tracing::error!(
                    attempts,
                    wanted = %filter,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    reason = %failure,
                    "Giving up on puzzle source"
                );
                return Err(CoreError::SourceUnavailable(format!(
                    "no {filter} puzzle after {attempts} attempts ({failure})"
                )));
            }

            tokio::time::sleep(self.policy.backoff).await;
        }
    }
}
