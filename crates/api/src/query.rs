//! Shared query parameter types for API handlers.

use serde::Deserialize;
use waffle_core::difficulty::Difficulty;
use waffle_core::error::CoreError;

/// `?difficulty=` parameter for the day-scoped board lookups.
///
/// Optional at the extractor level so a missing value is reported as a
/// validation error instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct DifficultyParams {
    pub difficulty: Option<String>,
}

impl DifficultyParams {
    pub fn difficulty(&self) -> Result<Difficulty, CoreError> {
        let raw = self.difficulty.as_deref().ok_or_else(|| {
            CoreError::Validation("difficulty query parameter is required".to_string())
        })?;
        Difficulty::parse(raw)
    }
}
