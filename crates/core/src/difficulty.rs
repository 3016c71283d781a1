//! Puzzle difficulty labels.
//!
//! The external source assigns each puzzle a free-form label such as
//! `"Medium"`. Labels are compared case-insensitively and stored uppercase.
//! Easy, Medium and Hard get their own variants because the daily refresh
//! iterates them; anything else is passed through as [`Difficulty::Other`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A normalized difficulty label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// Any other label reported by the source, kept uppercase.
    Other(String),
}

/// Difficulties refreshed every day, in refresh order.
pub const DAILY_DIFFICULTIES: [Difficulty; 3] =
    [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

impl Difficulty {
    /// Parse a label, ignoring case and surrounding whitespace.
    ///
    /// Blank labels are a validation error.
    pub fn parse(label: &str) -> Result<Self, CoreError> {
        let normalized = label.trim().to_uppercase();
        match normalized.as_str() {
            "" => Err(CoreError::Validation(
                "difficulty must not be empty".to_string(),
            )),
            "EASY" => Ok(Self::Easy),
            "MEDIUM" => Ok(Self::Medium),
            "HARD" => Ok(Self::Hard),
            _ => Ok(Self::Other(normalized)),
        }
    }

    /// Uppercase storage form, e.g. `"EASY"`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Difficulty {
    type Error = CoreError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::parse(&label)
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.as_str().to_string()
    }
}

/// What the caller of the source adapter will accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DifficultyFilter {
    /// Take the first puzzle the source returns.
    Any,
    /// Keep fetching until the source returns this difficulty.
    Exactly(Difficulty),
}

impl DifficultyFilter {
    pub fn accepts(&self, difficulty: &Difficulty) -> bool {
        match self {
            Self::Any => true,
            Self::Exactly(wanted) => wanted == difficulty,
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("ANY"),
            Self::Exactly(difficulty) => difficulty.fmt(f),
        }
    }
}
