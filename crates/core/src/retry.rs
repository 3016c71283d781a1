//! Retry policy for the puzzle source adapter.
//!
//! The source is polled with a fixed backoff until it returns a puzzle of the
//! wanted difficulty. Attempts and total elapsed time are both capped unless
//! explicitly disabled.

use std::time::Duration;

/// Fixed wait between attempts.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(3);

/// Default attempt cap.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 40;

/// Default overall deadline for one fetch.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(300);

/// Bounds for the fetch-until-match loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub backoff: Duration,
    /// `None` means no attempt cap.
    pub max_attempts: Option<u32>,
    /// `None` means no deadline.
    pub deadline: Option<Duration>,
}

impl RetryPolicy {
    /// Build a policy from raw settings where `0` disables a bound.
    pub fn from_settings(backoff_secs: u64, max_attempts: u32, deadline_secs: u64) -> Self {
        Self {
            backoff: Duration::from_secs(backoff_secs),
            max_attempts: (max_attempts > 0).then_some(max_attempts),
            deadline: (deadline_secs > 0).then(|| Duration::from_secs(deadline_secs)),
        }
    }

    /// Retry forever with the given backoff.
    pub fn unbounded(backoff: Duration) -> Self {
        Self {
            backoff,
            max_attempts: None,
            deadline: None,
        }
    }

    /// The same policy with its deadline tightened to at most `limit`.
    pub fn within(self, limit: Duration) -> Self {
        let deadline = self.deadline.map_or(limit, |deadline| deadline.min(limit));
        Self {
            deadline: Some(deadline),
            ..self
        }
    }

    /// True once `attempts` calls have been made and the cap forbids another.
    pub fn attempts_exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }

    /// True when another backoff sleep would run past the deadline.
    pub fn deadline_exceeded(&self, elapsed: Duration) -> bool {
        self.deadline
            .is_some_and(|deadline| elapsed + self.backoff > deadline)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff: DEFAULT_BACKOFF,
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
            deadline: Some(DEFAULT_DEADLINE),
        }
    }
}
