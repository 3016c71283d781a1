//! Puzzle acquisition from the external generator.
//!
//! [`api::DosukuApi`] talks HTTP to the generator. [`adapter::RetryingSource`]
//! wraps any [`adapter::PuzzleSource`] and polls it until a puzzle of the
//! wanted difficulty comes back or the retry policy gives up.

pub mod adapter;
pub mod api;
pub mod puzzle;

pub use adapter::{PuzzleSource, RetryingSource};
pub use api::DosukuApi;
pub use puzzle::{FetchedPuzzle, SourceError};
