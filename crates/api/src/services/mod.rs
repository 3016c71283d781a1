//! Workflows that sit between the HTTP handlers and the store/source.
//!
//! - [`acquisition`] -- fetch-and-store for on-demand and daily boards.
//! - [`verification`] -- solution checks and hints against stored solutions.

pub mod acquisition;
pub mod verification;
