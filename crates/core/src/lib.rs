//! Domain types and pure logic for the Waffle puzzle service.
//!
//! Nothing in this crate performs I/O. Grids, difficulties, verification,
//! calendar-day windows and retry policies live here so the store, the
//! source adapter and the HTTP layer agree on one definition of each.

pub mod calendar;
pub mod difficulty;
pub mod error;
pub mod grid;
pub mod retry;
pub mod types;
pub mod verification;
