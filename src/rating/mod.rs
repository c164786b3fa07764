//! Rating system built on the Elo algorithm
//!
//! This module provides the pairwise rating calculations, storage
//! interfaces, and integration with the skillratings crate.

pub mod calculator;
pub mod elo;
pub mod storage;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use elo::{score_duel, win_probability, EloRatingCalculator, ExtendedEloConfig};
pub use storage::{InMemoryRatingStore, RatingRecord, RatingStore};
