//! Podium - Elo-based pairwise picture ranking engine
//!
//! This crate derives a relative quality ranking over a collection of
//! pictures from pairwise comparisons: users pick the better of two items,
//! the Elo algorithm reshuffles the ratings, and the standings follow.

pub mod config;
pub mod error;
pub mod gallery;
pub mod ladder;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RankingError, Result};
pub use types::*;

// Re-export key components
pub use config::RankingConfig;
pub use gallery::{CandidateSource, DirectoryCandidateSource, StaticCandidateSource};
pub use ladder::{LadderManager, PairSelector, RandomPairSelector};
pub use rating::{EloRatingCalculator, ExtendedEloConfig, InMemoryRatingStore, RatingStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
