//! Elo rating implementation
//!
//! This module provides the concrete implementation of the rating calculator
//! using the Elo algorithm from the skillratings crate.

use crate::rating::calculator::RatingCalculator;
use serde::{Deserialize, Serialize};
use skillratings::elo::{elo, expected_score, EloConfig, EloRating};
use skillratings::Outcomes;

/// Probability that an item at `rating` beats one at `opponent_rating`
///
/// Standard Elo expectation: `1 / (1 + 10^((opponent - rating) / 400))`.
/// The two directions always sum to 1.
pub fn win_probability(rating: f64, opponent_rating: f64) -> f64 {
    let (expected, _) = expected_score(
        &EloRating { rating },
        &EloRating {
            rating: opponent_rating,
        },
    );
    expected
}

/// Compute new ratings after a decided duel
///
/// Pure function over its numeric inputs: no side effects, finite outputs
/// for finite inputs. Rating mass is conserved: the returned pair sums to
/// `winner_rating + loser_rating`.
pub fn score_duel(winner_rating: f64, loser_rating: f64, k: f64) -> (f64, f64) {
    let (new_winner, new_loser) = elo(
        &EloRating {
            rating: winner_rating,
        },
        &EloRating {
            rating: loser_rating,
        },
        &Outcomes::WIN,
        &EloConfig { k },
    );

    (new_winner.rating, new_loser.rating)
}

/// Extended configuration for the Elo rating system
///
/// Wraps the skillratings EloConfig with the initial rating handed to
/// newly observed items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedEloConfig {
    /// Core Elo parameter (the K-factor)
    pub elo_config: EloConfig,
    /// Initial rating for new items
    pub initial_rating: f64,
}

impl Default for ExtendedEloConfig {
    fn default() -> Self {
        Self {
            elo_config: EloConfig { k: 32.0 },
            initial_rating: 1500.0,
        }
    }
}

impl ExtendedEloConfig {
    /// Create conservative configuration (slower rating changes)
    pub fn conservative() -> Self {
        Self {
            elo_config: EloConfig { k: 16.0 },
            initial_rating: 1500.0,
        }
    }

    /// Create aggressive configuration (faster rating changes)
    pub fn aggressive() -> Self {
        Self {
            elo_config: EloConfig { k: 64.0 },
            initial_rating: 1500.0,
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.elo_config.k.is_finite() || self.elo_config.k <= 0.0 {
            return Err(crate::error::RankingError::ConfigurationError {
                message: "K-factor must be finite and positive".to_string(),
            }
            .into());
        }

        if !self.initial_rating.is_finite() {
            return Err(crate::error::RankingError::ConfigurationError {
                message: "Initial rating must be finite".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Elo rating calculator implementation
#[derive(Debug)]
pub struct EloRatingCalculator {
    config: ExtendedEloConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: ExtendedEloConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Get default rating for new items
    pub fn default_rating(&self) -> f64 {
        self.config.initial_rating
    }
}

impl Default for EloRatingCalculator {
    fn default() -> Self {
        Self {
            config: ExtendedEloConfig::default(),
        }
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn rate_duel(&self, winner_rating: f64, loser_rating: f64, k: f64) -> (f64, f64) {
        score_duel(winner_rating, loser_rating, k)
    }

    fn expected_outcome(&self, rating: f64, opponent_rating: f64) -> f64 {
        win_probability(rating, opponent_rating)
    }

    fn initial_rating(&self) -> f64 {
        self.config.initial_rating
    }

    fn default_k(&self) -> f64 {
        self.config.elo_config.k
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        let new_config: ExtendedEloConfig = serde_json::from_value(config).map_err(|e| {
            crate::error::RankingError::ConfigurationError {
                message: format!("Invalid Elo configuration: {}", e),
            }
        })?;

        new_config.validate()?;
        self.config = new_config;
        Ok(())
    }
}
