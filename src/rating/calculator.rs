//! Rating calculator trait and test implementations
//!
//! This module defines the interface for pairwise rating calculations. The
//! production implementation lives in `rating::elo`.

/// Trait for computing updated ratings after a pairwise comparison
pub trait RatingCalculator: Send + Sync {
    /// Compute new ratings for a decided duel
    ///
    /// # Arguments
    /// * `winner_rating` - current rating of the item the user preferred
    /// * `loser_rating` - current rating of the other item
    /// * `k` - K-factor (sensitivity) for this update
    ///
    /// # Returns
    /// `(new_winner_rating, new_loser_rating)`. Defined for all finite
    /// inputs; finiteness is enforced by callers before reaching here.
    fn rate_duel(&self, winner_rating: f64, loser_rating: f64, k: f64) -> (f64, f64);

    /// Probability that `rating` beats `opponent_rating`
    fn expected_outcome(&self, rating: f64, opponent_rating: f64) -> f64;

    /// Rating assigned to an item the first time it is observed
    fn initial_rating(&self) -> f64;

    /// K-factor used when the caller does not supply one
    fn default_k(&self) -> f64;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Update configuration from JSON
    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()>;
}

/// Mock rating calculator for testing
///
/// Records every duel it is asked to rate and optionally returns a fixed
/// result instead of computing one.
#[derive(Debug, Default)]
pub struct MockRatingCalculator {
    duel_calls: std::sync::Mutex<Vec<(f64, f64, f64)>>,
    fixed_result: std::sync::RwLock<Option<(f64, f64)>>,
    initial_rating: f64,
}

impl MockRatingCalculator {
    pub fn new() -> Self {
        Self {
            duel_calls: std::sync::Mutex::new(Vec::new()),
            fixed_result: std::sync::RwLock::new(None),
            initial_rating: 1500.0,
        }
    }

    /// Set a fixed result to return for all duels
    pub fn set_fixed_result(&self, result: (f64, f64)) {
        if let Ok(mut fixed) = self.fixed_result.write() {
            *fixed = Some(result);
        }
    }

    /// Get all duel calls made (for testing)
    pub fn get_duel_calls(&self) -> Vec<(f64, f64, f64)> {
        self.duel_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.duel_calls.lock() {
            calls.clear();
        }
    }
}

impl RatingCalculator for MockRatingCalculator {
    fn rate_duel(&self, winner_rating: f64, loser_rating: f64, k: f64) -> (f64, f64) {
        // Record the call
        if let Ok(mut calls) = self.duel_calls.lock() {
            calls.push((winner_rating, loser_rating, k));
        }

        // Return fixed result if set, otherwise leave ratings unchanged
        if let Ok(fixed) = self.fixed_result.read() {
            if let Some(result) = *fixed {
                return result;
            }
        }

        (winner_rating, loser_rating)
    }

    fn expected_outcome(&self, _rating: f64, _opponent_rating: f64) -> f64 {
        0.5
    }

    fn initial_rating(&self) -> f64 {
        self.initial_rating
    }

    fn default_k(&self) -> f64 {
        32.0
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "mock",
            "initial_rating": self.initial_rating,
        })
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        if let Some(rating) = config.get("initial_rating").and_then(|v| v.as_f64()) {
            self.initial_rating = rating;
        }
        Ok(())
    }
}
