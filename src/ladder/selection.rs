//! Pair selection policies for pairwise comparisons
//!
//! This module decides which two items a user is shown next, either fully
//! at random or restricted to items with comparable ratings.

use crate::error::{RankingError, Result};
use crate::rating::storage::RatingStore;
use crate::types::{ItemId, SelectionMode};
use crate::utils::ratings_within_tolerance;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Trait for pair selection algorithms
pub trait PairSelector: Send + Sync {
    /// Select two distinct items from `candidates` for the next comparison
    ///
    /// The candidate universe is supplied by the caller and may change
    /// between calls. In closeness mode every inspected candidate is
    /// resolved against the store, materializing records for items seen
    /// for the first time.
    fn select_pair(
        &self,
        candidates: &[ItemId],
        mode: SelectionMode,
        store: &dyn RatingStore,
        initial_rating: f64,
    ) -> Result<(ItemId, ItemId)>;
}

/// Uniform random pair selector
///
/// Unconstrained mode draws two distinct identifiers uniformly. Closeness
/// mode draws a uniform anchor first, then two distinct members of the
/// pool of candidates rated strictly within the threshold of the anchor
/// (the anchor itself is part of that pool).
#[derive(Debug, Clone, Default)]
pub struct RandomPairSelector;

impl RandomPairSelector {
    pub fn new() -> Self {
        Self
    }

    /// Draw two distinct indices from `0..len` uniformly at random
    fn draw_distinct(len: usize, rng: &mut impl Rng) -> (usize, usize) {
        let first = rng.random_range(0..len);
        let mut second = rng.random_range(0..len - 1);
        if second >= first {
            second += 1;
        }
        (first, second)
    }
}

impl PairSelector for RandomPairSelector {
    fn select_pair(
        &self,
        candidates: &[ItemId],
        mode: SelectionMode,
        store: &dyn RatingStore,
        initial_rating: f64,
    ) -> Result<(ItemId, ItemId)> {
        // Identifiers are the unit of identity; drop duplicates up front
        let mut seen = HashSet::new();
        let pool: Vec<&ItemId> = candidates
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .collect();

        if pool.len() < 2 {
            return Err(RankingError::InsufficientItems {
                available: pool.len(),
            }
            .into());
        }

        let mut rng = rand::rng();

        match mode {
            SelectionMode::Unconstrained => {
                let (first, second) = Self::draw_distinct(pool.len(), &mut rng);
                Ok((pool[first].clone(), pool[second].clone()))
            }
            SelectionMode::Closeness { threshold } => {
                if !threshold.is_finite() || threshold <= 0.0 {
                    return Err(RankingError::ConfigurationError {
                        message: format!("Closeness threshold must be finite and positive, got {}", threshold),
                    }
                    .into());
                }

                let anchor = pool[rng.random_range(0..pool.len())];
                let anchor_record = store.resolve(anchor, initial_rating)?;

                // Resolve every candidate; this materializes records for
                // items observed for the first time
                let mut comparable: Vec<&ItemId> = Vec::with_capacity(pool.len());
                for &id in &pool {
                    let record = store.resolve(id, initial_rating)?;
                    if ratings_within_tolerance(record.rating, anchor_record.rating, threshold) {
                        comparable.push(id);
                    }
                }

                debug!(
                    "Closeness pool around '{}' ({}): {} of {} candidates",
                    anchor,
                    anchor_record.rating,
                    comparable.len(),
                    pool.len()
                );

                if comparable.len() < 2 {
                    return Err(RankingError::InsufficientComparableItems {
                        anchor: anchor.clone(),
                        threshold,
                        pool_size: comparable.len(),
                    }
                    .into());
                }

                let (first, second) = Self::draw_distinct(comparable.len(), &mut rng);
                Ok((comparable[first].clone(), comparable[second].clone()))
            }
        }
    }
}
