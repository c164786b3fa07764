//! Ladder manager orchestrating the rating engine, store, and selector
//!
//! This is the public surface of the ranking engine: resolving records,
//! selecting comparison pairs, applying outcomes, resetting ratings, and
//! producing ranked listings.

use crate::config::{validate_config, RankingConfig};
use crate::error::{RankingError, Result};
use crate::ladder::selection::{PairSelector, RandomPairSelector};
use crate::rating::calculator::RatingCalculator;
use crate::rating::elo::{EloRatingCalculator, ExtendedEloConfig};
use crate::rating::storage::{InMemoryRatingStore, RatingRecord, RatingStore};
use crate::types::{DuelApplied, ItemId, SelectionMode, Standing};
use skillratings::elo::EloConfig;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Statistics about ladder operations
#[derive(Debug, Clone, Default)]
pub struct LadderStats {
    /// Total number of comparison pairs selected
    pub pairs_selected: u64,
    /// Total number of outcomes applied
    pub comparisons_applied: u64,
    /// Total number of bulk rating resets
    pub resets: u64,
}

/// The main ladder manager
pub struct LadderManager {
    /// Rating persistence
    store: Arc<dyn RatingStore>,
    /// Rating engine
    calculator: Arc<dyn RatingCalculator>,
    /// Pair selection policy
    selector: Arc<dyn PairSelector>,
    /// Engine configuration
    config: RankingConfig,
    /// Operation counters
    stats: Arc<RwLock<LadderStats>>,
}

impl LadderManager {
    /// Create a new ladder manager with explicit collaborators
    pub fn new(
        store: Arc<dyn RatingStore>,
        calculator: Arc<dyn RatingCalculator>,
        selector: Arc<dyn PairSelector>,
        config: RankingConfig,
    ) -> Result<Self> {
        validate_config(&config)?;

        Ok(Self {
            store,
            calculator,
            selector,
            config,
            stats: Arc::new(RwLock::new(LadderStats::default())),
        })
    }

    /// Create a manager backed by an in-memory store and the Elo calculator
    pub fn from_config(config: RankingConfig) -> Result<Self> {
        let calculator = EloRatingCalculator::new(ExtendedEloConfig {
            elo_config: EloConfig { k: config.k_factor },
            initial_rating: config.default_rating,
        })?;

        Self::new(
            Arc::new(InMemoryRatingStore::new()),
            Arc::new(calculator),
            Arc::new(RandomPairSelector::new()),
            config,
        )
    }

    /// Create a manager with default configuration
    pub fn with_defaults() -> Self {
        Self::from_config(RankingConfig::default()).expect("default configuration is valid")
    }

    /// Engine configuration in use
    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Get the record for `item_id`, creating it at the initial rating if
    /// the item has never been observed
    pub fn resolve(&self, item_id: &str) -> Result<RatingRecord> {
        self.store.resolve(item_id, self.calculator.initial_rating())
    }

    /// Select two distinct items from `candidates` for the next comparison
    pub fn select_pair(
        &self,
        candidates: &[ItemId],
        mode: SelectionMode,
    ) -> Result<(ItemId, ItemId)> {
        let pair = self.selector.select_pair(
            candidates,
            mode,
            self.store.as_ref(),
            self.calculator.initial_rating(),
        )?;

        debug!("Selected pair ({}, {}) via {}", pair.0, pair.1, mode);
        if let Ok(mut stats) = self.stats.write() {
            stats.pairs_selected += 1;
        }

        Ok(pair)
    }

    /// Apply a decided comparison with an explicit K-factor
    ///
    /// Both identifiers must already have records; the read-compute-write
    /// cycle is atomic with respect to concurrent outcomes and resets.
    pub fn apply_outcome(&self, winner_id: &str, loser_id: &str, k: f64) -> Result<DuelApplied> {
        if winner_id == loser_id {
            return Err(RankingError::InvalidOutcome {
                reason: format!("Item '{}' cannot beat itself", winner_id),
            }
            .into());
        }
        if !k.is_finite() || k <= 0.0 {
            return Err(RankingError::InvalidOutcome {
                reason: format!("K-factor must be finite and positive, got {}", k),
            }
            .into());
        }

        let (winner, loser) = self
            .store
            .update_pair(winner_id, loser_id, &|winner_rating, loser_rating| {
                self.calculator.rate_duel(winner_rating, loser_rating, k)
            })?;

        info!(
            "Outcome applied: '{}' {} -> {}, '{}' {} -> {}",
            winner.item_id,
            winner.old_rating,
            winner.new_rating,
            loser.item_id,
            loser.old_rating,
            loser.new_rating
        );
        if let Ok(mut stats) = self.stats.write() {
            stats.comparisons_applied += 1;
        }

        Ok(DuelApplied { winner, loser })
    }

    /// Apply a decided comparison with the configured K-factor
    pub fn apply_default_outcome(&self, winner_id: &str, loser_id: &str) -> Result<DuelApplied> {
        self.apply_outcome(winner_id, loser_id, self.calculator.default_k())
    }

    /// Overwrite every stored rating with `default_rating`
    ///
    /// Returns the number of records affected. The record set itself is
    /// never shrunk or grown by a reset.
    pub fn reset(&self, default_rating: f64) -> Result<usize> {
        if !default_rating.is_finite() {
            return Err(RankingError::ConfigurationError {
                message: format!("Reset rating must be finite, got {}", default_rating),
            }
            .into());
        }

        let count = self.store.reset_all(default_rating)?;

        info!("Reset {} records to rating {}", count, default_rating);
        if let Ok(mut stats) = self.stats.write() {
            stats.resets += 1;
        }

        Ok(count)
    }

    /// All records sorted by rating descending, ties broken by identifier
    /// ascending
    ///
    /// With `include_unrated` false, items that have never been judged are
    /// filtered out.
    pub fn ranked_list(&self, include_unrated: bool) -> Result<Vec<RatingRecord>> {
        let mut records: Vec<RatingRecord> = self
            .store
            .all_records()?
            .into_iter()
            .filter(|record| include_unrated || !record.is_unrated())
            .collect();

        records.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.item_id.cmp(&b.item_id))
        });

        Ok(records)
    }

    /// The podium view: 1-based ranks over `ranked_list`
    pub fn standings(&self, include_unrated: bool) -> Result<Vec<Standing>> {
        let standings = self
            .ranked_list(include_unrated)?
            .into_iter()
            .enumerate()
            .map(|(index, record)| Standing {
                rank: index + 1,
                item_id: record.item_id,
                rating: record.rating,
            })
            .collect();

        Ok(standings)
    }

    /// Snapshot of the operation counters
    pub fn stats(&self) -> LadderStats {
        self.stats
            .read()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::calculator::MockRatingCalculator;
    use crate::rating::storage::MockRatingStore;

    fn test_manager() -> LadderManager {
        LadderManager::with_defaults()
    }

    #[test]
    fn test_resolve_uses_initial_rating() {
        let manager = test_manager();
        let record = manager.resolve("fresh.jpg").unwrap();
        assert_eq!(record.rating, 1500.0);
        assert!(record.is_unrated());
    }

    #[test]
    fn test_apply_outcome_equal_ratings() {
        let manager = test_manager();
        manager.resolve("a.jpg").unwrap();
        manager.resolve("b.jpg").unwrap();

        let applied = manager.apply_outcome("a.jpg", "b.jpg", 32.0).unwrap();

        assert!((applied.winner.new_rating - 1516.0).abs() < 1e-9);
        assert!((applied.loser.new_rating - 1484.0).abs() < 1e-9);
        assert!((applied.winner.delta() + applied.loser.delta()).abs() < 1e-9);
    }

    #[test]
    fn test_apply_outcome_validations() {
        let manager = test_manager();
        manager.resolve("a.jpg").unwrap();
        manager.resolve("b.jpg").unwrap();

        assert!(manager.apply_outcome("a.jpg", "a.jpg", 32.0).is_err());
        assert!(manager.apply_outcome("a.jpg", "b.jpg", 0.0).is_err());
        assert!(manager.apply_outcome("a.jpg", "b.jpg", f64::NAN).is_err());
        assert!(manager.apply_outcome("a.jpg", "b.jpg", -8.0).is_err());
    }

    #[test]
    fn test_apply_outcome_unknown_item() {
        let manager = test_manager();
        manager.resolve("known.jpg").unwrap();

        let err = manager
            .apply_outcome("known.jpg", "ghost.jpg", 32.0)
            .unwrap_err();
        let ranking_err = err.downcast_ref::<RankingError>().unwrap();
        assert!(matches!(ranking_err, RankingError::ItemNotFound { item_id } if item_id == "ghost.jpg"));

        // The existing record is untouched
        let record = manager.resolve("known.jpg").unwrap();
        assert_eq!(record.rating, 1500.0);
        assert_eq!(record.comparisons, 0);
    }

    #[test]
    fn test_apply_default_outcome_uses_calculator_k() {
        let store = Arc::new(MockRatingStore::new());
        store.resolve("a.jpg", 1500.0).unwrap();
        store.resolve("b.jpg", 1500.0).unwrap();

        let calculator = Arc::new(MockRatingCalculator::new());
        let manager = LadderManager::new(
            store,
            calculator.clone(),
            Arc::new(RandomPairSelector::new()),
            RankingConfig::default(),
        )
        .unwrap();

        manager.apply_default_outcome("a.jpg", "b.jpg").unwrap();

        let calls = calculator.get_duel_calls();
        assert_eq!(calls, vec![(1500.0, 1500.0, 32.0)]);
    }

    #[test]
    fn test_ranked_list_ordering_and_tie_break() {
        let manager = test_manager();
        manager.resolve("a.jpg").unwrap();
        manager.resolve("b.jpg").unwrap();
        manager.resolve("c.jpg").unwrap();
        manager.resolve("d.jpg").unwrap();

        // a beats b, then c and d stay tied at 1500
        manager.apply_outcome("a.jpg", "b.jpg", 32.0).unwrap();
        manager.apply_outcome("c.jpg", "d.jpg", 32.0).unwrap();
        manager.apply_outcome("d.jpg", "c.jpg", 32.0).unwrap();

        let ranked = manager.ranked_list(true).unwrap();
        let ids: Vec<&str> = ranked.iter().map(|r| r.item_id.as_str()).collect();

        // c and d are back to 1500 after trading wins; tie resolves by id
        assert_eq!(ids, vec!["a.jpg", "c.jpg", "d.jpg", "b.jpg"]);

        // Ordering is reproducible across calls
        let again = manager.ranked_list(true).unwrap();
        let ids_again: Vec<&str> = again.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(ids, ids_again);
    }

    #[test]
    fn test_ranked_list_unrated_filter() {
        let manager = test_manager();
        manager.resolve("judged1.jpg").unwrap();
        manager.resolve("judged2.jpg").unwrap();
        manager.resolve("lurker.jpg").unwrap();
        manager
            .apply_outcome("judged1.jpg", "judged2.jpg", 32.0)
            .unwrap();

        assert_eq!(manager.ranked_list(true).unwrap().len(), 3);

        let judged_only = manager.ranked_list(false).unwrap();
        assert_eq!(judged_only.len(), 2);
        assert!(judged_only.iter().all(|r| r.item_id != "lurker.jpg"));
    }

    #[test]
    fn test_standings_ranks_start_at_one() {
        let manager = test_manager();
        manager.resolve("a.jpg").unwrap();
        manager.resolve("b.jpg").unwrap();
        manager.apply_outcome("a.jpg", "b.jpg", 32.0).unwrap();

        let standings = manager.standings(true).unwrap();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[0].item_id, "a.jpg");
        assert_eq!(standings[1].rank, 2);
        assert_eq!(standings[1].item_id, "b.jpg");
    }

    #[test]
    fn test_reset_restores_default_and_keeps_records() {
        let manager = test_manager();
        manager.resolve("a.jpg").unwrap();
        manager.resolve("b.jpg").unwrap();
        manager.apply_outcome("a.jpg", "b.jpg", 32.0).unwrap();

        let count = manager.reset(1500.0).unwrap();
        assert_eq!(count, 2);

        let ranked = manager.ranked_list(true).unwrap();
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.rating == 1500.0));
        // History survives: both items still count as judged
        assert!(ranked.iter().all(|r| !r.is_unrated()));

        assert!(manager.reset(f64::NAN).is_err());
    }

    #[test]
    fn test_stats_track_operations() {
        let manager = test_manager();
        manager.resolve("a.jpg").unwrap();
        manager.resolve("b.jpg").unwrap();

        manager
            .select_pair(
                &["a.jpg".to_string(), "b.jpg".to_string()],
                SelectionMode::Unconstrained,
            )
            .unwrap();
        manager.apply_outcome("a.jpg", "b.jpg", 32.0).unwrap();
        manager.reset(1500.0).unwrap();

        let stats = manager.stats();
        assert_eq!(stats.pairs_selected, 1);
        assert_eq!(stats.comparisons_applied, 1);
        assert_eq!(stats.resets, 1);
    }

    #[test]
    fn test_storage_failure_is_surfaced() {
        let store = Arc::new(MockRatingStore::new());
        let manager = LadderManager::new(
            store.clone(),
            Arc::new(MockRatingCalculator::new()),
            Arc::new(RandomPairSelector::new()),
            RankingConfig::default(),
        )
        .unwrap();

        store.set_failing(true);

        let err = manager.resolve("a.jpg").unwrap_err();
        let ranking_err = err.downcast_ref::<RankingError>().unwrap();
        assert!(matches!(ranking_err, RankingError::StorageFailure { .. }));

        assert!(manager.ranked_list(true).is_err());
        assert!(manager.reset(1500.0).is_err());
    }
}
