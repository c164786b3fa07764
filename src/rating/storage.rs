//! Rating storage interface and implementations
//!
//! This module defines the interface for persisting and retrieving item
//! ratings, with an in-memory implementation and a mock for testing.

use crate::error::{RankingError, Result};
use crate::types::{ItemId, RatingUpdate};
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// Storage entry for an item's rating with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRecord {
    pub item_id: ItemId,
    pub rating: f64,
    pub comparisons: u64,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RatingRecord {
    /// Create a new rating record for a newly observed item
    pub fn new(item_id: ItemId, initial_rating: f64) -> Self {
        let now = current_timestamp();
        Self {
            item_id,
            rating: initial_rating,
            comparisons: 0,
            last_updated: now,
            created_at: now,
        }
    }

    /// Apply an engine-computed rating and count the comparison
    pub fn apply_rating(&mut self, new_rating: f64) {
        self.rating = new_rating;
        self.comparisons += 1;
        self.last_updated = current_timestamp();
    }

    /// Whether this item has ever been judged
    pub fn is_unrated(&self) -> bool {
        self.comparisons == 0
    }
}

/// Trait for rating storage operations
///
/// Identifiers are the only basis for record identity; ratings carry no
/// identity semantics and two records may hold equal ratings.
pub trait RatingStore: Send + Sync {
    /// Get an item's rating record
    fn get(&self, item_id: &str) -> Result<Option<RatingRecord>>;

    /// Get the record for `item_id`, creating it with `initial_rating` if
    /// absent
    ///
    /// Read-check-create runs as one critical section: concurrent calls for
    /// the same identifier never produce duplicate records.
    fn resolve(&self, item_id: &str, initial_rating: f64) -> Result<RatingRecord>;

    /// Atomically read both ratings, apply `rate`, and write both results
    ///
    /// The whole cycle is indivisible with respect to any other
    /// `update_pair` or `reset_all` touching either identifier. Both
    /// records must already exist; a missing identifier fails with
    /// `ItemNotFound` and leaves the store unmodified.
    fn update_pair(
        &self,
        winner_id: &str,
        loser_id: &str,
        rate: &dyn Fn(f64, f64) -> (f64, f64),
    ) -> Result<(RatingUpdate, RatingUpdate)>;

    /// Overwrite every stored rating with `rating`; returns the number of
    /// records affected
    ///
    /// The identifier set and per-record comparison counts are untouched.
    fn reset_all(&self, rating: f64) -> Result<usize>;

    /// Get all rating records
    fn all_records(&self) -> Result<Vec<RatingRecord>>;

    /// Get total number of stored records
    fn record_count(&self) -> Result<usize>;
}

/// In-memory rating storage implementation
#[derive(Debug, Default)]
pub struct InMemoryRatingStore {
    records: RwLock<HashMap<ItemId, RatingRecord>>,
}

impl InMemoryRatingStore {
    /// Create a new empty in-memory rating store
    pub fn new() -> Self {
        Self::default()
    }
}

impl RatingStore for InMemoryRatingStore {
    fn get(&self, item_id: &str) -> Result<Option<RatingRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RankingError::StorageFailure {
                message: "Failed to acquire records read lock".to_string(),
            })?;

        Ok(records.get(item_id).cloned())
    }

    fn resolve(&self, item_id: &str, initial_rating: f64) -> Result<RatingRecord> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RankingError::StorageFailure {
                message: "Failed to acquire records write lock".to_string(),
            })?;

        match records.get(item_id) {
            Some(existing) => Ok(existing.clone()),
            None => {
                debug!("Creating rating record for {}", item_id);
                let record = RatingRecord::new(item_id.to_string(), initial_rating);
                records.insert(item_id.to_string(), record.clone());
                Ok(record)
            }
        }
    }

    fn update_pair(
        &self,
        winner_id: &str,
        loser_id: &str,
        rate: &dyn Fn(f64, f64) -> (f64, f64),
    ) -> Result<(RatingUpdate, RatingUpdate)> {
        if winner_id == loser_id {
            return Err(RankingError::InvalidOutcome {
                reason: format!("Item '{}' cannot be compared with itself", winner_id),
            }
            .into());
        }

        let mut records = self
            .records
            .write()
            .map_err(|_| RankingError::StorageFailure {
                message: "Failed to acquire records write lock".to_string(),
            })?;

        // An update implies both items were already observed; never create here
        let winner_rating = records
            .get(winner_id)
            .ok_or_else(|| RankingError::ItemNotFound {
                item_id: winner_id.to_string(),
            })?
            .rating;
        let loser_rating = records
            .get(loser_id)
            .ok_or_else(|| RankingError::ItemNotFound {
                item_id: loser_id.to_string(),
            })?
            .rating;

        let (new_winner_rating, new_loser_rating) = rate(winner_rating, loser_rating);

        records
            .get_mut(winner_id)
            .expect("winner record checked above")
            .apply_rating(new_winner_rating);
        records
            .get_mut(loser_id)
            .expect("loser record checked above")
            .apply_rating(new_loser_rating);

        Ok((
            RatingUpdate {
                item_id: winner_id.to_string(),
                old_rating: winner_rating,
                new_rating: new_winner_rating,
            },
            RatingUpdate {
                item_id: loser_id.to_string(),
                old_rating: loser_rating,
                new_rating: new_loser_rating,
            },
        ))
    }

    fn reset_all(&self, rating: f64) -> Result<usize> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RankingError::StorageFailure {
                message: "Failed to acquire records write lock".to_string(),
            })?;

        let now = current_timestamp();
        for record in records.values_mut() {
            record.rating = rating;
            record.last_updated = now;
        }

        Ok(records.len())
    }

    fn all_records(&self) -> Result<Vec<RatingRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RankingError::StorageFailure {
                message: "Failed to acquire records read lock".to_string(),
            })?;

        Ok(records.values().cloned().collect())
    }

    fn record_count(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|_| RankingError::StorageFailure {
                message: "Failed to acquire records read lock".to_string(),
            })?;

        Ok(records.len())
    }
}

/// Mock rating storage for testing
#[derive(Debug, Default)]
pub struct MockRatingStore {
    records: RwLock<HashMap<ItemId, RatingRecord>>,
    update_calls: RwLock<Vec<(ItemId, ItemId)>>,
    failing: RwLock<bool>,
}

impl MockRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset records for testing
    pub fn preset_records(&self, records: HashMap<ItemId, RatingRecord>) {
        if let Ok(mut storage) = self.records.write() {
            *storage = records;
        }
    }

    /// Make every subsequent operation fail with a storage error
    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut flag) = self.failing.write() {
            *flag = failing;
        }
    }

    /// Get all update_pair calls made (for testing)
    pub fn get_update_calls(&self) -> Vec<(ItemId, ItemId)> {
        self.update_calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn check_failing(&self) -> Result<()> {
        let failing = self.failing.read().map(|flag| *flag).unwrap_or(false);
        if failing {
            return Err(RankingError::StorageFailure {
                message: "Mock storage failure".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl RatingStore for MockRatingStore {
    fn get(&self, item_id: &str) -> Result<Option<RatingRecord>> {
        self.check_failing()?;

        let records = self
            .records
            .read()
            .map_err(|_| RankingError::StorageFailure {
                message: "Failed to acquire records read lock".to_string(),
            })?;

        Ok(records.get(item_id).cloned())
    }

    fn resolve(&self, item_id: &str, initial_rating: f64) -> Result<RatingRecord> {
        self.check_failing()?;

        let mut records = self
            .records
            .write()
            .map_err(|_| RankingError::StorageFailure {
                message: "Failed to acquire records write lock".to_string(),
            })?;

        match records.get(item_id) {
            Some(existing) => Ok(existing.clone()),
            None => {
                let record = RatingRecord::new(item_id.to_string(), initial_rating);
                records.insert(item_id.to_string(), record.clone());
                Ok(record)
            }
        }
    }

    fn update_pair(
        &self,
        winner_id: &str,
        loser_id: &str,
        rate: &dyn Fn(f64, f64) -> (f64, f64),
    ) -> Result<(RatingUpdate, RatingUpdate)> {
        // Record the call even when failing, for assertions on attempts
        if let Ok(mut calls) = self.update_calls.write() {
            calls.push((winner_id.to_string(), loser_id.to_string()));
        }

        self.check_failing()?;

        let mut records = self
            .records
            .write()
            .map_err(|_| RankingError::StorageFailure {
                message: "Failed to acquire records write lock".to_string(),
            })?;

        let winner_rating = records
            .get(winner_id)
            .ok_or_else(|| RankingError::ItemNotFound {
                item_id: winner_id.to_string(),
            })?
            .rating;
        let loser_rating = records
            .get(loser_id)
            .ok_or_else(|| RankingError::ItemNotFound {
                item_id: loser_id.to_string(),
            })?
            .rating;

        let (new_winner_rating, new_loser_rating) = rate(winner_rating, loser_rating);

        records
            .get_mut(winner_id)
            .expect("winner record checked above")
            .apply_rating(new_winner_rating);
        records
            .get_mut(loser_id)
            .expect("loser record checked above")
            .apply_rating(new_loser_rating);

        Ok((
            RatingUpdate {
                item_id: winner_id.to_string(),
                old_rating: winner_rating,
                new_rating: new_winner_rating,
            },
            RatingUpdate {
                item_id: loser_id.to_string(),
                old_rating: loser_rating,
                new_rating: new_loser_rating,
            },
        ))
    }

    fn reset_all(&self, rating: f64) -> Result<usize> {
        self.check_failing()?;

        let mut records = self
            .records
            .write()
            .map_err(|_| RankingError::StorageFailure {
                message: "Failed to acquire records write lock".to_string(),
            })?;

        let now = current_timestamp();
        for record in records.values_mut() {
            record.rating = rating;
            record.last_updated = now;
        }

        Ok(records.len())
    }

    fn all_records(&self) -> Result<Vec<RatingRecord>> {
        self.check_failing()?;

        let records = self
            .records
            .read()
            .map_err(|_| RankingError::StorageFailure {
                message: "Failed to acquire records read lock".to_string(),
            })?;

        Ok(records.values().cloned().collect())
    }

    fn record_count(&self) -> Result<usize> {
        self.check_failing()?;

        let records = self
            .records
            .read()
            .map_err(|_| RankingError::StorageFailure {
                message: "Failed to acquire records read lock".to_string(),
            })?;

        Ok(records.len())
    }
}
