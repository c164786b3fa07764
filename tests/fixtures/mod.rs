//! Test fixtures and helpers for integration testing

use podium::rating::storage::RatingStore;
use podium::{InMemoryRatingStore, LadderManager, RankingConfig};
use std::sync::Arc;

/// Build a manager over an in-memory store seeded with the given ratings
///
/// Returns the store handle too so tests can poke at it directly.
pub fn seeded_manager(entries: &[(&str, f64)]) -> (LadderManager, Arc<InMemoryRatingStore>) {
    let store = Arc::new(InMemoryRatingStore::new());
    for (item_id, rating) in entries {
        // resolve() creates the record at the provided initial rating
        store
            .resolve(item_id, *rating)
            .expect("seeding in-memory store cannot fail");
    }

    let manager = LadderManager::new(
        store.clone(),
        Arc::new(podium::EloRatingCalculator::default()),
        Arc::new(podium::RandomPairSelector::new()),
        RankingConfig::default(),
    )
    .expect("default configuration is valid");

    (manager, store)
}

/// Candidate list helper
pub fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Total rating mass currently stored
pub fn total_rating(store: &dyn RatingStore) -> f64 {
    store
        .all_records()
        .expect("reading in-memory store cannot fail")
        .iter()
        .map(|record| record.rating)
        .sum()
}
