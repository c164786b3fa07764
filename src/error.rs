//! Error types for the ranking engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific ranking scenarios
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("Not enough items to select a pair: {available} available, 2 required")]
    InsufficientItems { available: usize },

    #[error(
        "Not enough comparable items within {threshold} rating points of anchor '{anchor}': pool size {pool_size}"
    )]
    InsufficientComparableItems {
        anchor: String,
        threshold: f64,
        pool_size: usize,
    },

    #[error("Item not found: {item_id}")]
    ItemNotFound { item_id: String },

    #[error("Invalid outcome: {reason}")]
    InvalidOutcome { reason: String },

    #[error("Rating storage failed: {message}")]
    StorageFailure { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
