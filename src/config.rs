//! Configuration management for the ranking engine
//!
//! This module handles configuration loading from environment variables or a
//! TOML file, validation, and default values.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Ranking engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Rating assigned to an item the first time it is observed
    pub default_rating: f64,
    /// K-factor used when the caller does not supply one explicitly
    pub k_factor: f64,
    /// Default closeness threshold for constrained pair selection
    pub closeness_threshold: f64,
    /// Whether never-judged items appear in standings output
    pub include_unrated_in_standings: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_rating: 1500.0,
            k_factor: 32.0,
            closeness_threshold: 300.0,
            include_unrated_in_standings: false,
        }
    }
}

impl RankingConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(rating) = env::var("PODIUM_DEFAULT_RATING") {
            config.default_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid PODIUM_DEFAULT_RATING value: {}", rating))?;
        }
        if let Ok(k) = env::var("PODIUM_K_FACTOR") {
            config.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid PODIUM_K_FACTOR value: {}", k))?;
        }
        if let Ok(threshold) = env::var("PODIUM_CLOSENESS_THRESHOLD") {
            config.closeness_threshold = threshold
                .parse()
                .map_err(|_| anyhow!("Invalid PODIUM_CLOSENESS_THRESHOLD value: {}", threshold))?;
        }
        if let Ok(include) = env::var("PODIUM_INCLUDE_UNRATED") {
            config.include_unrated_in_standings = include
                .parse()
                .map_err(|_| anyhow!("Invalid PODIUM_INCLUDE_UNRATED value: {}", include))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file: {}", e))?;

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &RankingConfig) -> Result<()> {
    if !config.default_rating.is_finite() {
        return Err(anyhow!("Default rating must be finite"));
    }
    if !config.k_factor.is_finite() || config.k_factor <= 0.0 {
        return Err(anyhow!("K-factor must be finite and positive"));
    }
    if !config.closeness_threshold.is_finite() || config.closeness_threshold <= 0.0 {
        return Err(anyhow!("Closeness threshold must be finite and positive"));
    }

    Ok(())
}
