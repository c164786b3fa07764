//! Candidate sources supplying the universe of comparable items
//!
//! The ranking engine never owns the item universe; it is handed in per
//! call and may change between calls. This module defines the supplier
//! seam and two implementations: a directory listing (the uploads folder
//! of the original deployment) and a static list for tests and tooling.

use crate::error::Result;
use crate::types::ItemId;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Trait for supplying the current set of known item identifiers
pub trait CandidateSource: Send + Sync {
    /// The identifiers currently available for comparison
    fn candidates(&self) -> Result<Vec<ItemId>>;
}

/// Candidate source backed by the file names in a directory
///
/// Each regular file contributes its file name as an item identifier.
/// Hidden files are skipped. The listing is sorted so repeated calls over
/// unchanged contents are deterministic.
#[derive(Debug, Clone)]
pub struct DirectoryCandidateSource {
    root: PathBuf,
}

impl DirectoryCandidateSource {
    /// Create a source listing the given directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory being listed
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CandidateSource for DirectoryCandidateSource {
    fn candidates(&self) -> Result<Vec<ItemId>> {
        let entries = std::fs::read_dir(&self.root)
            .with_context(|| format!("Failed to list directory {}", self.root.display()))?;

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", self.root.display(), e);
                    continue;
                }
            };

            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            candidates.push(name);
        }

        candidates.sort();
        Ok(candidates)
    }
}

/// Static candidate source with a fixed identifier list
#[derive(Debug, Clone, Default)]
pub struct StaticCandidateSource {
    items: Vec<ItemId>,
}

impl StaticCandidateSource {
    pub fn new(items: Vec<ItemId>) -> Self {
        Self { items }
    }
}

impl CandidateSource for StaticCandidateSource {
    fn candidates(&self) -> Result<Vec<ItemId>> {
        Ok(self.items.clone())
    }
}
