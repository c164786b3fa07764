//! Common types used throughout the ranking engine

use serde::{Deserialize, Serialize};

/// Unique identifier for ranked items, derived from the underlying
/// picture's filename
pub type ItemId = String;

/// Policy for selecting the next comparison pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum SelectionMode {
    /// Two distinct items uniformly at random from the candidate set
    Unconstrained,
    /// A random anchor, then two items whose ratings lie strictly within
    /// `threshold` points of the anchor's rating
    Closeness { threshold: f64 },
}

impl std::fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionMode::Unconstrained => write!(f, "unconstrained"),
            SelectionMode::Closeness { threshold } => {
                write!(f, "closeness(<{})", threshold)
            }
        }
    }
}

/// Rating change information for a single item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub item_id: ItemId,
    pub old_rating: f64,
    pub new_rating: f64,
}

impl RatingUpdate {
    /// Signed rating delta for this update
    pub fn delta(&self) -> f64 {
        self.new_rating - self.old_rating
    }
}

/// Result of applying one comparison outcome to both participants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuelApplied {
    pub winner: RatingUpdate,
    pub loser: RatingUpdate,
}

/// One row of the ranked standings (the podium view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position, best rating first
    pub rank: usize,
    pub item_id: ItemId,
    pub rating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_mode_display() {
        assert_eq!(SelectionMode::Unconstrained.to_string(), "unconstrained");
        assert_eq!(
            SelectionMode::Closeness { threshold: 150.0 }.to_string(),
            "closeness(<150)"
        );
    }

    #[test]
    fn test_rating_update_delta() {
        let update = RatingUpdate {
            item_id: "a.jpg".to_string(),
            old_rating: 1500.0,
            new_rating: 1516.0,
        };
        assert_eq!(update.delta(), 16.0);
    }
}
