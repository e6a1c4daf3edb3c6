//! Error types for the recommender library.
//!
//! Scoring itself is total: out-of-range inputs simply produce low scores.
//! The only engine failure is a misconfigured (empty) catalog; the remaining
//! variants cover catalog construction and the crop guide operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// Broken deployment (e.g. an empty catalog). Not a user error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Duplicate crop name in catalog: {0}")]
    DuplicateCrop(String),

    #[error("Failed to load crop catalog: {0}")]
    CatalogLoad(String),

    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    #[error("You can compare up to {limit} crops at a time")]
    ComparisonFull { limit: usize },

    #[error("Requested {requested} crops for comparison (limit {limit})")]
    TooManyComparisons { requested: usize, limit: usize },
}

impl RecommendError {
    /// True for failures that indicate a broken deployment rather than bad input
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RecommendError::Configuration(_)
                | RecommendError::CatalogLoad(_)
                | RecommendError::DuplicateCrop(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
