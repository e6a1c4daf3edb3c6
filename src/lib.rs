//! Crop Recommender
//!
//! Recommends a crop for given soil and climate measurements by scoring a
//! fixed catalog of crop profiles and returning the best match plus two
//! runners-up.
//!
//! - `soil`: Soil type taxonomy and label resolution
//! - `catalog/`: Crop profiles and the immutable catalog
//! - `query`: Typed queries and the wire-format input record
//! - `scoring`: Deterministic per-crop scoring terms
//! - `jitter`: Injectable tie-break randomness
//! - `recommender`: Ranking, confidence and result packaging
//! - `regional`: Per-state soil defaults for pre-filling queries
//! - `comparison`: Side-by-side crop comparison for the crop guide
//! - `config`: Environment configuration for the server
//! - `api_server`: Axum JSON API (feature `api`)

pub mod error;
pub mod soil;
pub mod catalog;
pub mod query;
pub mod scoring;
pub mod jitter;
pub mod recommender;
pub mod regional;
pub mod comparison;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use catalog::{CropCatalog, CropCategory, CropProfile, RainfallBand};
pub use comparison::{ComparisonRow, ComparisonSet};
pub use config::ServerConfig;
pub use error::{RecommendError, Result};
pub use jitter::{Jitter, JitterMode, NoJitter, RandomJitter};
pub use query::{QueryInput, SoilQuery};
pub use recommender::{Alternative, RecommendationResult, Recommender, ScoredCandidate};
pub use scoring::{score_crop, ScoreBreakdown};
pub use soil::{SoilSet, SoilType};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
