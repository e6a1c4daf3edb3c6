//! Crop Recommender - ranks the catalog against a query
//!
//! Scores every catalog entry, adds the injected jitter, sorts descending
//! and packages the winner plus two runners-up. Stateless: the only shared
//! input is the immutable catalog, so one `Recommender` can serve any number
//! of concurrent callers as long as each brings its own jitter source.

use crate::catalog::{CropCatalog, CropProfile};
use crate::error::{RecommendError, Result};
use crate::jitter::{Jitter, JitterMode};
use crate::query::SoilQuery;
use crate::scoring::{score_crop, ScoreBreakdown};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Number of runner-up crops returned with a recommendation
pub const ALTERNATIVE_COUNT: usize = 2;

/// Primary confidence band (percent)
pub const PRIMARY_CONFIDENCE_FLOOR: f64 = 75.0;
pub const PRIMARY_CONFIDENCE_CEILING: f64 = 98.0;
/// Runner-up confidence band (percent)
pub const ALTERNATIVE_CONFIDENCE_FLOOR: f64 = 60.0;
pub const ALTERNATIVE_CONFIDENCE_CEILING: f64 = 95.0;

/// One crop's score during a ranking pass
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub crop: &'a CropProfile,
    pub breakdown: ScoreBreakdown,
    pub jitter: f64,
}

impl ScoredCandidate<'_> {
    /// Ranking score (deterministic total plus jitter)
    pub fn score(&self) -> f64 {
        self.breakdown.total() + self.jitter
    }

    pub fn to_entry(&self) -> RankingEntry {
        RankingEntry {
            crop_name: self.crop.name.clone(),
            score: self.score(),
            base_score: self.breakdown.total(),
            breakdown: self.breakdown,
        }
    }
}

/// Serializable view of a ranked candidate (for diagnostics)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub crop_name: String,
    pub score: f64,
    pub base_score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Runner-up crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub crop_name: String,
    pub crop_hindi: String,
    pub confidence: u8,
}

/// Recommendation returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub crop_name: String,
    pub crop_hindi: String,
    pub confidence: u8,
    pub yield_estimate: String,
    pub market_price_estimate: String,
    pub duration: String,
    pub agronomist_note: String,
    pub image_url: String,
    pub alternatives: Vec<Alternative>,
}

/// Primary confidence: floor, then clamp into [75, 98]
pub fn primary_confidence(score: f64) -> u8 {
    score
        .floor()
        .clamp(PRIMARY_CONFIDENCE_FLOOR, PRIMARY_CONFIDENCE_CEILING) as u8
}

/// Runner-up confidence: floor, then clamp into [60, 95]
pub fn alternative_confidence(score: f64) -> u8 {
    score
        .floor()
        .clamp(ALTERNATIVE_CONFIDENCE_FLOOR, ALTERNATIVE_CONFIDENCE_CEILING) as u8
}

/// Main crop recommender
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Arc<CropCatalog>,
}

impl Recommender {
    pub fn new(catalog: Arc<CropCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    /// Score and sort the whole catalog, best first
    ///
    /// Jitter is drawn once per crop in catalog order. Equal scores keep
    /// catalog order.
    pub fn rank<J: Jitter + ?Sized>(
        &self,
        query: &SoilQuery,
        jitter: &mut J,
    ) -> Result<Vec<ScoredCandidate<'_>>> {
        if self.catalog.is_empty() {
            return Err(RecommendError::Configuration(
                "crop catalog is empty".to_string(),
            ));
        }

        let mut candidates: Vec<ScoredCandidate<'_>> = self
            .catalog
            .iter()
            .map(|crop| ScoredCandidate {
                crop,
                breakdown: score_crop(crop, query),
                jitter: jitter.sample(),
            })
            .collect();

        candidates.sort_by(|a, b| b.score().total_cmp(&a.score()));
        Ok(candidates)
    }

    /// Best crop for a query plus up to two runners-up
    pub fn recommend<J: Jitter + ?Sized>(
        &self,
        query: &SoilQuery,
        jitter: &mut J,
    ) -> Result<RecommendationResult> {
        let ranked = self.rank(query, jitter)?;
        package(&ranked)
    }

    /// Recommend for many queries in parallel
    ///
    /// Query `i` gets its own jitter source (`mode.source(i)`), so seeded
    /// batches are reproducible regardless of thread scheduling.
    pub fn recommend_batch(
        &self,
        queries: &[SoilQuery],
        mode: JitterMode,
    ) -> Vec<Result<RecommendationResult>> {
        queries
            .par_iter()
            .enumerate()
            .map(|(i, query)| {
                let mut jitter = mode.source(i as u64);
                self.recommend(query, jitter.as_mut())
            })
            .collect()
    }
}

/// Package a ranking (best first) into a recommendation
///
/// Lets a caller that already holds a ranking report it without scoring a
/// second time.
pub fn package(ranked: &[ScoredCandidate<'_>]) -> Result<RecommendationResult> {
    let best = ranked
        .first()
        .ok_or_else(|| RecommendError::Configuration("nothing was ranked".to_string()))?;
    let crop = best.crop;

    let alternatives = ranked
        .iter()
        .skip(1)
        .take(ALTERNATIVE_COUNT)
        .map(|candidate| Alternative {
            crop_name: candidate.crop.name.clone(),
            crop_hindi: candidate.crop.local_name.clone(),
            confidence: alternative_confidence(candidate.score()),
        })
        .collect();

    Ok(RecommendationResult {
        crop_name: crop.name.clone(),
        crop_hindi: crop.local_name.clone(),
        confidence: primary_confidence(best.score()),
        yield_estimate: crop.yield_estimate.clone(),
        market_price_estimate: crop.market_price.clone(),
        duration: crop.growth_duration.clone(),
        agronomist_note: crop.agronomist_note.clone(),
        image_url: crop.image_url.clone(),
        alternatives,
    })
}
