//! Crop Scoring
//!
//! Deterministic weighted-sum fitness of one crop profile against one query.
//! Four terms, maximum 100 points before jitter:
//!
//! | Term      | Max | Rule |
//! |-----------|-----|------|
//! | Soil      | 40  | any matched soil listed → 40, else loamy fallback → 20 |
//! | Rainfall  | 30  | inside band → 30, else 30 − distance/20 (floor 0) |
//! | pH        | 15  | step at 0.5 / 1.0 / 1.5 units from ideal |
//! | Nitrogen  | 15  | demand flag agrees with N level |
//!
//! Jitter is not applied here; see `jitter` and `recommender`.

use crate::catalog::CropProfile;
use crate::query::SoilQuery;
use serde::Serialize;

pub const SOIL_MATCH_POINTS: f64 = 40.0;
pub const SOIL_FALLBACK_POINTS: f64 = 20.0;
pub const RAINFALL_POINTS: f64 = 30.0;
/// Millimetres outside the band that cost one rainfall point
pub const RAINFALL_MM_PER_POINT: f64 = 20.0;
pub const NITROGEN_POINTS: f64 = 15.0;

/// pH step function: (exclusive upper bound on |ΔpH|, points)
pub const PH_STEPS: [(f64, f64); 3] = [(0.5, 15.0), (1.0, 10.0), (1.5, 5.0)];

/// High-demand crops score when N is strictly above this
pub const HIGH_NITROGEN_THRESHOLD: f64 = 60.0;
/// Low-demand crops score when N is strictly below this
pub const LOW_NITROGEN_THRESHOLD: f64 = 50.0;

/// How the soil term was earned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilFit {
    /// A soil type matched by the query label is listed for the crop
    Listed,
    /// Not listed, but the crop grows in the generic loamy default
    LoamyFallback,
    NoMatch,
}

/// Where the queried rainfall sits relative to the crop's band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RainfallFit {
    BelowRange,
    WithinRange,
    AboveRange,
}

/// Per-term points for one crop (no jitter)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub soil: f64,
    pub rainfall: f64,
    pub ph: f64,
    pub nitrogen: f64,
    pub soil_fit: SoilFit,
    pub rainfall_fit: RainfallFit,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.soil + self.rainfall + self.ph + self.nitrogen
    }
}

/// Score a crop against a query
pub fn score_crop(crop: &CropProfile, query: &SoilQuery) -> ScoreBreakdown {
    let soil_fit = soil_fit(crop, query);
    let rainfall_fit = rainfall_fit(crop, query.rainfall_mm);

    ScoreBreakdown {
        soil: soil_points(soil_fit),
        rainfall: rainfall_score(crop, query.rainfall_mm),
        ph: ph_score(crop.ideal_ph, query.ph),
        nitrogen: nitrogen_score(crop.high_nitrogen_demand, query.nitrogen),
        soil_fit,
        rainfall_fit,
    }
}

pub fn soil_fit(crop: &CropProfile, query: &SoilQuery) -> SoilFit {
    if query.soils.matches_any(&crop.soil_types) {
        SoilFit::Listed
    } else if crop.soil_types.iter().any(|s| s.is_fallback_default()) {
        SoilFit::LoamyFallback
    } else {
        SoilFit::NoMatch
    }
}

fn soil_points(fit: SoilFit) -> f64 {
    match fit {
        SoilFit::Listed => SOIL_MATCH_POINTS,
        SoilFit::LoamyFallback => SOIL_FALLBACK_POINTS,
        SoilFit::NoMatch => 0.0,
    }
}

pub fn rainfall_fit(crop: &CropProfile, rainfall_mm: f64) -> RainfallFit {
    if rainfall_mm < crop.rainfall.min_mm {
        RainfallFit::BelowRange
    } else if rainfall_mm > crop.rainfall.effective_max_mm() {
        RainfallFit::AboveRange
    } else {
        RainfallFit::WithinRange
    }
}

/// Full points inside the band, linear decay with distance to the nearest edge outside it
pub fn rainfall_score(crop: &CropProfile, rainfall_mm: f64) -> f64 {
    if crop.rainfall.contains(rainfall_mm) {
        return RAINFALL_POINTS;
    }
    let diff = crop.rainfall.distance_from_band(rainfall_mm);
    (RAINFALL_POINTS - diff / RAINFALL_MM_PER_POINT).max(0.0)
}

pub fn ph_score(ideal_ph: f64, ph: f64) -> f64 {
    let diff = (ph - ideal_ph).abs();
    PH_STEPS
        .iter()
        .find(|(bound, _)| diff < *bound)
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

/// Nitrogen agreement.
///
/// N in 50..=60 earns nothing for either kind of crop.
pub fn nitrogen_score(high_nitrogen_demand: bool, nitrogen: f64) -> f64 {
    if high_nitrogen_demand && nitrogen > HIGH_NITROGEN_THRESHOLD {
        NITROGEN_POINTS
    } else if !high_nitrogen_demand && nitrogen < LOW_NITROGEN_THRESHOLD {
        NITROGEN_POINTS
    } else {
        0.0
    }
}
