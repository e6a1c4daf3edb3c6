//! Recommendation queries
//!
//! `QueryInput` is the plain record callers send (`{n, p, k, ph, soilType,
//! rainfall}`); `SoilQuery` is the typed form the engine scores against.
//! The engine never re-validates numbers: callers that accept raw user input
//! clamp with `QueryInput::clamped` first.

use crate::soil::SoilSet;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Observed domain of N, P and K levels
pub const NUTRIENT_RANGE: RangeInclusive<f64> = 0.0..=140.0;
pub const PH_RANGE: RangeInclusive<f64> = 4.0..=10.0;
/// Annual rainfall accepted by the form (mm)
pub const RAINFALL_RANGE: RangeInclusive<f64> = 200.0..=4000.0;

/// Rainfall assumed when the caller omits it
pub const DEFAULT_RAINFALL_MM: f64 = 1000.0;

/// Soil and climate measurements for one recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct SoilQuery {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub ph: f64,
    /// Soil types the submitted label matched (every type for a blank label)
    pub soils: SoilSet,
    pub rainfall_mm: f64,
}

/// Wire-format query as submitted by the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInput {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub ph: f64,
    #[serde(default)]
    pub soil_type: String,
    #[serde(default)]
    pub rainfall: Option<f64>,
}

impl QueryInput {
    /// Convert to the engine's typed query without touching the numbers
    pub fn into_query(self) -> SoilQuery {
        SoilQuery {
            nitrogen: self.n,
            phosphorus: self.p,
            potassium: self.k,
            ph: self.ph,
            soils: SoilSet::from_label(&self.soil_type),
            rainfall_mm: self.rainfall.unwrap_or(DEFAULT_RAINFALL_MM),
        }
    }

    /// Clamp every numeric field into its domain range
    ///
    /// NaN collapses to the range minimum, mirroring how the form treats
    /// unparseable input.
    pub fn clamped(self) -> Self {
        Self {
            n: clamp_to(self.n, &NUTRIENT_RANGE),
            p: clamp_to(self.p, &NUTRIENT_RANGE),
            k: clamp_to(self.k, &NUTRIENT_RANGE),
            ph: clamp_to(self.ph, &PH_RANGE),
            soil_type: self.soil_type,
            rainfall: self.rainfall.map(|r| clamp_to(r, &RAINFALL_RANGE)),
        }
    }
}

impl From<&SoilQuery> for QueryInput {
    fn from(query: &SoilQuery) -> Self {
        Self {
            n: query.nitrogen,
            p: query.phosphorus,
            k: query.potassium,
            ph: query.ph,
            soil_type: query.soils.to_string(),
            rainfall: Some(query.rainfall_mm),
        }
    }
}

fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    }
}
