//! Regional soil defaults
//!
//! Typical soil profile per Indian state (NBSS&LUP soil survey estimates),
//! used to pre-fill a query once the farmer's state is known and to answer
//! "Don't know" for the soil type. States without an entry fall back to a
//! coarse rainfall estimate from coordinates; when the state itself is
//! unknown (reverse geocoding failed) only latitude is used.

use crate::query::SoilQuery;
use crate::soil::SoilType;
use serde::Serialize;

/// Approximate soil and climate for one state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionalProfile {
    pub state: &'static str,
    pub rainfall_mm: f64,
    pub soil: SoilType,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub ph: f64,
}

impl RegionalProfile {
    /// Query pre-filled with this region's defaults
    pub fn to_query(&self) -> SoilQuery {
        SoilQuery {
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            ph: self.ph,
            soils: self.soil.into(),
            rainfall_mm: self.rainfall_mm,
        }
    }
}

const fn region(
    state: &'static str,
    rainfall_mm: f64,
    soil: SoilType,
    npk: (f64, f64, f64),
    ph: f64,
) -> RegionalProfile {
    RegionalProfile {
        state,
        rainfall_mm,
        soil,
        nitrogen: npk.0,
        phosphorus: npk.1,
        potassium: npk.2,
        ph,
    }
}

pub const REGIONAL_DEFAULTS: &[RegionalProfile] = &[
    region("Maharashtra", 1100.0, SoilType::BlackRegur, (50.0, 30.0, 60.0), 7.2), // rich K, low P
    region("Punjab", 600.0, SoilType::Alluvial, (90.0, 60.0, 50.0), 7.8),       // alkaline tendency
    region("Haryana", 550.0, SoilType::Alluvial, (85.0, 55.0, 45.0), 7.8),
    region("Uttar Pradesh", 850.0, SoilType::Alluvial, (80.0, 40.0, 50.0), 7.2),
    region("Gujarat", 700.0, SoilType::BlackRegur, (50.0, 40.0, 60.0), 7.5),
    region("Rajasthan", 350.0, SoilType::DesertArid, (30.0, 20.0, 50.0), 8.2), // low organic matter
    region("Kerala", 2800.0, SoilType::Laterite, (70.0, 30.0, 40.0), 5.5),     // acidic
    region("Tamil Nadu", 950.0, SoilType::Red, (60.0, 35.0, 50.0), 6.8),
    region("Karnataka", 1200.0, SoilType::Red, (60.0, 40.0, 50.0), 6.5),
    region("Telangana", 900.0, SoilType::Red, (65.0, 45.0, 45.0), 6.8),
    region("Andhra Pradesh", 900.0, SoilType::Red, (65.0, 45.0, 45.0), 7.0),
    region("West Bengal", 1600.0, SoilType::Alluvial, (80.0, 50.0, 50.0), 6.0), // slightly acidic alluvial
    region("Madhya Pradesh", 1000.0, SoilType::BlackRegur, (55.0, 40.0, 50.0), 7.0),
    region("Bihar", 1100.0, SoilType::Alluvial, (70.0, 40.0, 45.0), 6.8),
    region("Chhattisgarh", 1300.0, SoilType::Red, (60.0, 30.0, 30.0), 6.5),
];

/// Look up a state's defaults (case-insensitive)
pub fn lookup(state: &str) -> Option<&'static RegionalProfile> {
    let state = state.trim();
    REGIONAL_DEFAULTS
        .iter()
        .find(|profile| profile.state.eq_ignore_ascii_case(state))
}

/// Soil to suggest when the farmer answers "Don't know"
pub fn suggest_soil(state: &str) -> Option<SoilType> {
    lookup(state).map(|profile| profile.soil)
}

/// Rough annual rainfall for states without regional defaults
///
/// South India (8°–20°N) is generally wetter; west of 73°E is desert.
pub fn estimate_rainfall(lat: f64, lng: f64) -> f64 {
    if lat > 8.0 && lat < 20.0 {
        1500.0
    } else if lng < 73.0 {
        400.0
    } else {
        1100.0
    }
}

/// Rainfall estimate when only coordinates are known (no state)
pub fn estimate_rainfall_from_latitude(lat: f64) -> f64 {
    if lat < 20.0 {
        1400.0
    } else {
        900.0
    }
}

/// Rainfall to pre-fill for a located farm
///
/// Regional defaults when the state has them, the coordinate estimate when
/// it does not, the latitude-only estimate when the state is unknown.
pub fn rainfall_for_location(state: Option<&str>, lat: f64, lng: f64) -> f64 {
    match state {
        Some(state) => lookup(state)
            .map(|profile| profile.rainfall_mm)
            .unwrap_or_else(|| estimate_rainfall(lat, lng)),
        None => estimate_rainfall_from_latitude(lat),
    }
}
