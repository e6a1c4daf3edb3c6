//! Crop profile records
//!
//! One record per crop: the soil/climate/nutrient preferences used for
//! scoring plus descriptive fields shown to the farmer. Display fields are
//! opaque to scoring.

use crate::soil::SoilType;
use serde::{Deserialize, Serialize};

/// Rainfall above which an open-ended band stops counting as "within range"
pub const OPEN_RAINFALL_CEILING_MM: f64 = 3000.0;

/// Crop groupings used by the crop guide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropCategory {
    Cereal,
    Pulse,
    Oilseed,
    CashCrop,
    SpiceVegetable,
}

impl CropCategory {
    /// Friendly name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            CropCategory::Cereal => "Cereals & Millets",
            CropCategory::Pulse => "Pulses (Legumes)",
            CropCategory::Oilseed => "Oilseeds",
            CropCategory::CashCrop => "Commercial / Cash Crops",
            CropCategory::SpiceVegetable => "Spices & Vegetables",
        }
    }

    /// Serialized key (matches the catalog JSON)
    pub fn key(&self) -> &'static str {
        match self {
            CropCategory::Cereal => "cereal",
            CropCategory::Pulse => "pulse",
            CropCategory::Oilseed => "oilseed",
            CropCategory::CashCrop => "cash_crop",
            CropCategory::SpiceVegetable => "spice_vegetable",
        }
    }

    /// Parse a category from its key or display name
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|category| category.key() == key || category.display_name().to_lowercase() == key)
    }

    pub fn all() -> &'static [CropCategory] {
        &[
            CropCategory::Cereal,
            CropCategory::Pulse,
            CropCategory::Oilseed,
            CropCategory::CashCrop,
            CropCategory::SpiceVegetable,
        ]
    }
}

/// Annual rainfall tolerance of a crop (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RainfallBand {
    #[serde(rename = "min_rainfall_mm")]
    pub min_mm: f64,

    /// Absent means tolerant of arbitrarily high rainfall
    #[serde(rename = "max_rainfall_mm", default, skip_serializing_if = "Option::is_none")]
    pub max_mm: Option<f64>,
}

impl RainfallBand {
    pub fn new(min_mm: f64, max_mm: Option<f64>) -> Self {
        Self { min_mm, max_mm }
    }

    /// Upper edge used for scoring (open bands use the fixed ceiling)
    pub fn effective_max_mm(&self) -> f64 {
        self.max_mm.unwrap_or(OPEN_RAINFALL_CEILING_MM)
    }

    /// Inclusive containment check against the scoring band
    pub fn contains(&self, rainfall_mm: f64) -> bool {
        rainfall_mm >= self.min_mm && rainfall_mm <= self.effective_max_mm()
    }

    /// Distance to the nearest band edge (0 if inside)
    pub fn distance_from_band(&self, rainfall_mm: f64) -> f64 {
        if self.contains(rainfall_mm) {
            return 0.0;
        }
        let to_min = (rainfall_mm - self.min_mm).abs();
        let to_max = (rainfall_mm - self.effective_max_mm()).abs();
        to_min.min(to_max)
    }

    /// Water requirement as shown on crop cards, e.g. "400 - 1000 mm" or "1000+ mm"
    pub fn display_label(&self) -> String {
        match self.max_mm {
            Some(max) => format!("{:.0} - {:.0} mm", self.min_mm, max),
            None => format!("{:.0}+ mm", self.min_mm),
        }
    }
}

/// A catalog record describing one crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    /// Unique catalog key
    pub name: String,

    /// Hindi name
    pub local_name: String,

    pub category: CropCategory,

    pub soil_types: Vec<SoilType>,

    #[serde(flatten)]
    pub rainfall: RainfallBand,

    pub ideal_ph: f64,

    pub high_nitrogen_demand: bool,

    // Display-only fields
    pub growth_duration: String,
    pub yield_estimate: String,
    pub market_price: String,
    pub agronomist_note: String,
    pub image_url: String,
}

impl CropProfile {
    /// Check whether the crop lists a soil type
    pub fn grows_in(&self, soil: SoilType) -> bool {
        self.soil_types.contains(&soil)
    }

    pub fn water_requirement_label(&self) -> String {
        self.rainfall.display_label()
    }

    /// Badge text on crop cards
    pub fn nutrient_demand_label(&self) -> &'static str {
        if self.high_nitrogen_demand {
            "High Nutrient"
        } else {
            "Standard"
        }
    }
}
