//! Crop comparison
//!
//! The crop guide lets a farmer pick up to three crops and view them side by
//! side. Selections are keyed by crop name.

use crate::catalog::{CropCatalog, CropProfile};
use crate::error::{RecommendError, Result};
use crate::soil::SoilType;
use serde::Serialize;

pub const MAX_COMPARED_CROPS: usize = 3;

/// Outcome of toggling a crop in the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Crops currently selected for comparison, in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSet {
    names: Vec<String>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.names.len() >= MAX_COMPARED_CROPS
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Select an unselected crop or deselect a selected one
    pub fn toggle(&mut self, catalog: &CropCatalog, name: &str) -> Result<ToggleOutcome> {
        if let Some(pos) = self.names.iter().position(|n| n == name) {
            self.names.remove(pos);
            return Ok(ToggleOutcome::Removed);
        }
        if !catalog.contains(name) {
            return Err(RecommendError::UnknownCrop(name.to_string()));
        }
        if self.is_full() {
            return Err(RecommendError::ComparisonFull { limit: MAX_COMPARED_CROPS });
        }
        self.names.push(name.to_string());
        Ok(ToggleOutcome::Added)
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Comparison rows for the current selection
    pub fn rows(&self, catalog: &CropCatalog) -> Result<Vec<ComparisonRow>> {
        compare(catalog, &self.names)
    }
}

/// One column of the side-by-side comparison view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub name: String,
    pub local_name: String,
    pub water_requirement: String,
    pub ideal_ph: f64,
    pub nutrient_demand: &'static str,
    pub duration: String,
    pub yield_estimate: String,
    pub market_price: String,
    pub soil_types: Vec<SoilType>,
}

impl From<&CropProfile> for ComparisonRow {
    fn from(crop: &CropProfile) -> Self {
        Self {
            name: crop.name.clone(),
            local_name: crop.local_name.clone(),
            water_requirement: crop.water_requirement_label(),
            ideal_ph: crop.ideal_ph,
            nutrient_demand: crop.nutrient_demand_label(),
            duration: crop.growth_duration.clone(),
            yield_estimate: crop.yield_estimate.clone(),
            market_price: crop.market_price.clone(),
            soil_types: crop.soil_types.clone(),
        }
    }
}

/// Build comparison rows for named crops
pub fn compare<S: AsRef<str>>(catalog: &CropCatalog, names: &[S]) -> Result<Vec<ComparisonRow>> {
    if names.len() > MAX_COMPARED_CROPS {
        return Err(RecommendError::TooManyComparisons {
            requested: names.len(),
            limit: MAX_COMPARED_CROPS,
        });
    }
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            catalog
                .get(name)
                .map(ComparisonRow::from)
                .ok_or_else(|| RecommendError::UnknownCrop(name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CropCatalog {
        CropCatalog::builtin().unwrap()
    }

    #[test]
    fn test_toggle_add_remove() {
        let catalog = catalog();
        let mut set = ComparisonSet::new();

        assert_eq!(set.toggle(&catalog, "Wheat").unwrap(), ToggleOutcome::Added);
        assert!(set.contains("Wheat"));
        assert_eq!(set.toggle(&catalog, "Wheat").unwrap(), ToggleOutcome::Removed);
        assert!(set.is_empty());
    }

    #[test]
    fn test_limit_of_three() {
        let catalog = catalog();
        let mut set = ComparisonSet::new();
        for name in ["Wheat", "Cotton", "Soybean"] {
            set.toggle(&catalog, name).unwrap();
        }
        assert!(set.is_full());

        let err = set.toggle(&catalog, "Tea").unwrap_err();
        assert_eq!(err, RecommendError::ComparisonFull { limit: 3 });
        assert_eq!(set.len(), 3);

        // Deselecting still works when full
        assert_eq!(set.toggle(&catalog, "Cotton").unwrap(), ToggleOutcome::Removed);
        assert_eq!(set.toggle(&catalog, "Tea").unwrap(), ToggleOutcome::Added);
        assert_eq!(set.names(), &["Wheat", "Soybean", "Tea"]);
    }

    #[test]
    fn test_unknown_crop() {
        let catalog = catalog();
        let mut set = ComparisonSet::new();
        let err = set.toggle(&catalog, "Durian").unwrap_err();
        assert_eq!(err, RecommendError::UnknownCrop("Durian".to_string()));
    }

    #[test]
    fn test_rows() {
        let catalog = catalog();
        let rows = compare(&catalog, &["Wheat", "Rice (Paddy)"]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].water_requirement, "400 - 1000 mm");
        assert_eq!(rows[0].nutrient_demand, "High Nutrient");
        assert_eq!(rows[1].water_requirement, "1000+ mm");

        let err = compare(&catalog, &["Wheat", "Tea", "Coffee (Robusta)", "Cotton"]).unwrap_err();
        assert!(matches!(err, RecommendError::TooManyComparisons { requested: 4, limit: 3 }));
    }
}
