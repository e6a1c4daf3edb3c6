//! Crop Catalog
//!
//! Immutable reference table of crop profiles used as the search space for
//! recommendations and as the data behind the crop guide.
//!
//! ## Architecture
//! - `profile.rs` - CropProfile, RainfallBand, CropCategory
//! - `mod.rs` - CropCatalog container (validation, name index, search)
//!
//! The built-in catalog (55 crops, ICAR / Ministry of Agriculture figures with
//! MSP 2024-25 prices) is embedded from `data/crop_catalog.json`. Alternate
//! catalogs can be loaded from any JSON file of the same shape.

pub mod profile;

pub use profile::{CropCategory, CropProfile, RainfallBand, OPEN_RAINFALL_CEILING_MM};

use crate::error::{RecommendError, Result};
use rustc_hash::FxHashMap;
use std::path::Path;

const BUILTIN_CATALOG_JSON: &str = include_str!("../../data/crop_catalog.json");

/// Read-only collection of crop profiles, keyed by unique name
#[derive(Debug, Clone, Default)]
pub struct CropCatalog {
    crops: Vec<CropProfile>,
    by_name: FxHashMap<String, usize>,
}

impl CropCatalog {
    /// Build a catalog, rejecting duplicate crop names
    ///
    /// An empty catalog is accepted here; it is reported as a configuration
    /// error when a recommendation is requested against it.
    pub fn new(crops: Vec<CropProfile>) -> Result<Self> {
        let mut by_name = FxHashMap::default();
        for (idx, crop) in crops.iter().enumerate() {
            if by_name.insert(crop.name.clone(), idx).is_some() {
                return Err(RecommendError::DuplicateCrop(crop.name.clone()));
            }
        }
        Ok(Self { crops, by_name })
    }

    /// The embedded catalog shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG_JSON)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let crops: Vec<CropProfile> =
            serde_json::from_str(json).map_err(|e| RecommendError::CatalogLoad(e.to_string()))?;
        Self::new(crops)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RecommendError::CatalogLoad(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    /// Iterate in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, CropProfile> {
        self.crops.iter()
    }

    pub fn as_slice(&self) -> &[CropProfile] {
        &self.crops
    }

    /// Exact lookup by crop name
    pub fn get(&self, name: &str) -> Option<&CropProfile> {
        self.by_name.get(name).map(|&idx| &self.crops[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Case-insensitive substring search over English and local names
    ///
    /// An empty query returns the whole catalog.
    pub fn search(&self, text: &str) -> Vec<&CropProfile> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return self.crops.iter().collect();
        }
        self.crops
            .iter()
            .filter(|crop| {
                crop.name.to_lowercase().contains(&needle) || crop.local_name.contains(text.trim())
            })
            .collect()
    }

    pub fn by_category(&self, category: CropCategory) -> Vec<&CropProfile> {
        self.crops.iter().filter(|crop| crop.category == category).collect()
    }
}

impl<'a> IntoIterator for &'a CropCatalog {
    type Item = &'a CropProfile;
    type IntoIter = std::slice::Iter<'a, CropProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.crops.iter()
    }
}
