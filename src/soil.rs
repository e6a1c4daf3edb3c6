//! Soil Type Classification
//!
//! Indian soil groups as used by the crop catalog and the input form.
//! Free-text labels (form values, catalog entries, API payloads) are resolved
//! once, at the boundary; scoring only compares enum values.
//!
//! Label resolution is case-insensitive and bidirectional: a label matches a
//! soil type when either string contains the other ("black soil" matches
//! `Black Soil (Regur)`, and so does "Black Soil (Regur) - deep").
//!
//! A query label resolves to a `SoilSet` holding every soil type it matches:
//! "loam" matches both `Loamy Soil` and `Sandy Loam`, and an empty label
//! matches everything. Canonical labels are tried first; aliases are only
//! consulted when no canonical label matches. Catalog entries must resolve
//! to exactly one type (`SoilType::from_label`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Soil groups recognised by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SoilType {
    /// River-deposited soils of the Indo-Gangetic plain
    Alluvial,

    /// Black cotton soil of the Deccan plateau
    BlackRegur,

    Red,

    /// Leached, iron-rich soils of high-rainfall zones
    Laterite,

    DesertArid,

    ForestMountain,

    /// Generic loam; treated as the broadly compatible default
    Loamy,

    Clayey,

    SandyLoam,

    CoastalSand,

    /// Low-fertility marginal soils
    Poor,
}

/// Label table: canonical label first, followed by accepted alternative names
const LABELS: &[(SoilType, &[&str])] = &[
    (SoilType::Alluvial, &["Alluvial Soil"]),
    (SoilType::BlackRegur, &["Black Soil (Regur)", "Black Cotton Soil"]),
    (SoilType::Red, &["Red Soil"]),
    (SoilType::Laterite, &["Laterite Soil"]),
    (SoilType::DesertArid, &["Desert / Arid Soil", "Sandy Desert Soil"]),
    (SoilType::ForestMountain, &["Forest / Mountain Soil", "Hill Soil"]),
    (SoilType::Loamy, &["Loamy Soil"]),
    (SoilType::Clayey, &["Clayey", "Clay Soil"]),
    (SoilType::SandyLoam, &["Sandy Loam"]),
    (SoilType::CoastalSand, &["Coastal Sand"]),
    (SoilType::Poor, &["Poor Soil"]),
];

/// Form answers meaning "no soil information"
const UNSPECIFIED_LABELS: &[&str] = &["unknown", "don't know", "dont know", "not sure", "none"];

impl SoilType {
    /// Resolve a label naming exactly one soil type
    ///
    /// An exact label or alias wins; otherwise the label must match a single
    /// type. Returns `None` for empty, unknown or ambiguous labels.
    pub fn from_label(label: &str) -> Option<Self> {
        let needle = label.trim().to_lowercase();
        let exact = LABELS.iter().find(|(_, names)| {
            names.iter().any(|name| name.to_lowercase() == needle)
        });
        match exact {
            Some((soil, _)) => Some(*soil),
            None => SoilSet::from_label(label).single(),
        }
    }

    /// Canonical display label (matches the form and catalog wording)
    pub fn label(&self) -> &'static str {
        self.labels()[0]
    }

    fn labels(&self) -> &'static [&'static str] {
        LABELS
            .iter()
            .find(|(soil, _)| soil == self)
            .map(|(_, names)| *names)
            .unwrap_or(&[""])
    }

    /// Get all soil types
    pub fn all() -> &'static [SoilType] {
        &[
            SoilType::Alluvial,
            SoilType::BlackRegur,
            SoilType::Red,
            SoilType::Laterite,
            SoilType::DesertArid,
            SoilType::ForestMountain,
            SoilType::Loamy,
            SoilType::Clayey,
            SoilType::SandyLoam,
            SoilType::CoastalSand,
            SoilType::Poor,
        ]
    }

    /// Soil groups offered by the input form, in display order
    pub fn form_choices() -> &'static [SoilType] {
        &[
            SoilType::Alluvial,
            SoilType::BlackRegur,
            SoilType::Red,
            SoilType::Laterite,
            SoilType::DesertArid,
            SoilType::ForestMountain,
            SoilType::Loamy,
        ]
    }

    /// Fallback policy: crops listing this soil earn partial soil credit
    /// when the queried soil is not in their list.
    pub fn is_fallback_default(&self) -> bool {
        matches!(self, SoilType::Loamy)
    }
}

/// Set of soil types a query label matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SoilSet(u16);

impl SoilSet {
    pub const EMPTY: SoilSet = SoilSet(0);

    /// Every soil type; what an empty label matches
    pub fn all() -> Self {
        SoilType::all().iter().copied().collect()
    }

    /// Resolve a free-text query label
    ///
    /// Blank labels match every type. "Don't know" style answers and labels
    /// matching nothing give the empty set.
    pub fn from_label(label: &str) -> Self {
        let needle = label.trim().to_lowercase();
        if needle.is_empty() {
            return Self::all();
        }
        if UNSPECIFIED_LABELS.contains(&needle.as_str()) {
            return Self::EMPTY;
        }

        let canonical = Self::matching(&needle, |names| &names[..1]);
        if !canonical.is_empty() {
            return canonical;
        }
        Self::matching(&needle, |names| &names[1..])
    }

    fn matching(needle: &str, pick: impl Fn(&'static [&'static str]) -> &'static [&'static str]) -> Self {
        LABELS
            .iter()
            .filter(|(_, names)| {
                pick(*names).iter().any(|name| {
                    let name = name.to_lowercase();
                    name.contains(needle) || needle.contains(&name)
                })
            })
            .map(|(soil, _)| *soil)
            .collect()
    }

    fn bit(soil: SoilType) -> u16 {
        1 << soil as u16
    }

    pub fn insert(&mut self, soil: SoilType) {
        self.0 |= Self::bit(soil);
    }

    pub fn contains(&self, soil: SoilType) -> bool {
        self.0 & Self::bit(soil) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// The only member, if there is exactly one
    pub fn single(&self) -> Option<SoilType> {
        match self.len() {
            1 => self.iter().next(),
            _ => None,
        }
    }

    /// True when any of `soils` is in the set
    pub fn matches_any(&self, soils: &[SoilType]) -> bool {
        soils.iter().any(|soil| self.contains(*soil))
    }

    /// Members in `SoilType::all()` order
    pub fn iter(&self) -> impl Iterator<Item = SoilType> + '_ {
        SoilType::all().iter().copied().filter(move |soil| self.contains(*soil))
    }
}

impl From<SoilType> for SoilSet {
    fn from(soil: SoilType) -> Self {
        SoilSet(Self::bit(soil))
    }
}

impl FromIterator<SoilType> for SoilSet {
    fn from_iter<I: IntoIterator<Item = SoilType>>(iter: I) -> Self {
        let mut set = SoilSet::EMPTY;
        for soil in iter {
            set.insert(soil);
        }
        set
    }
}

/// Label that resolves back to the same set: blank for every type,
/// "unknown" for none, comma-joined canonical labels otherwise
impl fmt::Display for SoilSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::all() {
            return Ok(());
        }
        if self.is_empty() {
            return f.write_str("unknown");
        }
        let labels: Vec<&str> = self.iter().map(|soil| soil.label()).collect();
        f.write_str(&labels.join(", "))
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for SoilType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SoilType::from_label(&value).ok_or_else(|| format!("unrecognised soil type '{}'", value))
    }
}

impl From<SoilType> for String {
    fn from(soil: SoilType) -> Self {
        soil.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_labels_round_trip() {
        for soil in SoilType::all() {
            assert_eq!(SoilType::from_label(soil.label()), Some(*soil), "{}", soil);
        }
    }

    #[test]
    fn test_partial_label_matches() {
        assert_eq!(SoilType::from_label("black soil"), Some(SoilType::BlackRegur));
        assert_eq!(SoilType::from_label("BLACK"), Some(SoilType::BlackRegur));
        assert_eq!(SoilType::from_label("  alluvial "), Some(SoilType::Alluvial));
        assert_eq!(SoilType::from_label("Laterite Soil (Kerala)"), Some(SoilType::Laterite));
        assert_eq!(SoilType::from_label("arid"), Some(SoilType::DesertArid));
        assert_eq!(SoilType::from_label("black cotton soil"), Some(SoilType::BlackRegur));
    }

    #[test]
    fn test_single_label_rejects_blank_and_ambiguous() {
        assert_eq!(SoilType::from_label(""), None);
        assert_eq!(SoilType::from_label("Don't know"), None);
        assert_eq!(SoilType::from_label("peat"), None);
        // "sand" sits inside both "Coastal Sand" and "Sandy Loam"
        assert_eq!(SoilType::from_label("sand"), None);
        assert_eq!(SoilType::from_label("Sandy Loam"), Some(SoilType::SandyLoam));
        assert_eq!(SoilType::from_label("Sandy Desert Soil"), Some(SoilType::DesertArid));
    }

    #[test]
    fn test_blank_label_matches_every_soil() {
        assert_eq!(SoilSet::from_label(""), SoilSet::all());
        assert_eq!(SoilSet::from_label("   "), SoilSet::all());
        assert_eq!(SoilSet::all().len(), SoilType::all().len());
    }

    #[test]
    fn test_unspecified_answers_match_nothing() {
        assert!(SoilSet::from_label("Don't know").is_empty());
        assert!(SoilSet::from_label("unknown").is_empty());
        assert!(SoilSet::from_label("peat").is_empty());
    }

    #[test]
    fn test_ambiguous_labels_keep_every_hit() {
        let loam = SoilSet::from_label("loam");
        assert_eq!(loam.iter().collect::<Vec<_>>(), vec![SoilType::Loamy, SoilType::SandyLoam]);

        let sand = SoilSet::from_label("sand");
        assert_eq!(sand.iter().collect::<Vec<_>>(), vec![SoilType::SandyLoam, SoilType::CoastalSand]);

        // Only canonical labels are consulted when one of them matches,
        // so "Clay Soil" does not pull Clayey into "soil"
        let soil = SoilSet::from_label("soil");
        assert_eq!(soil.len(), 8);
        assert!(!soil.contains(SoilType::Clayey));
        assert!(!soil.contains(SoilType::SandyLoam));
    }

    #[test]
    fn test_aliases_used_when_no_canonical_label_matches() {
        assert_eq!(SoilSet::from_label("black cotton soil").single(), Some(SoilType::BlackRegur));
        assert_eq!(SoilSet::from_label("hill").single(), Some(SoilType::ForestMountain));
    }

    #[test]
    fn test_set_label_resolves_back() {
        for label in ["", "unknown", "loam", "Red Soil", "sand"] {
            let set = SoilSet::from_label(label);
            assert_eq!(SoilSet::from_label(&set.to_string()), set, "{:?}", label);
        }
    }

    #[test]
    fn test_loamy_is_only_fallback() {
        let fallbacks: Vec<_> = SoilType::all()
            .iter()
            .filter(|s| s.is_fallback_default())
            .collect();
        assert_eq!(fallbacks, vec![&SoilType::Loamy]);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&SoilType::BlackRegur).unwrap();
        assert_eq!(json, "\"Black Soil (Regur)\"");

        let parsed: SoilType = serde_json::from_str("\"Red Soil\"").unwrap();
        assert_eq!(parsed, SoilType::Red);

        assert!(serde_json::from_str::<SoilType>("\"Moon Dust\"").is_err());
    }
}
