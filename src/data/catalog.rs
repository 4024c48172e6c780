//! Catalog data structures consumed by the engine

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mass assumed when the catalog carries no estimate (kg)
pub const DEFAULT_MASS_KG: f64 = 100.0;

/// Root structure of a catalog JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub generated_at: String,
    pub objects: HashMap<String, ObjectRecord>,
}

/// A single catalog entry (satellite, debris, rocket body, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub norad_cat_id: u32,
    pub name: Option<String>,
    /// Mass estimate in kilograms, when the source catalog provides one
    pub mass_kg: Option<f64>,
    pub tle: Option<TleData>,
}

/// Two-Line Element set data for orbit propagation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TleData {
    pub epoch: String,
    pub line1: String,
    pub line2: String,
}

/// An object participating in detection or collision simulation
///
/// Immutable once constructed. The orbital elements themselves stay behind
/// the `OrbitStateProvider`, keyed by catalog number.
#[derive(Debug, Clone)]
pub struct OrbitingObject {
    pub norad_id: u32,
    pub name: String,
    pub mass_kg: Option<f64>,
}

impl OrbitingObject {
    /// Mass to use in collision computations, defaulting unknown masses
    pub fn effective_mass_kg(&self) -> f64 {
        self.mass_kg.unwrap_or(DEFAULT_MASS_KG)
    }
}

impl ObjectRecord {
    pub fn has_tle(&self) -> bool {
        self.tle.is_some()
    }

    pub fn to_orbiting_object(&self) -> OrbitingObject {
        OrbitingObject {
            norad_id: self.norad_cat_id,
            name: self
                .name
                .clone()
                .unwrap_or_else(|| format!("OBJECT {}", self.norad_cat_id)),
            mass_kg: self.mass_kg,
        }
    }
}

impl CatalogFile {
    /// Records that carry orbital elements, ordered by catalog number
    ///
    /// The ordering fixes the pair enumeration order of the detector, which
    /// in turn fixes the tie-break for simultaneous events.
    pub fn records_with_tle(&self) -> Vec<&ObjectRecord> {
        let mut records: Vec<&ObjectRecord> =
            self.objects.values().filter(|r| r.has_tle()).collect();
        records.sort_by_key(|r| r.norad_cat_id);
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(norad: u32, with_tle: bool) -> ObjectRecord {
        ObjectRecord {
            norad_cat_id: norad,
            name: None,
            mass_kg: None,
            tle: with_tle.then(|| TleData {
                epoch: "2026-01-01".to_string(),
                line1: "1".to_string(),
                line2: "2".to_string(),
            }),
        }
    }

    #[test]
    fn test_records_with_tle_sorted_and_filtered() {
        let mut objects = HashMap::new();
        objects.insert("30000".to_string(), record(30000, true));
        objects.insert("10000".to_string(), record(10000, true));
        objects.insert("20000".to_string(), record(20000, false));

        let catalog = CatalogFile {
            generated_at: "2026-08-01".to_string(),
            objects,
        };

        let records = catalog.records_with_tle();
        let ids: Vec<u32> = records.iter().map(|r| r.norad_cat_id).collect();
        assert_eq!(ids, vec![10000, 30000]);
    }

    #[test]
    fn test_effective_mass_defaults() {
        let unknown = OrbitingObject {
            norad_id: 1,
            name: "A".to_string(),
            mass_kg: None,
        };
        let known = OrbitingObject {
            norad_id: 2,
            name: "B".to_string(),
            mass_kg: Some(950.0),
        };

        assert_eq!(unknown.effective_mass_kg(), DEFAULT_MASS_KG);
        assert_eq!(known.effective_mass_kg(), 950.0);
    }
}
