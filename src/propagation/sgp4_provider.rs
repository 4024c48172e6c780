//! SGP4 propagation using satkit

use std::collections::HashMap;

use nalgebra::Vector3;
use satkit::sgp4::sgp4;
use satkit::Instant;

use crate::data::ObjectRecord;

use super::{OrbitStateProvider, PropagationError, StateVector};

/// SGP4-backed state provider
///
/// Caches parsed TLEs by NORAD catalog number. States come back in the TEME
/// frame, converted from meters to kilometers. Propagation works on a copy
/// of the cached TLE per call, so the provider is shareable across the
/// detector's parallel pair scans.
pub struct Sgp4Provider {
    tles: HashMap<u32, satkit::TLE>,
}

impl Default for Sgp4Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl Sgp4Provider {
    pub fn new() -> Self {
        Self {
            tles: HashMap::new(),
        }
    }

    /// Parse and cache TLEs from catalog records
    ///
    /// Records without elements and unparseable element sets are skipped.
    pub fn load_tles<'a>(&mut self, records: impl IntoIterator<Item = &'a ObjectRecord>) {
        for record in records {
            if let Some(tle_data) = &record.tle {
                match satkit::TLE::load_2line(&tle_data.line1, &tle_data.line2) {
                    Ok(tle) => {
                        self.tles.insert(record.norad_cat_id, tle);
                    }
                    Err(e) => {
                        log::trace!("Failed to parse TLE for {}: {}", record.norad_cat_id, e);
                    }
                }
            }
        }

        log::info!("Loaded {} TLEs for propagation", self.tles.len());
    }

    /// Number of cached element sets
    pub fn tle_count(&self) -> usize {
        self.tles.len()
    }
}

impl OrbitStateProvider for Sgp4Provider {
    fn propagate(&self, norad_id: u32, epoch: &Instant) -> Result<StateVector, PropagationError> {
        let tle = self
            .tles
            .get(&norad_id)
            .ok_or(PropagationError::MissingElements { norad_id })?;

        // sgp4 updates the TLE internally, so work on a copy
        let mut tle = tle.clone();
        match sgp4(&mut tle, &[*epoch]) {
            Ok(result) => {
                // TEME frame, meters and m/s
                let pos = result.pos.column(0);
                let vel = result.vel.column(0);

                let position_km = Vector3::new(pos[0], pos[1], pos[2]) / 1000.0;
                let velocity_kms = Vector3::new(vel[0], vel[1], vel[2]) / 1000.0;

                Ok(StateVector::new(position_km, velocity_kms, *epoch))
            }
            Err(_) => Err(PropagationError::Sgp4 {
                norad_id,
                message: format!("no solution at {}", epoch),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_elements_is_an_error() {
        let provider = Sgp4Provider::new();
        let epoch = Instant::from_datetime(2026, 3, 1, 0, 0, 0.0).unwrap();

        let result = provider.propagate(42, &epoch);
        assert!(matches!(
            result,
            Err(PropagationError::MissingElements { norad_id: 42 })
        ));
    }

    #[test]
    fn test_unparseable_tle_is_skipped() {
        let mut provider = Sgp4Provider::new();
        let record = ObjectRecord {
            norad_cat_id: 1,
            name: None,
            mass_kg: None,
            tle: Some(crate::data::TleData {
                epoch: "2026-01-01".to_string(),
                line1: "garbage".to_string(),
                line2: "garbage".to_string(),
            }),
        };

        provider.load_tles([&record]);
        assert_eq!(provider.tle_count(), 0);
    }
}
