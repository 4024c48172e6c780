//! Collision probability estimation
//!
//! Converts a close-approach event into a scalar probability with an ad hoc
//! exponential decay against miss distance scaled by relative speed. This
//! is a ranking heuristic, not a rigorous Gaussian conjunction-analysis
//! probability, and should be read as such.

use super::CloseApproachEvent;

/// Scale factor applied to relative speed when forming the decay length
const VELOCITY_SCALE: f64 = 0.1;

/// Estimate the collision probability for a close-approach event
///
/// Returns exactly 1.0 when the miss distance is within the combined
/// hard-body radius (direct overlap). Otherwise decays as
/// `exp(-(distance - combined_radius) / (relative_speed * 0.1))`, clamped
/// to [0, 1]. A pair with zero relative speed and no overlap scores 0.
pub fn collision_probability(event: &CloseApproachEvent, radius1_m: f64, radius2_m: f64) -> f64 {
    let combined_radius_m = radius1_m + radius2_m;
    if event.distance_m <= combined_radius_m {
        return 1.0;
    }

    let decay_length_m = event.relative_speed_ms() * VELOCITY_SCALE;
    if decay_length_m <= 0.0 {
        return 0.0;
    }

    (-(event.distance_m - combined_radius_m) / decay_length_m)
        .exp()
        .min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::StateVector;
    use nalgebra::Vector3;
    use satkit::Instant;

    fn event(distance_m: f64, relative_speed_kms: f64) -> CloseApproachEvent {
        let epoch = Instant::from_datetime(2026, 3, 1, 0, 0, 0.0).unwrap();
        CloseApproachEvent {
            time: epoch,
            distance_m,
            norad1: 1,
            norad2: 2,
            state1: StateVector::new(
                Vector3::new(7000.0, 0.0, 0.0),
                Vector3::new(relative_speed_kms, 0.0, 0.0),
                epoch,
            ),
            state2: StateVector::new(Vector3::new(7000.0, 0.0, 0.0), Vector3::zeros(), epoch),
        }
    }

    #[test]
    fn test_overlap_is_certain() {
        let probability = collision_probability(&event(8.0, 10.0), 5.0, 5.0);
        assert_eq!(probability, 1.0);
    }

    #[test]
    fn test_near_miss_is_strictly_between_zero_and_one() {
        let probability = collision_probability(&event(500.0, 10.0), 5.0, 5.0);
        assert!(probability > 0.0);
        assert!(probability < 1.0);
    }

    #[test]
    fn test_monotonically_decreasing_with_distance() {
        let mut previous = 1.0;
        for distance_m in [20.0, 100.0, 500.0, 2000.0, 10000.0] {
            let probability = collision_probability(&event(distance_m, 10.0), 5.0, 5.0);
            assert!(probability < previous);
            previous = probability;
        }
    }

    #[test]
    fn test_zero_relative_speed_without_overlap() {
        let probability = collision_probability(&event(500.0, 0.0), 5.0, 5.0);
        assert_eq!(probability, 0.0);
    }

    #[test]
    fn test_known_decay_value() {
        // 10 km/s relative speed gives a 1000 m decay length
        let probability = collision_probability(&event(1010.0, 10.0), 5.0, 5.0);
        assert!((probability - (-1.0f64).exp()).abs() < 1e-12);
    }
}
