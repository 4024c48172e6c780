//! NASA-style power-law breakup model
//!
//! Fragment masses follow a bounded Pareto distribution, mimicking the
//! size-frequency falloff of real breakups; ejection directions are
//! isotropic and ejection speeds come from an even energy partition over a
//! notional reference mass. The statistics are a deliberate simplification,
//! not a validated breakup standard.

use std::f64::consts::PI;

use nalgebra::Vector3;
use rand::{Rng, RngCore};
use satkit::Instant;

use super::{CollisionModel, CollisionOutcome, Fragment, ObjectState};

/// Fragments generated per kilogram of combined mass
const FRAGMENTS_PER_KG: f64 = 0.1;
/// Floor on the fragment count
const MIN_FRAGMENT_COUNT: usize = 10;
/// Bounded Pareto exponent for the mass distribution
const MASS_ALPHA: f64 = 1.6;
/// Smallest fragment mass drawn (kg)
const MIN_FRAGMENT_MASS_KG: f64 = 0.001;
/// Largest fragment mass drawn (kg)
const MAX_FRAGMENT_MASS_KG: f64 = 10.0;
/// Notional reference mass for converting per-fragment energy to speed (kg)
///
/// Energy is partitioned as if every fragment weighed one gram; the
/// fragment's own sampled mass does not enter the speed formula.
const REFERENCE_MASS_KG: f64 = 0.001;
/// Assumed fragment density: aluminum (kg/m³)
const FRAGMENT_DENSITY: f64 = 2700.0;
/// Half-width of the random positional scatter around the collision point (km)
const POSITION_JITTER_KM: f64 = 0.005;

/// Default collision model: one fragment per 10 kg, power-law masses
#[derive(Debug, Default)]
pub struct NasaBreakupModel;

impl NasaBreakupModel {
    pub fn new() -> Self {
        Self
    }

    /// Inverse-CDF draw from the bounded Pareto mass distribution
    fn sample_mass(u: f64) -> f64 {
        let lo = MIN_FRAGMENT_MASS_KG.powf(1.0 - MASS_ALPHA);
        let hi = MAX_FRAGMENT_MASS_KG.powf(1.0 - MASS_ALPHA);
        (lo + u * (hi - lo)).powf(1.0 / (1.0 - MASS_ALPHA))
    }

    /// Isotropic random unit vector
    ///
    /// Ejection carries no bias toward the collision axis; the axis is
    /// reported on the outcome for consumers that want to apply one.
    fn sample_direction(rng: &mut dyn RngCore) -> Vector3<f64> {
        let theta = 2.0 * PI * rng.gen::<f64>();
        let phi = (2.0 * rng.gen::<f64>() - 1.0).acos();
        Vector3::new(
            phi.sin() * theta.cos(),
            phi.sin() * theta.sin(),
            phi.cos(),
        )
    }

    /// Diameter of an aluminum sphere with the given mass, in meters
    fn estimate_diameter_m(mass_kg: f64) -> f64 {
        2.0 * (3.0 * mass_kg / (4.0 * PI * FRAGMENT_DENSITY)).powf(1.0 / 3.0)
    }
}

impl CollisionModel for NasaBreakupModel {
    fn simulate(
        &self,
        object1: &ObjectState,
        object2: &ObjectState,
        epoch: Instant,
    ) -> CollisionOutcome {
        let total_mass_kg = object1.mass_kg + object2.mass_kg;

        let relative_velocity_kms = object1.velocity_kms - object2.velocity_kms;
        let relative_velocity_ms = relative_velocity_kms.norm() * 1000.0;
        let collision_axis = if relative_velocity_kms.norm() > 1e-12 {
            relative_velocity_kms.normalize()
        } else {
            // Degenerate equal-velocity input: no meaningful axis
            Vector3::zeros()
        };

        // Two-body impact energy is carried by the reduced mass
        let reduced_mass_kg = object1.mass_kg * object2.mass_kg / total_mass_kg;
        let energy_j = 0.5 * reduced_mass_kg * relative_velocity_ms * relative_velocity_ms;

        let collision_point_km = (object1.position_km * object1.mass_kg
            + object2.position_km * object2.mass_kg)
            / total_mass_kg;

        let fragment_count =
            ((total_mass_kg * FRAGMENTS_PER_KG).floor() as usize).max(MIN_FRAGMENT_COUNT);

        CollisionOutcome {
            epoch,
            collision_point_km,
            collision_axis,
            total_mass_kg,
            relative_velocity_ms,
            energy_j,
            fragment_count,
            object1: *object1,
            object2: *object2,
        }
    }

    fn generate_debris(&self, outcome: &CollisionOutcome, rng: &mut dyn RngCore) -> Vec<Fragment> {
        let count = outcome.fragment_count;
        let com_velocity_kms = (outcome.object1.velocity_kms * outcome.object1.mass_kg
            + outcome.object2.velocity_kms * outcome.object2.mass_kg)
            / outcome.total_mass_kg;
        let energy_per_fragment_j = outcome.energy_j / count as f64;

        // Draw count - 1 masses; the last fragment absorbs the remainder so
        // the population conserves the combined mass
        let mut masses = Vec::with_capacity(count);
        let mut remaining_kg = outcome.total_mass_kg;
        for _ in 0..count - 1 {
            let drawn_kg = Self::sample_mass(rng.gen::<f64>());
            // No single draw may consume more than half the unassigned budget
            let mass_kg = drawn_kg.min(0.5 * remaining_kg);
            remaining_kg -= mass_kg;
            masses.push(mass_kg);
        }
        masses.push(remaining_kg.max(MIN_FRAGMENT_MASS_KG));

        masses
            .iter()
            .enumerate()
            .map(|(i, &mass_kg)| {
                let direction = Self::sample_direction(rng);

                let fragment_energy_j = energy_per_fragment_j * rng.gen_range(0.5..1.5);
                let speed_ms = (2.0 * fragment_energy_j / REFERENCE_MASS_KG).sqrt();
                let velocity_kms = com_velocity_kms + direction * (speed_ms / 1000.0);

                let offset_km = rng.gen_range(-POSITION_JITTER_KM..POSITION_JITTER_KM);
                let position_km = outcome.collision_point_km + direction * offset_km;

                Fragment {
                    id: format!("frag-{:04}", i + 1),
                    mass_kg,
                    position_km,
                    velocity_kms,
                    direction,
                    diameter_m: Self::estimate_diameter_m(mass_kg),
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "nasa"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn epoch() -> Instant {
        Instant::from_datetime(2026, 3, 1, 0, 0, 0.0).unwrap()
    }

    fn state(mass_kg: f64, x_km: f64, vx_kms: f64) -> ObjectState {
        ObjectState {
            mass_kg,
            position_km: Vector3::new(x_km, 0.0, 0.0),
            velocity_kms: Vector3::new(vx_kms, 0.0, 0.0),
        }
    }

    #[test]
    fn test_known_collision_energy() {
        // Two equal 100 kg bodies at 10 km/s relative speed:
        // reduced mass 50 kg, E = 0.5 * 50 * 10000^2 = 2.5e9 J
        let model = NasaBreakupModel::new();
        let outcome = model.simulate(&state(100.0, 7000.0, 7.5), &state(100.0, 7000.0, -2.5), epoch());

        assert!((outcome.relative_velocity_ms - 10_000.0).abs() < 1e-6);
        assert!((outcome.energy_j - 2.5e9).abs() / 2.5e9 < 1e-12);
        assert_eq!(outcome.total_mass_kg, 200.0);
        assert_eq!(outcome.fragment_count, 20);
    }

    #[test]
    fn test_fragment_count_floor() {
        // 40 kg combined implies 4 fragments by the formula; floor is 10
        let model = NasaBreakupModel::new();
        let outcome = model.simulate(&state(20.0, 7000.0, 7.5), &state(20.0, 7000.0, -2.5), epoch());
        assert_eq!(outcome.fragment_count, 10);
    }

    #[test]
    fn test_collision_point_is_mass_weighted() {
        let model = NasaBreakupModel::new();
        let outcome =
            model.simulate(&state(100.0, 7000.0, 7.5), &state(300.0, 7004.0, -2.5), epoch());
        assert!((outcome.collision_point_km.x - 7003.0).abs() < 1e-9);
    }

    #[test]
    fn test_collision_axis_is_unit_along_relative_velocity() {
        let model = NasaBreakupModel::new();
        let outcome = model.simulate(&state(100.0, 7000.0, 7.5), &state(100.0, 7000.0, -2.5), epoch());
        assert!((outcome.collision_axis.norm() - 1.0).abs() < 1e-12);
        assert!((outcome.collision_axis.x - 1.0).abs() < 1e-12);

        let degenerate = model.simulate(&state(100.0, 7000.0, 7.5), &state(100.0, 7000.0, 7.5), epoch());
        assert_eq!(degenerate.collision_axis, Vector3::zeros());
    }

    #[test]
    fn test_debris_conserves_mass() {
        let model = NasaBreakupModel::new();
        let outcome =
            model.simulate(&state(250.0, 7000.0, 7.5), &state(250.0, 7000.0, -2.5), epoch());

        let mut rng = StdRng::seed_from_u64(42);
        let fragments = model.generate_debris(&outcome, &mut rng);

        assert_eq!(fragments.len(), outcome.fragment_count);
        assert!(fragments.len() >= 10);

        let total: f64 = fragments.iter().map(|f| f.mass_kg).sum();
        assert!((total - outcome.total_mass_kg).abs() / outcome.total_mass_kg < 1e-9);
    }

    #[test]
    fn test_fragment_masses_within_bounds() {
        let model = NasaBreakupModel::new();
        let outcome =
            model.simulate(&state(500.0, 7000.0, 7.5), &state(500.0, 7000.0, -2.5), epoch());

        let mut rng = StdRng::seed_from_u64(7);
        let fragments = model.generate_debris(&outcome, &mut rng);

        // All but the remainder fragment obey the draw bounds
        for fragment in &fragments[..fragments.len() - 1] {
            assert!(fragment.mass_kg >= MIN_FRAGMENT_MASS_KG);
            assert!(fragment.mass_kg <= MAX_FRAGMENT_MASS_KG);
        }
        assert!(fragments.last().unwrap().mass_kg >= MIN_FRAGMENT_MASS_KG);
    }

    #[test]
    fn test_fragment_directions_are_unit_vectors() {
        let model = NasaBreakupModel::new();
        let outcome =
            model.simulate(&state(100.0, 7000.0, 7.5), &state(100.0, 7000.0, -2.5), epoch());

        let mut rng = StdRng::seed_from_u64(3);
        let fragments = model.generate_debris(&outcome, &mut rng);

        for fragment in &fragments {
            assert!((fragment.direction.norm() - 1.0).abs() < 1e-12);
            assert!(fragment.diameter_m > 0.0);
        }
    }

    #[test]
    fn test_same_seed_reproduces_debris() {
        let model = NasaBreakupModel::new();
        let outcome =
            model.simulate(&state(100.0, 7000.0, 7.5), &state(100.0, 7000.0, -2.5), epoch());

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let debris_a = model.generate_debris(&outcome, &mut rng_a);
        let debris_b = model.generate_debris(&outcome, &mut rng_b);

        for (a, b) in debris_a.iter().zip(&debris_b) {
            assert_eq!(a.mass_kg, b.mass_kg);
            assert_eq!(a.velocity_kms, b.velocity_kms);
            assert_eq!(a.position_km, b.position_km);
        }
    }

    #[test]
    fn test_diameter_grows_with_mass() {
        let small = NasaBreakupModel::estimate_diameter_m(0.001);
        let large = NasaBreakupModel::estimate_diameter_m(10.0);
        assert!(small > 0.0);
        assert!(large > small);
    }
}
