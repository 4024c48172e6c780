//! Pairwise collision orchestration and fragment propagation

use rand::RngCore;
use satkit::{Duration, Instant};

use crate::data::OrbitingObject;
use crate::propagation::OrbitStateProvider;

use super::{
    CollisionOutcome, Fragment, FragmentTrajectory, ModelRegistry, ObjectState, SimulationError,
    TrajectorySample,
};

/// Result of one simulated collision
#[derive(Debug)]
pub struct CollisionResult {
    pub outcome: CollisionOutcome,
    pub fragments: Vec<Fragment>,
    /// Name of the model that produced the outcome
    pub model_name: String,
}

/// Orchestrates one pairwise collision: state lookup, model dispatch, debris
pub struct CollisionSimulator<'a> {
    provider: &'a dyn OrbitStateProvider,
    registry: &'a ModelRegistry,
}

impl<'a> CollisionSimulator<'a> {
    pub fn new(provider: &'a dyn OrbitStateProvider, registry: &'a ModelRegistry) -> Self {
        Self { provider, registry }
    }

    /// Simulate an assumed collision between two objects at a given instant
    ///
    /// Fetches both states at `epoch`, defaults unknown masses to 100 kg,
    /// resolves the model, and generates the debris field. Fails when
    /// either object cannot be propagated to `epoch`.
    pub fn simulate_collision(
        &self,
        object1: &OrbitingObject,
        object2: &OrbitingObject,
        epoch: Instant,
        model_name: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<CollisionResult, SimulationError> {
        let model = self.registry.get(model_name)?;

        let state1 = self
            .provider
            .propagate(object1.norad_id, &epoch)
            .map_err(|source| SimulationError::Propagation {
                norad_id: object1.norad_id,
                source,
            })?;
        let state2 = self
            .provider
            .propagate(object2.norad_id, &epoch)
            .map_err(|source| SimulationError::Propagation {
                norad_id: object2.norad_id,
                source,
            })?;

        let object_state1 = ObjectState {
            mass_kg: object1.effective_mass_kg(),
            position_km: state1.position_km,
            velocity_kms: state1.velocity_kms,
        };
        let object_state2 = ObjectState {
            mass_kg: object2.effective_mass_kg(),
            position_km: state2.position_km,
            velocity_kms: state2.velocity_kms,
        };

        log::debug!(
            "Simulating collision between {} and {} with model '{}'",
            object1.norad_id,
            object2.norad_id,
            model.name()
        );

        let outcome = model.simulate(&object_state1, &object_state2, epoch);
        let fragments = model.generate_debris(&outcome, rng);

        log::info!(
            "Collision at {}: {:.1} m/s relative, {:.3e} J, {} fragments",
            epoch,
            outcome.relative_velocity_ms,
            outcome.energy_j,
            fragments.len()
        );

        Ok(CollisionResult {
            outcome,
            fragments,
            model_name: model.name().to_string(),
        })
    }
}

/// Straight-line forward propagation of fragments
///
/// Samples `position(t) = position0 + velocity * (t - start)` at every
/// `step_seconds` increment from `start` to `end` inclusive; the velocity
/// is reported unchanged at every sample. This is not a true orbit and is
/// not accurate over long horizons; it exists for short-horizon
/// visualization of the immediate post-collision dispersal.
pub fn propagate_fragments(
    fragments: &[Fragment],
    start: Instant,
    end: Instant,
    step_seconds: f64,
) -> Vec<FragmentTrajectory> {
    let window_seconds = (end - start).as_seconds();
    if step_seconds <= 0.0 || window_seconds < 0.0 {
        return Vec::new();
    }
    let steps = (window_seconds / step_seconds).floor() as u64;

    fragments
        .iter()
        .map(|fragment| {
            let samples = (0..=steps)
                .map(|step| {
                    let elapsed = step as f64 * step_seconds;
                    TrajectorySample {
                        time: start + Duration::from_seconds(elapsed),
                        position_km: fragment.position_km + fragment.velocity_kms * elapsed,
                        velocity_kms: fragment.velocity_kms,
                    }
                })
                .collect();

            FragmentTrajectory {
                fragment: fragment.clone(),
                samples,
            }
        })
        .collect()
}
