//! Collision modeling
//!
//! # Architecture
//!
//! Each collision model implements the `CollisionModel` trait: `simulate`
//! turns two object states into a `CollisionOutcome`, and `generate_debris`
//! expands that outcome into a fragment population. Models are registered
//! by name in a `ModelRegistry` value that the caller constructs and passes
//! explicitly; there is no process-wide registry instance.
//!
//! The `CollisionSimulator` orchestrates one pairwise collision: it fetches
//! both object states through the `OrbitStateProvider`, resolves a model,
//! and runs it. Fragments can then be forward-propagated with
//! `propagate_fragments` for short-horizon dispersal visualization.
//!
//! # Available models
//!
//! - **NasaBreakupModel**: power-law fragment masses, isotropic ejection
//!   (the default)

mod nasa;
mod outcome;
mod registry;
mod simulator;

pub use nasa::NasaBreakupModel;
pub use outcome::{CollisionOutcome, Fragment, FragmentTrajectory, ObjectState, TrajectorySample};
pub use registry::{ModelRegistry, SimulationError};
pub use simulator::{propagate_fragments, CollisionResult, CollisionSimulator};

use rand::RngCore;
use satkit::Instant;

/// Trait for collision models
///
/// Both operations are pure apart from the supplied randomness source, and
/// models must be thread-safe so independent simulation requests can run
/// concurrently.
pub trait CollisionModel: Send + Sync {
    /// Compute the collision outcome for two object states
    ///
    /// Must derive the relative speed from the velocity difference, the
    /// kinetic energy from the reduced mass, and the collision point from
    /// the mass-weighted center of mass.
    fn simulate(
        &self,
        object1: &ObjectState,
        object2: &ObjectState,
        epoch: Instant,
    ) -> CollisionOutcome;

    /// Expand an outcome into a fragment population
    ///
    /// All randomness comes from `rng`; seed it explicitly when
    /// reproducible output is required.
    fn generate_debris(&self, outcome: &CollisionOutcome, rng: &mut dyn RngCore) -> Vec<Fragment>;

    /// Model name, used for registry lookup and logging
    fn name(&self) -> &'static str;
}
