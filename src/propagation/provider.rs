//! Provider trait and state vector types

use nalgebra::Vector3;
use satkit::Instant;

/// Inertial-frame state of an object at a specific instant
///
/// Positions are in kilometers, velocities in km/s. A `StateVector` is a
/// value: created fresh on every propagation call, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct StateVector {
    pub position_km: Vector3<f64>,
    pub velocity_kms: Vector3<f64>,
    pub epoch: Instant,
}

impl StateVector {
    pub fn new(position_km: Vector3<f64>, velocity_kms: Vector3<f64>, epoch: Instant) -> Self {
        Self {
            position_km,
            velocity_kms,
            epoch,
        }
    }

    /// Euclidean distance to another state, in kilometers
    pub fn distance_km(&self, other: &StateVector) -> f64 {
        (self.position_km - other.position_km).norm()
    }

    /// Relative speed with respect to another state, in m/s
    pub fn relative_speed_ms(&self, other: &StateVector) -> f64 {
        (self.velocity_kms - other.velocity_kms).norm() * 1000.0
    }
}

/// Orbit state computation failures
///
/// Recoverable per-sample during detection (the sample is skipped), fatal
/// for a single collision simulation.
#[derive(Debug, Clone)]
pub enum PropagationError {
    /// No orbital elements are loaded for the requested object
    MissingElements { norad_id: u32 },

    /// SGP4 could not produce a state at the requested epoch
    /// (e.g. decayed orbit, unsupported regime, stale elements)
    Sgp4 { norad_id: u32, message: String },
}

impl std::fmt::Display for PropagationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingElements { norad_id } => {
                write!(f, "No orbital elements for object {}", norad_id)
            }
            Self::Sgp4 { norad_id, message } => {
                write!(f, "SGP4 failed for object {}: {}", norad_id, message)
            }
        }
    }
}

impl std::error::Error for PropagationError {}

/// Position/velocity source for orbiting objects
///
/// Implementations own the per-object orbital element handles; callers
/// refer to objects by catalog number only. Implementations must be
/// thread-safe: the detector queries states from parallel pair scans.
pub trait OrbitStateProvider: Send + Sync {
    /// Compute the inertial state of an object at the given epoch
    fn propagate(&self, norad_id: u32, epoch: &Instant) -> Result<StateVector, PropagationError>;
}
