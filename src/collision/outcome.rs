//! Collision outcome and debris data types

use nalgebra::Vector3;
use satkit::Instant;

/// Mass/position/velocity triple of one object at the collision instant
#[derive(Debug, Clone, Copy)]
pub struct ObjectState {
    pub mass_kg: f64,
    pub position_km: Vector3<f64>,
    pub velocity_kms: Vector3<f64>,
}

/// Computed outcome of an assumed collision between two objects
#[derive(Debug, Clone)]
pub struct CollisionOutcome {
    /// Collision instant
    pub epoch: Instant,
    /// Mass-weighted center-of-mass position (km)
    pub collision_point_km: Vector3<f64>,
    /// Unit vector along the relative velocity; the zero vector when the
    /// relative velocity is numerically zero
    pub collision_axis: Vector3<f64>,
    /// Combined mass of both objects (kg)
    pub total_mass_kg: f64,
    /// Relative speed at impact (m/s)
    pub relative_velocity_ms: f64,
    /// Reduced-mass kinetic energy (J)
    pub energy_j: f64,
    /// Number of fragments the model will generate
    pub fragment_count: usize,
    /// First input object's state, echoed for reporting
    pub object1: ObjectState,
    /// Second input object's state, echoed for reporting
    pub object2: ObjectState,
}

/// A synthetic debris particle
#[derive(Debug, Clone)]
pub struct Fragment {
    pub id: String,
    pub mass_kg: f64,
    /// Position at the collision instant: collision point plus a small
    /// random offset (km)
    pub position_km: Vector3<f64>,
    /// Center-of-mass velocity plus the ejection kick (km/s)
    pub velocity_kms: Vector3<f64>,
    /// Unit ejection direction
    pub direction: Vector3<f64>,
    /// Estimated diameter assuming aluminum density (m)
    pub diameter_m: f64,
}

/// One {time, position, velocity} sample of a fragment trajectory
#[derive(Debug, Clone, Copy)]
pub struct TrajectorySample {
    pub time: Instant,
    pub position_km: Vector3<f64>,
    pub velocity_kms: Vector3<f64>,
}

/// A fragment with its straight-line forward propagation
///
/// Only the position changes between samples; the velocity is held constant
/// by construction. See `propagate_fragments` for the caveats.
#[derive(Debug, Clone)]
pub struct FragmentTrajectory {
    pub fragment: Fragment,
    pub samples: Vec<TrajectorySample>,
}
