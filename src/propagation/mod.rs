//! Orbit state access
//!
//! The detection and collision engines never touch orbital elements
//! directly; they ask an `OrbitStateProvider` for an inertial state at an
//! instant and treat everything behind that call as a black box. The
//! concrete provider here is SGP4 via satkit, but tests substitute analytic
//! providers freely.

mod provider;
mod sgp4_provider;

pub use provider::*;
pub use sgp4_provider::*;
