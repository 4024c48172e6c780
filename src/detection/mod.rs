//! Close-approach detection
//!
//! # Architecture
//!
//! The detector walks a time window at a fixed step for every unordered
//! object pair and reports local minima of the pairwise distance below a
//! threshold. Pair scans are independent: each one reads only its two
//! objects' states through a shared read-only `OrbitStateProvider` and
//! writes to its own event list, so they run in parallel on rayon. The
//! merged result is re-sorted by time, which keeps the output ordering
//! independent of scheduling.
//!
//! The probability estimator turns a detected event into a scalar collision
//! probability. It is a ranking heuristic, not a rigorous conjunction
//! analysis; see `probability` for the exact formula.

mod detector;
mod probability;

pub use detector::*;
pub use probability::*;
