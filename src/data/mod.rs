//! Object catalog input
//!
//! Catalog fetching, parsing, and caching of orbital elements belong to an
//! external data layer; this module only consumes its JSON output and turns
//! records into the objects the detection and collision engines operate on.

mod catalog;
mod loader;

pub use catalog::*;
pub use loader::*;
