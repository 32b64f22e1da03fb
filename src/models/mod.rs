//! Continuous distribution densities.
//!
//! Densities are implemented as small, pure functions of a standardized
//! variable `z = (x - loc) / scale` and the shape parameters, so that the
//! fitting code can stay generic over the family.

pub mod density;

pub use density::*;
