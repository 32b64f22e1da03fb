//! Numerical building blocks: a derivative-free minimizer and
//! Kolmogorov–Smirnov helpers.

pub mod ks;
pub mod simplex;

pub use ks::*;
pub use simplex::*;
