//! Distribution fitting orchestration.
//!
//! Responsibilities:
//!
//! - resolve the candidate set (common list or a custom selection)
//! - build the empirical histogram
//! - estimate each candidate's parameters by maximum likelihood (parallel)
//! - score and rank the survivors by the configured metric

pub mod candidates;
pub mod engine;
pub mod histogram;
pub mod mle;
pub mod ranking;

pub use candidates::*;
pub use engine::*;
pub use histogram::*;
pub use mle::*;
pub use ranking::*;
