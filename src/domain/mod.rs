//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - configuration enums (`Metric`, `CandidateMode`) and settings (`FitConfig`, `RunConfig`)
//! - the numeric `Sample`
//! - fit outputs (`FitResult`, `FitQuality`, `FittedParam`)

pub mod types;

pub use types::*;
