//! Input/output helpers.
//!
//! - CSV ingest + column typing (`ingest`)
//! - ranking export to CSV (`export`)
//! - best-fit JSON read/write (`best`)

pub mod best;
pub mod export;
pub mod ingest;

pub use best::*;
pub use export::*;
pub use ingest::*;
