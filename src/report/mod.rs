//! Reporting utilities: descriptive statistics and formatted terminal output.

pub mod describe;
pub mod format;

pub use describe::*;
pub use format::*;
