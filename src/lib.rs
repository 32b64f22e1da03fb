//! `distfit` library crate.
//!
//! The binary (`distfit`) is a thin wrapper around this library so that:
//!
//! - fitting and ranking are testable without spawning processes
//! - the engine can be embedded by other tools
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod catalog;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
