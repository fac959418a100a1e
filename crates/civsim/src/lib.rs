//! Command-line front end for the civsim scoring engine
//!
//! Reads factor sets from presets, files and flags, runs them through
//! [`civsim_core::Engine`] and renders the results. No scoring logic lives
//! here.

pub mod commands;
pub mod input;
mod logging;
pub mod presets;
pub mod report;

pub use logging::init_logging;
