//! Societal outcome scoring engine
//!
//! This crate turns a set of named societal factors (each a 0-100 intensity)
//! into per-class prosperity scores, a composite success rate, a qualitative
//! state label and a list of narrative events. It supports:
//! - Table-driven class calculators with synergies, diminishing returns and
//!   sigmoid compression
//! - Crisis compounding and cross-class deficit redistribution
//! - Fantasy effects behind an injectable, seedable random source
//! - An ordered state classification table and threshold-driven events
//! - Named presets and parallel batch evaluation
//!
//! # Example
//!
//! ```
//! use civsim_core::model::{Factor, ids};
//! use civsim_core::random::SeededSource;
//! use civsim_core::Engine;
//!
//! let engine = Engine::standard();
//! let state = engine.evaluate(
//!     &[Factor::new(ids::CORRUPTION, 80.0)],
//!     &mut SeededSource::from_seed(42),
//! );
//! assert!(state.success_rate <= 100);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Pipeline stages
// ============================================================================

pub mod classifier;
pub mod compounding;
pub mod events;
pub mod factor_map;
pub mod fantasy;
pub mod prosperity;
pub mod redistribution;
pub mod simulation;
pub mod success;

// ============================================================================
// Data and configuration
// ============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod presets;
pub mod random;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use catalog::FactorCatalog;
pub use config::EngineConfig;
pub use error::{ConfigError, PresetError};
pub use model::{Factor, SimulationState, StateLabel};
pub use presets::{Preset, PresetCatalog, apply_preset};
pub use simulation::{Engine, calculate_outcomes, calculate_outcomes_seeded};
