//! Cross-module tests for the scoring engine
//!
//! Tests are organized by topic:
//! - `properties` - Behavioral guarantees that hold across inputs
//! - `scenarios` - Named societies with expected outcomes
//! - `batch` - Batch evaluation and reproducibility


use crate::model::{Factor, SimulationState};
use crate::random::ConstantSource;
use crate::simulation::Engine;

/// Evaluate `overrides` on top of catalog defaults with neutral randomness
pub(crate) fn evaluate(overrides: &[(&str, f64)]) -> SimulationState {
    let factors: Vec<Factor> = overrides
        .iter()
        .map(|(id, v)| Factor::new(*id, *v))
        .collect();
    Engine::standard().evaluate(&factors, &mut ConstantSource::neutral())
}
