//! Evaluation entry points
//!
//! [`Engine`] wires the pipeline together:
//!
//! ```text
//! factors -> FactorMap -> class calculators -> crisis compounding
//!         -> fantasy effects -> redistribution -> success rate -> state label
//!         \-> events
//! ```
//!
//! An engine is immutable once built and can be shared across threads; the
//! only per-call state is the random source handed to `evaluate`.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::catalog::FactorCatalog;
use crate::classifier::{ClassifierContext, StateClassifier};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::events::EventGenerator;
use crate::factor_map::FactorMap;
use crate::model::{Factor, ScoreBreakdown, SimulationState, round_score};
use crate::random::{EntropySource, RandomSource, SeededSource};
use crate::success::ExternalPenalties;
use crate::{compounding, fantasy, prosperity, redistribution, success};

#[derive(Debug, Clone)]
pub struct Engine {
    catalog: FactorCatalog,
    config: EngineConfig,
    classifier: StateClassifier,
    events: EventGenerator,
}

impl Default for Engine {
    fn default() -> Self {
        Self::standard()
    }
}

impl Engine {
    /// Build an engine over a custom catalog and configuration
    pub fn new(catalog: FactorCatalog, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            catalog,
            config,
            classifier: StateClassifier::standard(),
            events: EventGenerator::standard(),
        })
    }

    /// The canonical model over the built-in catalog
    #[must_use]
    pub fn standard() -> Self {
        Self {
            catalog: FactorCatalog::standard(),
            config: EngineConfig::default(),
            classifier: StateClassifier::standard(),
            events: EventGenerator::standard(),
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: StateClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn with_events(mut self, events: EventGenerator) -> Self {
        self.events = events;
        self
    }

    pub fn catalog(&self) -> &FactorCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluate(&self, factors: &[Factor], rng: &mut dyn RandomSource) -> SimulationState {
        self.evaluate_with_breakdown(factors, rng).0
    }

    /// Evaluate and keep every intermediate stage
    pub fn evaluate_with_breakdown(
        &self,
        factors: &[Factor],
        rng: &mut dyn RandomSource,
    ) -> (SimulationState, ScoreBreakdown) {
        let config = &self.config;
        let map = FactorMap::build(&self.catalog, factors);

        let calculated = prosperity::calculate(config, &map);

        let multiplier = compounding::multiplier(&config.compounding, &map);
        let compounded = compounding::apply(&config.compounding, calculated.scores, multiplier);

        let effects = fantasy::compute(&map, &config.fantasy, rng);
        let after_effects = fantasy::apply(&effects, &config.fantasy, compounded);

        let outcome = redistribution::redistribute(&config.redistribution, after_effects);

        let (success_rate, penalties) = success::success_rate(
            &config.success,
            &outcome.scores,
            &map,
            ExternalPenalties {
                redistribution: outcome.penalty,
                kaiju: effects.kaiju_penalty,
                chaos: effects.chaos_penalty,
            },
        );

        let label = self.classifier.classify(&ClassifierContext {
            scores: &outcome.scores,
            factors: &map,
            effects: &effects,
            compounding: multiplier,
        });

        let events = self.events.generate(&map);

        tracing::debug!(
            success_rate,
            label = %label,
            events = events.len(),
            "evaluation complete"
        );

        let state = SimulationState {
            factors: factors.to_vec(),
            success_rate: round_score(success_rate),
            lower_class_prosperity: round_score(outcome.scores.lower),
            middle_class_stability: round_score(outcome.scores.middle),
            upper_class_wealth: round_score(outcome.scores.upper),
            current_state: label.to_string(),
            events,
        };

        let breakdown = ScoreBreakdown {
            raw_scores: calculated.raw,
            calculated: calculated.scores,
            compounding_multiplier: multiplier,
            compounded,
            effects,
            after_effects,
            redistributed: outcome.scores,
            redistribution_penalty: outcome.penalty,
            penalties,
            success_rate,
            label,
        };

        (state, breakdown)
    }

    /// Evaluate many factor sets; item `i` draws from a source seeded by
    /// `item_seed(seed, i)`, so results do not depend on scheduling.
    pub fn evaluate_batch(&self, batch: &[Vec<Factor>], seed: u64) -> Vec<SimulationState> {
        tracing::debug!(items = batch.len(), seed, "evaluating batch");

        let run = |(i, factors): (usize, &Vec<Factor>)| {
            let mut rng = SeededSource::from_seed(item_seed(seed, i));
            self.evaluate(factors, &mut rng)
        };

        #[cfg(feature = "parallel")]
        let states: Vec<SimulationState> = batch.par_iter().enumerate().map(run).collect();
        #[cfg(not(feature = "parallel"))]
        let states: Vec<SimulationState> = batch.iter().enumerate().map(run).collect();

        states
    }
}

/// Per-item seed for batch evaluation
#[must_use]
pub fn item_seed(seed: u64, index: usize) -> u64 {
    SmallRng::seed_from_u64(seed.wrapping_add(index as u64)).next_u64()
}

/// Evaluate with the standard engine and a non-reproducible random source
pub fn calculate_outcomes(factors: &[Factor]) -> SimulationState {
    Engine::standard().evaluate(factors, &mut EntropySource::new())
}

/// Evaluate with the standard engine and a seeded random source
pub fn calculate_outcomes_seeded(factors: &[Factor], seed: u64) -> SimulationState {
    Engine::standard().evaluate(factors, &mut SeededSource::from_seed(seed))
}
