//! Crisis compounding
//!
//! Simultaneous severe crises are worse than the sum of their parts. When
//! enough designated factors are severe at once, every class score is divided
//! by a class-scaled multiplier, the lower class feeling it fully.

use crate::config::CompoundingConfig;
use crate::factor_map::FactorMap;
use crate::model::ClassScores;

/// Multiplier for the current factors, or 1.0 when compounding does not trigger
#[must_use]
pub fn multiplier(config: &CompoundingConfig, factors: &FactorMap) -> f64 {
    let severe: Vec<f64> = config
        .factors
        .iter()
        .map(|id| factors.get(id))
        .filter(|v| *v > config.threshold)
        .collect();

    if severe.len() < config.min_severe.max(1) {
        return 1.0;
    }

    let excess = severe.iter().sum::<f64>() - severe.len() as f64 * config.threshold;
    1.0 + excess / config.divisor
}

/// Divide each class score by `1 + (multiplier - 1) * sensitivity`, floored at 0
#[must_use]
pub fn apply(config: &CompoundingConfig, scores: ClassScores, multiplier: f64) -> ClassScores {
    if multiplier <= 1.0 {
        return scores;
    }
    tracing::debug!(multiplier, "crisis compounding triggered");
    scores.map(|class, score| {
        let divisor = 1.0 + (multiplier - 1.0) * config.sensitivity.get(class);
        (score / divisor).max(0.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FactorCatalog;
    use crate::model::Factor;
    use crate::model::ids::{PUBLIC_HEALTH_CRISIS, UNEMPLOYMENT_RATE};

    fn factors(health: f64, unemployment: f64) -> FactorMap {
        FactorMap::build(
            &FactorCatalog::standard(),
            &[
                Factor::new(PUBLIC_HEALTH_CRISIS, health),
                Factor::new(UNEMPLOYMENT_RATE, unemployment),
            ],
        )
    }

    #[test]
    fn test_single_crisis_does_not_compound() {
        let config = CompoundingConfig::default();
        assert_eq!(multiplier(&config, &factors(100.0, 10.0)), 1.0);
        assert_eq!(multiplier(&config, &factors(10.0, 100.0)), 1.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let config = CompoundingConfig::default();
        assert_eq!(multiplier(&config, &factors(50.0, 100.0)), 1.0);
        assert!(multiplier(&config, &factors(51.0, 51.0)) > 1.0);
    }

    #[test]
    fn test_multiplier_formula() {
        let config = CompoundingConfig::default();
        assert!((multiplier(&config, &factors(100.0, 100.0)) - 1.5).abs() < 1e-12);
        assert!((multiplier(&config, &factors(80.0, 70.0)) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_lower_class_feels_compounding_most() {
        let config = CompoundingConfig::default();
        let scores = apply(&config, ClassScores::new(60.0, 60.0, 60.0), 1.5);
        assert!((scores.lower - 40.0).abs() < 1e-12);
        assert!(scores.lower < scores.middle);
        assert!(scores.middle < scores.upper);
    }

    #[test]
    fn test_neutral_multiplier_is_identity() {
        let config = CompoundingConfig::default();
        let scores = ClassScores::new(12.0, 34.0, 56.0);
        assert_eq!(apply(&config, scores, 1.0), scores);
    }
}
