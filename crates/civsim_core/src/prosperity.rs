//! Class prosperity calculators
//!
//! One table-driven calculator serves all three classes:
//!
//! 1. start from the class's base resilience
//! 2. scale by `1 + v/100 * w` for every beneficial factor
//! 3. scale by `max(0, 1 - v/100 * w)` for every harmful factor
//! 4. add each capped synergy `min(cap, a * b / 100 * w)`
//! 5. compress through the logistic and clamp to [0, 100]
//!
//! The multiplicative pass keeps factor effects interacting: a harmful shock
//! removes a share of whatever prosperity the class has, so the same shock
//! costs a class more where its weight is larger.

use crate::config::{ClassModel, EngineConfig, FactorWeight, SigmoidConfig, Synergy};
use crate::factor_map::FactorMap;
use crate::model::{ClassScores, SocialClass};

/// `100 / (1 + e^(-k * (x - midpoint) * 4))`
#[must_use]
pub fn sigmoid(x: f64, config: &SigmoidConfig) -> f64 {
    100.0 / (1.0 + (-config.steepness * (x - config.midpoint) * 4.0).exp())
}

/// `100 * (1 - e^(-v / scale))`: early increments count the most
#[must_use]
pub fn diminishing_returns(value: f64, scale: f64) -> f64 {
    100.0 * (1.0 - (-value / scale).exp())
}

/// `min(cap, a * b / 100 * weight)`
#[must_use]
pub fn synergy_bonus(a: f64, b: f64, weight: f64, cap: f64) -> f64 {
    (a * b / 100.0 * weight).min(cap)
}

/// Effective 0-100 input for a weighted factor after saturation and dampening
fn effective_value(weight: &FactorWeight, factors: &FactorMap) -> f64 {
    let mut value = factors.get(&weight.factor);
    if let Some(scale) = weight.saturation {
        value = diminishing_returns(value, scale);
    }
    if let Some(dampener) = &weight.dampened_by {
        value *= 1.0 - factors.fraction(dampener) * weight.dampening;
    }
    value
}

/// Score before sigmoid compression
#[must_use]
pub fn raw_score(model: &ClassModel, factors: &FactorMap) -> f64 {
    let mut score = model.base_resilience;

    for w in &model.beneficial {
        score *= 1.0 + effective_value(w, factors) / 100.0 * w.weight;
    }
    for w in &model.harmful {
        score *= (1.0 - effective_value(w, factors) / 100.0 * w.weight).max(0.0);
    }
    score + model.synergies.iter().map(|s| synergy(s, factors)).sum::<f64>()
}

fn synergy(s: &Synergy, factors: &FactorMap) -> f64 {
    synergy_bonus(factors.get(&s.a), factors.get(&s.b), s.weight, s.cap)
}

/// Final calculator output in [0, 100]
#[must_use]
pub fn class_score(model: &ClassModel, sigmoid_config: &SigmoidConfig, factors: &FactorMap) -> f64 {
    compress(raw_score(model, factors), sigmoid_config)
}

fn compress(raw: f64, config: &SigmoidConfig) -> f64 {
    let score = sigmoid(raw, config);
    if score.is_nan() { 0.0 } else { score.clamp(0.0, 100.0) }
}

/// Raw and compressed scores for all three classes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatedScores {
    pub raw: ClassScores,
    pub scores: ClassScores,
}

#[must_use]
pub fn calculate(config: &EngineConfig, factors: &FactorMap) -> CalculatedScores {
    let raw = ClassScores::default().map(|class, _| raw_score(config.classes.get(class), factors));
    let scores = raw.map(|_, r| compress(r, &config.sigmoid));
    tracing::trace!(
        lower = scores.get(SocialClass::Lower),
        middle = scores.get(SocialClass::Middle),
        upper = scores.get(SocialClass::Upper),
        "class calculators"
    );
    CalculatedScores { raw, scores }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FactorCatalog;
    use crate::model::Factor;
    use crate::model::ids::*;

    fn map(overrides: &[(&str, f64)]) -> FactorMap {
        let factors: Vec<Factor> = overrides.iter().map(|(id, v)| Factor::new(*id, *v)).collect();
        FactorMap::build(&FactorCatalog::standard(), &factors)
    }

    #[test]
    fn test_sigmoid_midpoint_and_bounds() {
        let config = SigmoidConfig::default();
        assert!((sigmoid(50.0, &config) - 50.0).abs() < 1e-12);
        assert!(sigmoid(1_000.0, &config) <= 100.0);
        assert!(sigmoid(-1_000.0, &config) >= 0.0);
        assert!(sigmoid(60.0, &config) > sigmoid(55.0, &config));
    }

    #[test]
    fn test_diminishing_returns_is_concave() {
        let first = diminishing_returns(20.0, 40.0) - diminishing_returns(0.0, 40.0);
        let last = diminishing_returns(100.0, 40.0) - diminishing_returns(80.0, 40.0);
        assert!(first > last);
        assert_eq!(diminishing_returns(0.0, 40.0), 0.0);
        assert!(diminishing_returns(100.0, 40.0) < 100.0);
    }

    #[test]
    fn test_synergy_is_capped() {
        assert!((synergy_bonus(50.0, 50.0, 0.12, 10.0) - 3.0).abs() < 1e-12);
        assert_eq!(synergy_bonus(100.0, 100.0, 0.5, 10.0), 10.0);
    }

    #[test]
    fn test_harmful_multiplier_never_flips_sign() {
        let mut model = ClassModel::standard_lower();
        model.harmful = vec![FactorWeight::new(CORRUPTION, 1.0)];
        model.synergies.clear();
        let raw = raw_score(&model, &map(&[(CORRUPTION, 100.0)]));
        assert_eq!(raw, 0.0);
    }

    #[test]
    fn test_corruption_dampens_government_aid() {
        let model = ClassModel::standard_lower();
        let clean = raw_score(&model, &map(&[(CORRUPTION, 0.0), (GOVERNMENT_AID, 80.0)]));
        let mut only_aid = model.clone();
        only_aid.harmful.retain(|w| w.factor != CORRUPTION);
        let clean_no_harm = raw_score(&only_aid, &map(&[(CORRUPTION, 0.0), (GOVERNMENT_AID, 80.0)]));
        let dirty_no_harm =
            raw_score(&only_aid, &map(&[(CORRUPTION, 100.0), (GOVERNMENT_AID, 80.0)]));
        assert_eq!(clean, clean_no_harm);
        assert!(dirty_no_harm < clean_no_harm);
    }

    #[test]
    fn test_dampening_strength_comes_from_config() {
        let mut model = ClassModel::standard_lower();
        model.harmful.retain(|w| w.factor != CORRUPTION);
        let clean = map(&[(CORRUPTION, 0.0), (GOVERNMENT_AID, 80.0)]);
        let dirty = map(&[(CORRUPTION, 100.0), (GOVERNMENT_AID, 80.0)]);

        let mut undamped = model.clone();
        for w in undamped.beneficial.iter_mut() {
            w.dampening = 0.0;
        }
        assert_eq!(raw_score(&undamped, &dirty), raw_score(&undamped, &clean));

        let mut fully_damped = model.clone();
        for w in fully_damped.beneficial.iter_mut() {
            w.dampening = 1.0;
        }
        assert!(raw_score(&fully_damped, &dirty) < raw_score(&model, &dirty));
    }

    #[test]
    fn test_default_scores_are_moderate() {
        let calculated = calculate(&EngineConfig::default(), &map(&[]));
        for class in SocialClass::ALL {
            let score = calculated.scores.get(class);
            assert!((40.0..95.0).contains(&score), "{class:?} = {score}");
        }
    }

    #[test]
    fn test_health_crisis_hits_lower_class_hardest() {
        let config = EngineConfig::default();
        let before = calculate(&config, &map(&[])).scores;
        let after = calculate(&config, &map(&[(PUBLIC_HEALTH_CRISIS, 30.0)])).scores;
        let lower_drop = before.lower - after.lower;
        let upper_drop = before.upper - after.upper;
        assert!(lower_drop > upper_drop);
        assert!(upper_drop >= 0.0);
    }

    #[test]
    fn test_automation_widens_the_gap() {
        let config = EngineConfig::default();
        let scores = calculate(&config, &map(&[(AUTOMATION_LEVEL, 100.0)])).scores;
        assert!(scores.upper > scores.lower);
    }

    #[test]
    fn test_perfect_conditions_stay_in_range() {
        let config = EngineConfig::default();
        let best: Vec<(&str, f64)> = config
            .classes
            .lower
            .beneficial
            .iter()
            .chain(&config.classes.middle.beneficial)
            .chain(&config.classes.upper.beneficial)
            .map(|w| (w.factor.as_str(), 100.0))
            .collect();
        let scores = calculate(&config, &map(&best)).scores;
        for class in SocialClass::ALL {
            assert!((0.0..=100.0).contains(&scores.get(class)));
        }
    }
}
