//! Success rate aggregation
//!
//! A weighted base from the three class scores, minus a penalty budget, plus
//! stability bonuses. Ordinary penalties are capped so moderate trouble cannot
//! bury the score, but past the tipping point the capped budget is amplified
//! so a society under many simultaneous pressures still collapses.

use serde::{Deserialize, Serialize};

use crate::config::{DirectPenalty, SuccessConfig};
use crate::factor_map::FactorMap;
use crate::model::ids::SOCIAL_COHESION;
use crate::model::{ClassScores, SocialClass};

/// `min(cap, (value - threshold) * rate)` when `value > threshold`, else 0
#[must_use]
pub fn graduated_penalty(value: f64, threshold: f64, rate: f64, cap: f64) -> f64 {
    if value > threshold {
        ((value - threshold) * rate).min(cap)
    } else {
        0.0
    }
}

/// Penalties contributed by earlier stages
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExternalPenalties {
    pub redistribution: f64,
    pub kaiju: f64,
    pub chaos: f64,
}

/// Every term of the success-rate calculation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PenaltyBreakdown {
    pub base: f64,
    pub inequality: f64,
    pub failed_state: f64,
    pub class_floor: f64,
    /// Graduated penalty per factor, in configuration order
    pub direct: Vec<(String, f64)>,
    pub redistribution: f64,
    pub kaiju: f64,
    pub chaos: f64,
    /// Sum of every penalty above
    pub raw: f64,
    /// Multiple of the capped budget actually subtracted
    pub tipping_multiplier: f64,
    pub applied: f64,
    pub cohesion_bonus: f64,
    pub balance_bonus: f64,
    pub terminal_collapse: bool,
}

impl PenaltyBreakdown {
    #[must_use]
    pub fn bonus(&self) -> f64 {
        self.cohesion_bonus + self.balance_bonus
    }

    #[must_use]
    pub fn direct_total(&self) -> f64 {
        self.direct.iter().map(|(_, p)| p).sum()
    }
}

/// Unrounded success rate in [0, 100] plus its ledger
#[must_use]
pub fn success_rate(
    config: &SuccessConfig,
    scores: &ClassScores,
    factors: &FactorMap,
    external: ExternalPenalties,
) -> (f64, PenaltyBreakdown) {
    let mut ledger = PenaltyBreakdown {
        base: SocialClass::ALL
            .iter()
            .map(|c| scores.get(*c) * config.class_weights.get(*c))
            .sum(),
        redistribution: external.redistribution,
        kaiju: external.kaiju,
        chaos: external.chaos,
        tipping_multiplier: 1.0,
        ..PenaltyBreakdown::default()
    };

    let lower_middle_mean = scores.mean_lower_middle();
    let unequal = scores.upper > config.inequality_upper_threshold
        && lower_middle_mean < config.inequality_lower_middle_threshold;
    if unequal {
        ledger.inequality = ((scores.upper - config.inequality_upper_threshold)
            * config.inequality_rate
            + (config.inequality_lower_middle_threshold - lower_middle_mean)
                * config.inequality_rate)
            .min(config.inequality_cap);
    }

    let weakest = scores.min_lower_middle();
    let failed = weakest < config.failed_state_threshold;
    if failed {
        ledger.failed_state = ((config.failed_state_threshold - weakest)
            * config.failed_state_rate)
            .min(config.failed_state_cap);
    }

    ledger.class_floor = SocialClass::ALL
        .iter()
        .filter(|c| scores.get(**c) < config.class_floor)
        .map(|c| {
            (config.class_floor - scores.get(*c))
                * config.class_floor_weights.get(*c)
                * config.class_floor_rate
        })
        .sum();

    ledger.direct = config
        .direct_penalties
        .iter()
        .map(|p: &DirectPenalty| {
            let points = graduated_penalty(factors.get(&p.factor), p.threshold, p.rate, p.cap);
            (p.factor.clone(), points)
        })
        .collect();

    ledger.raw = ledger.inequality
        + ledger.failed_state
        + ledger.class_floor
        + ledger.direct_total()
        + ledger.redistribution
        + ledger.kaiju
        + ledger.chaos;

    let capped = ledger.raw.min(config.penalty_cap);
    if ledger.raw > config.tipping_point {
        let over = (ledger.raw - config.tipping_point) / config.tipping_range.max(f64::EPSILON);
        ledger.tipping_multiplier = 1.0 + over.min(config.tipping_max_extra);
        tracing::debug!(
            raw = ledger.raw,
            multiplier = ledger.tipping_multiplier,
            "penalty tipping point crossed"
        );
    }
    ledger.applied = capped * ledger.tipping_multiplier;

    if !failed && !unequal {
        ledger.cohesion_bonus = factors.fraction(SOCIAL_COHESION) * config.cohesion_bonus;
        let spread = scores.spread();
        if spread < config.balance_spread {
            ledger.balance_bonus =
                (config.balance_spread - spread) / config.balance_spread * config.balance_bonus;
        }
    }

    let mut rate = ledger.base - ledger.applied + ledger.bonus();
    if scores.lower < config.terminal_threshold && scores.middle < config.terminal_threshold {
        ledger.terminal_collapse = true;
        rate *= config.terminal_retention;
    }

    let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 100.0) };
    (rate, ledger)
}
