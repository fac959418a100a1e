//! Negative-score redistribution
//!
//! After fantasy effects a class may sit below zero. Deficits are absorbed by
//! the other classes, upper first, and every deficit leaves a penalty that
//! the success-rate aggregator adds to its penalty sum.

use crate::config::RedistributionConfig;
use crate::model::ClassScores;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedistributionOutcome {
    /// All three in [0, 100]
    pub scores: ClassScores,
    /// Success-rate penalty points
    pub penalty: f64,
}

#[must_use]
pub fn redistribute(config: &RedistributionConfig, scores: ClassScores) -> RedistributionOutcome {
    let ClassScores {
        mut lower,
        mut middle,
        mut upper,
    } = scores;
    let mut penalty = 0.0;

    if upper < 0.0 {
        let deficit = -upper;
        let from_middle = (deficit * config.upper_from_middle).min(middle.max(0.0));
        let from_lower = (deficit * config.upper_from_lower).min(lower.max(0.0));
        upper += from_middle + from_lower;
        middle -= from_middle;
        lower -= from_lower;
        penalty += deficit * config.upper_penalty_rate;
        tracing::debug!(deficit, from_middle, from_lower, "upper class deficit absorbed");
    }

    if middle < 0.0 {
        let deficit = -middle;
        let from_lower = deficit.min(lower.max(0.0));
        middle += from_lower;
        lower -= from_lower;
        penalty += deficit * config.middle_penalty_rate;
        tracing::debug!(deficit, from_lower, "middle class deficit absorbed");
    }

    if lower < 0.0 {
        let deficit = -lower;
        penalty += deficit * config.lower_penalty_rate;
        lower = 0.0;
        tracing::debug!(deficit, "lower class deficit absorbed");
    }

    RedistributionOutcome {
        scores: ClassScores::new(lower, middle, upper).clamped(),
        penalty,
    }
}
