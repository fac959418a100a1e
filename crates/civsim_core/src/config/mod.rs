//! Engine configuration
//!
//! Every numeric coefficient of the scoring pipeline lives in [`EngineConfig`].
//! `EngineConfig::default()` is the canonical model; partial YAML/JSON
//! documents deserialize over those defaults, so a tuning file only needs the
//! values it changes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::SocialClass;

mod class_model;
mod stages;

pub use class_model::{ClassModel, ClassModels, FactorWeight, Synergy};
pub use stages::{
    ClassWeights, CompoundingConfig, DirectPenalty, FantasyConfig, RedistributionConfig,
    SuccessConfig,
};

const SUM_TOLERANCE: f64 = 1e-6;

/// Logistic compression applied at calculator exit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigmoidConfig {
    pub steepness: f64,
    pub midpoint: f64,
}

impl Default for SigmoidConfig {
    fn default() -> Self {
        Self {
            // Chosen over 0.08, where a raw score ten points past the midpoint
            // already compresses to 96.
            steepness: 0.02,
            midpoint: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub sigmoid: SigmoidConfig,
    pub classes: ClassModels,
    pub compounding: CompoundingConfig,
    pub fantasy: FantasyConfig,
    pub redistribution: RedistributionConfig,
    pub success: SuccessConfig,
}

impl EngineConfig {
    /// Check the structural constraints the pipeline relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("sigmoid.steepness", self.sigmoid.steepness)?;
        finite("sigmoid.midpoint", self.sigmoid.midpoint)?;
        if self.sigmoid.steepness <= 0.0 {
            return Err(ConfigError::InvalidSteepness(self.sigmoid.steepness));
        }

        for class in SocialClass::ALL {
            self.validate_class(class)?;
        }

        let c = &self.compounding;
        finite("compounding.threshold", c.threshold)?;
        finite("compounding.divisor", c.divisor)?;
        if c.divisor <= 0.0 {
            return Err(ConfigError::InvalidDivisor(c.divisor));
        }
        weights_finite("compounding.sensitivity", &c.sensitivity)?;
        for class in SocialClass::ALL {
            let sensitivity = c.sensitivity.get(class);
            if sensitivity < 0.0 {
                return Err(ConfigError::NegativeSensitivity { class, sensitivity });
            }
        }

        let f = &self.fantasy;
        for (field, value) in [
            ("fantasy.disaster_infrastructure_damage", f.disaster_infrastructure_damage),
            ("fantasy.disaster_healthcare_strain", f.disaster_healthcare_strain),
            ("fantasy.disaster_lower_impact", f.disaster_lower_impact),
            ("fantasy.war_defense_boost", f.war_defense_boost),
            ("fantasy.war_cohesion_damage", f.war_cohesion_damage),
            ("fantasy.war_middle_impact", f.war_middle_impact),
            ("fantasy.godzilla_infrastructure_damage", f.godzilla_infrastructure_damage),
            ("fantasy.godzilla_defense_boost", f.godzilla_defense_boost),
            ("fantasy.godzilla_success_penalty", f.godzilla_success_penalty),
            ("fantasy.snap_scale", f.snap_scale),
            ("fantasy.impact_points", f.impact_points),
            ("fantasy.mana_points", f.mana_points),
            ("fantasy.chaos_success_penalty", f.chaos_success_penalty),
        ] {
            finite(field, value)?;
        }
        weights_finite("fantasy.chaos_points", &f.chaos_points)?;

        let r = &self.redistribution;
        for (field, value) in [
            ("redistribution.upper_penalty_rate", r.upper_penalty_rate),
            ("redistribution.middle_penalty_rate", r.middle_penalty_rate),
            ("redistribution.lower_penalty_rate", r.lower_penalty_rate),
        ] {
            finite(field, value)?;
        }
        let split = r.upper_from_middle + r.upper_from_lower;
        if !split.is_finite() || (split - 1.0).abs() > SUM_TOLERANCE {
            return Err(ConfigError::RedistributionSplit(split));
        }

        let s = &self.success;
        let weight_sum = s.class_weights.sum();
        if !weight_sum.is_finite() || (weight_sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(ConfigError::SuccessWeights(weight_sum));
        }
        finite("success.tipping_point", s.tipping_point)?;
        if s.tipping_point <= 0.0 {
            return Err(ConfigError::InvalidTippingPoint(s.tipping_point));
        }
        for (field, value) in [
            ("success.inequality_upper_threshold", s.inequality_upper_threshold),
            ("success.inequality_lower_middle_threshold", s.inequality_lower_middle_threshold),
            ("success.inequality_rate", s.inequality_rate),
            ("success.inequality_cap", s.inequality_cap),
            ("success.failed_state_threshold", s.failed_state_threshold),
            ("success.failed_state_rate", s.failed_state_rate),
            ("success.failed_state_cap", s.failed_state_cap),
            ("success.class_floor", s.class_floor),
            ("success.class_floor_rate", s.class_floor_rate),
            ("success.penalty_cap", s.penalty_cap),
            ("success.tipping_range", s.tipping_range),
            ("success.tipping_max_extra", s.tipping_max_extra),
            ("success.cohesion_bonus", s.cohesion_bonus),
            ("success.balance_bonus", s.balance_bonus),
            ("success.balance_spread", s.balance_spread),
            ("success.terminal_threshold", s.terminal_threshold),
            ("success.terminal_retention", s.terminal_retention),
        ] {
            finite(field, value)?;
        }
        weights_finite("success.class_floor_weights", &s.class_floor_weights)?;
        for penalty in &s.direct_penalties {
            let field = format!("success.direct_penalties[{}]", penalty.factor);
            finite(&field, penalty.threshold)?;
            finite(&field, penalty.rate)?;
            finite(&field, penalty.cap)?;
        }

        Ok(())
    }

    fn validate_class(&self, class: SocialClass) -> Result<(), ConfigError> {
        let model = self.classes.get(class);
        finite(&format!("{class:?}.base_resilience"), model.base_resilience)?;

        for w in &model.beneficial {
            finite(&format!("{class:?}.beneficial[{}]", w.factor), w.weight)?;
            if w.weight < 0.0 {
                return Err(ConfigError::NegativeBeneficialWeight {
                    class,
                    factor: w.factor.clone(),
                    weight: w.weight,
                });
            }
            check_adjustment(w)?;
        }

        for w in &model.harmful {
            finite(&format!("{class:?}.harmful[{}]", w.factor), w.weight)?;
            if !(0.0..=1.0).contains(&w.weight) {
                return Err(ConfigError::HarmfulWeightOutOfRange {
                    class,
                    factor: w.factor.clone(),
                    weight: w.weight,
                });
            }
            check_adjustment(w)?;
        }

        for s in &model.synergies {
            finite(&format!("{class:?}.synergy[{} x {}]", s.a, s.b), s.weight)?;
            if s.cap.is_nan() || s.cap < 0.0 {
                return Err(ConfigError::NegativeSynergyCap {
                    a: s.a.clone(),
                    b: s.b.clone(),
                    cap: s.cap,
                });
            }
        }

        Ok(())
    }
}

fn check_adjustment(w: &FactorWeight) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&w.dampening) {
        return Err(ConfigError::InvalidDampening {
            factor: w.factor.clone(),
            dampening: w.dampening,
        });
    }
    match w.saturation {
        Some(s) if !s.is_finite() || s <= 0.0 => Err(ConfigError::InvalidSaturation {
            factor: w.factor.clone(),
            saturation: s,
        }),
        _ => Ok(()),
    }
}

fn finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite {
            field: field.to_string(),
        })
    }
}

fn weights_finite(field: &str, weights: &ClassWeights) -> Result<(), ConfigError> {
    for class in SocialClass::ALL {
        finite(&format!("{field}.{class:?}"), weights.get(class))?;
    }
    Ok(())
}
