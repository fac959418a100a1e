//! Coefficients for the stages after the class calculators

use serde::{Deserialize, Serialize};

use crate::model::SocialClass;
use crate::model::ids::*;

/// One coefficient per class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassWeights {
    pub lower: f64,
    pub middle: f64,
    pub upper: f64,
}

impl ClassWeights {
    #[must_use]
    pub const fn new(lower: f64, middle: f64, upper: f64) -> Self {
        Self {
            lower,
            middle,
            upper,
        }
    }

    #[must_use]
    pub fn get(&self, class: SocialClass) -> f64 {
        match class {
            SocialClass::Lower => self.lower,
            SocialClass::Middle => self.middle,
            SocialClass::Upper => self.upper,
        }
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.lower + self.middle + self.upper
    }
}

// ============================================================================
// Crisis compounding
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompoundingConfig {
    /// Factors whose simultaneous severity compounds
    pub factors: Vec<String>,
    /// A factor counts as severe strictly above this value
    pub threshold: f64,
    /// How many severe factors trigger compounding
    pub min_severe: usize,
    /// `multiplier = 1 + (sum - count * threshold) / divisor`
    pub divisor: f64,
    /// Share of the excess multiplier each class feels
    pub sensitivity: ClassWeights,
}

impl Default for CompoundingConfig {
    fn default() -> Self {
        Self {
            factors: vec![PUBLIC_HEALTH_CRISIS.to_string(), UNEMPLOYMENT_RATE.to_string()],
            threshold: 50.0,
            min_severe: 2,
            divisor: 200.0,
            sensitivity: ClassWeights::new(1.0, 0.8, 0.4),
        }
    }
}

// ============================================================================
// Fantasy effects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FantasyConfig {
    pub disaster_infrastructure_damage: f64,
    pub disaster_healthcare_strain: f64,
    pub disaster_lower_impact: f64,
    pub war_defense_boost: f64,
    pub war_cohesion_damage: f64,
    pub war_middle_impact: f64,
    pub godzilla_infrastructure_damage: f64,
    pub godzilla_defense_boost: f64,
    /// Fraction of the rampage that feeds the success penalty
    pub godzilla_success_penalty: f64,
    /// Population multiplier when the snap fires
    pub snap_scale: f64,
    /// Class points lost per unit of lower/middle impact
    pub impact_points: f64,
    /// Upper-class points per unit of mana effect
    pub mana_points: f64,
    /// Class points removed per unit of chaos intensity
    pub chaos_points: ClassWeights,
    /// Success penalty points per unit of chaos intensity
    pub chaos_success_penalty: f64,
}

impl Default for FantasyConfig {
    fn default() -> Self {
        Self {
            disaster_infrastructure_damage: 0.7,
            disaster_healthcare_strain: 0.5,
            disaster_lower_impact: 0.8,
            war_defense_boost: 0.6,
            war_cohesion_damage: 0.8,
            war_middle_impact: 0.7,
            godzilla_infrastructure_damage: 0.6,
            godzilla_defense_boost: 0.4,
            godzilla_success_penalty: 0.3,
            snap_scale: 0.5,
            impact_points: 25.0,
            mana_points: 20.0,
            chaos_points: ClassWeights::new(40.0, 30.0, 15.0),
            chaos_success_penalty: 30.0,
        }
    }
}

// ============================================================================
// Redistribution
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedistributionConfig {
    /// Share of an upper-class deficit absorbed by the middle class
    pub upper_from_middle: f64,
    /// Share of an upper-class deficit absorbed by the lower class
    pub upper_from_lower: f64,
    pub upper_penalty_rate: f64,
    pub middle_penalty_rate: f64,
    pub lower_penalty_rate: f64,
}

impl Default for RedistributionConfig {
    fn default() -> Self {
        Self {
            upper_from_middle: 0.7,
            upper_from_lower: 0.3,
            upper_penalty_rate: 0.1,
            middle_penalty_rate: 0.15,
            lower_penalty_rate: 0.2,
        }
    }
}

// ============================================================================
// Success rate
// ============================================================================

/// Graduated penalty on a single factor: `min(cap, (v - threshold) * rate)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectPenalty {
    pub factor: String,
    pub threshold: f64,
    pub rate: f64,
    #[serde(default = "default_direct_cap")]
    pub cap: f64,
}

fn default_direct_cap() -> f64 {
    20.0
}

impl DirectPenalty {
    pub fn new(factor: &str, threshold: f64, rate: f64) -> Self {
        Self {
            factor: factor.to_string(),
            threshold,
            rate,
            cap: default_direct_cap(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessConfig {
    pub class_weights: ClassWeights,

    pub inequality_upper_threshold: f64,
    pub inequality_lower_middle_threshold: f64,
    pub inequality_rate: f64,
    pub inequality_cap: f64,

    pub failed_state_threshold: f64,
    pub failed_state_rate: f64,
    pub failed_state_cap: f64,

    pub class_floor: f64,
    pub class_floor_rate: f64,
    pub class_floor_weights: ClassWeights,

    pub direct_penalties: Vec<DirectPenalty>,

    /// Budget the ordinary penalty sum is capped to
    pub penalty_cap: f64,
    /// Raw penalty sum past which the capped budget is amplified
    pub tipping_point: f64,
    /// Raw penalty distance over which amplification ramps to its maximum
    pub tipping_range: f64,
    /// Largest extra multiple of the capped budget past the tipping point
    pub tipping_max_extra: f64,

    pub cohesion_bonus: f64,
    pub balance_bonus: f64,
    pub balance_spread: f64,

    /// Lower and middle both below this collapse the rate
    pub terminal_threshold: f64,
    /// Share of the rate retained on terminal collapse
    pub terminal_retention: f64,
}

impl Default for SuccessConfig {
    fn default() -> Self {
        Self {
            class_weights: ClassWeights::new(0.40, 0.35, 0.25),
            inequality_upper_threshold: 70.0,
            inequality_lower_middle_threshold: 40.0,
            inequality_rate: 0.5,
            inequality_cap: 25.0,
            failed_state_threshold: 20.0,
            failed_state_rate: 1.5,
            failed_state_cap: 30.0,
            class_floor: 30.0,
            class_floor_rate: 0.5,
            class_floor_weights: ClassWeights::new(1.5, 1.0, 0.5),
            direct_penalties: vec![
                DirectPenalty::new(CORRUPTION, 40.0, 0.5),
                DirectPenalty::new(UNEMPLOYMENT_RATE, 30.0, 0.4),
                DirectPenalty::new(HOUSING_COST, 60.0, 0.3),
                DirectPenalty::new(DOMESTIC_WAR_RISK, 40.0, 0.5),
                DirectPenalty::new(CURRENCY_INFLATION, 50.0, 0.4),
                DirectPenalty::new(POLICING_DEFICIENCY, 50.0, 0.3),
            ],
            penalty_cap: 60.0,
            tipping_point: 150.0,
            tipping_range: 100.0,
            tipping_max_extra: 1.0,
            cohesion_bonus: 8.0,
            balance_bonus: 5.0,
            balance_spread: 20.0,
            terminal_threshold: 10.0,
            terminal_retention: 0.1,
        }
    }
}
