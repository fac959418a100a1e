//! Per-class weight tables for the prosperity calculators
//!
//! Each class starts from a base resilience and is pushed around by
//! multiplicative factor adjustments and additive synergy terms. The asymmetry
//! between the three tables is deliberate: shocks such as a public health
//! crisis bite the lower class hardest, while inequality and corruption feed
//! upper-class wealth.

use serde::{Deserialize, Serialize};

use crate::model::SocialClass;
use crate::model::ids::*;

fn default_synergy_cap() -> f64 {
    10.0
}

fn default_dampening() -> f64 {
    0.5
}

/// One multiplicative adjustment in a class calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorWeight {
    pub factor: String,
    pub weight: f64,
    /// Diminishing-returns scale applied to the input before weighting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    /// Factor that leaks away part of this one's benefit (e.g. corruption on aid)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dampened_by: Option<String>,
    /// Share of the benefit lost when the dampener is at 100
    #[serde(default = "default_dampening")]
    pub dampening: f64,
}

impl FactorWeight {
    pub fn new(factor: &str, weight: f64) -> Self {
        Self {
            factor: factor.to_string(),
            weight,
            saturation: None,
            dampened_by: None,
            dampening: default_dampening(),
        }
    }

    #[must_use]
    pub fn saturating(mut self, scale: f64) -> Self {
        self.saturation = Some(scale);
        self
    }

    #[must_use]
    pub fn dampened_by(mut self, factor: &str) -> Self {
        self.dampened_by = Some(factor.to_string());
        self
    }
}

/// Cross-factor bonus `min(cap, a * b / 100 * weight)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synergy {
    pub a: String,
    pub b: String,
    pub weight: f64,
    #[serde(default = "default_synergy_cap")]
    pub cap: f64,
}

impl Synergy {
    pub fn new(a: &str, b: &str, weight: f64) -> Self {
        Self {
            a: a.to_string(),
            b: b.to_string(),
            weight,
            cap: default_synergy_cap(),
        }
    }
}

/// Weight table for a single class calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassModel {
    pub base_resilience: f64,
    #[serde(default)]
    pub beneficial: Vec<FactorWeight>,
    #[serde(default)]
    pub harmful: Vec<FactorWeight>,
    #[serde(default)]
    pub synergies: Vec<Synergy>,
}

impl ClassModel {
    #[must_use]
    pub fn standard_lower() -> Self {
        Self {
            base_resilience: 50.0,
            beneficial: vec![
                FactorWeight::new(GOVERNMENT_AID, 0.25).dampened_by(CORRUPTION),
                FactorWeight::new(HEALTHCARE, 0.3).saturating(40.0),
                FactorWeight::new(EDUCATION, 0.25).saturating(50.0),
                FactorWeight::new(INFRASTRUCTURE, 0.15),
                FactorWeight::new(DOMESTIC_MANUFACTURING, 0.2),
                FactorWeight::new(ENVIRONMENTAL_PROTECTION, 0.05),
                FactorWeight::new(SOCIAL_COHESION, 0.1),
                FactorWeight::new(IMMIGRATION_RATE, 0.05),
            ],
            harmful: vec![
                FactorWeight::new(PUBLIC_HEALTH_CRISIS, 0.4),
                FactorWeight::new(UNEMPLOYMENT_RATE, 0.35),
                FactorWeight::new(ECONOMIC_INEQUALITY, 0.3),
                FactorWeight::new(CORRUPTION, 0.3),
                FactorWeight::new(CURRENCY_INFLATION, 0.25),
                FactorWeight::new(HOUSING_COST, 0.2),
                FactorWeight::new(ENERGY_COST, 0.15),
                FactorWeight::new(POLICING_DEFICIENCY, 0.15),
                FactorWeight::new(DOMESTIC_WAR_RISK, 0.2),
                FactorWeight::new(NATURAL_DISASTER_FREQUENCY, 0.15),
                FactorWeight::new(CHILD_LABOR, 0.3),
                FactorWeight::new(AUTOMATION_LEVEL, 0.3),
                FactorWeight::new(SINGLE_PARENT_HOUSEHOLD, 0.1),
                FactorWeight::new(ONE_CHILD_POLICY, 0.1),
                FactorWeight::new(CLOSED_SOCIETY, 0.1),
                FactorWeight::new(PUBLIC_DEBT, 0.1),
            ],
            synergies: vec![
                Synergy::new(HEALTHCARE, EDUCATION, 0.12),
                Synergy::new(INFRASTRUCTURE, HEALTHCARE, 0.05),
            ],
        }
    }

    #[must_use]
    pub fn standard_middle() -> Self {
        Self {
            base_resilience: 45.0,
            beneficial: vec![
                FactorWeight::new(EDUCATION, 0.3).saturating(50.0),
                FactorWeight::new(HEALTHCARE, 0.2).saturating(40.0),
                FactorWeight::new(INFRASTRUCTURE, 0.2),
                FactorWeight::new(RESEARCH_DEVELOPMENT, 0.15).saturating(60.0),
                FactorWeight::new(MEDIA_FREEDOM, 0.1),
                FactorWeight::new(DOMESTIC_MANUFACTURING, 0.15),
                FactorWeight::new(SOCIAL_COHESION, 0.1),
                FactorWeight::new(GENDER_EQUALITY, 0.05),
                FactorWeight::new(TECHNOLOGICAL_ADOPTION, 0.1),
                FactorWeight::new(IMMIGRATION_RATE, 0.05),
            ],
            harmful: vec![
                FactorWeight::new(PUBLIC_HEALTH_CRISIS, 0.3),
                FactorWeight::new(UNEMPLOYMENT_RATE, 0.25),
                FactorWeight::new(ECONOMIC_INEQUALITY, 0.2),
                FactorWeight::new(CORRUPTION, 0.25),
                FactorWeight::new(CURRENCY_INFLATION, 0.15),
                FactorWeight::new(HOUSING_COST, 0.15),
                FactorWeight::new(ENERGY_COST, 0.1),
                FactorWeight::new(POLICING_DEFICIENCY, 0.1),
                FactorWeight::new(DOMESTIC_WAR_RISK, 0.2),
                FactorWeight::new(NATURAL_DISASTER_FREQUENCY, 0.1),
                FactorWeight::new(CHILD_LABOR, 0.05),
                FactorWeight::new(AUTOMATION_LEVEL, 0.1),
                FactorWeight::new(SINGLE_PARENT_HOUSEHOLD, 0.05),
                FactorWeight::new(ONE_CHILD_POLICY, 0.1),
                FactorWeight::new(TAX_RATE, 0.1),
                FactorWeight::new(PUBLIC_DEBT, 0.1),
            ],
            synergies: vec![
                Synergy::new(GENDER_EQUALITY, EDUCATION, 0.05),
                Synergy::new(RELIGIOUS_INFLUENCE, SOCIAL_COHESION, 0.05),
                Synergy::new(HEALTHCARE, EDUCATION, 0.04),
            ],
        }
    }

    #[must_use]
    pub fn standard_upper() -> Self {
        Self {
            base_resilience: 40.0,
            beneficial: vec![
                FactorWeight::new(RESEARCH_DEVELOPMENT, 0.2).saturating(60.0),
                FactorWeight::new(TECHNOLOGICAL_ADOPTION, 0.2),
                FactorWeight::new(INFRASTRUCTURE, 0.15),
                // Rent extraction: the wealthy profit from inequality and corruption
                FactorWeight::new(ECONOMIC_INEQUALITY, 0.15),
                FactorWeight::new(CORRUPTION, 0.1),
                FactorWeight::new(AUTOMATION_LEVEL, 0.3),
                FactorWeight::new(SELF_DEFENSE_FREEDOM, 0.05),
                FactorWeight::new(CLOSED_SOCIETY, 0.05),
                FactorWeight::new(DOMESTIC_MANUFACTURING, 0.05),
            ],
            harmful: vec![
                FactorWeight::new(PUBLIC_HEALTH_CRISIS, 0.1),
                FactorWeight::new(UNEMPLOYMENT_RATE, 0.05),
                FactorWeight::new(CURRENCY_INFLATION, 0.05),
                FactorWeight::new(ENERGY_COST, 0.05),
                FactorWeight::new(POLICING_DEFICIENCY, 0.05),
                FactorWeight::new(DOMESTIC_WAR_RISK, 0.15),
                FactorWeight::new(NATURAL_DISASTER_FREQUENCY, 0.05),
                FactorWeight::new(TAX_RATE, 0.25),
                FactorWeight::new(ONE_CHILD_POLICY, 0.05),
                FactorWeight::new(PUBLIC_DEBT, 0.05),
                FactorWeight::new(ENVIRONMENTAL_REGULATION, 0.1),
            ],
            synergies: vec![
                Synergy::new(TECHNOLOGICAL_ADOPTION, RESEARCH_DEVELOPMENT, 0.05),
                Synergy::new(INFRASTRUCTURE, TECHNOLOGICAL_ADOPTION, 0.03),
            ],
        }
    }

    /// Weight of `factor` among the harmful adjustments, if listed
    #[must_use]
    pub fn harmful_weight(&self, factor: &str) -> Option<f64> {
        self.harmful
            .iter()
            .find(|w| w.factor == factor)
            .map(|w| w.weight)
    }
}

/// The three calculator tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassModels {
    pub lower: ClassModel,
    pub middle: ClassModel,
    pub upper: ClassModel,
}

impl Default for ClassModels {
    fn default() -> Self {
        Self {
            lower: ClassModel::standard_lower(),
            middle: ClassModel::standard_middle(),
            upper: ClassModel::standard_upper(),
        }
    }
}

impl ClassModels {
    #[must_use]
    pub fn get(&self, class: SocialClass) -> &ClassModel {
        match class {
            SocialClass::Lower => &self.lower,
            SocialClass::Middle => &self.middle,
            SocialClass::Upper => &self.upper,
        }
    }
}
