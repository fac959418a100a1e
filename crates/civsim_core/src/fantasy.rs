//! Fantasy and catastrophe effects
//!
//! Natural disasters, war risk and the four fantasy factors produce derived
//! effects. Some shift class scores directly, some feed the success penalty
//! sum, and all of them are visible to the state classifier.
//!
//! Randomness is confined here. Each evaluation draws exactly two samples in a
//! fixed order: the mana storm direction, then the snap roll.

use serde::{Deserialize, Serialize};

use crate::config::FantasyConfig;
use crate::factor_map::FactorMap;
use crate::model::ClassScores;
use crate::model::ids::*;
use crate::random::RandomSource;

/// Derived effects for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FantasyEffects {
    /// Combined disaster and kaiju damage, 0-1+ scale
    pub infrastructure_damage: f64,
    pub healthcare_strain: f64,
    /// Share of `impact_points` the lower class loses
    pub lower_class_impact: f64,
    pub defense_boost: f64,
    pub cohesion_damage: f64,
    /// Share of `impact_points` the middle class loses
    pub middle_class_impact: f64,
    /// In [-m, m] for mana storm intensity m
    pub mana_effect: f64,
    pub snap_occurred: bool,
    /// Multiplier applied to every class score (1.0 without a snap)
    pub population_scale: f64,
    pub kaiju_threat: f64,
    /// Points added to the success penalty sum
    pub kaiju_penalty: f64,
    pub chaos_intensity: f64,
    /// Points added to the success penalty sum
    pub chaos_penalty: f64,
}

impl Default for FantasyEffects {
    fn default() -> Self {
        Self {
            infrastructure_damage: 0.0,
            healthcare_strain: 0.0,
            lower_class_impact: 0.0,
            defense_boost: 0.0,
            cohesion_damage: 0.0,
            middle_class_impact: 0.0,
            mana_effect: 0.0,
            snap_occurred: false,
            population_scale: 1.0,
            kaiju_threat: 0.0,
            kaiju_penalty: 0.0,
            chaos_intensity: 0.0,
            chaos_penalty: 0.0,
        }
    }
}

impl FantasyEffects {
    /// Sum of the effect-driven success penalties
    #[must_use]
    pub fn success_penalty(&self) -> f64 {
        self.kaiju_penalty + self.chaos_penalty
    }
}

/// Derive the effects, consuming two samples from `rng`
pub fn compute(
    factors: &FactorMap,
    config: &FantasyConfig,
    rng: &mut dyn RandomSource,
) -> FantasyEffects {
    let disasters = factors.fraction(NATURAL_DISASTER_FREQUENCY);
    let war = factors.fraction(DOMESTIC_WAR_RISK);
    let mana = factors.fraction(MANA_STORM_INTENSITY);
    let snap_probability = factors.fraction(THANOS_SNAP_PROBABILITY);
    let godzilla = factors.fraction(GODZILLA_RAMPAGE);
    let chaos = factors.fraction(JOKER_CHAOS_INDEX);

    let mana_sample = rng.next();
    let snap_sample = rng.next();

    let snap_occurred = snap_sample < snap_probability;
    if snap_occurred {
        tracing::debug!(snap_probability, "snap fired");
    }

    FantasyEffects {
        infrastructure_damage: disasters * config.disaster_infrastructure_damage
            + godzilla * config.godzilla_infrastructure_damage,
        healthcare_strain: disasters * config.disaster_healthcare_strain,
        lower_class_impact: disasters * config.disaster_lower_impact,
        defense_boost: war * config.war_defense_boost + godzilla * config.godzilla_defense_boost,
        cohesion_damage: war * config.war_cohesion_damage,
        middle_class_impact: war * config.war_middle_impact,
        mana_effect: (mana_sample - 0.5) * mana * 2.0,
        snap_occurred,
        population_scale: if snap_occurred { config.snap_scale } else { 1.0 },
        kaiju_threat: godzilla,
        kaiju_penalty: godzilla * config.godzilla_success_penalty * 100.0,
        chaos_intensity: chaos,
        chaos_penalty: chaos * config.chaos_success_penalty,
    }
}

/// Shift class scores by the effects; results may be negative
#[must_use]
pub fn apply(effects: &FantasyEffects, config: &FantasyConfig, scores: ClassScores) -> ClassScores {
    let mut out = scores.map(|_, s| s * effects.population_scale);

    out.lower -= effects.lower_class_impact * config.impact_points;
    out.middle -= effects.middle_class_impact * config.impact_points;
    out.upper += effects.mana_effect * config.mana_points;

    out.map(|class, s| s - effects.chaos_intensity * config.chaos_points.get(class))
}
