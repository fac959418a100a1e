//! Evaluation outputs
//!
//! [`SimulationState`] is the only thing front ends need. [`ScoreBreakdown`]
//! exposes every intermediate stage of the pipeline for diagnostics and tests.

use serde::{Deserialize, Serialize};

use super::factor::Factor;
use super::labels::StateLabel;
use crate::fantasy::FantasyEffects;
use crate::success::PenaltyBreakdown;

/// The three social classes scored by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocialClass {
    Lower,
    Middle,
    Upper,
}

impl SocialClass {
    pub const ALL: [SocialClass; 3] = [SocialClass::Lower, SocialClass::Middle, SocialClass::Upper];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SocialClass::Lower => "Lower Class Prosperity",
            SocialClass::Middle => "Middle Class Stability",
            SocialClass::Upper => "Upper Class Wealth",
        }
    }
}

/// Per-class scores on the 0-100 scale
///
/// Intermediate stages may hold values outside [0, 100]; the pipeline clamps
/// at calculator exit and after redistribution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassScores {
    pub lower: f64,
    pub middle: f64,
    pub upper: f64,
}

impl ClassScores {
    #[must_use]
    pub fn new(lower: f64, middle: f64, upper: f64) -> Self {
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

    pub fn set(&mut self, class: SocialClass, value: f64) {
        match class {
            SocialClass::Lower => self.lower = value,
            SocialClass::Middle => self.middle = value,
            SocialClass::Upper => self.upper = value,
        }
    }

    /// Apply `f` to every class score
    #[must_use]
    pub fn map(self, mut f: impl FnMut(SocialClass, f64) -> f64) -> Self {
        Self {
            lower: f(SocialClass::Lower, self.lower),
            middle: f(SocialClass::Middle, self.middle),
            upper: f(SocialClass::Upper, self.upper),
        }
    }

    #[must_use]
    pub fn clamped(self) -> Self {
        self.map(|_, v| v.clamp(0.0, 100.0))
    }

    #[must_use]
    pub fn min_lower_middle(&self) -> f64 {
        self.lower.min(self.middle)
    }

    #[must_use]
    pub fn mean_lower_middle(&self) -> f64 {
        (self.lower + self.middle) / 2.0
    }

    /// Distance between the best-off and worst-off class
    #[must_use]
    pub fn spread(&self) -> f64 {
        let max = self.lower.max(self.middle).max(self.upper);
        let min = self.lower.min(self.middle).min(self.upper);
        max - min
    }

    #[must_use]
    pub fn any_negative(&self) -> bool {
        self.lower < 0.0 || self.middle < 0.0 || self.upper < 0.0
    }
}

/// Round a 0-100 score for the output boundary
#[must_use]
pub fn round_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Result of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    /// Echo of the input, unmodified
    pub factors: Vec<Factor>,
    pub success_rate: u8,
    pub lower_class_prosperity: u8,
    pub middle_class_stability: u8,
    pub upper_class_wealth: u8,
    pub current_state: String,
    #[serde(default)]
    pub events: Vec<String>,
}

impl SimulationState {
    /// Parse `current_state` back into a label
    #[must_use]
    pub fn label(&self) -> Option<StateLabel> {
        self.current_state.parse().ok()
    }

    #[must_use]
    pub fn class_score(&self, class: SocialClass) -> u8 {
        match class {
            SocialClass::Lower => self.lower_class_prosperity,
            SocialClass::Middle => self.middle_class_stability,
            SocialClass::Upper => self.upper_class_wealth,
        }
    }
}

/// Every intermediate value of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Calculator scores before sigmoid compression
    pub raw_scores: ClassScores,
    /// Calculator outputs (post-sigmoid, clamped)
    pub calculated: ClassScores,
    /// 1.0 when crisis compounding did not trigger
    pub compounding_multiplier: f64,
    pub compounded: ClassScores,
    pub effects: FantasyEffects,
    /// Scores after fantasy effects; may be negative
    pub after_effects: ClassScores,
    pub redistributed: ClassScores,
    pub redistribution_penalty: f64,
    pub penalties: PenaltyBreakdown,
    /// Unrounded success rate
    pub success_rate: f64,
    pub label: StateLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_score_bounds() {
        assert_eq!(round_score(-3.0), 0);
        assert_eq!(round_score(100.4), 100);
        assert_eq!(round_score(150.0), 100);
        assert_eq!(round_score(49.5), 50);
        assert_eq!(round_score(f64::NAN), 0);
    }

    #[test]
    fn test_class_scores_helpers() {
        let scores = ClassScores::new(-5.0, 40.0, 120.0);
        assert!(scores.any_negative());
        let clamped = scores.clamped();
        assert_eq!(clamped, ClassScores::new(0.0, 40.0, 100.0));
        assert_eq!(clamped.spread(), 100.0);
        assert_eq!(clamped.min_lower_middle(), 0.0);
        assert_eq!(clamped.mean_lower_middle(), 20.0);
        assert_eq!(clamped.get(SocialClass::Upper), 100.0);
    }

    #[test]
    fn test_state_serializes_camel_case() {
        let state = SimulationState {
            factors: vec![Factor::new("corruption", 10.0)],
            success_rate: 70,
            lower_class_prosperity: 60,
            middle_class_stability: 65,
            upper_class_wealth: 50,
            current_state: "Stable Society".to_string(),
            events: vec![],
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["successRate"], 70);
        assert_eq!(json["lowerClassProsperity"], 60);
        assert_eq!(json["currentState"], "Stable Society");
        assert!(json["events"].as_array().unwrap().is_empty());
        assert_eq!(state.label(), Some(StateLabel::StableSociety));
    }
}
