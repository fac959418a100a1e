//! State classification
//!
//! An ordered rule table; the first rule whose predicate holds names the
//! state. Rules run from the most specific overrides down to general regimes,
//! so a society under a kaiju attack is labelled by the kaiju before anything
//! about its tax policy.

use crate::factor_map::FactorMap;
use crate::fantasy::FantasyEffects;
use crate::model::ids::*;
use crate::model::{ClassScores, SocialClass, StateLabel};

/// Everything a rule may inspect
#[derive(Debug, Clone, Copy)]
pub struct ClassifierContext<'a> {
    /// Final class scores in [0, 100]
    pub scores: &'a ClassScores,
    pub factors: &'a FactorMap,
    pub effects: &'a FantasyEffects,
    /// Crisis compounding multiplier (1.0 when not triggered)
    pub compounding: f64,
}

impl ClassifierContext<'_> {
    fn value(&self, id: &str) -> f64 {
        self.factors.get(id)
    }
}

pub type RulePredicate = fn(&ClassifierContext<'_>) -> bool;

#[derive(Debug, Clone, Copy)]
pub struct StateRule {
    /// Lower tiers are checked first
    pub tier: u8,
    pub label: StateLabel,
    pub predicate: RulePredicate,
}

impl StateRule {
    pub const fn new(tier: u8, label: StateLabel, predicate: RulePredicate) -> Self {
        Self {
            tier,
            label,
            predicate,
        }
    }

    #[must_use]
    pub fn matches(&self, ctx: &ClassifierContext<'_>) -> bool {
        (self.predicate)(ctx)
    }
}

/// Class floor: a class is in crisis below 30% of the scale
const CLASS_FLOOR: f64 = 0.3;

fn below_floor(ctx: &ClassifierContext<'_>, class: SocialClass) -> bool {
    ctx.scores.get(class) / 100.0 < CLASS_FLOOR
}

#[derive(Debug, Clone)]
pub struct StateClassifier {
    rules: Vec<StateRule>,
}

impl Default for StateClassifier {
    fn default() -> Self {
        Self::standard()
    }
}

impl StateClassifier {
    /// Rules are evaluated in the order given
    #[must_use]
    pub fn new(rules: Vec<StateRule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn standard() -> Self {
        use StateLabel::*;

        Self::new(vec![
            // === Tier 1: single-factor overrides ===
            StateRule::new(1, GothamAnarchy, |c| c.value(JOKER_CHAOS_INDEX) > 80.0),
            StateRule::new(1, KaijuApocalypse, |c| c.value(GODZILLA_RAMPAGE) > 80.0),
            StateRule::new(1, ArcaneCataclysm, |c| c.value(MANA_STORM_INTENSITY) > 80.0),
            StateRule::new(1, IsolatedSociety, |c| c.value(CLOSED_SOCIETY) > 80.0),
            StateRule::new(1, DemographicCrisis, |c| c.value(ONE_CHILD_POLICY) > 80.0),
            StateRule::new(1, FamilyStructureCrisis, |c| {
                c.value(SINGLE_PARENT_HOUSEHOLD) > 80.0
            }),
            StateRule::new(1, CriminalUnderworld, |c| c.value(JOKER_CHAOS_INDEX) > 60.0),
            StateRule::new(1, RestrictedSociety, |c| c.value(CLOSED_SOCIETY) > 60.0),
            StateRule::new(1, CivilDisorder, |c| c.value(JOKER_CHAOS_INDEX) > 40.0),
            // === Tier 2: combinations ===
            StateRule::new(2, ApocalypticCollapse, |c| {
                c.value(GODZILLA_RAMPAGE) > 50.0 && c.value(NATURAL_DISASTER_FREQUENCY) > 50.0
            }),
            StateRule::new(2, MythicCataclysm, |c| {
                c.value(MANA_STORM_INTENSITY) > 50.0 && c.value(GODZILLA_RAMPAGE) > 50.0
            }),
            StateRule::new(2, DepopulatedWarzone, |c| {
                c.value(THANOS_SNAP_PROBABILITY) > 50.0 && c.value(DOMESTIC_WAR_RISK) > 50.0
            }),
            // === Tier 3: derived effects ===
            StateRule::new(3, EnvironmentalCrisis, |c| c.effects.infrastructure_damage > 0.7),
            StateRule::new(3, CivilWar, |c| c.effects.cohesion_damage > 0.7),
            StateRule::new(3, PlaneswalkerChaos, |c| c.effects.mana_effect > 0.5),
            StateRule::new(3, InfinityCrisis, |c| c.effects.snap_occurred),
            StateRule::new(3, KaijuChaos, |c| c.effects.kaiju_threat > 0.5),
            StateRule::new(3, CascadingCrisis, |c| c.compounding >= 1.3),
            // === Tier 4: class floors ===
            StateRule::new(4, LowerClassCrisis, |c| below_floor(c, SocialClass::Lower)),
            StateRule::new(4, MiddleClassInstability, |c| {
                below_floor(c, SocialClass::Middle)
            }),
            StateRule::new(4, UpperClassDecline, |c| below_floor(c, SocialClass::Upper)),
            // === Tier 5: general regimes ===
            StateRule::new(5, CorruptState, |c| c.value(CORRUPTION) > 70.0),
            StateRule::new(5, HyperinflationCrisis, |c| c.value(CURRENCY_INFLATION) > 80.0),
            StateRule::new(5, DebtCollapse, |c| c.value(PUBLIC_DEBT) > 85.0),
            StateRule::new(5, EnergyCrisis, |c| c.value(ENERGY_COST) > 80.0),
            StateRule::new(5, AutomationDivide, |c| {
                c.value(AUTOMATION_LEVEL) > 80.0 && c.value(ECONOMIC_INEQUALITY) > 50.0
            }),
            StateRule::new(5, EconomicOligarchy, |c| c.value(ECONOMIC_INEQUALITY) > 70.0),
            StateRule::new(5, SocialFragmentation, |c| c.value(SOCIAL_COHESION) < 30.0),
            StateRule::new(5, TechnologicalBoom, |c| {
                c.value(RESEARCH_DEVELOPMENT) > 80.0 && c.value(TECHNOLOGICAL_ADOPTION) > 80.0
            }),
            StateRule::new(5, CulturalRenaissance, |c| {
                c.value(SOCIAL_COHESION) > 80.0 && c.value(EDUCATION) > 70.0
            }),
            StateRule::new(5, HarmoniousSociety, |c| {
                c.value(SOCIAL_COHESION) > 80.0
                    && SocialClass::ALL.iter().all(|class| c.scores.get(*class) > 60.0)
            }),
        ])
    }

    /// First matching label, or Stable Society when nothing matches
    #[must_use]
    pub fn classify(&self, ctx: &ClassifierContext<'_>) -> StateLabel {
        match self.rules.iter().find(|rule| rule.matches(ctx)) {
            Some(rule) => {
                tracing::trace!(tier = rule.tier, label = %rule.label, "state rule matched");
                rule.label
            }
            None => StateLabel::StableSociety,
        }
    }

    /// Every rule that holds, in evaluation order
    #[must_use]
    pub fn matching_rules(&self, ctx: &ClassifierContext<'_>) -> Vec<&StateRule> {
        self.rules.iter().filter(|rule| rule.matches(ctx)).collect()
    }

    pub fn rules(&self) -> &[StateRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FactorCatalog;
    use crate::model::Factor;

    fn classify_with(
        overrides: &[(&str, f64)],
        scores: ClassScores,
        effects: FantasyEffects,
        compounding: f64,
    ) -> StateLabel {
        let factors: Vec<Factor> = overrides.iter().map(|(id, v)| Factor::new(*id, *v)).collect();
        let map = FactorMap::build(&FactorCatalog::standard(), &factors);
        let ctx = ClassifierContext {
            scores: &scores,
            factors: &map,
            effects: &effects,
            compounding,
        };
        StateClassifier::standard().classify(&ctx)
    }

    fn classify(overrides: &[(&str, f64)]) -> StateLabel {
        classify_with(
            overrides,
            ClassScores::new(70.0, 70.0, 70.0),
            FantasyEffects::default(),
            1.0,
        )
    }

    #[test]
    fn test_defaults_are_stable() {
        assert_eq!(classify(&[]), StateLabel::StableSociety);
    }

    #[test]
    fn test_joker_tiers() {
        assert_eq!(classify(&[(JOKER_CHAOS_INDEX, 90.0)]), StateLabel::GothamAnarchy);
        assert_eq!(classify(&[(JOKER_CHAOS_INDEX, 70.0)]), StateLabel::CriminalUnderworld);
        assert_eq!(classify(&[(JOKER_CHAOS_INDEX, 50.0)]), StateLabel::CivilDisorder);
        assert_eq!(classify(&[(JOKER_CHAOS_INDEX, 40.0)]), StateLabel::StableSociety);
    }

    #[test]
    fn test_first_match_wins() {
        // both the joker override and corruption match; joker comes first
        assert_eq!(
            classify(&[(JOKER_CHAOS_INDEX, 90.0), (CORRUPTION, 90.0)]),
            StateLabel::GothamAnarchy
        );
        assert_eq!(
            classify(&[(GODZILLA_RAMPAGE, 60.0), (NATURAL_DISASTER_FREQUENCY, 60.0)]),
            StateLabel::ApocalypticCollapse
        );
    }

    #[test]
    fn test_override_beats_class_floors() {
        let collapsed = ClassScores::new(10.0, 10.0, 10.0);
        let fx = FantasyEffects::default;
        assert_eq!(
            classify_with(&[], collapsed, fx(), 1.0),
            StateLabel::LowerClassCrisis
        );
        assert_eq!(
            classify_with(&[(JOKER_CHAOS_INDEX, 90.0)], collapsed, fx(), 1.0),
            StateLabel::GothamAnarchy
        );
        assert_eq!(
            classify_with(&[(CLOSED_SOCIETY, 90.0)], collapsed, fx(), 1.0),
            StateLabel::IsolatedSociety
        );
    }

    #[test]
    fn test_derived_effect_rules() {
        let scores = ClassScores::new(60.0, 60.0, 60.0);
        let civil_war = FantasyEffects {
            cohesion_damage: 0.8,
            ..FantasyEffects::default()
        };
        assert_eq!(classify_with(&[], scores, civil_war, 1.0), StateLabel::CivilWar);

        let snap = FantasyEffects {
            snap_occurred: true,
            population_scale: 0.5,
            ..FantasyEffects::default()
        };
        assert_eq!(classify_with(&[], scores, snap, 1.0), StateLabel::InfinityCrisis);

        assert_eq!(
            classify_with(&[], scores, FantasyEffects::default(), 1.3),
            StateLabel::CascadingCrisis
        );
    }

    #[test]
    fn test_class_floor_rules() {
        let fx = FantasyEffects::default;
        assert_eq!(
            classify_with(&[], ClassScores::new(29.0, 60.0, 60.0), fx(), 1.0),
            StateLabel::LowerClassCrisis
        );
        assert_eq!(
            classify_with(&[], ClassScores::new(60.0, 20.0, 60.0), fx(), 1.0),
            StateLabel::MiddleClassInstability
        );
        assert_eq!(
            classify_with(&[], ClassScores::new(60.0, 60.0, 10.0), fx(), 1.0),
            StateLabel::UpperClassDecline
        );
        assert_eq!(
            classify_with(&[], ClassScores::new(30.0, 60.0, 60.0), fx(), 1.0),
            StateLabel::StableSociety
        );
    }

    #[test]
    fn test_general_regimes() {
        assert_eq!(classify(&[(CORRUPTION, 75.0)]), StateLabel::CorruptState);
        assert_eq!(
            classify(&[(AUTOMATION_LEVEL, 90.0), (ECONOMIC_INEQUALITY, 60.0)]),
            StateLabel::AutomationDivide
        );
        assert_eq!(
            classify(&[(ECONOMIC_INEQUALITY, 75.0)]),
            StateLabel::EconomicOligarchy
        );
        assert_eq!(
            classify(&[(SOCIAL_COHESION, 20.0)]),
            StateLabel::SocialFragmentation
        );
        assert_eq!(
            classify(&[(RESEARCH_DEVELOPMENT, 90.0), (TECHNOLOGICAL_ADOPTION, 90.0)]),
            StateLabel::TechnologicalBoom
        );
        assert_eq!(
            classify(&[(SOCIAL_COHESION, 90.0), (EDUCATION, 80.0)]),
            StateLabel::CulturalRenaissance
        );
        assert_eq!(
            classify(&[(SOCIAL_COHESION, 90.0), (EDUCATION, 50.0)]),
            StateLabel::HarmoniousSociety
        );
    }

    #[test]
    fn test_matching_rules_lists_every_hit() {
        let factors = vec![Factor::new(CORRUPTION, 90.0), Factor::new(ECONOMIC_INEQUALITY, 90.0)];
        let map = FactorMap::build(&FactorCatalog::standard(), &factors);
        let scores = ClassScores::new(60.0, 60.0, 60.0);
        let effects = FantasyEffects::default();
        let ctx = ClassifierContext {
            scores: &scores,
            factors: &map,
            effects: &effects,
            compounding: 1.0,
        };
        let labels: Vec<StateLabel> = StateClassifier::standard()
            .matching_rules(&ctx)
            .iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(
            labels,
            vec![StateLabel::CorruptState, StateLabel::EconomicOligarchy]
        );
    }

    #[test]
    fn test_tiers_are_ordered() {
        let classifier = StateClassifier::standard();
        let tiers: Vec<u8> = classifier.rules().iter().map(|r| r.tier).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }
}
