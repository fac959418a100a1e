//! Factor catalog
//!
//! The fixed list of recognized factor ids with display metadata and default
//! values. The engine uses it only to fill in missing factors; everything else
//! about it is presentation data handed to front ends.

use serde::{Deserialize, Serialize};

use crate::model::ids::*;
use crate::model::{Factor, FactorCategory, FactorDefinition};
use crate::random::RandomSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorCatalog {
    definitions: Vec<FactorDefinition>,
}

impl Default for FactorCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl FactorCatalog {
    /// Build a catalog from explicit definitions (later duplicates are dropped)
    #[must_use]
    pub fn new(definitions: Vec<FactorDefinition>) -> Self {
        let mut unique: Vec<FactorDefinition> = Vec::with_capacity(definitions.len());
        for def in definitions {
            if unique.iter().all(|d| d.id != def.id) {
                unique.push(def);
            }
        }
        Self {
            definitions: unique,
        }
    }

    /// The built-in catalog used by the standard engine
    #[must_use]
    pub fn standard() -> Self {
        use FactorCategory::*;

        let def = FactorDefinition::new;
        Self::new(vec![
            // Core economic factors
            def(DOMESTIC_MANUFACTURING, "Domestic Manufacturing", "Strength of domestic manufacturing sector", Economic, 50.0),
            def(TAX_RATE, "Tax Rate", "Overall tax burden on society.", Economic, 35.0),
            def(ECONOMIC_INEQUALITY, "Economic Inequality", "Gap between rich and poor.", Economic, 30.0),
            def(CURRENCY_INFLATION, "Currency Inflation", "Level of currency inflation", Economic, 10.0),
            def(ENERGY_COST, "Energy Cost", "Cost of energy resources", Economic, 30.0),
            def(PUBLIC_DEBT, "Public Debt", "Level of public debt", Economic, 30.0),
            def(HOUSING_COST, "Housing Cost", "Rising housing costs strain affordability and economic stability.", Economic, 40.0),
            def(UNEMPLOYMENT_RATE, "Unemployment Rate", "Percentage of workforce without jobs", Economic, 10.0),
            def(AUTOMATION_LEVEL, "Automation Level", "Share of work performed by machines", Economic, 20.0),
            // Social welfare factors
            def(GOVERNMENT_AID, "Government Aid", "Level of government assistance programs", SocialWelfare, 40.0),
            def(HEALTHCARE, "Healthcare", "Quality and accessibility of healthcare", SocialWelfare, 50.0),
            def(EDUCATION, "Education", "Quality and accessibility of education", SocialWelfare, 50.0),
            def(INFRASTRUCTURE, "Infrastructure", "Quality of public infrastructure", SocialWelfare, 50.0),
            def(POLICING_DEFICIENCY, "Policing Deficiency", "Lack of law enforcement increases crime and reduces public safety.", SocialWelfare, 30.0),
            def(PUBLIC_HEALTH_CRISIS, "Public Health Crisis", "Severity of an ongoing health emergency", SocialWelfare, 0.0),
            // Social and political factors
            def(MEDIA_FREEDOM, "Media Freedom", "Level of press and media freedom", Social, 50.0),
            def(CORRUPTION, "Corruption", "Level of government corruption", Social, 20.0),
            def(SOCIAL_COHESION, "Social Cohesion", "Cultural unity and social trust", Social, 50.0),
            def(GENDER_EQUALITY, "Gender Equality", "Level of gender equality in society", Social, 50.0),
            def(RELIGIOUS_INFLUENCE, "Religious Influence", "Influence of religion on society", Social, 30.0),
            // Technology
            def(RESEARCH_DEVELOPMENT, "Research & Development", "Investment in research and development", Technology, 40.0),
            def(TECHNOLOGICAL_ADOPTION, "Technological Adoption", "Speed at which new technology spreads", Technology, 40.0),
            // Environmental and risk factors
            def(ENVIRONMENTAL_PROTECTION, "Environmental Protection", "Level of environmental regulations", Environmental, 40.0),
            def(ENVIRONMENTAL_REGULATION, "Environmental Regulation", "Government oversight and enforcement of environmental standards", Environmental, 40.0),
            def(NATURAL_DISASTER_FREQUENCY, "Natural Disaster Frequency", "Frequency of natural disasters", Risk, 0.0),
            def(DOMESTIC_WAR_RISK, "Domestic War Risk", "Risk of internal conflict", Risk, 0.0),
            // Modern societal factors
            def(CLOSED_SOCIETY, "Closed Society", "Level of social restrictions", Modern, 0.0),
            def(ONE_CHILD_POLICY, "One Child Policy", "Strictness of population control", Modern, 0.0),
            def(SINGLE_PARENT_HOUSEHOLD, "Single Parent Household", "Rate of single parent households", Modern, 20.0),
            def(IMMIGRATION_RATE, "Immigration Rate", "Rate of immigration", Modern, 20.0),
            def(CHILD_LABOR, "Child Labor", "Prevalence of child labor", Modern, 0.0),
            def(SELF_DEFENSE_FREEDOM, "Self Defense Freedom", "Level of personal defense rights", Modern, 30.0),
            // Fantasy factors
            def(MANA_STORM_INTENSITY, "Mana Storm Intensity", "Intensity of magical energy storms", Fantasy, 0.0),
            def(THANOS_SNAP_PROBABILITY, "Thanos Snap Probability", "Probability of population reduction", Fantasy, 0.0),
            def(GODZILLA_RAMPAGE, "Godzilla Rampage", "Frequency of giant monster attacks", Fantasy, 0.0),
            def(JOKER_CHAOS_INDEX, "Joker Chaos Index", "Level of societal chaos", Fantasy, 0.0),
        ])
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FactorDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Default for `id`, or 0.0 when the id is not in the catalog
    #[must_use]
    pub fn default_value(&self, id: &str) -> f64 {
        self.get(id).map_or(0.0, |d| d.default_value)
    }

    #[must_use]
    pub fn is_fantasy(&self, id: &str) -> bool {
        self.get(id).is_some_and(|d| d.category.is_fantasy())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FactorDefinition> {
        self.definitions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Every catalog factor at its default value, in catalog order
    #[must_use]
    pub fn default_factors(&self) -> Vec<Factor> {
        self.definitions
            .iter()
            .map(FactorDefinition::default_factor)
            .collect()
    }

    /// Random starting sliders: non-fantasy factors get an integer in `[0, max]`,
    /// fantasy factors stay at their default.
    pub fn randomized_factors(&self, rng: &mut dyn RandomSource, max: u8) -> Vec<Factor> {
        let span = f64::from(max) + 1.0;
        self.definitions
            .iter()
            .map(|def| {
                if def.category.is_fantasy() {
                    def.default_factor()
                } else {
                    let value = (rng.next() * span).floor().min(f64::from(max));
                    Factor::new(def.id.clone(), value)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ConstantSource, SeededSource};

    #[test]
    fn test_standard_catalog_shape() {
        let catalog = FactorCatalog::standard();
        assert_eq!(catalog.len(), 36);
        assert!(catalog.contains(CORRUPTION));
        assert!(catalog.contains(PUBLIC_HEALTH_CRISIS));
        assert!(!catalog.contains("graphene-production"));
        assert_eq!(catalog.default_value(HOUSING_COST), 40.0);
        assert_eq!(catalog.default_value("graphene-production"), 0.0);
    }

    #[test]
    fn test_risk_and_fantasy_defaults_are_zero() {
        let catalog = FactorCatalog::standard();
        for def in catalog.iter() {
            if matches!(def.category, FactorCategory::Fantasy | FactorCategory::Risk) {
                assert_eq!(def.default_value, 0.0, "{} should default to 0", def.id);
            }
            assert!((0.0..=100.0).contains(&def.default_value));
        }
        assert_eq!(catalog.default_value(PUBLIC_HEALTH_CRISIS), 0.0);
    }

    #[test]
    fn test_duplicate_definitions_are_dropped() {
        let catalog = FactorCatalog::new(vec![
            FactorDefinition::new("a", "A", "", FactorCategory::Social, 1.0),
            FactorDefinition::new("a", "A2", "", FactorCategory::Social, 2.0),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.default_value("a"), 1.0);
    }

    #[test]
    fn test_randomized_factors_respect_max_and_skip_fantasy() {
        let catalog = FactorCatalog::standard();
        let mut rng = SeededSource::from_seed(7);
        let factors = catalog.randomized_factors(&mut rng, 20);
        assert_eq!(factors.len(), catalog.len());
        for factor in &factors {
            if catalog.is_fantasy(&factor.id) {
                assert_eq!(factor.value, 0.0);
            } else {
                assert!((0.0..=20.0).contains(&factor.value));
                assert_eq!(factor.value.fract(), 0.0);
            }
        }

        let mut top = ConstantSource::new(0.999_999);
        let maxed = catalog.randomized_factors(&mut top, 20);
        assert!(maxed.iter().all(|f| f.value <= 20.0));
    }
}
