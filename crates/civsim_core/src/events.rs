//! Narrative event generation
//!
//! Flavor text driven purely by factor thresholds. Events never feed back into
//! the scores. Every trigger whose strict `>` condition holds emits its
//! message, singles first and then combinations, each in declaration order.

use serde::{Deserialize, Serialize};

use crate::factor_map::FactorMap;
use crate::model::ids::*;

/// Emits `message` when `factor > threshold`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTrigger {
    pub factor: String,
    pub threshold: f64,
    pub message: String,
}

impl EventTrigger {
    pub fn new(factor: &str, threshold: f64, message: &str) -> Self {
        Self {
            factor: factor.to_string(),
            threshold,
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn fires(&self, factors: &FactorMap) -> bool {
        factors.get(&self.factor) > self.threshold
    }
}

/// Emits `message` when both factors exceed their thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboTrigger {
    pub first: String,
    pub first_threshold: f64,
    pub second: String,
    pub second_threshold: f64,
    pub message: String,
}

impl ComboTrigger {
    pub fn new(
        (first, first_threshold): (&str, f64),
        (second, second_threshold): (&str, f64),
        message: &str,
    ) -> Self {
        Self {
            first: first.to_string(),
            first_threshold,
            second: second.to_string(),
            second_threshold,
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn fires(&self, factors: &FactorMap) -> bool {
        factors.get(&self.first) > self.first_threshold
            && factors.get(&self.second) > self.second_threshold
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventGenerator {
    #[serde(default)]
    pub triggers: Vec<EventTrigger>,
    #[serde(default)]
    pub combinations: Vec<ComboTrigger>,
}

impl EventGenerator {
    #[must_use]
    pub fn standard() -> Self {
        let t = EventTrigger::new;
        let triggers = vec![
            // Governance
            t(CORRUPTION, 30.0, "Reports of bribery in local government are becoming common"),
            t(CORRUPTION, 50.0, "Corruption scandals are eroding trust in public institutions"),
            t(CORRUPTION, 70.0, "Systemic corruption has captured the state apparatus"),
            // Labour market
            t(UNEMPLOYMENT_RATE, 30.0, "Rising unemployment is straining household budgets"),
            t(UNEMPLOYMENT_RATE, 50.0, "Mass unemployment has emptied factories and offices"),
            t(UNEMPLOYMENT_RATE, 70.0, "Unemployment has reached depression levels; breadlines stretch for blocks"),
            // Health
            t(PUBLIC_HEALTH_CRISIS, 30.0, "A public health outbreak is spreading through crowded neighborhoods"),
            t(PUBLIC_HEALTH_CRISIS, 50.0, "The health crisis is overwhelming hospitals"),
            t(PUBLIC_HEALTH_CRISIS, 70.0, "A full-scale health crisis has brought daily life to a halt"),
            // Prices
            t(CURRENCY_INFLATION, 30.0, "Prices are climbing faster than wages"),
            t(CURRENCY_INFLATION, 50.0, "Inflation is wiping out savings"),
            t(CURRENCY_INFLATION, 70.0, "Hyperinflation has made the currency nearly worthless"),
            t(HOUSING_COST, 30.0, "Rents are rising in the major cities"),
            t(HOUSING_COST, 50.0, "Housing has become unaffordable for young families"),
            t(HOUSING_COST, 70.0, "A housing crisis has pushed thousands into homelessness"),
            // Security
            t(DOMESTIC_WAR_RISK, 30.0, "Political tensions are simmering between rival factions"),
            t(DOMESTIC_WAR_RISK, 50.0, "Armed militias are clashing in the provinces"),
            t(DOMESTIC_WAR_RISK, 70.0, "The country has descended into open civil conflict"),
            t(NATURAL_DISASTER_FREQUENCY, 30.0, "Severe weather is damaging crops and roads"),
            t(NATURAL_DISASTER_FREQUENCY, 50.0, "Natural disasters have caused widespread damage to infrastructure"),
            t(NATURAL_DISASTER_FREQUENCY, 70.0, "Back-to-back disasters have left whole regions uninhabitable"),
            t(POLICING_DEFICIENCY, 30.0, "Petty crime is rising in poorer districts"),
            t(POLICING_DEFICIENCY, 50.0, "Organized crime is filling the gap left by the police"),
            t(POLICING_DEFICIENCY, 70.0, "Law enforcement has collapsed; vigilantes patrol the streets"),
            // Distribution
            t(ECONOMIC_INEQUALITY, 30.0, "The wealth gap is widening"),
            t(ECONOMIC_INEQUALITY, 50.0, "Protests against inequality are spreading"),
            t(ECONOMIC_INEQUALITY, 70.0, "A narrow elite now controls most of the nation's wealth"),
            // Social structure
            t(CHILD_LABOR, 30.0, "Child labor is spreading in workshops and farms"),
            t(CHILD_LABOR, 70.0, "Widespread child labor exploitation is robbing a generation of schooling"),
            t(IMMIGRATION_RATE, 40.0, "New immigration is expanding the workforce and fueling growth"),
            t(AUTOMATION_LEVEL, 50.0, "Automation is displacing routine jobs"),
            t(AUTOMATION_LEVEL, 80.0, "Machines now do most of the work; displaced workers struggle to adapt"),
            t(ENERGY_COST, 70.0, "Soaring energy prices are forcing rationing"),
            t(PUBLIC_DEBT, 70.0, "Creditors are questioning the government's ability to repay its debt"),
            t(CLOSED_SOCIETY, 50.0, "Borders and media are increasingly closed to outside influence"),
            // Fantasy
            t(MANA_STORM_INTENSITY, 30.0, "Mana storms are causing unpredictable effects across society"),
            t(THANOS_SNAP_PROBABILITY, 30.0, "Rumors spread of a being who could erase half of all life"),
            t(GODZILLA_RAMPAGE, 30.0, "A giant creature has been sighted off the coast"),
            t(GODZILLA_RAMPAGE, 70.0, "Giant creatures are causing widespread destruction"),
            t(JOKER_CHAOS_INDEX, 30.0, "A masked agitator is staging bizarre public stunts"),
            t(JOKER_CHAOS_INDEX, 70.0, "Anarchic gangs are spreading chaos through the cities"),
        ];

        let combinations = vec![
            ComboTrigger::new(
                (PUBLIC_HEALTH_CRISIS, 50.0),
                (UNEMPLOYMENT_RATE, 50.0),
                "The health crisis and mass unemployment are feeding each other",
            ),
            ComboTrigger::new(
                (CORRUPTION, 60.0),
                (ECONOMIC_INEQUALITY, 60.0),
                "Oligarchs are buying political power outright",
            ),
            ComboTrigger::new(
                (DOMESTIC_WAR_RISK, 50.0),
                (JOKER_CHAOS_INDEX, 50.0),
                "Chaos agents are exploiting the civil conflict",
            ),
            ComboTrigger::new(
                (GODZILLA_RAMPAGE, 50.0),
                (NATURAL_DISASTER_FREQUENCY, 50.0),
                "Monsters and disasters together are leveling entire cities",
            ),
            ComboTrigger::new(
                (CURRENCY_INFLATION, 60.0),
                (UNEMPLOYMENT_RATE, 60.0),
                "Stagflation grips the economy: prices rise as jobs disappear",
            ),
            ComboTrigger::new(
                (RESEARCH_DEVELOPMENT, 70.0),
                (TECHNOLOGICAL_ADOPTION, 70.0),
                "A wave of innovation is transforming industry",
            ),
        ];

        Self {
            triggers,
            combinations,
        }
    }

    /// Messages for every firing trigger, singles before combinations
    #[must_use]
    pub fn generate(&self, factors: &FactorMap) -> Vec<String> {
        let singles = self
            .triggers
            .iter()
            .filter(|t| t.fires(factors))
            .map(|t| t.message.clone());
        let combos = self
            .combinations
            .iter()
            .filter(|c| c.fires(factors))
            .map(|c| c.message.clone());
        singles.chain(combos).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FactorCatalog;
    use crate::model::Factor;

    /// Events on top of a baseline where no trigger fires
    fn generate(overrides: &[(&str, f64)]) -> Vec<String> {
        let factors: Vec<Factor> = std::iter::once(Factor::new(HOUSING_COST, 0.0))
            .chain(overrides.iter().map(|(id, v)| Factor::new(*id, *v)))
            .collect();
        EventGenerator::standard().generate(&FactorMap::build(&FactorCatalog::standard(), &factors))
    }

    #[test]
    fn test_catalog_defaults_only_mention_housing() {
        let events = EventGenerator::standard()
            .generate(&FactorMap::build(&FactorCatalog::standard(), &[]));
        assert_eq!(events, vec!["Rents are rising in the major cities".to_string()]);
        assert!(generate(&[]).is_empty());
    }

    #[test]
    fn test_tiers_escalate() {
        assert_eq!(generate(&[(CORRUPTION, 40.0)]).len(), 1);
        assert_eq!(generate(&[(CORRUPTION, 60.0)]).len(), 2);
        assert_eq!(generate(&[(CORRUPTION, 71.0)]).len(), 3);
    }

    #[test]
    fn test_threshold_is_strict() {
        let at = generate(&[(CORRUPTION, 30.0)]);
        assert!(at.is_empty());
    }

    #[test]
    fn test_crisis_events_mention_their_cause() {
        let events = generate(&[(PUBLIC_HEALTH_CRISIS, 90.0), (UNEMPLOYMENT_RATE, 80.0)]);
        assert!(events.iter().any(|e| {
            let e = e.to_lowercase();
            e.contains("health") || e.contains("crisis") || e.contains("unemployment")
        }));
        // combination messages come after every single-factor message
        assert_eq!(
            events.last().map(String::as_str),
            Some("The health crisis and mass unemployment are feeding each other")
        );
    }

    #[test]
    fn test_child_labor_and_immigration() {
        let events = generate(&[(CHILD_LABOR, 100.0)]);
        assert!(events.iter().any(|e| e.to_lowercase().contains("child labor")));

        let events = generate(&[(IMMIGRATION_RATE, 70.0)]);
        assert!(
            events
                .iter()
                .any(|e| e.contains("immigration") || e.contains("workforce"))
        );
    }

    #[test]
    fn test_fantasy_storm_produces_many_events() {
        let events = generate(&[
            (JOKER_CHAOS_INDEX, 100.0),
            (GODZILLA_RAMPAGE, 100.0),
            (MANA_STORM_INTENSITY, 100.0),
        ]);
        assert!(events.len() > 3);
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let events = generate(&[(CORRUPTION, 80.0), (UNEMPLOYMENT_RATE, 40.0)]);
        assert!(events[0].contains("bribery"));
        assert!(events[3].contains("unemployment"));
    }
}
