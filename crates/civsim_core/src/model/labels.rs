//! Qualitative state labels
//!
//! The classifier picks exactly one of these per evaluation. The string forms
//! are what front ends display and what [`super::SimulationState`] carries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StateLabel {
    // === Single-factor overrides ===
    GothamAnarchy,
    KaijuApocalypse,
    ArcaneCataclysm,
    IsolatedSociety,
    DemographicCrisis,
    FamilyStructureCrisis,
    CriminalUnderworld,
    RestrictedSociety,
    CivilDisorder,

    // === Combination overrides ===
    ApocalypticCollapse,
    MythicCataclysm,
    DepopulatedWarzone,

    // === Derived effects ===
    EnvironmentalCrisis,
    CivilWar,
    PlaneswalkerChaos,
    InfinityCrisis,
    KaijuChaos,
    CascadingCrisis,

    // === Class floors ===
    LowerClassCrisis,
    MiddleClassInstability,
    UpperClassDecline,

    // === General regimes ===
    CorruptState,
    HyperinflationCrisis,
    DebtCollapse,
    EnergyCrisis,
    AutomationDivide,
    EconomicOligarchy,
    SocialFragmentation,
    TechnologicalBoom,
    CulturalRenaissance,
    HarmoniousSociety,

    // === Fallback ===
    StableSociety,
}

impl StateLabel {
    pub const ALL: [StateLabel; 32] = [
        StateLabel::GothamAnarchy,
        StateLabel::KaijuApocalypse,
        StateLabel::ArcaneCataclysm,
        StateLabel::IsolatedSociety,
        StateLabel::DemographicCrisis,
        StateLabel::FamilyStructureCrisis,
        StateLabel::CriminalUnderworld,
        StateLabel::RestrictedSociety,
        StateLabel::CivilDisorder,
        StateLabel::ApocalypticCollapse,
        StateLabel::MythicCataclysm,
        StateLabel::DepopulatedWarzone,
        StateLabel::EnvironmentalCrisis,
        StateLabel::CivilWar,
        StateLabel::PlaneswalkerChaos,
        StateLabel::InfinityCrisis,
        StateLabel::KaijuChaos,
        StateLabel::CascadingCrisis,
        StateLabel::LowerClassCrisis,
        StateLabel::MiddleClassInstability,
        StateLabel::UpperClassDecline,
        StateLabel::CorruptState,
        StateLabel::HyperinflationCrisis,
        StateLabel::DebtCollapse,
        StateLabel::EnergyCrisis,
        StateLabel::AutomationDivide,
        StateLabel::EconomicOligarchy,
        StateLabel::SocialFragmentation,
        StateLabel::TechnologicalBoom,
        StateLabel::CulturalRenaissance,
        StateLabel::HarmoniousSociety,
        StateLabel::StableSociety,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StateLabel::GothamAnarchy => "Gotham Anarchy",
            StateLabel::KaijuApocalypse => "Kaiju Apocalypse",
            StateLabel::ArcaneCataclysm => "Arcane Cataclysm",
            StateLabel::IsolatedSociety => "Isolated Society",
            StateLabel::DemographicCrisis => "Demographic Crisis",
            StateLabel::FamilyStructureCrisis => "Family Structure Crisis",
            StateLabel::CriminalUnderworld => "Criminal Underworld",
            StateLabel::RestrictedSociety => "Restricted Society",
            StateLabel::CivilDisorder => "Civil Disorder",
            StateLabel::ApocalypticCollapse => "Apocalyptic Collapse",
            StateLabel::MythicCataclysm => "Mythic Cataclysm",
            StateLabel::DepopulatedWarzone => "Depopulated Warzone",
            StateLabel::EnvironmentalCrisis => "Environmental Crisis",
            StateLabel::CivilWar => "Civil War",
            StateLabel::PlaneswalkerChaos => "Planeswalker Chaos",
            StateLabel::InfinityCrisis => "Infinity Crisis",
            StateLabel::KaijuChaos => "Kaiju Chaos",
            StateLabel::CascadingCrisis => "Cascading Crisis",
            StateLabel::LowerClassCrisis => "Lower Class Crisis",
            StateLabel::MiddleClassInstability => "Middle Class Instability",
            StateLabel::UpperClassDecline => "Upper Class Decline",
            StateLabel::CorruptState => "Corrupt State",
            StateLabel::HyperinflationCrisis => "Hyperinflation Crisis",
            StateLabel::DebtCollapse => "Debt Collapse",
            StateLabel::EnergyCrisis => "Energy Crisis",
            StateLabel::AutomationDivide => "Automation Divide",
            StateLabel::EconomicOligarchy => "Economic Oligarchy",
            StateLabel::SocialFragmentation => "Social Fragmentation",
            StateLabel::TechnologicalBoom => "Technological Boom",
            StateLabel::CulturalRenaissance => "Cultural Renaissance",
            StateLabel::HarmoniousSociety => "Harmonious Society",
            StateLabel::StableSociety => "Stable Society",
        }
    }

    /// Whether the label describes a crisis, collapse, or chaos outcome
    #[must_use]
    pub fn is_crisis(self) -> bool {
        !matches!(
            self,
            StateLabel::StableSociety
                | StateLabel::TechnologicalBoom
                | StateLabel::CulturalRenaissance
                | StateLabel::HarmoniousSociety
                | StateLabel::RestrictedSociety
                | StateLabel::IsolatedSociety
        )
    }
}

impl fmt::Display for StateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStateLabel(pub String);

impl fmt::Display for UnknownStateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown state label {:?}", self.0)
    }
}

impl std::error::Error for UnknownStateLabel {}

impl FromStr for StateLabel {
    type Err = UnknownStateLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStateLabel(s.to_string()))
    }
}

impl From<StateLabel> for String {
    fn from(label: StateLabel) -> Self {
        label.as_str().to_string()
    }
}

impl TryFrom<String> for StateLabel {
    type Error = UnknownStateLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_strings_round_trip() {
        for label in StateLabel::ALL {
            assert_eq!(label.as_str().parse::<StateLabel>(), Ok(label));
        }
    }

    #[test]
    fn test_labels_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for label in StateLabel::ALL {
            assert!(seen.insert(label.as_str()), "duplicate {label}");
        }
    }

    #[test]
    fn test_crisis_flags() {
        assert!(!StateLabel::StableSociety.is_crisis());
        assert!(!StateLabel::TechnologicalBoom.is_crisis());
        assert!(StateLabel::LowerClassCrisis.is_crisis());
        assert!(StateLabel::CivilWar.is_crisis());
        assert!(StateLabel::GothamAnarchy.is_crisis());
    }

    #[test]
    fn test_unknown_label() {
        assert!("Utopia".parse::<StateLabel>().is_err());
    }
}
