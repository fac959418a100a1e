//! Factor input types
//!
//! A [`Factor`] is one slider value as sent by a front end. Display metadata
//! lives in [`FactorDefinition`], which is owned by the catalog.

use serde::{Deserialize, Serialize};

/// A single named input dial (0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub id: String,
    pub value: f64,
}

impl Factor {
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

/// Grouping used by front ends to lay out sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorCategory {
    Economic,
    SocialWelfare,
    Social,
    Technology,
    Environmental,
    Risk,
    Modern,
    Fantasy,
}

impl FactorCategory {
    #[must_use]
    pub fn is_fantasy(self) -> bool {
        matches!(self, FactorCategory::Fantasy)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FactorCategory::Economic => "Economic",
            FactorCategory::SocialWelfare => "Social Welfare",
            FactorCategory::Social => "Social",
            FactorCategory::Technology => "Technology",
            FactorCategory::Environmental => "Environmental",
            FactorCategory::Risk => "Risk",
            FactorCategory::Modern => "Modern",
            FactorCategory::Fantasy => "Fantasy",
        }
    }
}

/// Catalog entry for a recognized factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: FactorCategory,
    /// Value used when an evaluation does not supply this factor
    pub default_value: f64,
}

impl FactorDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: FactorCategory,
        default_value: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category,
            default_value,
        }
    }

    /// The factor at its default value
    #[must_use]
    pub fn default_factor(&self) -> Factor {
        Factor::new(self.id.clone(), self.default_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_ignores_extra_fields() {
        let json = r#"{"id":"corruption","name":"Corruption","value":42,"description":"x"}"#;
        let factor: Factor = serde_json::from_str(json).unwrap();
        assert_eq!(factor, Factor::new("corruption", 42.0));
    }

    #[test]
    fn test_fantasy_category() {
        assert!(FactorCategory::Fantasy.is_fantasy());
        assert!(!FactorCategory::Risk.is_fantasy());
        assert_eq!(FactorCategory::SocialWelfare.label(), "Social Welfare");
    }
}
