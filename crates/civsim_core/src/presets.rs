//! Named factor configurations
//!
//! Presets are plain data: applying one yields an ordinary factor list that is
//! evaluated like any other input.

use serde::{Deserialize, Serialize};

use crate::catalog::FactorCatalog;
use crate::error::PresetError;
use crate::model::Factor;
use crate::random::RandomSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_outcome: Option<String>,
    #[serde(default)]
    pub factors: Vec<Factor>,
}

impl Preset {
    /// Value the preset assigns to `id`, if any (last entry wins)
    #[must_use]
    pub fn value(&self, id: &str) -> Option<f64> {
        self.factors.iter().rev().find(|f| f.id == id).map(|f| f.value)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PresetCatalog {
    #[serde(default)]
    pub presets: Vec<Preset>,
}

impl PresetCatalog {
    #[must_use]
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// Case-insensitive lookup by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Preset> {
        let name = name.trim();
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn get(&self, name: &str) -> Result<&Preset, PresetError> {
        self.find(name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Names must be non-empty and unique ignoring case
    pub fn validate(&self) -> Result<(), PresetError> {
        for (i, preset) in self.presets.iter().enumerate() {
            if preset.name.trim().is_empty() {
                return Err(PresetError::EmptyName);
            }
            if self.presets[..i]
                .iter()
                .any(|p| p.name.eq_ignore_ascii_case(&preset.name))
            {
                return Err(PresetError::DuplicateName(preset.name.clone()));
            }
        }
        Ok(())
    }
}

/// Full catalog factor list for `preset`
///
/// Non-fantasy factors named by the preset get a random integer within
/// `variation` of the preset value (clamped to [0, 100]); fantasy factors and
/// factors the preset omits keep their catalog default. `variation == 0`
/// reproduces the preset exactly.
pub fn apply_preset(
    catalog: &FactorCatalog,
    preset: &Preset,
    variation: f64,
    rng: &mut dyn RandomSource,
) -> Vec<Factor> {
    let variation = if variation.is_finite() { variation.max(0.0) } else { 0.0 };

    catalog
        .iter()
        .map(|def| {
            let value = match preset.value(&def.id) {
                Some(v) if !def.category.is_fantasy() => vary(v, variation, rng),
                _ => def.default_value,
            };
            Factor::new(def.id.clone(), value)
        })
        .collect()
}

fn vary(value: f64, variation: f64, rng: &mut dyn RandomSource) -> f64 {
    if variation == 0.0 {
        return value;
    }
    let low = (value - variation).max(0.0);
    let high = (value + variation).min(100.0);
    (low + rng.next() * (high - low)).round()
}
