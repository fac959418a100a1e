//! FactorMap construction
//!
//! Turns a caller-supplied factor list into a total lookup over the catalog.
//! Malformed input never errors: missing ids take their catalog default,
//! non-finite values fall back to the default, out-of-range values are clamped,
//! and ids the catalog does not know are dropped.

use rustc_hash::FxHashMap;

use crate::catalog::FactorCatalog;
use crate::model::Factor;

#[derive(Debug, Clone, PartialEq)]
pub struct FactorMap {
    values: FxHashMap<String, f64>,
}

impl FactorMap {
    pub fn build(catalog: &FactorCatalog, factors: &[Factor]) -> Self {
        let mut values: FxHashMap<String, f64> = catalog
            .iter()
            .map(|def| (def.id.clone(), sanitize(def.default_value, 0.0)))
            .collect();

        for factor in factors {
            let Some(slot) = values.get_mut(factor.id.as_str()) else {
                tracing::trace!(id = %factor.id, "ignoring factor outside the catalog");
                continue;
            };
            if !factor.value.is_finite() {
                tracing::debug!(
                    id = %factor.id,
                    value = factor.value,
                    "non-finite factor value, using catalog default"
                );
                *slot = sanitize(catalog.default_value(&factor.id), 0.0);
                continue;
            }
            *slot = factor.value.clamp(0.0, 100.0);
        }

        Self { values }
    }

    /// Effective value of `id` on the 0-100 scale; 0.0 for ids outside the catalog
    #[must_use]
    pub fn get(&self, id: &str) -> f64 {
        self.values.get(id).copied().unwrap_or(0.0)
    }

    /// Effective value of `id` on the 0-1 scale
    #[must_use]
    pub fn fraction(&self, id: &str) -> f64 {
        self.get(id) / 100.0
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

fn sanitize(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        fallback
    }
}
