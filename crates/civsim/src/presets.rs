//! Preset catalogs: the embedded defaults or a user-supplied file

use std::path::Path;

use civsim_core::{FactorCatalog, PresetCatalog};
use color_eyre::eyre::Context;

use crate::input::{DocumentFormat, check_known_ids};

const BUILTIN_PRESETS: &str = include_str!("../data/presets.yaml");

/// Parse and validate a preset document
pub fn parse_presets(text: &str, format: DocumentFormat) -> color_eyre::Result<PresetCatalog> {
    let presets: PresetCatalog = match format {
        DocumentFormat::Yaml => serde_saphyr::from_str(text).wrap_err("invalid preset YAML")?,
        DocumentFormat::Json => serde_json::from_str(text).wrap_err("invalid preset JSON")?,
    };
    presets.validate()?;
    Ok(presets)
}

pub fn builtin_presets() -> color_eyre::Result<PresetCatalog> {
    parse_presets(BUILTIN_PRESETS, DocumentFormat::Yaml).wrap_err("built-in presets are invalid")
}

/// Presets from `path`, or the built-in catalog when no path is given.
///
/// Every factor id is checked against `catalog`.
pub fn load_presets(
    path: Option<&Path>,
    catalog: &FactorCatalog,
) -> color_eyre::Result<PresetCatalog> {
    let presets = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read preset file {}", path.display()))?;
            parse_presets(&text, DocumentFormat::from_path(path))
                .wrap_err_with(|| format!("failed to load presets from {}", path.display()))?
        }
        None => builtin_presets()?,
    };

    for preset in &presets.presets {
        check_known_ids(catalog, &preset.factors)
            .wrap_err_with(|| format!("preset '{}'", preset.name))?;
    }
    tracing::debug!(count = presets.len(), "loaded presets");
    Ok(presets)
}
