//! Factor and weight file loading
//!
//! Files are YAML unless their extension is `.json`. A factor file is either
//! a list of `{id, value}` entries or a plain `id: value` map.

use std::collections::BTreeMap;
use std::path::Path;

use civsim_core::{EngineConfig, Factor};
use color_eyre::eyre::{Context, eyre};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(
    text: &str,
    format: DocumentFormat,
) -> color_eyre::Result<T> {
    match format {
        DocumentFormat::Yaml => serde_saphyr::from_str(text).wrap_err("invalid YAML"),
        DocumentFormat::Json => serde_json::from_str(text).wrap_err("invalid JSON"),
    }
}

/// Parse a factor document in either list or map form
pub fn parse_factors(text: &str, format: DocumentFormat) -> color_eyre::Result<Vec<Factor>> {
    if let Ok(list) = parse::<Vec<Factor>>(text, format) {
        return Ok(list);
    }
    let map: BTreeMap<String, f64> = parse(text, format)
        .wrap_err("expected a list of {id, value} entries or an id: value map")?;
    Ok(map.into_iter().map(|(id, value)| Factor::new(id, value)).collect())
}

pub fn load_factors(path: &Path) -> color_eyre::Result<Vec<Factor>> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read factor file {}", path.display()))?;
    let factors = parse_factors(&text, DocumentFormat::from_path(path))
        .wrap_err_with(|| format!("failed to parse factor file {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = factors.len(), "loaded factor file");
    Ok(factors)
}

/// Load an engine configuration; missing fields keep their defaults
pub fn load_config(path: &Path) -> color_eyre::Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read weights file {}", path.display()))?;
    let config: EngineConfig = parse(&text, DocumentFormat::from_path(path))
        .wrap_err_with(|| format!("failed to parse weights file {}", path.display()))?;
    config
        .validate()
        .wrap_err_with(|| format!("invalid weights in {}", path.display()))?;
    Ok(config)
}

/// `ID=VALUE` from the command line
pub fn parse_assignment(arg: &str) -> Result<Factor, String> {
    let (id, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{arg}'"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing factor id in '{arg}'"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid value for {id}: '{}'", value.trim()))?;
    Ok(Factor::new(id, value))
}

/// Overlay `overrides` onto `base`: matching ids are replaced in place, new ids appended
pub fn merge_factors(
    mut base: Vec<Factor>,
    overrides: impl IntoIterator<Item = Factor>,
) -> Vec<Factor> {
    for factor in overrides {
        match base.iter_mut().find(|f| f.id == factor.id) {
            Some(existing) => existing.value = factor.value,
            None => base.push(factor),
        }
    }
    base
}

/// Reject ids the catalog does not know, listing them all
pub fn check_known_ids(
    catalog: &civsim_core::FactorCatalog,
    factors: &[Factor],
) -> color_eyre::Result<()> {
    let unknown: Vec<&str> = factors
        .iter()
        .filter(|f| !catalog.contains(&f.id))
        .map(|f| f.id.as_str())
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(eyre!("unknown factor ids: {}", unknown.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_list_and_map_forms() {
        let list = parse_factors(
            "- id: corruption\n  value: 70\n- id: education\n  value: 40\n",
            DocumentFormat::Yaml,
        )
        .unwrap();
        assert_eq!(list, vec![Factor::new("corruption", 70.0), Factor::new("education", 40.0)]);

        let map = parse_factors("corruption: 70\neducation: 40\n", DocumentFormat::Yaml).unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.contains(&Factor::new("corruption", 70.0)));

        let json = parse_factors(r#"{"healthcare": 55}"#, DocumentFormat::Json).unwrap();
        assert_eq!(json, vec![Factor::new("healthcare", 55.0)]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_factors("[1, 2, 3]", DocumentFormat::Json).is_err());
    }

    #[test]
    fn test_load_factors_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"id": "tax-rate", "value": 45}}]"#).unwrap();
        let factors = load_factors(file.path()).unwrap();
        assert_eq!(factors, vec![Factor::new("tax-rate", 45.0)]);
    }

    #[test]
    fn test_load_config_overlays_defaults_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.yaml");
        std::fs::write(&path, "sigmoid:\n  steepness: 0.03\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.sigmoid.steepness, 0.03);
        assert_eq!(config.success, EngineConfig::default().success);

        std::fs::write(&path, "sigmoid:\n  steepness: -1\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("corruption=80").unwrap(),
            Factor::new("corruption", 80.0)
        );
        assert_eq!(
            parse_assignment(" housing-cost = 12.5 ").unwrap(),
            Factor::new("housing-cost", 12.5)
        );
        assert!(parse_assignment("corruption").is_err());
        assert!(parse_assignment("=5").is_err());
        assert!(parse_assignment("corruption=lots").is_err());
    }

    #[test]
    fn test_merge_replaces_then_appends() {
        let merged = merge_factors(
            vec![Factor::new("a", 1.0), Factor::new("b", 2.0)],
            vec![Factor::new("b", 5.0), Factor::new("c", 3.0)],
        );
        assert_eq!(
            merged,
            vec![Factor::new("a", 1.0), Factor::new("b", 5.0), Factor::new("c", 3.0)]
        );
    }

    #[test]
    fn test_unknown_ids_are_reported() {
        let catalog = civsim_core::FactorCatalog::standard();
        let err = check_known_ids(
            &catalog,
            &[Factor::new("corruption", 1.0), Factor::new("warp-drive", 9.0)],
        )
        .unwrap_err();
        assert!(err.to_string().contains("warp-drive"));
    }
}
