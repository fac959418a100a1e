//! Subcommand implementations
//!
//! Each command returns its rendered output so `main` only has to print it.

use std::path::PathBuf;

use civsim_core::model::Factor;
use civsim_core::random::{ConstantSource, EntropySource, RandomSource, SeededSource};
use civsim_core::{Engine, EngineConfig, FactorCatalog, apply_preset};
use color_eyre::eyre::Context;

use crate::input::{check_known_ids, load_config, load_factors, merge_factors};
use crate::presets::load_presets;
use crate::report::{BatchRow, OutputFormat, render_batch, render_catalog, render_presets, render_state};

/// Inputs to `civsim run`
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub preset: Option<String>,
    pub presets_file: Option<PathBuf>,
    pub factors_file: Option<PathBuf>,
    pub overrides: Vec<Factor>,
    pub seed: Option<u64>,
    pub variation: f64,
    pub randomize: bool,
    pub weights: Option<PathBuf>,
    pub breakdown: bool,
    pub format: OutputFormat,
}

fn engine(weights: Option<&PathBuf>) -> color_eyre::Result<Engine> {
    let config = match weights {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    Ok(Engine::new(FactorCatalog::standard(), config)?)
}

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededSource::from_seed(seed)),
        None => Box::new(EntropySource::new()),
    }
}

/// Assemble the factor list: catalog defaults (or random sliders), then the
/// preset, then the factor file, then `--set` overrides.
pub fn build_factors(
    options: &RunOptions,
    catalog: &FactorCatalog,
    rng: &mut dyn RandomSource,
) -> color_eyre::Result<Vec<Factor>> {
    let mut factors = if options.randomize {
        catalog.randomized_factors(rng, 100)
    } else {
        catalog.default_factors()
    };

    if let Some(name) = &options.preset {
        let presets = load_presets(options.presets_file.as_deref(), catalog)?;
        let preset = presets.get(name)?;
        tracing::debug!(preset = %preset.name, variation = options.variation, "applying preset");
        factors = merge_factors(factors, apply_preset(catalog, preset, options.variation, rng));
    }

    if let Some(path) = &options.factors_file {
        factors = merge_factors(factors, load_factors(path)?);
    }

    factors = merge_factors(factors, options.overrides.iter().cloned());

    if let Err(e) = check_known_ids(catalog, &factors) {
        tracing::warn!("{e}; these factors are ignored");
    }
    Ok(factors)
}

pub fn run(options: &RunOptions) -> color_eyre::Result<String> {
    let engine = engine(options.weights.as_ref())?;
    let mut rng = random_source(options.seed);
    let factors = build_factors(options, engine.catalog(), rng.as_mut())?;

    let (state, breakdown) = engine.evaluate_with_breakdown(&factors, rng.as_mut());
    tracing::info!(
        success = state.success_rate,
        state = %state.current_state,
        "evaluation complete"
    );
    render_state(&state, options.breakdown.then_some(&breakdown), options.format)
}

/// Evaluate every preset exactly as written and summarize the results
pub fn batch(
    presets_file: Option<&PathBuf>,
    weights: Option<&PathBuf>,
    seed: u64,
    format: OutputFormat,
) -> color_eyre::Result<String> {
    let engine = engine(weights)?;
    let presets = load_presets(presets_file.map(PathBuf::as_path), engine.catalog())?;

    let inputs: Vec<Vec<Factor>> = presets
        .presets
        .iter()
        .map(|preset| {
            apply_preset(engine.catalog(), preset, 0.0, &mut ConstantSource::neutral())
        })
        .collect();
    let states = engine.evaluate_batch(&inputs, seed);

    let rows: Vec<BatchRow<'_>> = presets
        .presets
        .iter()
        .zip(&states)
        .map(|(preset, state)| BatchRow::new(&preset.name, state))
        .collect();
    render_batch(&rows, format)
}

pub fn list_presets(
    presets_file: Option<&PathBuf>,
    format: OutputFormat,
) -> color_eyre::Result<String> {
    let presets = load_presets(presets_file.map(PathBuf::as_path), &FactorCatalog::standard())?;
    render_presets(&presets, format)
}

pub fn list_factors(format: OutputFormat) -> color_eyre::Result<String> {
    render_catalog(&FactorCatalog::standard(), format)
}

/// The default engine configuration as a YAML starting point for `--weights`
pub fn default_weights() -> color_eyre::Result<String> {
    serde_saphyr::to_string(&EngineConfig::default()).wrap_err("failed to encode weights")
}
