//! Rendering of evaluation results
//!
//! Text output is meant for people; JSON and YAML output dump the core types
//! unchanged so other tools can consume them.

use std::fmt::Write as _;

use civsim_core::model::{ClassScores, ScoreBreakdown, SimulationState, SocialClass};
use civsim_core::{FactorCatalog, PresetCatalog};
use clap::ValueEnum;
use color_eyre::eyre::Context;
use serde::Serialize;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    fn encoding(self) -> Option<Encoding> {
        match self {
            OutputFormat::Text => None,
            OutputFormat::Json => Some(Encoding::Json),
            OutputFormat::Yaml => Some(Encoding::Yaml),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Encoding {
    Json,
    Yaml,
}

fn encode<T: Serialize>(value: &T, encoding: Encoding) -> color_eyre::Result<String> {
    match encoding {
        Encoding::Json => serde_json::to_string_pretty(value).wrap_err("failed to encode JSON"),
        Encoding::Yaml => serde_saphyr::to_string(value).wrap_err("failed to encode YAML"),
    }
}

/// `[#####---------------]` for a 0-100 score
fn bar(score: u8) -> String {
    let filled = (usize::from(score.min(100)) * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

#[derive(Serialize)]
struct DetailedReport<'a> {
    state: &'a SimulationState,
    breakdown: &'a ScoreBreakdown,
}

/// Render one evaluation, with its breakdown when given
pub fn render_state(
    state: &SimulationState,
    breakdown: Option<&ScoreBreakdown>,
    format: OutputFormat,
) -> color_eyre::Result<String> {
    match (format.encoding(), breakdown) {
        (None, _) => {
            let mut out = state_text(state);
            if let Some(breakdown) = breakdown {
                out.push('\n');
                out.push_str(&breakdown_text(breakdown));
            }
            Ok(out)
        }
        (Some(encoding), Some(breakdown)) => encode(&DetailedReport { state, breakdown }, encoding),
        (Some(encoding), None) => encode(state, encoding),
    }
}

fn state_text(state: &SimulationState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "State:        {}", state.current_state);
    let _ = writeln!(out, "Success rate: {}%", state.success_rate);
    out.push('\n');
    for class in SocialClass::ALL {
        let score = state.class_score(class);
        let _ = writeln!(out, "{:<24} {} {:>3}", class.label(), bar(score), score);
    }
    if !state.events.is_empty() {
        out.push_str("\nEvents:\n");
        for event in &state.events {
            let _ = writeln!(out, "  - {event}");
        }
    }
    out
}

fn scores_line(out: &mut String, stage: &str, scores: &ClassScores) {
    let _ = writeln!(
        out,
        "  {stage:<16} {:>7.2} {:>7.2} {:>7.2}",
        scores.lower, scores.middle, scores.upper
    );
}

fn breakdown_text(b: &ScoreBreakdown) -> String {
    let mut out = String::new();
    out.push_str("Breakdown:\n");
    let _ = writeln!(out, "  {:<16} {:>7} {:>7} {:>7}", "stage", "lower", "middle", "upper");
    scores_line(&mut out, "raw", &b.raw_scores);
    scores_line(&mut out, "calculated", &b.calculated);
    scores_line(&mut out, "compounded", &b.compounded);
    scores_line(&mut out, "after effects", &b.after_effects);
    scores_line(&mut out, "redistributed", &b.redistributed);
    let _ = writeln!(out, "  compounding multiplier: {:.3}", b.compounding_multiplier);
    if b.effects.snap_occurred {
        let _ = writeln!(out, "  snap: population scaled by {:.2}", b.effects.population_scale);
    }

    let p = &b.penalties;
    out.push_str("\nSuccess rate:\n");
    let mut term = |name: &str, value: f64| {
        if value != 0.0 {
            let _ = writeln!(out, "  {name:<22} {value:>7.2}");
        }
    };
    term("base", p.base);
    term("inequality", -p.inequality);
    term("failed state", -p.failed_state);
    term("class floor", -p.class_floor);
    for (factor, penalty) in &p.direct {
        term(factor, -penalty);
    }
    term("redistribution", -p.redistribution);
    term("kaiju", -p.kaiju);
    term("chaos", -p.chaos);
    term("cohesion bonus", p.cohesion_bonus);
    term("balance bonus", p.balance_bonus);
    let _ = writeln!(
        out,
        "  penalties {:.2} raw, {:.2} applied (x{:.2} past tipping point)",
        p.raw, p.applied, p.tipping_multiplier
    );
    if p.terminal_collapse {
        out.push_str("  terminal collapse\n");
    }
    let _ = writeln!(out, "  final {:.2} -> {}", b.success_rate, b.label);
    out
}

/// One row of a batch summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRow<'a> {
    pub preset: &'a str,
    pub success_rate: u8,
    pub lower_class_prosperity: u8,
    pub middle_class_stability: u8,
    pub upper_class_wealth: u8,
    pub current_state: &'a str,
    pub events: usize,
}

impl<'a> BatchRow<'a> {
    pub fn new(preset: &'a str, state: &'a SimulationState) -> Self {
        Self {
            preset,
            success_rate: state.success_rate,
            lower_class_prosperity: state.lower_class_prosperity,
            middle_class_stability: state.middle_class_stability,
            upper_class_wealth: state.upper_class_wealth,
            current_state: &state.current_state,
            events: state.events.len(),
        }
    }
}

pub fn render_batch(rows: &[BatchRow<'_>], format: OutputFormat) -> color_eyre::Result<String> {
    if let Some(encoding) = format.encoding() {
        return encode(&rows, encoding);
    }

    let name_width = rows
        .iter()
        .map(|r| r.preset.len())
        .max()
        .unwrap_or(0)
        .max("Preset".len());
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:>7}  {:>5}  {:>6}  {:>5}  State",
        "Preset", "Success", "Lower", "Middle", "Upper"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>6}%  {:>5}  {:>6}  {:>5}  {}",
            row.preset,
            row.success_rate,
            row.lower_class_prosperity,
            row.middle_class_stability,
            row.upper_class_wealth,
            row.current_state
        );
    }
    Ok(out)
}

pub fn render_presets(presets: &PresetCatalog, format: OutputFormat) -> color_eyre::Result<String> {
    if let Some(encoding) = format.encoding() {
        return encode(presets, encoding);
    }

    let mut out = String::new();
    for preset in &presets.presets {
        let _ = writeln!(out, "{} ({} factors)", preset.name, preset.factors.len());
        if !preset.description.is_empty() {
            let _ = writeln!(out, "    {}", preset.description);
        }
        if let Some(outcome) = &preset.historical_outcome {
            let _ = writeln!(out, "    Outcome: {outcome}");
        }
    }
    Ok(out)
}

pub fn render_catalog(catalog: &FactorCatalog, format: OutputFormat) -> color_eyre::Result<String> {
    if let Some(encoding) = format.encoding() {
        let definitions: Vec<_> = catalog.iter().collect();
        return encode(&definitions, encoding);
    }

    let id_width = catalog.iter().map(|d| d.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for def in catalog.iter() {
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<14}  {:>5}  {}",
            def.id,
            def.category.label(),
            def.default_value,
            def.name
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use civsim_core::Engine;
    use civsim_core::random::ConstantSource;

    fn state() -> SimulationState {
        SimulationState {
            factors: vec![],
            success_rate: 74,
            lower_class_prosperity: 74,
            middle_class_stability: 79,
            upper_class_wealth: 52,
            current_state: "Stable Society".to_string(),
            events: vec!["Rents are rising in the major cities".to_string()],
        }
    }

    #[test]
    fn test_bar_widths() {
        assert_eq!(bar(0), format!("[{}]", "-".repeat(20)));
        assert_eq!(bar(100), format!("[{}]", "#".repeat(20)));
        assert_eq!(bar(50).matches('#').count(), 10);
        assert_eq!(bar(74).matches('#').count(), 15);
    }

    #[test]
    fn test_text_report() {
        let text = render_state(&state(), None, OutputFormat::Text).unwrap();
        assert!(text.contains("Stable Society"));
        assert!(text.contains("Success rate: 74%"));
        assert!(text.contains("Middle Class Stability"));
        assert!(text.contains("  - Rents are rising"));
        assert!(!text.contains("Breakdown"));
    }

    #[test]
    fn test_json_report_is_the_plain_state() {
        let json = render_state(&state(), None, OutputFormat::Json).unwrap();
        let parsed: SimulationState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state());
        assert!(json.contains("\"successRate\": 74"));
    }

    #[test]
    fn test_breakdown_report() {
        let engine = Engine::standard();
        let factors = engine.catalog().default_factors();
        let (state, breakdown) =
            engine.evaluate_with_breakdown(&factors, &mut ConstantSource::neutral());

        let text = render_state(&state, Some(&breakdown), OutputFormat::Text).unwrap();
        assert!(text.contains("Breakdown:"));
        assert!(text.contains("redistributed"));
        assert!(text.contains("final"));

        let json = render_state(&state, Some(&breakdown), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["state"]["successRate"], 74);
        assert!(value["breakdown"]["penalties"].is_object());

        let yaml = render_state(&state, Some(&breakdown), OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("breakdown:"));
    }

    #[test]
    fn test_batch_table() {
        let a = state();
        let mut b = state();
        b.success_rate = 5;
        b.current_state = "Civil War".to_string();
        let rows = vec![BatchRow::new("Balanced Society", &a), BatchRow::new("Feudal", &b)];

        let text = render_batch(&rows, OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Preset"));
        assert!(lines[2].contains("Civil War"));
        assert!(lines[2].contains("5%"));

        let json = render_batch(&rows, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["preset"], "Feudal");
        assert_eq!(value[0]["events"], 1);
    }

    #[test]
    fn test_catalog_listing() {
        let text = render_catalog(&FactorCatalog::standard(), OutputFormat::Text).unwrap();
        assert_eq!(text.lines().count(), FactorCatalog::standard().len());
        assert!(text.contains("joker-chaos-index"));
        assert!(text.contains("Fantasy"));
    }
}
