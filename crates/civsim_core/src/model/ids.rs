//! Identifiers for catalog factors
//!
//! Factor ids are plain kebab-case strings so they survive JSON/YAML round trips
//! and match what front ends send. These constants are the ids the scoring model
//! reads; weight tables in [`crate::config`] refer to them by value.

// === Economic ===
pub const DOMESTIC_MANUFACTURING: &str = "domestic-manufacturing";
pub const TAX_RATE: &str = "tax-rate";
pub const ECONOMIC_INEQUALITY: &str = "economic-inequality";
pub const CURRENCY_INFLATION: &str = "currency-inflation";
pub const ENERGY_COST: &str = "energy-cost";
pub const PUBLIC_DEBT: &str = "public-debt";
pub const HOUSING_COST: &str = "housing-cost";
pub const UNEMPLOYMENT_RATE: &str = "unemployment-rate";
pub const AUTOMATION_LEVEL: &str = "automation-level";

// === Social welfare ===
pub const GOVERNMENT_AID: &str = "government-aid";
pub const HEALTHCARE: &str = "healthcare";
pub const EDUCATION: &str = "education";
pub const INFRASTRUCTURE: &str = "infrastructure";
pub const POLICING_DEFICIENCY: &str = "policing-deficiency";
pub const PUBLIC_HEALTH_CRISIS: &str = "public-health-crisis";

// === Social and political ===
pub const MEDIA_FREEDOM: &str = "media-freedom";
pub const CORRUPTION: &str = "corruption";
pub const SOCIAL_COHESION: &str = "social-cohesion";
pub const GENDER_EQUALITY: &str = "gender-equality";
pub const RELIGIOUS_INFLUENCE: &str = "religious-influence";

// === Technology ===
pub const RESEARCH_DEVELOPMENT: &str = "research-development";
pub const TECHNOLOGICAL_ADOPTION: &str = "technological-adoption";

// === Environmental and risk ===
pub const ENVIRONMENTAL_PROTECTION: &str = "environmental-protection";
pub const ENVIRONMENTAL_REGULATION: &str = "environmental-regulation";
pub const NATURAL_DISASTER_FREQUENCY: &str = "natural-disaster-frequency";
pub const DOMESTIC_WAR_RISK: &str = "domestic-war-risk";

// === Modern societal ===
pub const CLOSED_SOCIETY: &str = "closed-society";
pub const ONE_CHILD_POLICY: &str = "one-child-policy";
pub const SINGLE_PARENT_HOUSEHOLD: &str = "single-parent-household";
pub const IMMIGRATION_RATE: &str = "immigration-rate";
pub const CHILD_LABOR: &str = "child-labor";
pub const SELF_DEFENSE_FREEDOM: &str = "self-defense-freedom";

// === Fantasy ===
pub const MANA_STORM_INTENSITY: &str = "mana-storm-intensity";
pub const THANOS_SNAP_PROBABILITY: &str = "thanos-snap-probability";
pub const GODZILLA_RAMPAGE: &str = "godzilla-rampage";
pub const JOKER_CHAOS_INDEX: &str = "joker-chaos-index";
