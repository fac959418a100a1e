use crate::model::SocialClass;

/// Rejected engine configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{class:?} harmful weight for {factor} must be within [0, 1], got {weight}")]
    HarmfulWeightOutOfRange {
        class: SocialClass,
        factor: String,
        weight: f64,
    },

    #[error("{class:?} beneficial weight for {factor} must not be negative, got {weight}")]
    NegativeBeneficialWeight {
        class: SocialClass,
        factor: String,
        weight: f64,
    },

    #[error("saturation scale for {factor} must be positive, got {saturation}")]
    InvalidSaturation { factor: String, saturation: f64 },

    #[error("dampening for {factor} must be within [0, 1], got {dampening}")]
    InvalidDampening { factor: String, dampening: f64 },

    #[error("synergy cap for {a} x {b} must not be negative, got {cap}")]
    NegativeSynergyCap { a: String, b: String, cap: f64 },

    #[error("sigmoid steepness must be positive, got {0}")]
    InvalidSteepness(f64),

    #[error("redistribution split must sum to 1, got {0}")]
    RedistributionSplit(f64),

    #[error("success class weights must sum to 1, got {0}")]
    SuccessWeights(f64),

    #[error("compounding divisor must be positive, got {0}")]
    InvalidDivisor(f64),

    #[error("{class:?} compounding sensitivity must not be negative, got {sensitivity}")]
    NegativeSensitivity { class: SocialClass, sensitivity: f64 },

    #[error("tipping point must be positive, got {0}")]
    InvalidTippingPoint(f64),

    #[error("{field} must be finite")]
    NonFinite { field: String },
}

/// Rejected preset catalog or lookup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresetError {
    #[error("preset name must not be empty")]
    EmptyName,

    #[error("duplicate preset name: {0}")]
    DuplicateName(String),

    #[error("preset not found: {0}")]
    NotFound(String),
}
