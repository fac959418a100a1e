mod factor;
pub mod ids;
mod labels;
mod results;

pub use factor::{Factor, FactorCategory, FactorDefinition};
pub use labels::{StateLabel, UnknownStateLabel};
pub use results::{ClassScores, ScoreBreakdown, SimulationState, SocialClass, round_score};
