// Model exports
pub mod domain;

pub use domain::{
    CompatibilityResult, Gender, GenderPreference, InteractionEvent, ProfileView, ScoreBreakdown,
    ScoringWeights, UserIdentity, UserProfile,
};
