//! Spark Recs - compatibility scoring and recommendation engine for the
//! Spark dating app
//!
//! Given a requesting user and a pool of candidates, the engine computes a
//! bounded 0-100 compatibility score per candidate from six signals (age,
//! location, interests, activity recency, profession, interaction behavior),
//! filters by a minimum score, and returns a ranked list. Persistence,
//! transport, and identity live outside this crate; everything the engine
//! reads arrives through the [`store::RecommendationStore`] trait.

pub mod config;
pub mod core;
pub mod models;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use crate::config::Settings;
pub use crate::core::{haversine_distance, CandidateFilter, RecommendError, Recommender};
pub use crate::models::{
    CompatibilityResult, Gender, GenderPreference, InteractionEvent, ProfileView, ScoreBreakdown,
    ScoringWeights, UserIdentity, UserProfile,
};
pub use crate::store::{MemoryStore, RecommendationStore, StoreError};
