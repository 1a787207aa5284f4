// Core algorithm exports
pub mod behavior;
pub mod distance;
pub mod filters;
pub mod recommender;
pub mod scoring;
pub mod signals;

pub use behavior::{behavioral_patterns, BehaviorContext, HourHistogram};
pub use distance::{haversine_distance, parse_coordinates};
pub use filters::CandidateFilter;
pub use recommender::{RecommendError, Recommender};
pub use scoring::score_pair;
