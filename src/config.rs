use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Default minimum compatibility score for a recommendation
pub const DEFAULT_MIN_SCORE: u8 = 50;

/// Default maximum number of recommendations per request
pub const DEFAULT_LIMIT: usize = 20;

/// Engine configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Per-factor scoring weights
///
/// The defaults are a behavior contract with the live product; override them
/// only for experiments, and keep the six values summing to 1.0.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_activity_weight")]
    pub activity: f64,
    #[serde(default = "default_profession_weight")]
    pub profession: f64,
    #[serde(default = "default_behavioral_weight")]
    pub behavioral: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            age: default_age_weight(),
            location: default_location_weight(),
            interests: default_interests_weight(),
            activity: default_activity_weight(),
            profession: default_profession_weight(),
            behavioral: default_behavioral_weight(),
        }
    }
}

impl From<WeightsConfig> for ScoringWeights {
    fn from(config: WeightsConfig) -> Self {
        Self {
            age: config.age,
            location: config.location,
            interests: config.interests,
            activity: config.activity,
            profession: config.profession,
            behavioral: config.behavioral,
        }
    }
}

fn default_age_weight() -> f64 {
    0.15
}
fn default_location_weight() -> f64 {
    0.25
}
fn default_interests_weight() -> f64 {
    0.30
}
fn default_activity_weight() -> f64 {
    0.10
}
fn default_profession_weight() -> f64 {
    0.10
}
fn default_behavioral_weight() -> f64 {
    0.10
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_min_score")]
    pub min_score: u8,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            limit: default_limit(),
        }
    }
}

fn default_min_score() -> u8 {
    DEFAULT_MIN_SCORE
}
fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides
    /// earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SPARK_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. SPARK__SCORING__WEIGHTS__AGE -> scoring.weights.age
            .add_source(
                Environment::with_prefix("SPARK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SPARK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
