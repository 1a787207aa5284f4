use serde::{Deserialize, Serialize};

/// Candidate gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Which genders a user wants to be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenderPreference {
    MaleOnly,
    FemaleOnly,
    Everyone,
}

impl GenderPreference {
    /// Whether a candidate of the given gender passes this preference
    pub fn accepts(&self, gender: Gender) -> bool {
        match self {
            GenderPreference::MaleOnly => gender == Gender::Male,
            GenderPreference::FemaleOnly => gender == Gender::Female,
            GenderPreference::Everyone => true,
        }
    }
}

/// Account-level user record
///
/// `date_of_birth` is kept as the raw "YYYY-MM-DD" string the account layer
/// stores; age is derived at scoring time, never persisted. A malformed value
/// degrades the age signal to its neutral fallback rather than failing the
/// whole request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: String,
    pub gender: Gender,
    #[serde(rename = "interestedIn")]
    pub interested_in: GenderPreference,
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
}

/// Profile record, 1:1 with [`UserIdentity`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// "lat,lon" in decimal degrees, as entered by the location picker.
    /// Parsed at scoring time; unparsable values fall back to a neutral
    /// location score.
    #[serde(default)]
    pub coordinates: Option<String>,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "lastActive", default)]
    pub last_active: Option<chrono::DateTime<chrono::Utc>>,
}

/// One entry in the append-only interaction log
///
/// The engine never writes these; it only aggregates them over time windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEvent {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "actionType")]
    pub action_type: String,
    #[serde(rename = "targetId", default)]
    pub target_id: Option<i64>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Fast-lookup aggregate over profile-view events
///
/// Upserted by the tracking layer: created on first view of a (viewer,
/// viewed) pair, incremented on repeats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    #[serde(rename = "viewerId")]
    pub viewer_id: i64,
    #[serde(rename = "viewedId")]
    pub viewed_id: i64,
    #[serde(rename = "viewCount")]
    pub view_count: u32,
    #[serde(rename = "lastViewedAt")]
    pub last_viewed_at: chrono::DateTime<chrono::Utc>,
}

/// Per-factor scores feeding one compatibility total
///
/// Every field is in [0, 1]; `total()` applies the weight table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub age: f64,
    pub location: f64,
    pub interests: f64,
    pub activity: f64,
    pub profession: f64,
    pub behavioral: f64,
}

/// Ranked recommendation handed back to the API layer
///
/// Ephemeral: built per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub user: UserIdentity,
    pub profile: UserProfile,
    #[serde(rename = "compatibilityScore")]
    pub score: u8,
}

/// Scoring weight table
///
/// The six weights sum to 1.0. These values are a product contract with the
/// existing recommendation behavior, not tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub age: f64,
    pub location: f64,
    pub interests: f64,
    pub activity: f64,
    pub profession: f64,
    pub behavioral: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            age: 0.15,
            location: 0.25,
            interests: 0.30,
            activity: 0.10,
            profession: 0.10,
            behavioral: 0.10,
        }
    }
}
