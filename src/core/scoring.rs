use chrono::{DateTime, Utc};

use crate::core::behavior::{behavioral_patterns, BehaviorContext};
use crate::core::signals::{
    activity_level, age_compatibility, interests_overlap, location_proximity,
    profession_compatibility,
};
use crate::models::{ScoreBreakdown, ScoringWeights, UserIdentity, UserProfile};

/// Compute all six factor scores for a (requester, candidate) pair
///
/// Scoring formula (weights sum to 1.0):
/// ```text
/// score = round(100 * (
///     age * 0.15 +            # exponential decay over the age gap
///     location * 0.25 +       # haversine distance or locality fallback
///     interests * 0.30 +      # tiered Jaccard overlap
///     activity * 0.10 +       # candidate's last-active recency
///     profession * 0.10 +     # text match on profession
///     behavioral * 0.10       # views / messages / active-hours overlap
/// ))
/// ```
///
/// Pure over its arguments: the activity and behavioral factors depend on
/// `now` and the pre-fetched [`BehaviorContext`], so the same pair can score
/// differently across requests as the snapshot moves. That is intentional.
pub fn score_pair(
    requester: &UserIdentity,
    requester_profile: &UserProfile,
    candidate: &UserIdentity,
    candidate_profile: &UserProfile,
    behavior: &BehaviorContext,
    now: DateTime<Utc>,
) -> ScoreBreakdown {
    ScoreBreakdown {
        age: age_compatibility(&requester.date_of_birth, &candidate.date_of_birth, now.date_naive()),
        location: location_proximity(requester_profile, candidate_profile),
        interests: interests_overlap(&requester_profile.interests, &candidate_profile.interests),
        activity: activity_level(candidate_profile.last_active, now),
        profession: profession_compatibility(
            &requester_profile.profession,
            &candidate_profile.profession,
        ),
        behavioral: behavioral_patterns(behavior),
    }
}

impl ScoreBreakdown {
    /// Weighted total as an integer percentage, capped at 100
    pub fn total(&self, weights: &ScoringWeights) -> u8 {
        let weighted = self.age * weights.age
            + self.location * weights.location
            + self.interests * weights.interests
            + self.activity * weights.activity
            + self.profession * weights.profession
            + self.behavioral * weights.behavioral;

        (weighted * 100.0).round().min(100.0) as u8
    }
}
