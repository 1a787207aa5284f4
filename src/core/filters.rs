use std::collections::HashSet;

use crate::models::{GenderPreference, UserIdentity};

/// Eligibility filter for the candidate query
///
/// Built once per request from the requester's identity and like history,
/// then handed to the store. Stores backed by SQL translate the fields into
/// WHERE clauses; the in-memory store applies [`CandidateFilter::matches`]
/// directly. New eligibility rules belong here, not in the scoring code.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    exclude_ids: HashSet<i64>,
    gender_preference: GenderPreference,
    verified_only: bool,
}

impl CandidateFilter {
    /// Filter for a requester: excludes the requester themselves, anyone they
    /// have already liked, unverified accounts, and genders outside their
    /// preference.
    pub fn for_requester(requester: &UserIdentity, liked_ids: impl IntoIterator<Item = i64>) -> Self {
        let mut exclude_ids: HashSet<i64> = liked_ids.into_iter().collect();
        exclude_ids.insert(requester.id);

        Self {
            exclude_ids,
            gender_preference: requester.interested_in,
            verified_only: true,
        }
    }

    /// Add another id to the exclusion set
    pub fn exclude(mut self, user_id: i64) -> Self {
        self.exclude_ids.insert(user_id);
        self
    }

    /// Relax the verification requirement (used by internal tooling only)
    pub fn include_unverified(mut self) -> Self {
        self.verified_only = false;
        self
    }

    /// Whether a candidate passes every eligibility rule
    pub fn matches(&self, candidate: &UserIdentity) -> bool {
        if self.exclude_ids.contains(&candidate.id) {
            return false;
        }
        if self.verified_only && !candidate.is_verified {
            return false;
        }
        self.gender_preference.accepts(candidate.gender)
    }
}
