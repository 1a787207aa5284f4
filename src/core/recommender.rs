use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::behavior::{message_targets, BehaviorContext, HourHistogram};
use crate::core::filters::CandidateFilter;
use crate::core::scoring::score_pair;
use crate::models::{CompatibilityResult, ScoringWeights};
use crate::store::{RecommendationStore, StoreError};

/// Trailing window for the active-hours comparison
const ACTIVITY_WINDOW_DAYS: i64 = 7;

/// Action type tag the messaging sub-signal aggregates
const SEND_MESSAGE_ACTION: &str = "send_message";

/// Errors surfaced by the recommendation pipeline
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The requester's identity or profile is missing. Fatal for the
    /// request; there is nothing to score against.
    #[error("requester {0} not found")]
    RequesterNotFound(i64),

    /// A store read failed. The request is aborted without partial results.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Recommendation engine: scores every eligible candidate against the
/// requester and returns a ranked, bounded list
///
/// # Pipeline stages
/// 1. Resolve the requester's identity and profile
/// 2. Query eligible candidates (non-self, not already liked, verified,
///    gender preference)
/// 3. Score each candidate, dropping those below the minimum score
/// 4. Sort by score descending, truncate to the limit
pub struct Recommender<S> {
    store: S,
    weights: ScoringWeights,
}

impl<S: RecommendationStore> Recommender<S> {
    pub fn new(store: S, weights: ScoringWeights) -> Self {
        Self { store, weights }
    }

    pub fn with_default_weights(store: S) -> Self {
        Self::new(store, ScoringWeights::default())
    }

    /// [`Recommender::recommend`] with the product defaults: minimum score
    /// 50, limit 20
    pub async fn recommend_with_defaults(
        &self,
        requester_id: i64,
    ) -> Result<Vec<CompatibilityResult>, RecommendError> {
        self.recommend(
            requester_id,
            crate::config::DEFAULT_MIN_SCORE,
            crate::config::DEFAULT_LIMIT,
        )
        .await
    }

    /// Rank eligible candidates for a requester
    ///
    /// Returns at most `limit` results with scores of at least `min_score`,
    /// highest first. The sort is stable, so candidates with equal scores
    /// keep the store's retrieval order; no further tie-break is applied. An
    /// empty candidate pool yields an empty list, not an error.
    pub async fn recommend(
        &self,
        requester_id: i64,
        min_score: u8,
        limit: usize,
    ) -> Result<Vec<CompatibilityResult>, RecommendError> {
        let now = Utc::now();
        self.recommend_at(requester_id, min_score, limit, now).await
    }

    /// [`Recommender::recommend`] with an explicit scoring instant
    ///
    /// The activity and behavioral factors are time-dependent; pinning `now`
    /// makes a request reproducible against a fixed store snapshot.
    pub async fn recommend_at(
        &self,
        requester_id: i64,
        min_score: u8,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<CompatibilityResult>, RecommendError> {
        let requester = self
            .store
            .get_identity(requester_id)
            .await?
            .ok_or(RecommendError::RequesterNotFound(requester_id))?;
        let requester_profile = self
            .store
            .get_profile(requester_id)
            .await?
            .ok_or(RecommendError::RequesterNotFound(requester_id))?;

        let liked_ids = self.store.liked_user_ids(requester_id).await?;
        let filter = CandidateFilter::for_requester(&requester, liked_ids);
        let candidates = self.store.query_candidates(&filter).await?;

        info!(
            requester_id,
            candidates = candidates.len(),
            min_score,
            limit,
            "scoring candidate pool"
        );

        // Requester-side behavior is the same for every candidate; snapshot
        // it once per request.
        let messaged = message_targets(
            &self
                .store
                .events_by_actor(requester_id, Some(SEND_MESSAGE_ACTION), None)
                .await?,
        );
        let window_start = now - Duration::days(ACTIVITY_WINDOW_DAYS);
        let requester_hours = HourHistogram::from_events(
            &self
                .store
                .events_by_actor(requester_id, None, Some(window_start))
                .await?,
        );

        let mut results: Vec<CompatibilityResult> = Vec::new();
        for (candidate, candidate_profile) in candidates {
            let behavior = self
                .behavior_context(
                    requester_id,
                    candidate.id,
                    &messaged,
                    requester_hours,
                    window_start,
                )
                .await?;

            let breakdown = score_pair(
                &requester,
                &requester_profile,
                &candidate,
                &candidate_profile,
                &behavior,
                now,
            );
            let score = breakdown.total(&self.weights);

            debug!(
                requester_id,
                candidate_id = candidate.id,
                score,
                ?breakdown,
                "scored candidate"
            );

            if score >= min_score {
                results.push(CompatibilityResult {
                    user: candidate,
                    profile: candidate_profile,
                    score,
                });
            }
        }

        // Stable sort: equal scores keep retrieval order.
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(limit);

        info!(requester_id, returned = results.len(), "recommendations ready");
        Ok(results)
    }

    async fn behavior_context(
        &self,
        requester_id: i64,
        candidate_id: i64,
        messaged: &std::collections::HashSet<i64>,
        requester_hours: Option<HourHistogram>,
        window_start: DateTime<Utc>,
    ) -> Result<BehaviorContext, StoreError> {
        let requester_view = self.store.get_profile_view(requester_id, candidate_id).await?;
        let candidate_view = self.store.get_profile_view(candidate_id, requester_id).await?;
        let candidate_hours = HourHistogram::from_events(
            &self
                .store
                .events_by_actor(candidate_id, None, Some(window_start))
                .await?,
        );

        Ok(BehaviorContext {
            requester_view,
            candidate_view,
            requester_messaged_candidate: messaged.contains(&candidate_id),
            requester_hours,
            candidate_hours,
        })
    }
}
