//! Read interface to the persistence collaborator
//!
//! The engine never creates, updates, or deletes user data; everything it
//! needs arrives through this trait. Production deployments implement it
//! over the relational store; [`MemoryStore`] backs tests and fixtures.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::filters::CandidateFilter;
use crate::models::{InteractionEvent, ProfileView, UserIdentity, UserProfile};

pub use memory::MemoryStore;

/// Errors surfaced by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    ReadFailed(String),
}

/// Read-only queries the recommendation engine issues
///
/// All methods are snapshot reads; the engine assumes nothing it reads is
/// mutated for the duration of one `recommend` call, and tolerates the log
/// being appended between calls.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Look up a user's account record
    async fn get_identity(&self, user_id: i64) -> Result<Option<UserIdentity>, StoreError>;

    /// Look up a user's profile
    async fn get_profile(&self, user_id: i64) -> Result<Option<UserProfile>, StoreError>;

    /// Ids of every user the given user has liked or passed on
    async fn liked_user_ids(&self, liker_id: i64) -> Result<Vec<i64>, StoreError>;

    /// All (identity, profile) pairs passing the eligibility filter
    async fn query_candidates(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<(UserIdentity, UserProfile)>, StoreError>;

    /// Cumulative view counter for one (viewer, viewed) direction
    async fn get_profile_view(
        &self,
        viewer_id: i64,
        viewed_id: i64,
    ) -> Result<Option<ProfileView>, StoreError>;

    /// Interaction events by actor, optionally narrowed by action type and a
    /// window lower bound
    async fn events_by_actor(
        &self,
        actor_id: i64,
        action_type: Option<&str>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<InteractionEvent>, StoreError>;
}
