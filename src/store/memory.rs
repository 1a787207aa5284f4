//! In-memory store for tests, benches, and fixture data
//!
//! Keeps the same shapes a relational backend would: keyed user/profile
//! tables, a like table, an append-only event log, and the upserted
//! profile-view counter table.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::filters::CandidateFilter;
use crate::models::{InteractionEvent, ProfileView, UserIdentity, UserProfile};
use crate::store::{RecommendationStore, StoreError};

#[derive(Default)]
struct Tables {
    identities: HashMap<i64, UserIdentity>,
    profiles: HashMap<i64, UserProfile>,
    likes: Vec<(i64, i64)>,
    events: Vec<InteractionEvent>,
    profile_views: HashMap<(i64, i64), ProfileView>,
    // Preserves insertion order for candidate queries so ranking ties are
    // reproducible in tests.
    insertion_order: Vec<i64>,
}

/// Thread-safe in-memory implementation of [`RecommendationStore`]
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user and their profile
    pub fn put_user(&self, identity: UserIdentity, profile: UserProfile) {
        let mut tables = self.tables.write().unwrap();
        if !tables.identities.contains_key(&identity.id) {
            tables.insertion_order.push(identity.id);
        }
        tables.profiles.insert(identity.id, profile);
        tables.identities.insert(identity.id, identity);
    }

    /// Insert an identity with no profile row (incomplete signups exist)
    pub fn put_identity(&self, identity: UserIdentity) {
        let mut tables = self.tables.write().unwrap();
        if !tables.identities.contains_key(&identity.id) {
            tables.insertion_order.push(identity.id);
        }
        tables.identities.insert(identity.id, identity);
    }

    /// Record that `liker_id` liked (or passed on) `liked_id`
    pub fn record_like(&self, liker_id: i64, liked_id: i64) {
        self.tables.write().unwrap().likes.push((liker_id, liked_id));
    }

    /// Append an event to the interaction log
    pub fn record_event(&self, event: InteractionEvent) {
        self.tables.write().unwrap().events.push(event);
    }

    /// Upsert a profile view: created at count 1 on first sight, incremented
    /// on repeats, matching the tracking layer's counter semantics
    pub fn record_profile_view(&self, viewer_id: i64, viewed_id: i64, at: DateTime<Utc>) {
        // Self-views are never tracked
        if viewer_id == viewed_id {
            return;
        }

        let mut tables = self.tables.write().unwrap();
        tables
            .profile_views
            .entry((viewer_id, viewed_id))
            .and_modify(|view| {
                view.view_count += 1;
                view.last_viewed_at = at;
            })
            .or_insert(ProfileView {
                viewer_id,
                viewed_id,
                view_count: 1,
                last_viewed_at: at,
            });
    }
}

#[async_trait]
impl RecommendationStore for MemoryStore {
    async fn get_identity(&self, user_id: i64) -> Result<Option<UserIdentity>, StoreError> {
        Ok(self.tables.read().unwrap().identities.get(&user_id).cloned())
    }

    async fn get_profile(&self, user_id: i64) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.tables.read().unwrap().profiles.get(&user_id).cloned())
    }

    async fn liked_user_ids(&self, liker_id: i64) -> Result<Vec<i64>, StoreError> {
        Ok(self
            .tables
            .read()
            .unwrap()
            .likes
            .iter()
            .filter(|(liker, _)| *liker == liker_id)
            .map(|(_, liked)| *liked)
            .collect())
    }

    async fn query_candidates(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<(UserIdentity, UserProfile)>, StoreError> {
        let tables = self.tables.read().unwrap();
        let mut candidates = Vec::new();
        for user_id in &tables.insertion_order {
            let Some(identity) = tables.identities.get(user_id) else {
                continue;
            };
            if !filter.matches(identity) {
                continue;
            }
            let Some(profile) = tables.profiles.get(user_id) else {
                continue;
            };
            candidates.push((identity.clone(), profile.clone()));
        }
        Ok(candidates)
    }

    async fn get_profile_view(
        &self,
        viewer_id: i64,
        viewed_id: i64,
    ) -> Result<Option<ProfileView>, StoreError> {
        Ok(self
            .tables
            .read()
            .unwrap()
            .profile_views
            .get(&(viewer_id, viewed_id))
            .cloned())
    }

    async fn events_by_actor(
        &self,
        actor_id: i64,
        action_type: Option<&str>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<InteractionEvent>, StoreError> {
        Ok(self
            .tables
            .read()
            .unwrap()
            .events
            .iter()
            .filter(|e| e.user_id == actor_id)
            .filter(|e| action_type.map_or(true, |t| e.action_type == t))
            .filter(|e| since.map_or(true, |s| e.created_at >= s))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_profile_view_upsert() {
        let store = MemoryStore::new();
        store.record_profile_view(1, 2, at(9));
        store.record_profile_view(1, 2, at(10));
        store.record_profile_view(1, 2, at(11));

        let view = tokio_test::block_on(store.get_profile_view(1, 2))
            .unwrap()
            .unwrap();
        assert_eq!(view.view_count, 3);
        assert_eq!(view.last_viewed_at, at(11));

        // Opposite direction is a separate counter
        assert!(tokio_test::block_on(store.get_profile_view(2, 1))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_self_views_not_tracked() {
        let store = MemoryStore::new();
        store.record_profile_view(1, 1, at(9));
        assert!(tokio_test::block_on(store.get_profile_view(1, 1))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_events_filtered_by_type_and_window() {
        let store = MemoryStore::new();
        let mut login = InteractionEvent {
            user_id: 1,
            action_type: "login".to_string(),
            target_id: None,
            data: None,
            created_at: at(8),
        };
        store.record_event(login.clone());
        login.action_type = "send_message".to_string();
        login.target_id = Some(2);
        login.created_at = at(12);
        store.record_event(login);

        let messages =
            tokio_test::block_on(store.events_by_actor(1, Some("send_message"), None)).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].target_id, Some(2));

        let recent =
            tokio_test::block_on(store.events_by_actor(1, None, Some(at(10)))).unwrap();
        assert_eq!(recent.len(), 1);

        let all = tokio_test::block_on(store.events_by_actor(1, None, None)).unwrap();
        assert_eq!(all.len(), 2);
    }
}
