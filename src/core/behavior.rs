//! Behavioral pattern signal
//!
//! Blends three sub-signals read from the interaction log and the
//! profile-view counters: reciprocated viewing, prior messaging, and overlap
//! in the hours of day the two users are active. The pipeline snapshots the
//! inputs per request so scoring stays deterministic over the snapshot.

use chrono::Timelike;

use crate::core::signals::NEUTRAL_SCORE;
use crate::models::{InteractionEvent, ProfileView};

const VIEW_WEIGHT: f64 = 0.4;
const MESSAGE_WEIGHT: f64 = 0.4;
const TIME_OVERLAP_WEIGHT: f64 = 0.2;

const VIEW_COUNT_CAP: u32 = 5;
const NO_VIEW_SCORE: f64 = 0.3;
const MESSAGED_BEFORE_SCORE: f64 = 0.9;

/// Hour-of-day activity distribution over the trailing window
///
/// L1-normalized event counts per hour; `None` when the user had no events
/// in the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourHistogram([f64; 24]);

impl HourHistogram {
    /// Build a normalized histogram from a user's events
    ///
    /// Returns `None` for an empty slice so callers can distinguish
    /// "no activity" from "uniformly active".
    pub fn from_events(events: &[InteractionEvent]) -> Option<Self> {
        if events.is_empty() {
            return None;
        }

        let mut counts = [0.0f64; 24];
        for event in events {
            counts[event.created_at.hour() as usize] += 1.0;
        }

        let total: f64 = counts.iter().sum();
        for count in &mut counts {
            *count /= total;
        }
        Some(Self(counts))
    }

    /// Histogram intersection: sum of per-hour minima, in [0, 1]
    pub fn intersection(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a.min(*b))
            .sum()
    }
}

/// Behavioral inputs for one (requester, candidate) pair
///
/// Assembled by the pipeline from store lookups; the scorer itself never
/// touches the store.
#[derive(Debug, Clone, Default)]
pub struct BehaviorContext {
    /// Requester → candidate view counter, if any
    pub requester_view: Option<ProfileView>,
    /// Candidate → requester view counter, if any
    pub candidate_view: Option<ProfileView>,
    /// Whether the requester has ever sent the candidate a message
    pub requester_messaged_candidate: bool,
    /// Requester's trailing-7-day activity distribution
    pub requester_hours: Option<HourHistogram>,
    /// Candidate's trailing-7-day activity distribution
    pub candidate_hours: Option<HourHistogram>,
}

/// Behavioral pattern score: 0.4·views + 0.4·messaging + 0.2·time overlap
pub fn behavioral_patterns(ctx: &BehaviorContext) -> f64 {
    VIEW_WEIGHT * view_signal(ctx)
        + MESSAGE_WEIGHT * message_signal(ctx)
        + TIME_OVERLAP_WEIGHT * time_overlap_signal(ctx)
}

/// Profile-view sub-signal
///
/// The requester having viewed the candidate is the strongest signal
/// ([0.5, 1.0] by view count); the candidate viewing the requester is
/// reciprocal interest ([0.4, 0.65]); no views either way scores 0.3.
fn view_signal(ctx: &BehaviorContext) -> f64 {
    if let Some(view) = &ctx.requester_view {
        let count = view.view_count.min(VIEW_COUNT_CAP) as f64;
        return 0.5 + count / 10.0;
    }

    if let Some(view) = &ctx.candidate_view {
        let count = view.view_count.min(VIEW_COUNT_CAP) as f64;
        return 0.4 + count / 20.0;
    }

    NO_VIEW_SCORE
}

/// Messaging sub-signal: a prior message to the candidate is a strong
/// interest signal, anything else is neutral
fn message_signal(ctx: &BehaviorContext) -> f64 {
    if ctx.requester_messaged_candidate {
        MESSAGED_BEFORE_SCORE
    } else {
        NEUTRAL_SCORE
    }
}

/// Active-hours overlap sub-signal
///
/// Histogram intersection of the two 7-day distributions, doubled and capped
/// at 1.0 so a 50% overlap already scores full marks. Missing activity on
/// either side is neutral.
fn time_overlap_signal(ctx: &BehaviorContext) -> f64 {
    let (Some(requester), Some(candidate)) = (&ctx.requester_hours, &ctx.candidate_hours) else {
        return NEUTRAL_SCORE;
    };

    (2.0 * requester.intersection(candidate)).min(1.0)
}

/// Collect the target ids of a user's "send_message" events
pub fn message_targets(events: &[InteractionEvent]) -> std::collections::HashSet<i64> {
    events
        .iter()
        .filter(|e| e.action_type == "send_message")
        .filter_map(|e| e.target_id)
        .collect()
}
