// Property tests for score bounds and monotonicity

use proptest::prelude::*;
use spark_recs::core::behavior::BehaviorContext;
use spark_recs::core::score_pair;
use spark_recs::core::signals::distance_score;
use spark_recs::{Gender, GenderPreference, ScoringWeights, UserIdentity, UserProfile};

// The distance schedule is only monotone within each piecewise region: the
// documented curve steps up from ~0.35 to ~0.50 at the 20 km boundary.
const REGIONS: [(f64, f64); 4] = [(0.0, 5.0), (5.0, 20.0), (20.0, 100.0), (100.0, 20000.0)];

proptest! {
    /// Proximity never increases with distance inside any one region of the
    /// piecewise schedule
    #[test]
    fn distance_score_monotone_within_region(
        region in 0usize..4,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
    ) {
        let (lo, hi) = REGIONS[region];
        let d1 = lo + a * (hi - lo);
        let d2 = lo + b * (hi - lo);
        let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        prop_assert!(distance_score(near) >= distance_score(far));
    }

    /// Proximity stays within [0.2, 1.0] for any non-negative distance
    #[test]
    fn distance_score_bounded(d in 0.0f64..50000.0) {
        let score = distance_score(d);
        prop_assert!((0.2..=1.0).contains(&score));
    }

    /// The weighted total is always an integer in [0, 100] for well-formed
    /// pairs, whatever the profile contents
    #[test]
    fn total_score_bounded(
        birth_year_a in 1950i32..2005,
        birth_year_b in 1950i32..2005,
        lat1 in -90.0f64..90.0,
        lon1 in -180.0f64..180.0,
        lat2 in -90.0f64..90.0,
        lon2 in -180.0f64..180.0,
        interests_a in proptest::collection::vec("[a-z]{3,8}", 0..6),
        interests_b in proptest::collection::vec("[a-z]{3,8}", 0..6),
        profession_a in "[a-z ]{0,20}",
        profession_b in "[a-z ]{0,20}",
        hours_ago in 0i64..100_000,
    ) {
        let now = chrono::Utc::now();

        let requester = UserIdentity {
            id: 1,
            date_of_birth: format!("{birth_year_a}-06-15"),
            gender: Gender::Male,
            interested_in: GenderPreference::Everyone,
            is_verified: true,
        };
        let candidate = UserIdentity {
            id: 2,
            date_of_birth: format!("{birth_year_b}-06-15"),
            gender: Gender::Female,
            interested_in: GenderPreference::Everyone,
            is_verified: true,
        };
        let requester_profile = UserProfile {
            user_id: 1,
            city: None,
            state: None,
            country: None,
            coordinates: Some(format!("{lat1},{lon1}")),
            profession: profession_a,
            interests: interests_a,
            last_active: None,
        };
        let candidate_profile = UserProfile {
            user_id: 2,
            city: None,
            state: None,
            country: None,
            coordinates: Some(format!("{lat2},{lon2}")),
            profession: profession_b,
            interests: interests_b,
            last_active: Some(now - chrono::Duration::hours(hours_ago)),
        };

        let breakdown = score_pair(
            &requester,
            &requester_profile,
            &candidate,
            &candidate_profile,
            &BehaviorContext::default(),
            now,
        );

        for factor in [
            breakdown.age,
            breakdown.location,
            breakdown.interests,
            breakdown.activity,
            breakdown.profession,
            breakdown.behavioral,
        ] {
            prop_assert!((0.0..=1.0).contains(&factor));
        }

        let total = breakdown.total(&ScoringWeights::default());
        prop_assert!(total <= 100);
    }
}
