//! Per-factor similarity signals
//!
//! Each function maps requester/candidate profile data to a score in [0, 1].
//! All fallback values and schedule breakpoints live in named constants so
//! the scoring policy stays auditable per factor.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::core::distance::{haversine_distance, parse_coordinates};
use crate::models::UserProfile;

/// Score used whenever a factor has no usable signal
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Decay rate per year of age difference
const AGE_DECAY_RATE: f64 = 0.15;

// Distance-to-score schedule breakpoints (km)
const DIST_NEIGHBORHOOD_KM: f64 = 5.0;
const DIST_SAME_CITY_KM: f64 = 20.0;
const DIST_NEARBY_KM: f64 = 100.0;
const DIST_CITY_SLOPE: f64 = 0.03;
const DIST_NEARBY_SLOPE: f64 = 0.003;
const DIST_FAR_SLOPE: f64 = 0.001;
const DIST_FAR_FLOOR: f64 = 0.2;

// Textual locality fallbacks when coordinates are unavailable
const SAME_CITY_SCORE: f64 = 0.80;
const SAME_STATE_SCORE: f64 = 0.60;
const SAME_COUNTRY_SCORE: f64 = 0.40;
const NO_LOCALITY_SCORE: f64 = 0.20;

// Interest overlap tiers
const INTERESTS_ONE_SIDED: f64 = 0.3;
const INTERESTS_DISJOINT: f64 = 0.2;
const INTERESTS_FEW_BASE: f64 = 0.5;
const INTERESTS_MANY_BASE: f64 = 0.7;
const INTERESTS_JACCARD_WEIGHT: f64 = 0.3;
const INTERESTS_MANY_THRESHOLD: usize = 3;

// Activity recency buckets, checked in order
const ACTIVITY_WITHIN_HOUR: f64 = 1.0;
const ACTIVITY_WITHIN_DAY: f64 = 0.9;
const ACTIVITY_WITHIN_WEEK: f64 = 0.7;
const ACTIVITY_WITHIN_MONTH: f64 = 0.5;
const ACTIVITY_STALE: f64 = 0.3;

const PROFESSION_EXACT: f64 = 1.0;
const PROFESSION_RELATED: f64 = 0.8;

/// Derive a whole-year age from a "YYYY-MM-DD" date of birth
///
/// Subtracts one year when the birthday has not yet occurred this year.
pub fn calculate_age(date_of_birth: &str, today: NaiveDate) -> Option<i32> {
    let dob = NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d").ok()?;
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    Some(age)
}

/// Age compatibility score
///
/// Equal ages score 1.0; otherwise an exponential decay over the gap, so a
/// 20-year difference is near zero but never a hard cutoff. An unparsable
/// date of birth on either side degrades to the neutral score.
pub fn age_compatibility(requester_dob: &str, candidate_dob: &str, today: NaiveDate) -> f64 {
    let (Some(requester_age), Some(candidate_age)) = (
        calculate_age(requester_dob, today),
        calculate_age(candidate_dob, today),
    ) else {
        tracing::debug!("unparsable date of birth, using neutral age score");
        return NEUTRAL_SCORE;
    };

    if requester_age == candidate_age {
        return 1.0;
    }

    let age_diff = (requester_age - candidate_age).abs() as f64;
    (-AGE_DECAY_RATE * age_diff).exp()
}

/// Location proximity score
///
/// With coordinates on both sides, maps haversine distance through a
/// piecewise-linear schedule that floors at 0.2. Without coordinates, falls
/// back to textual locality matching; malformed coordinates fall back to
/// neutral.
pub fn location_proximity(requester: &UserProfile, candidate: &UserProfile) -> f64 {
    let requester_coords = requester.coordinates.as_deref().filter(|c| !c.is_empty());
    let candidate_coords = candidate.coordinates.as_deref().filter(|c| !c.is_empty());

    let (Some(requester_raw), Some(candidate_raw)) = (requester_coords, candidate_coords) else {
        return locality_fallback(requester, candidate);
    };

    let (Some((lat1, lon1)), Some((lat2, lon2))) =
        (parse_coordinates(requester_raw), parse_coordinates(candidate_raw))
    else {
        tracing::debug!("malformed coordinates, using neutral location score");
        return NEUTRAL_SCORE;
    };

    distance_score(haversine_distance(lat1, lon1, lat2, lon2))
}

/// Map a distance in km to a proximity score
pub fn distance_score(distance_km: f64) -> f64 {
    if distance_km <= DIST_NEIGHBORHOOD_KM {
        1.0
    } else if distance_km <= DIST_SAME_CITY_KM {
        0.8 - DIST_CITY_SLOPE * (distance_km - DIST_NEIGHBORHOOD_KM)
    } else if distance_km <= DIST_NEARBY_KM {
        0.5 - DIST_NEARBY_SLOPE * (distance_km - DIST_SAME_CITY_KM)
    } else {
        (0.3 - DIST_FAR_SLOPE * (distance_km - DIST_NEARBY_KM)).max(DIST_FAR_FLOOR)
    }
}

fn locality_fallback(requester: &UserProfile, candidate: &UserProfile) -> f64 {
    if locality_matches(&requester.city, &candidate.city) {
        SAME_CITY_SCORE
    } else if locality_matches(&requester.state, &candidate.state) {
        SAME_STATE_SCORE
    } else if locality_matches(&requester.country, &candidate.country) {
        SAME_COUNTRY_SCORE
    } else {
        NO_LOCALITY_SCORE
    }
}

fn locality_matches(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// Shared-interests score from Jaccard similarity over the two tag sets
///
/// Weighted to reward having any overlap at all: the Jaccard value only
/// fine-tunes within the tier set by the raw intersection count.
pub fn interests_overlap(requester_interests: &[String], candidate_interests: &[String]) -> f64 {
    let requester: HashSet<&str> = requester_interests.iter().map(String::as_str).collect();
    let candidate: HashSet<&str> = candidate_interests.iter().map(String::as_str).collect();

    if requester.is_empty() && candidate.is_empty() {
        return NEUTRAL_SCORE;
    }
    if requester.is_empty() || candidate.is_empty() {
        return INTERESTS_ONE_SIDED;
    }

    let intersection = requester.intersection(&candidate).count();
    let union = requester.union(&candidate).count();
    let jaccard = intersection as f64 / union as f64;

    if intersection == 0 {
        INTERESTS_DISJOINT
    } else if intersection >= INTERESTS_MANY_THRESHOLD {
        (INTERESTS_MANY_BASE + jaccard * INTERESTS_JACCARD_WEIGHT).min(1.0)
    } else {
        INTERESTS_FEW_BASE + jaccard * INTERESTS_JACCARD_WEIGHT
    }
}

/// Activity recency score for the candidate's `last_active` timestamp
///
/// Buckets are checked most-recent-first; a missing timestamp is neutral.
pub fn activity_level(last_active: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(last_active) = last_active else {
        return NEUTRAL_SCORE;
    };

    let elapsed = now - last_active;
    if elapsed < chrono::Duration::hours(1) {
        ACTIVITY_WITHIN_HOUR
    } else if elapsed < chrono::Duration::hours(24) {
        ACTIVITY_WITHIN_DAY
    } else if elapsed < chrono::Duration::days(7) {
        ACTIVITY_WITHIN_WEEK
    } else if elapsed < chrono::Duration::days(30) {
        ACTIVITY_WITHIN_MONTH
    } else {
        ACTIVITY_STALE
    }
}

/// Profession compatibility score
///
/// Exact match (case-insensitive) beats sharing a word; unrelated or
/// unlisted professions are neutral.
pub fn profession_compatibility(requester_profession: &str, candidate_profession: &str) -> f64 {
    if requester_profession.is_empty() || candidate_profession.is_empty() {
        return NEUTRAL_SCORE;
    }

    let requester = requester_profession.to_lowercase();
    let candidate = candidate_profession.to_lowercase();
    if requester == candidate {
        return PROFESSION_EXACT;
    }

    let requester_words: HashSet<&str> = requester.split_whitespace().collect();
    let candidate_words: HashSet<&str> = candidate.split_whitespace().collect();
    if requester_words.intersection(&candidate_words).next().is_some() {
        return PROFESSION_RELATED;
    }

    NEUTRAL_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn profile(coordinates: Option<&str>) -> UserProfile {
        UserProfile {
            user_id: 1,
            city: Some("Lagos".to_string()),
            state: Some("Lagos State".to_string()),
            country: Some("Nigeria".to_string()),
            coordinates: coordinates.map(str::to_string),
            profession: "engineer".to_string(),
            interests: vec![],
            last_active: None,
        }
    }

    #[test]
    fn test_calculate_age_with_birthday_passed() {
        let age = calculate_age("1996-03-10", today()).unwrap();
        assert_eq!(age, 28);
    }

    #[test]
    fn test_calculate_age_before_birthday() {
        let age = calculate_age("1996-09-10", today()).unwrap();
        assert_eq!(age, 27);
    }

    #[test]
    fn test_age_identical_is_perfect() {
        assert_eq!(age_compatibility("1996-01-01", "1996-02-02", today()), 1.0);
    }

    #[test]
    fn test_age_decays_with_gap() {
        let close = age_compatibility("1996-01-01", "1994-01-01", today());
        let far = age_compatibility("1996-01-01", "1984-01-01", today());
        assert!((close - (-0.3f64).exp()).abs() < 1e-12);
        assert!(far < close);
        assert!(far > 0.0);
    }

    #[test]
    fn test_age_malformed_dob_is_neutral() {
        assert_eq!(age_compatibility("not-a-date", "1996-01-01", today()), NEUTRAL_SCORE);
        assert_eq!(age_compatibility("1996-01-01", "1996-13-40", today()), NEUTRAL_SCORE);
    }

    #[test]
    fn test_distance_score_schedule() {
        assert_eq!(distance_score(0.0), 1.0);
        assert_eq!(distance_score(5.0), 1.0);
        assert!((distance_score(10.0) - 0.65).abs() < 1e-9);
        assert!((distance_score(20.0) - 0.35).abs() < 1e-9);
        assert!((distance_score(60.0) - 0.38).abs() < 1e-9);
        assert!((distance_score(100.0) - 0.26).abs() < 1e-9);
        assert!((distance_score(150.0) - 0.25).abs() < 1e-9);
        // Floors at 0.2 no matter how far
        assert_eq!(distance_score(2000.0), 0.2);
    }

    #[test]
    fn test_location_identical_coordinates() {
        let a = profile(Some("40.7128,-74.0060"));
        let b = profile(Some("40.7128,-74.0060"));
        assert_eq!(location_proximity(&a, &b), 1.0);
    }

    #[test]
    fn test_location_textual_fallback() {
        let a = profile(None);
        let mut b = profile(None);
        assert_eq!(location_proximity(&a, &b), SAME_CITY_SCORE);

        b.city = Some("Abuja".to_string());
        assert_eq!(location_proximity(&a, &b), SAME_STATE_SCORE);

        b.state = Some("FCT".to_string());
        assert_eq!(location_proximity(&a, &b), SAME_COUNTRY_SCORE);

        b.country = Some("Ghana".to_string());
        assert_eq!(location_proximity(&a, &b), NO_LOCALITY_SCORE);
    }

    #[test]
    fn test_location_city_match_ignores_case() {
        let a = profile(None);
        let mut b = profile(None);
        b.city = Some("LAGOS".to_string());
        assert_eq!(location_proximity(&a, &b), SAME_CITY_SCORE);
    }

    #[test]
    fn test_location_no_data_at_all() {
        let mut a = profile(None);
        let mut b = profile(None);
        a.city = None;
        a.state = None;
        a.country = None;
        b.city = None;
        b.state = None;
        b.country = None;
        assert_eq!(location_proximity(&a, &b), NO_LOCALITY_SCORE);
    }

    #[test]
    fn test_location_malformed_coordinates_neutral() {
        let a = profile(Some("garbage"));
        let b = profile(Some("40.7128,-74.0060"));
        assert_eq!(location_proximity(&a, &b), NEUTRAL_SCORE);
    }

    #[test]
    fn test_location_empty_string_counts_as_missing() {
        let a = profile(Some(""));
        let b = profile(Some("40.7128,-74.0060"));
        assert_eq!(location_proximity(&a, &b), SAME_CITY_SCORE);
    }

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_interests_both_empty_neutral() {
        assert_eq!(interests_overlap(&[], &[]), NEUTRAL_SCORE);
    }

    #[test]
    fn test_interests_one_sided() {
        assert_eq!(interests_overlap(&tags(&["hiking"]), &[]), INTERESTS_ONE_SIDED);
        assert_eq!(interests_overlap(&[], &tags(&["hiking"])), INTERESTS_ONE_SIDED);
    }

    #[test]
    fn test_interests_disjoint() {
        assert_eq!(
            interests_overlap(&tags(&["hiking"]), &tags(&["chess"])),
            INTERESTS_DISJOINT
        );
    }

    #[test]
    fn test_interests_few_shared() {
        // 1 shared of 3 total: J = 1/3
        let score = interests_overlap(&tags(&["hiking", "chess"]), &tags(&["hiking", "jazz"]));
        assert!((score - (0.5 + 0.3 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_interests_many_shared() {
        // 3 shared of 3 total: J = 1, capped at 1.0
        let shared = tags(&["hiking", "chess", "jazz"]);
        assert_eq!(interests_overlap(&shared, &shared), 1.0);

        // 3 shared of 5 total: J = 0.6
        let score = interests_overlap(
            &tags(&["a", "b", "c", "d"]),
            &tags(&["a", "b", "c", "e"]),
        );
        assert!((score - (0.7 + 0.3 * 0.6)).abs() < 1e-9);
    }

    #[test]
    fn test_interests_symmetric() {
        let a = tags(&["hiking", "chess", "jazz"]);
        let b = tags(&["hiking", "food"]);
        assert_eq!(interests_overlap(&a, &b), interests_overlap(&b, &a));
    }

    #[test]
    fn test_interests_case_sensitive_tags() {
        assert_eq!(
            interests_overlap(&tags(&["Hiking"]), &tags(&["hiking"])),
            INTERESTS_DISJOINT
        );
    }

    #[test]
    fn test_activity_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        assert_eq!(activity_level(None, now), NEUTRAL_SCORE);
        assert_eq!(
            activity_level(Some(now - chrono::Duration::minutes(10)), now),
            ACTIVITY_WITHIN_HOUR
        );
        // 23 hours ago falls in the <24h bucket, not <7d
        assert_eq!(
            activity_level(Some(now - chrono::Duration::hours(23)), now),
            ACTIVITY_WITHIN_DAY
        );
        assert_eq!(
            activity_level(Some(now - chrono::Duration::days(3)), now),
            ACTIVITY_WITHIN_WEEK
        );
        assert_eq!(
            activity_level(Some(now - chrono::Duration::days(20)), now),
            ACTIVITY_WITHIN_MONTH
        );
        assert_eq!(
            activity_level(Some(now - chrono::Duration::days(90)), now),
            ACTIVITY_STALE
        );
    }

    #[test]
    fn test_profession_empty_neutral() {
        assert_eq!(profession_compatibility("", "engineer"), NEUTRAL_SCORE);
        assert_eq!(profession_compatibility("engineer", ""), NEUTRAL_SCORE);
    }

    #[test]
    fn test_profession_exact_match_case_insensitive() {
        assert_eq!(profession_compatibility("Software Engineer", "software engineer"), 1.0);
    }

    #[test]
    fn test_profession_shared_word() {
        assert_eq!(
            profession_compatibility("software engineer", "mechanical engineer"),
            PROFESSION_RELATED
        );
    }

    #[test]
    fn test_profession_unrelated() {
        assert_eq!(profession_compatibility("nurse", "pilot"), NEUTRAL_SCORE);
    }
}
