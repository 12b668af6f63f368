//! Recency, wording and source modifiers applied on top of the keyword score.

use super::policy::{
    SignalVocabulary, BREAKING_BONUS_CAP, BREAKING_POINTS_PER_TERM, HEADLINE_POINTS_CAP,
    HEADLINE_POINTS_PER_PATTERN, HIGH_QUALITY_SOURCE_BONUS, IMPACT_BONUS_CAP,
    IMPACT_POINTS_PER_TERM,
};
use chrono::{DateTime, Utc};

/// Decay applied when the publication time is missing or unreadable.
pub const OLDEST_DECAY: f64 = 0.1;

/// Upper bound (exclusive, in hours) of each freshness bucket and its multiplier.
const DECAY_STEPS: &[(f64, f64)] = &[
    (3.0, 1.5),
    (6.0, 1.4),
    (12.0, 1.35),
    (24.0, 1.3),
    (48.0, 1.2),
    (72.0, 1.1),
    (4.0 * 24.0, 1.0),
    (7.0 * 24.0, 0.8),
    (10.0 * 24.0, 0.6),
    (14.0 * 24.0, 0.4),
    (21.0 * 24.0, 0.2),
];

/// Recency multiplier for an item published at `published_at`, evaluated at `now`.
pub fn time_decay(published_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match published_at {
        Some(published_at) => {
            let elapsed_ms = (now - published_at).num_milliseconds().max(0);
            decay_for_hours(elapsed_ms as f64 / 3_600_000.0)
        }
        None => OLDEST_DECAY,
    }
}

/// Step function over elapsed hours; the first bucket whose bound exceeds
/// `hours` wins.
pub fn decay_for_hours(hours: f64) -> f64 {
    if !hours.is_finite() {
        return OLDEST_DECAY;
    }

    DECAY_STEPS
        .iter()
        .find(|(bound, _)| hours < *bound)
        .map(|(_, decay)| *decay)
        .unwrap_or(OLDEST_DECAY)
}

/// Impact and breaking-news bonus for already normalized text, as a fraction
/// in `[0, 0.55]`.
pub fn impact_bonus(normalized: &str, vocabulary: &SignalVocabulary) -> f64 {
    let impact_count = vocabulary.impact_hits(normalized);
    let breaking_count = vocabulary.breaking_hits(normalized);

    let impact = (impact_count as f64 * IMPACT_POINTS_PER_TERM).min(IMPACT_BONUS_CAP);
    let breaking = (breaking_count as f64 * BREAKING_POINTS_PER_TERM).min(BREAKING_BONUS_CAP);

    impact / 100.0 + breaking / 100.0
}

/// Headline bonus for a number of matched headline patterns, at most 0.5.
pub fn headline_bonus(matched_patterns: usize) -> f64 {
    let points = (matched_patterns as u32)
        .saturating_mul(HEADLINE_POINTS_PER_PATTERN)
        .min(HEADLINE_POINTS_CAP);
    f64::from(points) / 100.0
}

pub fn source_bonus(source_name: &str, vocabulary: &SignalVocabulary) -> f64 {
    if vocabulary.is_high_quality_source(source_name) {
        HIGH_QUALITY_SOURCE_BONUS
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-10-01T12:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    #[test]
    fn decay_is_full_at_zero_and_floor_after_three_weeks() {
        assert_eq!(time_decay(Some(now()), now()), 1.5);
        assert_eq!(time_decay(Some(now() - Duration::days(21)), now()), 0.1);
        assert_eq!(time_decay(Some(now() - Duration::days(400)), now()), 0.1);
    }

    #[test]
    fn decay_uses_half_open_buckets() {
        assert_eq!(decay_for_hours(2.99), 1.5);
        assert_eq!(decay_for_hours(3.0), 1.4);
        assert_eq!(decay_for_hours(23.9), 1.3);
        assert_eq!(decay_for_hours(24.0), 1.2);
        assert_eq!(decay_for_hours(95.0), 1.0);
        assert_eq!(decay_for_hours(96.0), 0.8);
        assert_eq!(decay_for_hours(13.0 * 24.0), 0.4);
        assert_eq!(decay_for_hours(20.0 * 24.0), 0.2);
    }

    #[test]
    fn decay_never_increases_with_age() {
        let mut previous = f64::INFINITY;
        for hour in 0..(30 * 24) {
            let decay = decay_for_hours(f64::from(hour));
            assert!(decay <= previous, "decay rose at hour {hour}");
            previous = decay;
        }
    }

    #[test]
    fn missing_or_future_timestamps_are_handled() {
        assert_eq!(time_decay(None, now()), OLDEST_DECAY);
        assert_eq!(time_decay(Some(now() + Duration::hours(5)), now()), 1.5);
    }

    #[test]
    fn impact_bonus_caps_each_vocabulary() {
        let vocabulary = SignalVocabulary::standard();
        assert_eq!(impact_bonus("quiet day at the office", &vocabulary), 0.0);

        let loud = "breaking just in urgent developing exclusive alert \
                    breakthrough revolutionary unprecedented record major historic \
                    landmark massive game changer first ever milestone";
        let bonus = impact_bonus(loud, &vocabulary);
        assert!((bonus - 0.55).abs() < 1e-9, "bonus was {bonus}");
    }

    #[test]
    fn headline_bonus_is_capped_at_half() {
        assert_eq!(headline_bonus(0), 0.0);
        assert_eq!(headline_bonus(1), 0.25);
        assert_eq!(headline_bonus(2), 0.5);
        assert_eq!(headline_bonus(7), 0.5);
    }

    #[test]
    fn source_bonus_applies_to_allow_listed_sources() {
        let vocabulary = SignalVocabulary::standard();
        assert_eq!(source_bonus("TechCrunch", &vocabulary), 0.15);
        assert_eq!(source_bonus("MIT Technology Review", &vocabulary), 0.15);
        assert_eq!(source_bonus("Some Blog", &vocabulary), 0.0);
        assert_eq!(source_bonus("", &vocabulary), 0.0);
    }
}
