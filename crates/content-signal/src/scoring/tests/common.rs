use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::scoring::{ContentItem, ContentScorer, KeywordWeightEntry, Lexicon, ScoringConfig};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn hours_ago(hours: i64) -> Option<DateTime<Utc>> {
    Some(now() - Duration::hours(hours))
}

pub(super) fn entry(phrase: &str, weight: u32) -> KeywordWeightEntry {
    KeywordWeightEntry {
        phrase: phrase.to_string(),
        weight,
    }
}

pub(super) fn fixture_lexicon() -> Lexicon {
    Lexicon::new(vec![
        entry("openai", 90),
        entry("GPT-5", 100),
        entry("large language model", 80),
        entry("language model", 70),
        entry("language", 30),
        entry("model", 40),
        entry("ai agent", 85),
        entry("chip", 55),
        entry("funding", 60),
        entry("weather", 10),
    ])
    .expect("fixture lexicon builds")
}

pub(super) fn fixture_scorer() -> ContentScorer {
    ContentScorer::new(fixture_lexicon(), ScoringConfig::default()).expect("scorer builds")
}

pub(super) fn standard_scorer() -> ContentScorer {
    ContentScorer::standard().expect("standard scorer builds")
}

pub(super) fn item(title: &str, body: &str, hours: i64, source: &str) -> ContentItem {
    ContentItem::new(title, body, hours_ago(hours), source)
}
