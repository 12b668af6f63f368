use super::headline::HeadlineSignal;
use super::policy::EscalationTier;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Article or topic submitted for importance scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(
        default,
        alias = "summary",
        alias = "description",
        deserialize_with = "null_as_empty"
    )]
    pub body: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "source", deserialize_with = "null_as_empty")]
    pub source_name: String,
}

impl ContentItem {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        published_at: Option<DateTime<Utc>>,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            published_at,
            source_name: source_name.into(),
        }
    }
}

/// Audit trail of a single scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Title and summary keyword scores blended and rounded.
    pub keyword_score: f64,
    pub title_keyword_score: f64,
    pub summary_keyword_score: f64,
    pub time_decay: f64,
    pub impact_bonus: f64,
    pub headline_bonus: f64,
    pub source_bonus: f64,
    pub final_score: i64,
    pub matched_keywords: Vec<String>,
    pub headline_signals: Vec<HeadlineSignal>,
    pub escalation: EscalationTier,
    pub aggregator_floor_applied: bool,
}

/// Parses the timestamp shapes seen in feeds and content stores. Anything
/// unreadable yields `None`, which the scorer treats as the oldest bucket.
pub fn parse_published_at(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn from_epoch(value: i64) -> Option<DateTime<Utc>> {
    // Values this large are milliseconds; anything smaller is seconds.
    if value.unsigned_abs() >= 100_000_000_000 {
        Utc.timestamp_millis_opt(value).single()
    } else {
        Utc.timestamp_opt(value, 0).single()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Epoch(i64),
    Other(serde::de::IgnoredAny),
}

pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawTimestamp::Text(text)) => parse_published_at(&text),
        Some(RawTimestamp::Epoch(value)) => from_epoch(value),
        Some(RawTimestamp::Other(_)) | None => None,
    })
}

pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
