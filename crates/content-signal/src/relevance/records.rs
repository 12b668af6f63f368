use super::RelevanceCandidate;
use crate::scoring::{lenient_timestamp, null_as_empty, ContentItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// Social post as stored in the feed cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(default, alias = "text", deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "engagement")]
    pub engagement_score: Option<f64>,
}

impl RelevanceCandidate for SocialPost {
    fn text_for_matching(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.content)
    }

    fn precomputed_score(&self) -> Option<f64> {
        self.engagement_score
    }
}

/// News article as stored in the feed cache or content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, alias = "description", deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "importance")]
    pub importance_score: Option<f64>,
}

impl ArticleRecord {
    pub fn to_content_item(&self) -> ContentItem {
        ContentItem::new(
            self.title.clone(),
            self.summary.clone(),
            self.published_at,
            self.source.clone(),
        )
    }
}

impl RelevanceCandidate for ArticleRecord {
    fn text_for_matching(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} {}", self.title, self.summary))
    }

    fn precomputed_score(&self) -> Option<f64> {
        self.importance_score
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

/// Ids arrive as strings or as bare numbers (tweet snowflakes); null becomes empty.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(text)) => text,
        Some(RawId::Unsigned(value)) => value.to_string(),
        Some(RawId::Signed(value)) => value.to_string(),
        None => String::new(),
    })
}
