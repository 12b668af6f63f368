use super::records::{ArticleRecord, SocialPost};
use crate::scoring::lenient_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// JSON document written by the feed collectors: recent social posts and
/// articles, either list possibly absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedCache {
    #[serde(default, alias = "updatedAt", deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tweets: Vec<SocialPost>,
    #[serde(default)]
    pub articles: Vec<ArticleRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedCacheError {
    #[error("failed to read feed cache: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid feed cache JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl FeedCache {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FeedCacheError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FeedCacheError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty() && self.articles.is_empty()
    }
}
