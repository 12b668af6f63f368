use super::feed::FeedCache;
use super::records::{ArticleRecord, SocialPost};
use super::find_relevant;
use crate::scoring::null_as_empty;
use serde::{Deserialize, Serialize};

/// Digest topic that needs supporting citations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, alias = "description", deserialize_with = "null_as_empty")]
    pub summary: String,
}

impl Topic {
    pub fn matching_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }
}

/// Posts and articles selected for one topic, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicCitations {
    pub topic_id: String,
    pub tweets: Vec<SocialPost>,
    pub articles: Vec<ArticleRecord>,
}

/// Picks up to `limit` tweets and `limit` articles from `feed` for every topic.
pub fn attach_citations(topics: &[Topic], feed: &FeedCache, limit: usize) -> Vec<TopicCitations> {
    topics
        .iter()
        .map(|topic| {
            let text = topic.matching_text();
            TopicCitations {
                topic_id: topic.id.clone(),
                tweets: find_relevant(&text, &feed.tweets, limit)
                    .into_iter()
                    .cloned()
                    .collect(),
                articles: find_relevant(&text, &feed.articles, limit)
                    .into_iter()
                    .cloned()
                    .collect(),
            }
        })
        .collect()
}
