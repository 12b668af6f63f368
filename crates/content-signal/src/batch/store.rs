use serde::{Deserialize, Serialize};

use crate::scoring::ContentItem;

/// Identifier of a row in the content store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentId(pub String);

/// Stored content row with its last persisted importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredContent {
    pub id: ContentId,
    #[serde(flatten)]
    pub item: ContentItem,
    #[serde(default)]
    pub importance: Option<i64>,
}

/// Generic CRUD surface the rescoring job needs from the content store.
pub trait ContentStore: Send + Sync {
    fn list(&self) -> Result<Vec<StoredContent>, StoreError>;
    fn update_importance(&self, id: &ContentId, importance: i64) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record {0:?} not found")]
    NotFound(ContentId),
    #[error("content store unavailable: {0}")]
    Unavailable(String),
}
