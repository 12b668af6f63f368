//! Batch rescoring of stored content.

mod job;
mod store;

pub use job::{ImportanceRescoreJob, RescoreFailure, RescoreReport};
pub use store::{ContentId, ContentStore, StoreError, StoredContent};
