use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::store::{ContentId, ContentStore, StoreError};
use crate::scoring::ContentScorer;

/// Recomputes the importance of every stored item and writes it back.
pub struct ImportanceRescoreJob<S> {
    scorer: Arc<ContentScorer>,
    store: Arc<S>,
}

/// Item whose score could not be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RescoreFailure {
    pub id: ContentId,
    pub reason: String,
}

/// Aggregate outcome of one rescoring run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RescoreReport {
    pub total: usize,
    pub scored: usize,
    pub failed: Vec<RescoreFailure>,
}

impl<S> ImportanceRescoreJob<S>
where
    S: ContentStore + 'static,
{
    pub fn new(scorer: Arc<ContentScorer>, store: Arc<S>) -> Self {
        Self { scorer, store }
    }

    pub fn run(&self) -> Result<RescoreReport, StoreError> {
        self.run_at(Utc::now())
    }

    /// Failing to list the store aborts the run; a failed write only marks
    /// that item and the batch continues.
    pub fn run_at(&self, now: DateTime<Utc>) -> Result<RescoreReport, StoreError> {
        let rows = self.store.list()?;
        let mut report = RescoreReport {
            total: rows.len(),
            ..RescoreReport::default()
        };

        for row in rows {
            let breakdown = self.scorer.score_at(&row.item, now);
            match self.store.update_importance(&row.id, breakdown.final_score) {
                Ok(()) => report.scored += 1,
                Err(err) => {
                    warn!(id = %row.id.0, error = %err, "failed to persist importance score");
                    report.failed.push(RescoreFailure {
                        id: row.id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            total = report.total,
            scored = report.scored,
            failed = report.failed.len(),
            "importance rescoring finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::StoredContent;
    use crate::scoring::ContentItem;
    use chrono::{Duration, TimeZone};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
    }

    fn row(id: &str, title: &str, source: &str) -> StoredContent {
        StoredContent {
            id: ContentId(id.to_string()),
            item: ContentItem::new(title, "", Some(now() - Duration::hours(2)), source),
            importance: None,
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<BTreeMap<ContentId, StoredContent>>,
        reject: Option<ContentId>,
    }

    impl MemoryStore {
        fn with_rows(rows: Vec<StoredContent>, reject: Option<&str>) -> Self {
            Self {
                rows: Mutex::new(rows.into_iter().map(|row| (row.id.clone(), row)).collect()),
                reject: reject.map(|id| ContentId(id.to_string())),
            }
        }

        fn importance(&self, id: &str) -> Option<i64> {
            self.rows
                .lock()
                .expect("store mutex poisoned")
                .get(&ContentId(id.to_string()))
                .and_then(|row| row.importance)
        }
    }

    impl ContentStore for MemoryStore {
        fn list(&self) -> Result<Vec<StoredContent>, StoreError> {
            Ok(self
                .rows
                .lock()
                .expect("store mutex poisoned")
                .values()
                .cloned()
                .collect())
        }

        fn update_importance(&self, id: &ContentId, importance: i64) -> Result<(), StoreError> {
            if self.reject.as_ref() == Some(id) {
                return Err(StoreError::Unavailable("write timeout".to_string()));
            }
            let mut guard = self.rows.lock().expect("store mutex poisoned");
            let row = guard
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;
            row.importance = Some(importance);
            Ok(())
        }
    }

    struct UnavailableStore;

    impl ContentStore for UnavailableStore {
        fn list(&self) -> Result<Vec<StoredContent>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn update_importance(&self, id: &ContentId, _importance: i64) -> Result<(), StoreError> {
            Err(StoreError::NotFound(id.clone()))
        }
    }

    fn scorer() -> Arc<ContentScorer> {
        Arc::new(ContentScorer::standard().expect("standard scorer builds"))
    }

    #[test]
    fn persists_scores_for_every_row() {
        let store = Arc::new(MemoryStore::with_rows(
            vec![
                row("a", "OpenAI announces GPT-5", "TechCrunch"),
                row("b", "Weekend gardening tips", "Garden Weekly"),
            ],
            None,
        ));
        let job = ImportanceRescoreJob::new(scorer(), store.clone());

        let report = job.run_at(now()).expect("job runs");

        assert_eq!(report.total, 2);
        assert_eq!(report.scored, 2);
        assert!(report.failed.is_empty());
        assert!(store.importance("a").expect("a scored") > 100);
        assert_eq!(store.importance("b"), Some(0));
    }

    #[test]
    fn one_failed_write_does_not_abort_the_batch() {
        let store = Arc::new(MemoryStore::with_rows(
            vec![
                row("a", "Anthropic releases Claude update", "The Verge"),
                row("b", "Nvidia unveils new GPU", "Reuters"),
                row("c", "Hacker News thread on agents", "Hacker News"),
            ],
            Some("b"),
        ));
        let job = ImportanceRescoreJob::new(scorer(), store.clone());

        let report = job.run_at(now()).expect("job runs");

        assert_eq!(report.scored, 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, ContentId("b".to_string()));
        assert!(report.failed[0].reason.contains("write timeout"));
        assert!(store.importance("a").is_some());
        assert!(store.importance("b").is_none());
        assert!(store.importance("c").expect("c scored") >= 120);
    }

    #[test]
    fn listing_failure_is_reported() {
        let job = ImportanceRescoreJob::new(scorer(), Arc::new(UnavailableStore));
        let error = job.run_at(now()).expect_err("listing fails");
        assert!(matches!(error, StoreError::Unavailable(_)));
    }
}
