use chrono::{DateTime, Utc};
use content_signal::batch::{ContentId, ContentStore, StoreError, StoredContent};
use content_signal::config::{ScoringSettings, MAX_CITATION_LIMIT};
use content_signal::error::AppError;
use content_signal::scoring::{parse_published_at, ContentScorer, Lexicon, ScoringConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryContentStore {
    rows: Arc<Mutex<BTreeMap<ContentId, StoredContent>>>,
}

impl InMemoryContentStore {
    pub(crate) fn with_rows(rows: Vec<StoredContent>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(
                rows.into_iter().map(|row| (row.id.clone(), row)).collect(),
            )),
        }
    }

    pub(crate) fn from_path(path: &Path) -> Result<Self, AppError> {
        let file = std::fs::File::open(path)?;
        let rows: Vec<StoredContent> = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(Self::with_rows(rows))
    }
}

impl ContentStore for InMemoryContentStore {
    fn list(&self) -> Result<Vec<StoredContent>, StoreError> {
        let guard = self.rows.lock().expect("content store mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn update_importance(&self, id: &ContentId, importance: i64) -> Result<(), StoreError> {
        let mut guard = self.rows.lock().expect("content store mutex poisoned");
        match guard.get_mut(id) {
            Some(row) => {
                row.importance = Some(importance);
                Ok(())
            }
            None => Err(StoreError::NotFound(id.clone())),
        }
    }
}

/// Scorer using the configured lexicon file, or the embedded lexicon.
pub(crate) fn load_scorer(settings: &ScoringSettings) -> Result<ContentScorer, AppError> {
    load_scorer_from(settings.lexicon_path.as_deref())
}

pub(crate) fn load_scorer_from(lexicon_path: Option<&Path>) -> Result<ContentScorer, AppError> {
    let lexicon = match lexicon_path {
        Some(path) => {
            let lexicon = Lexicon::from_path(path).map_err(|err| AppError::Scorer(err.into()))?;
            info!(path = %path.display(), entries = lexicon.len(), "loaded lexicon");
            lexicon
        }
        None => Lexicon::standard().map_err(|err| AppError::Scorer(err.into()))?,
    };

    Ok(ContentScorer::new(lexicon, ScoringConfig::default())?)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_published_at(raw).ok_or_else(|| {
        format!("failed to parse '{raw}' as an RFC 3339 timestamp or YYYY-MM-DD date")
    })
}

pub(crate) fn parse_citation_limit(raw: &str) -> Result<usize, String> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|limit| (1..=MAX_CITATION_LIMIT).contains(limit))
        .ok_or_else(|| format!("limit must be between 1 and {MAX_CITATION_LIMIT} (got '{raw}')"))
}
