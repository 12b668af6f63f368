use crate::infra::{AppState, InMemoryContentStore};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json};
use content_signal::batch::{ContentStore, ImportanceRescoreJob, RescoreReport, StoredContent};
use content_signal::error::AppError;
use content_signal::router::content_router;
use content_signal::scoring::ContentScorer;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct ContentState {
    pub(crate) store: Arc<InMemoryContentStore>,
    pub(crate) job: Arc<ImportanceRescoreJob<InMemoryContentStore>>,
}

impl ContentState {
    pub(crate) fn new(scorer: Arc<ContentScorer>, store: Arc<InMemoryContentStore>) -> Self {
        let job = Arc::new(ImportanceRescoreJob::new(scorer, store.clone()));
        Self { store, job }
    }
}

pub(crate) fn with_service_routes(scorer: Arc<ContentScorer>, citation_limit: usize) -> axum::Router {
    content_router(scorer, citation_limit)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/content", get(list_content_endpoint))
        .route("/api/v1/content/rescore", post(rescore_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn list_content_endpoint(
    Extension(state): Extension<ContentState>,
) -> Result<Json<Vec<StoredContent>>, AppError> {
    let mut rows = state.store.list()?;
    rows.sort_by(|a, b| b.importance.cmp(&a.importance));
    Ok(Json(rows))
}

pub(crate) async fn rescore_endpoint(
    Extension(state): Extension<ContentState>,
) -> Result<Json<RescoreReport>, AppError> {
    let report = state.job.run()?;
    Ok(Json(report))
}
