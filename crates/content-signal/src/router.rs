//! HTTP endpoints exposing the scorer and the relevance matcher.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::MAX_CITATION_LIMIT;
use crate::relevance::{rank_candidates, ArticleRecord, RelevanceCandidate, SocialPost};
use crate::scoring::{lenient_timestamp, ContentItem, ContentScorer, ScoreBreakdown};
use crate::text::extract_keywords;

#[derive(Clone)]
struct RouterState {
    scorer: Arc<ContentScorer>,
    citation_limit: usize,
}

/// Router builder for `/api/v1/content/score` and `/api/v1/relevance`.
pub fn content_router(scorer: Arc<ContentScorer>, citation_limit: usize) -> Router {
    Router::new()
        .route("/api/v1/content/score", post(score_handler))
        .route("/api/v1/relevance", post(relevance_handler))
        .with_state(RouterState {
            scorer,
            citation_limit: citation_limit.clamp(1, MAX_CITATION_LIMIT),
        })
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) items: Vec<ContentItem>,
    /// Evaluation time; defaults to the current time.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub evaluated_at: DateTime<Utc>,
    pub scores: Vec<ScoreBreakdown>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RelevanceRequest {
    pub(crate) topic: String,
    #[serde(default)]
    pub(crate) tweets: Vec<SocialPost>,
    #[serde(default)]
    pub(crate) articles: Vec<ArticleRecord>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

/// A matched candidate together with why it matched.
#[derive(Debug, Serialize, Deserialize)]
pub struct RankedCandidate<T> {
    pub item: T,
    pub match_count: usize,
    pub matched_keywords: Vec<String>,
    pub score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RelevanceResponse {
    pub keywords: Vec<String>,
    pub tweets: Vec<RankedCandidate<SocialPost>>,
    pub articles: Vec<RankedCandidate<ArticleRecord>>,
}

async fn score_handler(
    State(state): State<RouterState>,
    Json(request): Json<ScoreRequest>,
) -> Json<ScoreResponse> {
    let evaluated_at = request.now.unwrap_or_else(Utc::now);
    let scores = request
        .items
        .iter()
        .map(|item| state.scorer.score_at(item, evaluated_at))
        .collect();

    Json(ScoreResponse {
        evaluated_at,
        scores,
    })
}

async fn relevance_handler(
    State(state): State<RouterState>,
    Json(request): Json<RelevanceRequest>,
) -> Json<RelevanceResponse> {
    let limit = request
        .limit
        .unwrap_or(state.citation_limit)
        .min(MAX_CITATION_LIMIT);

    Json(RelevanceResponse {
        keywords: extract_keywords(&request.topic).into_iter().collect(),
        tweets: ranked(&request.topic, &request.tweets, limit),
        articles: ranked(&request.topic, &request.articles, limit),
    })
}

fn ranked<T>(topic: &str, candidates: &[T], limit: usize) -> Vec<RankedCandidate<T>>
where
    T: RelevanceCandidate + Clone,
{
    rank_candidates(topic, candidates, limit)
        .into_iter()
        .map(|matched| RankedCandidate {
            item: matched.candidate.clone(),
            match_count: matched.match_count,
            matched_keywords: matched.matched_keywords,
            score: matched.score,
        })
        .collect()
}
