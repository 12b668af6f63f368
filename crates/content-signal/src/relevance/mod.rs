//! Keyword-overlap relevance matching between a topic and candidate content.

mod citations;
mod feed;
mod records;

pub use citations::{attach_citations, Topic, TopicCitations};
pub use feed::{FeedCache, FeedCacheError};
pub use records::{ArticleRecord, SocialPost};

use crate::text::{extract_keywords, strip_non_word};
use serde::Serialize;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Points contributed by each matched keyword.
pub const MATCH_POINTS: f64 = 100.0;
/// Divisor that shrinks a candidate's own score into a tie-breaker.
pub const PRECOMPUTED_SCORE_DIVISOR: f64 = 1000.0;

/// Anything that can be matched against a topic.
pub trait RelevanceCandidate {
    fn text_for_matching(&self) -> Cow<'_, str>;

    /// Engagement or importance computed elsewhere, used only to break ties.
    fn precomputed_score(&self) -> Option<f64> {
        None
    }
}

/// A candidate that shares at least one keyword with the topic.
#[derive(Debug, Clone, Serialize)]
pub struct RelevanceMatch<'a, C> {
    pub candidate: &'a C,
    pub match_count: usize,
    pub matched_keywords: Vec<String>,
    pub score: f64,
}

/// Ranks `candidates` by keyword overlap with `topic`, keeping at most `limit`.
///
/// Ordering is by match count, then precomputed score, both descending.
/// Equal candidates keep their input order. The reported `score` is not the
/// sort key: a very large precomputed score can exceed the score of a
/// candidate ranked above it.
pub fn rank_candidates<'a, C: RelevanceCandidate>(
    topic: &str,
    candidates: &'a [C],
    limit: usize,
) -> Vec<RelevanceMatch<'a, C>> {
    let keywords = extract_keywords(topic);
    if keywords.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(RelevanceMatch<'a, C>, f64)> = candidates
        .iter()
        .filter_map(|candidate| {
            let text = strip_non_word(&candidate.text_for_matching());
            let matched_keywords: Vec<String> = keywords
                .iter()
                .filter(|keyword| text.contains(keyword.as_str()))
                .cloned()
                .collect();
            if matched_keywords.is_empty() {
                return None;
            }

            let precomputed = candidate
                .precomputed_score()
                .filter(|score| score.is_finite())
                .unwrap_or(0.0);
            let match_count = matched_keywords.len();
            let score = match_count as f64 * MATCH_POINTS + precomputed / PRECOMPUTED_SCORE_DIVISOR;

            Some((
                RelevanceMatch {
                    candidate,
                    match_count,
                    matched_keywords,
                    score,
                },
                precomputed,
            ))
        })
        .collect();

    ranked.sort_by(|(a, a_precomputed), (b, b_precomputed)| {
        b.match_count
            .cmp(&a.match_count)
            .then_with(|| {
                b_precomputed
                    .partial_cmp(a_precomputed)
                    .unwrap_or(Ordering::Equal)
            })
    });
    ranked.truncate(limit);

    ranked.into_iter().map(|(matched, _)| matched).collect()
}

/// Candidates most likely to substantiate `topic`, best first.
pub fn find_relevant<'a, C: RelevanceCandidate>(
    topic: &str,
    candidates: &'a [C],
    limit: usize,
) -> Vec<&'a C> {
    rank_candidates(topic, candidates, limit)
        .into_iter()
        .map(|matched| matched.candidate)
        .collect()
}
