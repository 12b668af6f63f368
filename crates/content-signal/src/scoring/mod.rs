//! Importance scoring: lexicon keyword score, temporal and heuristic
//! adjusters, and the final combination.

pub mod adjusters;
mod domain;
mod headline;
mod lexicon;
pub mod policy;

#[cfg(test)]
mod tests;

pub use domain::{parse_published_at, ContentItem, ScoreBreakdown};
pub use headline::{HeadlinePatterns, HeadlineSignal};
pub use lexicon::{
    combine_weights, KeywordWeightEntry, Lexicon, LexiconError, LexiconMatch,
    STANDARD_LEXICON_CSV,
};
pub use policy::{EscalationPolicy, EscalationTier, ScoringConfig, SignalVocabulary};

pub(crate) use domain::{lenient_timestamp, null_as_empty};

use crate::text::normalize_text;
use chrono::{DateTime, Utc};
use policy::{combine, Adjustments};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
    #[error("invalid headline pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Stateless scorer holding the injected lexicon and read-only configuration.
#[derive(Debug, Clone)]
pub struct ContentScorer {
    lexicon: Lexicon,
    config: ScoringConfig,
    headlines: HeadlinePatterns,
}

impl ContentScorer {
    pub fn new(lexicon: Lexicon, config: ScoringConfig) -> Result<Self, ScorerError> {
        Ok(Self {
            lexicon,
            config,
            headlines: HeadlinePatterns::standard()?,
        })
    }

    /// Scorer backed by the embedded lexicon and default configuration.
    pub fn standard() -> Result<Self, ScorerError> {
        Self::new(Lexicon::standard()?, ScoringConfig::default())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn keyword_score(&self, text: &str) -> f64 {
        self.lexicon.keyword_score(text)
    }

    /// Scores an item against the current wall clock.
    pub fn score(&self, item: &ContentItem) -> ScoreBreakdown {
        self.score_at(item, Utc::now())
    }

    pub fn score_at(&self, item: &ContentItem, now: DateTime<Utc>) -> ScoreBreakdown {
        let title_matches = self.lexicon.matches(&item.title);
        let summary_matches = self.lexicon.matches(&item.body);

        let title_keyword_score = combine_weights(&weights(&title_matches));
        let summary_keyword_score = combine_weights(&weights(&summary_matches));

        let combined_text = format!("{} {}", item.title, item.body);
        let normalized = normalize_text(&combined_text);
        let headline_signals = self.headlines.detect(combined_text.trim());

        let vocabulary = &self.config.vocabulary;
        let adjustments = Adjustments {
            time_decay: adjusters::time_decay(item.published_at, now),
            impact_bonus: adjusters::impact_bonus(&normalized, vocabulary),
            headline_bonus: adjusters::headline_bonus(headline_signals.len()),
            source_bonus: adjusters::source_bonus(&item.source_name, vocabulary),
            aggregator_source: vocabulary.is_aggregator_source(&item.source_name),
        };

        let combined = combine(
            title_keyword_score,
            summary_keyword_score,
            &adjustments,
            &self.config.escalation,
        );

        let matched_keywords: BTreeSet<String> = title_matches
            .into_iter()
            .chain(summary_matches)
            .map(|m| m.phrase)
            .collect();

        debug!(
            title = %item.title,
            final_score = combined.final_score,
            keywords = matched_keywords.len(),
            "scored content item"
        );

        ScoreBreakdown {
            keyword_score: combined.keyword_score,
            title_keyword_score,
            summary_keyword_score,
            time_decay: adjustments.time_decay,
            impact_bonus: adjustments.impact_bonus,
            headline_bonus: adjustments.headline_bonus,
            source_bonus: adjustments.source_bonus,
            final_score: combined.final_score,
            matched_keywords: matched_keywords.into_iter().collect(),
            headline_signals,
            escalation: combined.escalation,
            aggregator_floor_applied: combined.aggregator_floor_applied,
        }
    }
}

fn weights(matches: &[LexiconMatch]) -> Vec<u32> {
    matches.iter().map(|m| m.weight).collect()
}
