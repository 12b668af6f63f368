//! Named constants and the final combination rule.
//!
//! The escalation thresholds and the aggregator floor are hand-tuned values;
//! they are kept here verbatim so they can be adjusted in one place.

use crate::text::normalize_text;
use serde::{Deserialize, Serialize};

pub const TITLE_KEYWORD_SHARE: f64 = 0.8;
pub const SUMMARY_KEYWORD_SHARE: f64 = 0.2;

pub const IMPACT_POINTS_PER_TERM: f64 = 2.5;
pub const IMPACT_BONUS_CAP: f64 = 20.0;
pub const BREAKING_POINTS_PER_TERM: f64 = 7.5;
pub const BREAKING_BONUS_CAP: f64 = 35.0;

pub const HEADLINE_POINTS_PER_PATTERN: u32 = 25;
pub const HEADLINE_POINTS_CAP: u32 = 50;

pub const HIGH_QUALITY_SOURCE_BONUS: f64 = 0.15;

pub const UPPER_ESCALATION_THRESHOLD: f64 = 160.0;
pub const UPPER_ESCALATION_MULTIPLIER: f64 = 1.25;
pub const LOWER_ESCALATION_THRESHOLD: f64 = 140.0;
pub const LOWER_ESCALATION_MULTIPLIER: f64 = 1.15;
pub const AGGREGATOR_SCORE_FLOOR: f64 = 120.0;

const IMPACT_TERMS: &[&str] = &[
    "breakthrough",
    "revolutionary",
    "unprecedented",
    "record",
    "major",
    "historic",
    "landmark",
    "massive",
    "game changer",
    "first ever",
    "milestone",
    "launch",
    "announce",
    "billion",
    "transform",
    "disrupt",
];

const BREAKING_TERMS: &[&str] = &[
    "breaking",
    "just in",
    "urgent",
    "developing",
    "exclusive",
    "alert",
    "just announced",
    "confirmed",
];

const HIGH_QUALITY_SOURCES: &[&str] = &[
    "techcrunch",
    "the verge",
    "wired",
    "mit technology review",
    "reuters",
    "bloomberg",
    "financial times",
    "the information",
    "ars technica",
    "venturebeat",
    "openai blog",
    "anthropic",
    "google ai blog",
];

const AGGREGATOR_SOURCES: &[&str] = &[
    "hacker news",
    "reddit",
    "product hunt",
    "lobsters",
    "techmeme",
];

/// Fixed vocabularies consulted by the heuristic adjusters. Every term is
/// stored in normalized form.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalVocabulary {
    impact_terms: Vec<String>,
    breaking_terms: Vec<String>,
    high_quality_sources: Vec<String>,
    aggregator_sources: Vec<String>,
}

impl SignalVocabulary {
    pub fn new<S: AsRef<str>>(
        impact_terms: &[S],
        breaking_terms: &[S],
        high_quality_sources: &[S],
        aggregator_sources: &[S],
    ) -> Self {
        Self {
            impact_terms: normalize_all(impact_terms),
            breaking_terms: normalize_all(breaking_terms),
            high_quality_sources: normalize_all(high_quality_sources),
            aggregator_sources: normalize_all(aggregator_sources),
        }
    }

    pub fn standard() -> Self {
        Self::new(
            IMPACT_TERMS,
            BREAKING_TERMS,
            HIGH_QUALITY_SOURCES,
            AGGREGATOR_SOURCES,
        )
    }

    pub(crate) fn impact_hits(&self, normalized: &str) -> usize {
        count_contained(&self.impact_terms, normalized)
    }

    pub(crate) fn breaking_hits(&self, normalized: &str) -> usize {
        count_contained(&self.breaking_terms, normalized)
    }

    pub fn is_high_quality_source(&self, source_name: &str) -> bool {
        source_listed(&self.high_quality_sources, source_name)
    }

    pub fn is_aggregator_source(&self, source_name: &str) -> bool {
        source_listed(&self.aggregator_sources, source_name)
    }
}

impl Default for SignalVocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

fn normalize_all<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    terms
        .iter()
        .map(|term| normalize_text(term.as_ref()))
        .filter(|term| !term.is_empty())
        .collect()
}

fn count_contained(terms: &[String], normalized: &str) -> usize {
    terms
        .iter()
        .filter(|term| normalized.contains(term.as_str()))
        .count()
}

/// A source is listed when one of the entries appears in its normalized name
/// on token boundaries, so "TechCrunch AI" still counts as TechCrunch.
fn source_listed(entries: &[String], source_name: &str) -> bool {
    let normalized = normalize_text(source_name);
    if normalized.is_empty() {
        return false;
    }

    let padded = format!(" {normalized} ");
    entries
        .iter()
        .any(|entry| padded.contains(&format!(" {entry} ")))
}

/// Which escalation multiplier, if any, was applied to the adjusted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationTier {
    None,
    Elevated,
    Critical,
}

/// Thresholds and multipliers applied after the adjusters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EscalationPolicy {
    pub upper_threshold: f64,
    pub upper_multiplier: f64,
    pub lower_threshold: f64,
    pub lower_multiplier: f64,
    pub aggregator_floor: f64,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self {
            upper_threshold: UPPER_ESCALATION_THRESHOLD,
            upper_multiplier: UPPER_ESCALATION_MULTIPLIER,
            lower_threshold: LOWER_ESCALATION_THRESHOLD,
            lower_multiplier: LOWER_ESCALATION_MULTIPLIER,
            aggregator_floor: AGGREGATOR_SCORE_FLOOR,
        }
    }
}

impl EscalationPolicy {
    pub fn escalate(&self, total: f64) -> (f64, EscalationTier) {
        if total > self.upper_threshold {
            (total * self.upper_multiplier, EscalationTier::Critical)
        } else if total > self.lower_threshold {
            (total * self.lower_multiplier, EscalationTier::Elevated)
        } else {
            (total, EscalationTier::None)
        }
    }
}

/// Everything the scorer needs besides the lexicon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringConfig {
    pub vocabulary: SignalVocabulary,
    pub escalation: EscalationPolicy,
}

/// Modifiers computed for one item by the adjusters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustments {
    pub time_decay: f64,
    pub impact_bonus: f64,
    pub headline_bonus: f64,
    pub source_bonus: f64,
    pub aggregator_source: bool,
}

/// Result of [`combine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Combined {
    pub keyword_score: f64,
    pub escalation: EscalationTier,
    pub aggregator_floor_applied: bool,
    pub final_score: i64,
}

/// Blends title and summary keyword scores, applies the adjusters, the
/// escalation tiers and the aggregator floor.
pub fn combine(
    title_keyword_score: f64,
    summary_keyword_score: f64,
    adjustments: &Adjustments,
    policy: &EscalationPolicy,
) -> Combined {
    let base = (title_keyword_score * TITLE_KEYWORD_SHARE
        + summary_keyword_score * SUMMARY_KEYWORD_SHARE)
        .round();

    let multiplier = 1.0
        + adjustments.impact_bonus
        + adjustments.headline_bonus
        + adjustments.source_bonus;
    let total = (base * adjustments.time_decay * multiplier).round();

    let (mut total, escalation) = policy.escalate(total);

    let aggregator_floor_applied =
        adjustments.aggregator_source && total < policy.aggregator_floor;
    if aggregator_floor_applied {
        total = policy.aggregator_floor;
    }

    Combined {
        keyword_score: base,
        escalation,
        aggregator_floor_applied,
        final_score: total.round() as i64,
    }
}
