//! Importance scoring and cross-source relevance matching for AI news content.

pub mod batch;
pub mod config;
pub mod error;
pub mod relevance;
pub mod router;
pub mod scoring;
pub mod telemetry;
pub mod text;

pub use relevance::{find_relevant, rank_candidates, RelevanceCandidate, RelevanceMatch};
pub use scoring::{ContentItem, ContentScorer, Lexicon, ScoreBreakdown};
