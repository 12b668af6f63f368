use crate::infra::load_scorer_from;
use chrono::{DateTime, Utc};
use clap::Args;
use content_signal::error::AppError;
use content_signal::relevance::{rank_candidates, FeedCache, RelevanceCandidate};
use content_signal::scoring::{ContentItem, ScoreBreakdown};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON array of content items (title, summary, published_at, source)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Evaluation time (defaults to now)
    #[arg(long, value_parser = crate::infra::parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// CSV lexicon overriding the embedded one
    #[arg(long)]
    pub(crate) lexicon: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RelateArgs {
    /// Feed cache JSON document with `tweets` and `articles` arrays
    #[arg(long)]
    pub(crate) feed: PathBuf,
    /// Topic text to find supporting content for
    #[arg(long)]
    pub(crate) topic: String,
    /// Maximum number of tweets and of articles to list (1 to 20)
    #[arg(long, default_value_t = 3, value_parser = crate::infra::parse_citation_limit)]
    pub(crate) limit: usize,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        now,
        lexicon,
    } = args;

    let scorer = load_scorer_from(lexicon.as_deref())?;
    let file = std::fs::File::open(&input)?;
    let items: Vec<ContentItem> = serde_json::from_reader(std::io::BufReader::new(file))?;
    let now = now.unwrap_or_else(Utc::now);

    let mut scored: Vec<(&ContentItem, ScoreBreakdown)> = items
        .iter()
        .map(|item| (item, scorer.score_at(item, now)))
        .collect();
    scored.sort_by(|(_, a), (_, b)| b.final_score.cmp(&a.final_score));

    render_scores(&scored, now);
    Ok(())
}

pub(crate) fn run_relate(args: RelateArgs) -> Result<(), AppError> {
    let RelateArgs { feed, topic, limit } = args;
    let cache = FeedCache::from_path(feed)?;

    println!("Relevant content for: {topic}");
    render_matches("Tweets", &topic, &cache.tweets, limit, |tweet| {
        format!("{} {}", tweet.id, tweet.author)
    });
    render_matches("Articles", &topic, &cache.articles, limit, |article| {
        format!("{} [{}] {}", article.id, article.source, article.title)
    });

    Ok(())
}

fn render_scores(scored: &[(&ContentItem, ScoreBreakdown)], now: DateTime<Utc>) {
    println!("Importance scores (evaluated {})", now.to_rfc3339());

    if scored.is_empty() {
        println!("- no items");
        return;
    }

    for (item, breakdown) in scored {
        println!(
            "- {:>4} | {} | {}",
            breakdown.final_score,
            display_or_dash(&item.source_name),
            display_or_dash(&item.title)
        );
        println!(
            "       keywords {:.0} (title {:.1}, summary {:.1}) | decay {:.2} | impact {:.3} | headline {:.2} | source {:.2} | {:?}",
            breakdown.keyword_score,
            breakdown.title_keyword_score,
            breakdown.summary_keyword_score,
            breakdown.time_decay,
            breakdown.impact_bonus,
            breakdown.headline_bonus,
            breakdown.source_bonus,
            breakdown.escalation
        );
        if !breakdown.matched_keywords.is_empty() {
            println!("       matched: {}", breakdown.matched_keywords.join(", "));
        }
    }
}

fn render_matches<C, F>(label: &str, topic: &str, candidates: &[C], limit: usize, describe: F)
where
    C: RelevanceCandidate,
    F: Fn(&C) -> String,
{
    let matches = rank_candidates(topic, candidates, limit);
    if matches.is_empty() {
        println!("\n{label}: none");
        return;
    }

    println!("\n{label}");
    for matched in matches {
        println!(
            "- {} ({} keyword(s): {}; score {:.3})",
            describe(matched.candidate),
            matched.match_count,
            matched.matched_keywords.join(", "),
            matched.score
        );
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{parse_citation_limit, parse_timestamp};

    #[test]
    fn parse_timestamp_accepts_dates_and_rejects_garbage() {
        assert!(parse_timestamp("2025-10-01T12:00:00Z").is_ok());
        assert!(parse_timestamp("2025-10-01").is_ok());
        let error = parse_timestamp("soon").expect_err("garbage rejected");
        assert!(error.contains("soon"));
    }

    #[test]
    fn citation_limit_stays_within_bounds() {
        assert_eq!(parse_citation_limit("3"), Ok(3));
        assert_eq!(parse_citation_limit(" 20 "), Ok(20));
        assert!(parse_citation_limit("0").is_err());
        assert!(parse_citation_limit("21").is_err());
        assert!(parse_citation_limit("many").is_err());
    }

    #[test]
    fn display_or_dash_handles_blank_values() {
        assert_eq!(display_or_dash("  "), "-");
        assert_eq!(display_or_dash("Reuters"), "Reuters");
    }

    #[test]
    fn run_score_reports_missing_input() {
        let error = run_score(ScoreArgs {
            input: PathBuf::from("./does-not-exist.json"),
            now: None,
            lexicon: None,
        })
        .expect_err("missing file");
        assert!(matches!(error, AppError::Io(_)));
    }
}
