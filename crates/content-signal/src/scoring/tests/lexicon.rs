use super::common::*;
use crate::scoring::lexicon::word_matches_for_tests;
use crate::scoring::{combine_weights, Lexicon, LexiconError, STANDARD_LEXICON_CSV};

#[test]
fn unmatched_text_scores_zero() {
    let lexicon = fixture_lexicon();
    assert_eq!(lexicon.keyword_score(""), 0.0);
    assert_eq!(lexicon.keyword_score("!!! ??? ..."), 0.0);
    assert_eq!(lexicon.keyword_score("sunny afternoon in the park"), 0.0);
}

#[test]
fn single_match_gets_the_floor() {
    let lexicon = fixture_lexicon();
    assert_eq!(lexicon.keyword_score("Tomorrow's weather"), 70.0);
    assert_eq!(lexicon.keyword_score("New GPT-5 benchmarks"), 100.0);
    assert_eq!(combine_weights(&[55]), 70.0);
    assert_eq!(combine_weights(&[95]), 95.0);
}

#[test]
fn multiple_matches_follow_the_weighted_blend() {
    // 100*0.75 + 60*0.15 + 50*0.10 + 30*0.10/1.8
    let score = combine_weights(&[30, 100, 50, 60]);
    let expected = 75.0 + 9.0 + 5.0 + 3.0 / 1.8;
    assert!((score - expected).abs() < 1e-9, "score was {score}");
}

#[test]
fn multiple_matches_are_clamped() {
    assert_eq!(combine_weights(&[40, 30]), 80.0);
    assert_eq!(combine_weights(&[200, 200, 200]), 150.0);
}

#[test]
fn phrase_words_are_not_counted_twice() {
    let lexicon = fixture_lexicon();
    let matches = lexicon.matches("A large language model for lawyers");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].phrase, "large language model");
    assert_eq!(lexicon.keyword_score("A large language model for lawyers"), 80.0);

    let matches = lexicon.matches("Language tutoring with a model");
    assert_eq!(matches.len(), 2);
}

#[test]
fn nested_phrase_inside_a_longer_match_is_skipped() {
    let lexicon = fixture_lexicon();
    let phrases: Vec<String> = lexicon
        .matches("A large language model for lawyers")
        .into_iter()
        .map(|m| m.phrase)
        .collect();
    assert_eq!(phrases, vec!["large language model".to_string()]);

    assert_eq!(lexicon.keyword_score("Tuning a language model"), 70.0);

    // A separate mention elsewhere in the text still counts.
    let phrases: Vec<String> = lexicon
        .matches("Language model distilled from a large language model")
        .into_iter()
        .map(|m| m.phrase)
        .collect();
    assert_eq!(
        phrases,
        vec!["large language model".to_string(), "language model".to_string()]
    );
}

#[test]
fn standard_lexicon_counts_nested_phrases_once() {
    let lexicon = Lexicon::standard().expect("standard lexicon loads");
    let matches = lexicon.matches("A large language model for lawyers");
    assert_eq!(matches.len(), 1, "got {matches:?}");
    assert_eq!(matches[0].phrase, "large language model");
}

#[test]
fn plural_variants_match_phrases_and_words() {
    let lexicon = fixture_lexicon();
    let phrases: Vec<String> = lexicon
        .matches("AI agents need new chips")
        .into_iter()
        .map(|m| m.phrase)
        .collect();
    assert_eq!(phrases, vec!["ai agent".to_string(), "chip".to_string()]);

    assert!(word_matches_for_tests("agents", "agent"));
    assert!(word_matches_for_tests("agent", "agents"));
    assert!(!word_matches_for_tests("agency", "agent"));
}

#[test]
fn normalization_applies_to_text_and_lexicon() {
    let lexicon = fixture_lexicon();
    assert_eq!(lexicon.keyword_score("ＯｐｅｎＡＩ"), 90.0);
    assert_eq!(lexicon.keyword_score("gpt 5"), 100.0);
    assert_eq!(lexicon.keyword_score("GPT—5 is here"), 100.0);
    assert_eq!(lexicon.weight_of("gpt-5"), Some(100));
}

#[test]
fn two_or_more_matches_always_land_in_range() {
    let lexicon = Lexicon::standard().expect("standard lexicon loads");
    let texts = [
        "OpenAI and Anthropic ship agentic tools",
        "Nvidia GPU chip shortage hits data center buildout",
        "Generative AI funding round values startup at a billion",
        "AI regulation: the AI Act and copyright lawsuits",
        "LLM inference costs fall as open weights models spread",
    ];
    for text in texts {
        let matches = lexicon.matches(text);
        assert!(matches.len() >= 2, "expected several matches in '{text}'");
        let score = lexicon.keyword_score(text);
        assert!((80.0..=150.0).contains(&score), "'{text}' scored {score}");
    }
}

#[test]
fn csv_loader_skips_comments_and_keeps_last_duplicate() {
    let csv = "# comment\nphrase,weight\nAgent,40\n agent , 65\nrobotics,50\n";
    let lexicon = Lexicon::from_reader(csv.as_bytes()).expect("lexicon loads");
    assert_eq!(lexicon.len(), 2);
    assert_eq!(lexicon.weight_of("agent"), Some(65));
}

#[test]
fn csv_loader_rejects_bad_rows() {
    let error = Lexicon::from_reader("phrase,weight\n---,10\n".as_bytes())
        .expect_err("empty phrase rejected");
    assert!(matches!(error, LexiconError::EmptyPhrase { .. }));

    let error = Lexicon::from_reader("phrase,weight\nagent,heavy\n".as_bytes())
        .expect_err("weight must be numeric");
    assert!(matches!(error, LexiconError::Csv(_)));

    let error = Lexicon::from_reader("phrase,weight\n".as_bytes()).expect_err("empty lexicon");
    assert!(matches!(error, LexiconError::Empty));
}

#[test]
fn from_path_propagates_io_errors() {
    let error = Lexicon::from_path("./does-not-exist.csv").expect_err("expected io error");
    match error {
        LexiconError::Io(_) => {}
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn standard_lexicon_is_embedded() {
    let lexicon = Lexicon::standard().expect("standard lexicon loads");
    assert!(lexicon.len() > 50);
    assert!(STANDARD_LEXICON_CSV.contains("phrase,weight"));
    assert_eq!(lexicon.weight_of("OpenAI"), Some(90));
}
