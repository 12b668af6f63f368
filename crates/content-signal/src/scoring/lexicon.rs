use crate::text::{normalize_text, tokens};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Lexicon shipped with the crate, one `phrase,weight` row per entry.
pub const STANDARD_LEXICON_CSV: &str = include_str!("../../data/lexicon.csv");

/// Floor applied when exactly one lexicon entry matches.
pub const SINGLE_MATCH_FLOOR: f64 = 70.0;
/// Lower clamp for texts with two or more matches.
pub const MULTI_MATCH_MIN: f64 = 80.0;
/// Upper clamp for texts with two or more matches.
pub const MULTI_MATCH_MAX: f64 = 150.0;

const TOP_SHARE: f64 = 0.75;
const SECOND_SHARE: f64 = 0.15;
const TAIL_SHARE: f64 = 0.10;
const TAIL_DECAY: f64 = 1.8;

/// One configured phrase and the points it is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordWeightEntry {
    pub phrase: String,
    pub weight: u32,
}

/// A lexicon entry that matched a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconMatch {
    pub phrase: String,
    pub weight: u32,
}

#[derive(Debug, Clone)]
struct LexiconTerm {
    phrase: String,
    tokens: Vec<String>,
    weight: u32,
}

/// Immutable phrase-to-weight table, split into multi-word phrases and
/// single words after normalization.
#[derive(Debug, Clone)]
pub struct Lexicon {
    phrases: Vec<LexiconTerm>,
    words: Vec<LexiconTerm>,
}

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("failed to read lexicon: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lexicon CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("lexicon entry '{phrase}' normalizes to an empty phrase")]
    EmptyPhrase { phrase: String },
    #[error("lexicon contains no entries")]
    Empty,
}

impl Lexicon {
    /// Builds a lexicon, normalizing every phrase. A phrase repeated after
    /// normalization keeps the weight of its last occurrence.
    pub fn new<I>(entries: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = KeywordWeightEntry>,
    {
        let mut ordered: Vec<String> = Vec::new();
        let mut weights: BTreeMap<String, u32> = BTreeMap::new();

        for entry in entries {
            let normalized = normalize_text(&entry.phrase);
            if normalized.is_empty() {
                return Err(LexiconError::EmptyPhrase {
                    phrase: entry.phrase,
                });
            }

            if let Some(previous) = weights.insert(normalized.clone(), entry.weight) {
                warn!(
                    phrase = %normalized,
                    previous,
                    weight = entry.weight,
                    "duplicate lexicon phrase, keeping the later weight"
                );
            } else {
                ordered.push(normalized);
            }
        }

        if ordered.is_empty() {
            return Err(LexiconError::Empty);
        }

        let mut phrases = Vec::new();
        let mut words = Vec::new();
        for phrase in ordered {
            let weight = weights[&phrase];
            let term = LexiconTerm {
                tokens: tokens(&phrase).into_iter().map(str::to_string).collect(),
                phrase,
                weight,
            };
            if term.tokens.len() > 1 {
                phrases.push(term);
            } else {
                words.push(term);
            }
        }

        // Longer phrases claim their words before the shorter phrases nested in them.
        phrases.sort_by(|a, b| b.tokens.len().cmp(&a.tokens.len()));

        Ok(Self { phrases, words })
    }

    /// Lexicon embedded in the crate.
    pub fn standard() -> Result<Self, LexiconError> {
        Self::from_reader(STANDARD_LEXICON_CSV.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads `phrase,weight` rows with a header line.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LexiconError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut entries = Vec::new();
        for row in csv_reader.deserialize::<KeywordWeightEntry>() {
            entries.push(row?);
        }

        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.phrases.len() + self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn weight_of(&self, phrase: &str) -> Option<u32> {
        let normalized = normalize_text(phrase);
        self.phrases
            .iter()
            .chain(self.words.iter())
            .find(|term| term.phrase == normalized)
            .map(|term| term.weight)
    }

    /// Entries found in `text`. Multi-word phrases are matched first and
    /// consume their words so single-word entries do not count them twice.
    pub fn matches(&self, text: &str) -> Vec<LexiconMatch> {
        let normalized = normalize_text(text);
        let text_tokens = tokens(&normalized);
        if text_tokens.is_empty() {
            return Vec::new();
        }

        let mut found = Vec::new();
        let mut consumed: HashSet<&str> = HashSet::new();
        let mut covered = vec![false; text_tokens.len()];

        for term in &self.phrases {
            let width = term.tokens.len();
            // A window already inside a longer matched phrase does not count again.
            let hit = phrase_starts(&text_tokens, &term.tokens)
                .find(|&start| covered[start..start + width].iter().any(|taken| !taken));
            if let Some(start) = hit {
                covered[start..start + width].fill(true);
                consumed.extend(term.tokens.iter().map(String::as_str));
                consumed.extend(text_tokens[start..start + width].iter().copied());
                found.push(LexiconMatch {
                    phrase: term.phrase.clone(),
                    weight: term.weight,
                });
            }
        }

        for term in &self.words {
            if consumed.iter().any(|word| word_matches(word, &term.phrase)) {
                continue;
            }
            if text_tokens
                .iter()
                .any(|token| word_matches(token, &term.phrase))
            {
                found.push(LexiconMatch {
                    phrase: term.phrase.clone(),
                    weight: term.weight,
                });
            }
        }

        found
    }

    /// Keyword score of `text` in `[0, 150]`.
    pub fn keyword_score(&self, text: &str) -> f64 {
        let weights: Vec<u32> = self.matches(text).iter().map(|m| m.weight).collect();
        combine_weights(&weights)
    }
}

/// Folds matched weights into a single keyword score.
///
/// No match scores 0 and a single match scores at least 70. With two or more
/// matches the heaviest weight dominates, the runner-up adds a little, the
/// tail adds geometrically less, and the result is clamped to `[80, 150]`.
pub fn combine_weights(weights: &[u32]) -> f64 {
    let mut sorted = weights.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    match sorted.as_slice() {
        [] => 0.0,
        [only] => f64::from(*only).max(SINGLE_MATCH_FLOOR),
        [top, second, rest @ ..] => {
            let tail: f64 = rest
                .iter()
                .enumerate()
                .map(|(i, weight)| f64::from(*weight) * TAIL_SHARE / TAIL_DECAY.powi(i as i32))
                .sum();
            let score = f64::from(*top) * TOP_SHARE + f64::from(*second) * SECOND_SHARE + tail;
            score.clamp(MULTI_MATCH_MIN, MULTI_MATCH_MAX)
        }
    }
}

fn phrase_starts<'a>(
    text_tokens: &'a [&'a str],
    phrase: &'a [String],
) -> impl Iterator<Item = usize> + 'a {
    let width = phrase.len();
    let last_start = text_tokens.len().checked_sub(width).filter(|_| width > 0);

    last_start.into_iter().flat_map(move |last_start| {
        (0..=last_start).filter(move |&start| {
            let window = &text_tokens[start..start + width];
            window[..width - 1]
                .iter()
                .zip(phrase.iter())
                .all(|(token, word)| *token == word.as_str())
                && word_matches(window[width - 1], &phrase[width - 1])
        })
    })
}

/// Singular/plural tolerant comparison by adding or removing a trailing `s`.
fn word_matches(token: &str, word: &str) -> bool {
    token == word
        || token.strip_suffix('s') == Some(word)
        || word.strip_suffix('s').is_some_and(|stem| !stem.is_empty() && stem == token)
}

#[cfg(test)]
pub(crate) fn word_matches_for_tests(token: &str, word: &str) -> bool {
    word_matches(token, word)
}
