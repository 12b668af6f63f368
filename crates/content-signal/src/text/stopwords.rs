use std::collections::HashSet;
use std::sync::OnceLock;

static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

const STOP_WORD_LIST: &[&str] = &[
    "about", "above", "after", "again", "against", "also", "among", "another", "because",
    "been", "before", "being", "below", "between", "both", "could", "does", "doing", "down",
    "during", "each", "even", "every", "from", "further", "have", "having", "here", "into",
    "just", "like", "made", "make", "many", "more", "most", "much", "must", "only", "other",
    "over", "said", "same", "says", "should", "some", "such", "than", "that", "their",
    "them", "then", "there", "these", "they", "this", "those", "through", "under", "until",
    "upon", "very", "were", "what", "when", "where", "which", "while", "will", "with",
    "within", "without", "would", "your", "yours",
];

/// Whether a lower-cased token is a fixed stop word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS
        .get_or_init(|| STOP_WORD_LIST.iter().copied().collect())
        .contains(token)
}
