//! Tokenization, stop-words and emoji extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::AnalyzerConfig;

/// Letters and digits, with inner apostrophes kept (`don't`, `it's`).
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Alphabetic}\p{N}]+(?:['’][\p{Alphabetic}\p{N}]+)*")
        .expect("word pattern is valid")
});

static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{Extended_Pictographic}").expect("emoji pattern is valid")
});

/// Chat filler and English function words.
const BUILTIN_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "am", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "before", "being", "but", "by", "can", "could", "did", "do", "does",
    "doing", "don't", "dont", "for", "from", "had", "has", "have", "having", "he", "her", "here",
    "hers", "him", "his", "how", "i", "i'm", "im", "if", "in", "into", "is", "it", "it's", "its",
    "just", "me", "my", "no", "not", "now", "of", "off", "on", "once", "only", "or", "our",
    "out", "over", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "this", "those", "to", "too", "up", "us",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "would", "you", "your", "yours", "ok", "okay", "omitted", "media",
];

/// Set of words excluded from frequency tables.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Built-in list, plus the ISO English list and extra words when configured.
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let mut words: HashSet<String> = BUILTIN_STOP_WORDS.iter().map(ToString::to_string).collect();

        if config.extended_stop_words {
            words.extend(
                stop_words::get(stop_words::LANGUAGE::English)
                    .iter()
                    .map(|w| w.to_lowercase()),
            );
        }
        words.extend(config.extra_stop_words.iter().map(|w| w.to_lowercase()));

        Self { words }
    }

    /// Returns `true` if `token` (already lowercase) is a stop-word.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of stop-words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Lowercase word tokens of `text`, punctuation dropped.
///
/// Curly apostrophes are normalized to `'`.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase().replace('’', "'"))
}

/// Tokens that count towards word and bigram frequency.
///
/// Drops stop-words, pure numbers and tokens shorter than `min_len` chars.
pub fn content_words<'t>(
    text: &'t str,
    stop_words: &'t StopWords,
    min_len: usize,
) -> impl Iterator<Item = String> + 't {
    words(text).filter(move |token| {
        token.chars().count() >= min_len
            && !token.chars().all(|c| c.is_numeric())
            && !stop_words.contains(token)
    })
}

/// Emoji code points in `text`, in order of appearance.
pub fn emojis(text: &str) -> impl Iterator<Item = &str> {
    EMOJI.find_iter(text).map(|m| m.as_str())
}
