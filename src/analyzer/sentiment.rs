//! Lexicon-based sentiment polarity.
//!
//! Each known word carries a weight in `[-1, 1]`. An intensifier directly
//! before a word scales it; a negation up to two words before flips it at
//! half strength. The polarity of a text is the mean weight of its scored
//! words, clamped to `[-1, 1]`, or `0.0` when nothing scored.

use serde::Serialize;

use super::text::words;

const POSITIVE: &[(&str, f64)] = &[
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.9),
    ("wonderful", 1.0),
    ("fantastic", 0.9),
    ("awesome", 1.0),
    ("perfect", 1.0),
    ("brilliant", 0.9),
    ("best", 1.0),
    ("better", 0.5),
    ("nice", 0.6),
    ("cool", 0.35),
    ("fun", 0.3),
    ("funny", 0.25),
    ("happy", 0.8),
    ("glad", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("like", 0.2),
    ("beautiful", 0.85),
    ("cute", 0.5),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("congrats", 0.8),
    ("congratulations", 0.8),
    ("excited", 0.4),
    ("grateful", 0.6),
    ("lucky", 0.4),
    ("yay", 0.8),
    ("haha", 0.2),
    ("lol", 0.8),
    ("win", 0.8),
    ("welcome", 0.8),
    ("sweet", 0.35),
];

const NEGATIVE: &[(&str, f64)] = &[
    ("bad", -0.7),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("worst", -1.0),
    ("worse", -0.4),
    ("hate", -0.8),
    ("sad", -0.5),
    ("angry", -0.5),
    ("upset", -0.5),
    ("annoyed", -0.4),
    ("annoying", -0.8),
    ("boring", -1.0),
    ("tired", -0.4),
    ("sick", -0.7),
    ("sorry", -0.5),
    ("wrong", -0.5),
    ("stupid", -0.8),
    ("ugly", -0.7),
    ("poor", -0.4),
    ("worried", -0.4),
    ("scared", -0.6),
    ("afraid", -0.6),
    ("hurt", -0.5),
    ("miss", -0.2),
    ("late", -0.3),
    ("problem", -0.3),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("useless", -0.5),
    ("ugh", -0.6),
    ("damn", -0.3),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.2),
    ("super", 1.4),
    ("extremely", 1.5),
    ("totally", 1.4),
    ("absolutely", 1.5),
    ("quite", 1.1),
    ("slightly", 0.7),
    ("somewhat", 0.8),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "didn't", "isn't", "wasn't", "can't", "won't",
    "nothing", "neither", "nor",
];

/// Sentiment class of one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Classifies a polarity against the `(positive, negative)` thresholds.
    ///
    /// Values strictly above `positive` are positive, strictly below
    /// `negative` are negative, everything else is neutral.
    pub fn from_polarity(polarity: f64, positive: f64, negative: f64) -> Self {
        if polarity > positive {
            Sentiment::Positive
        } else if polarity < negative {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

fn weight(word: &str) -> Option<f64> {
    POSITIVE
        .iter()
        .chain(NEGATIVE)
        .find(|(w, _)| *w == word)
        .map(|&(_, weight)| weight)
}

fn intensity(word: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|&(_, factor)| factor)
}

/// Polarity of `text` in `[-1, 1]`.
pub fn polarity(text: &str) -> f64 {
    let tokens: Vec<String> = words(text).collect();
    let mut total = 0.0;
    let mut scored = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        let Some(mut score) = weight(token) else {
            continue;
        };

        if let Some(factor) = i.checked_sub(1).and_then(|p| intensity(&tokens[p])) {
            score *= factor;
        }

        let negated = tokens[i.saturating_sub(2)..i]
            .iter()
            .any(|prev| NEGATIONS.contains(&prev.as_str()));
        if negated {
            score *= -0.5;
        }

        total += score.clamp(-1.0, 1.0);
        scored += 1;
    }

    if scored == 0 {
        0.0
    } else {
        (total / scored as f64).clamp(-1.0, 1.0)
    }
}
