//! Derived statistics and text mining over a record slice.
//!
//! [`Analyzer`] borrows the parsed records and never mutates them. To analyze
//! one participant, narrow the slice first with
//! [`apply_filters`](crate::filter::apply_filters).
//!
//! # Example
//!
//! ```rust
//! use chatstat::analyzer::Analyzer;
//! use chatstat::parser::Parser;
//! use chatstat::parsers::WhatsAppParser;
//!
//! # fn main() -> chatstat::Result<()> {
//! let records = WhatsAppParser::new().parse_str(
//!     "12/1/23, 10:00 AM - Alice: pizza tonight? 🍕\n12/1/23, 10:01 AM - Bob: pizza sounds great",
//! )?;
//!
//! let analyzer = Analyzer::new(&records);
//! assert_eq!(analyzer.word_frequency(1).top().map(|t| t.count), Some(2));
//! assert_eq!(analyzer.emoji_frequency(5).get("🍕"), Some(1));
//! assert_eq!(analyzer.perform_sentiment_analysis().positive, 1);
//! # Ok(())
//! # }
//! ```

mod activity;
pub mod frequency;
pub mod sentiment;
pub mod text;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::message::{MessageKind, Record};
use crate::store::models::{percentage, round2};

pub use activity::{ActivityHeatmap, DensityRow, HeatmapRow, RollingPoint, UserHourRow};
pub use frequency::{FrequencyTable, TermCount};
pub use sentiment::{Sentiment, polarity};
pub use text::StopWords;

/// Per-sender summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStatistics {
    /// Sender name
    pub sender: String,
    /// Records of any kind
    pub messages: usize,
    /// Whitespace-separated words across text bodies
    pub words: usize,
    /// Media placeholders
    pub media: usize,
    /// Deleted-message placeholders
    pub deleted: usize,
    /// Earliest record
    pub first_message: DateTime<Utc>,
    /// Latest record
    pub last_message: DateTime<Utc>,
    /// Mean body length in chars, two decimals
    pub average_length: f64,
}

/// Number of text records in each sentiment class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    /// Number of classified records.
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Share of text records in each sentiment class, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentShare {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// Read-only analysis over a slice of records.
pub struct Analyzer<'a> {
    records: &'a [Record],
    config: AnalyzerConfig,
    stop_words: StopWords,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer with default configuration.
    pub fn new(records: &'a [Record]) -> Self {
        Self::with_config(records, AnalyzerConfig::default())
    }

    /// Creates an analyzer with custom configuration.
    pub fn with_config(records: &'a [Record], config: AnalyzerConfig) -> Self {
        let stop_words = StopWords::from_config(&config);
        Self {
            records,
            config,
            stop_words,
        }
    }

    /// Returns the analyzed records.
    pub fn records(&self) -> &'a [Record] {
        self.records
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn authored(&self) -> impl Iterator<Item = &'a Record> + use<'a> {
        self.records.iter().filter(|r| r.is_authored())
    }

    fn texts(&self) -> impl Iterator<Item = &'a Record> + use<'a> {
        self.records.iter().filter(|r| r.kind == MessageKind::Text)
    }

    /// Summary for one sender, or `None` if they sent nothing.
    pub fn user_statistics(&self, sender: &str) -> Option<UserStatistics> {
        summarize(sender, self.records.iter().filter(|r| r.is_from(sender)))
    }

    /// Summary of every record held, reported under `label`.
    ///
    /// Meant for a record set already narrowed to one participant, where the
    /// narrowing may have matched several spellings of the same name.
    pub fn combined_statistics(&self, label: &str) -> Option<UserStatistics> {
        summarize(label, self.records.iter().filter(|r| r.sender.is_some()))
    }

    /// Most frequent content words across text bodies.
    pub fn word_frequency(&self, top_n: usize) -> FrequencyTable {
        let min_len = self.config.min_token_len;
        let terms = self
            .texts()
            .flat_map(|r| text::content_words(&r.body, &self.stop_words, min_len));
        FrequencyTable::from_terms(terms, top_n)
    }

    /// Most frequent adjacent content-word pairs, keyed `"w1 w2"`.
    ///
    /// Pairs never span two records.
    pub fn bigrams(&self, top_n: usize) -> FrequencyTable {
        let min_len = self.config.min_token_len;
        let terms = self.texts().flat_map(|r| {
            let tokens: Vec<String> =
                text::content_words(&r.body, &self.stop_words, min_len).collect();
            tokens
                .windows(2)
                .map(|pair| format!("{} {}", pair[0], pair[1]))
                .collect::<Vec<_>>()
        });
        FrequencyTable::from_terms(terms, top_n)
    }

    /// Most frequent emoji across authored bodies.
    pub fn emoji_frequency(&self, top_n: usize) -> FrequencyTable {
        let terms = self
            .authored()
            .flat_map(|r| text::emojis(&r.body).map(str::to_string));
        FrequencyTable::from_terms(terms, top_n)
    }

    /// Classifies every text record by polarity.
    pub fn perform_sentiment_analysis(&self) -> SentimentCounts {
        let mut counts = SentimentCounts::default();
        for record in self.texts() {
            match self.classify_sentiment(&record.body) {
                Sentiment::Positive => counts.positive += 1,
                Sentiment::Neutral => counts.neutral += 1,
                Sentiment::Negative => counts.negative += 1,
            }
        }
        counts
    }

    /// Sentiment classes as percentages of all text records.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyInput`] when there are no text records.
    pub fn sentiment_share(&self) -> Result<SentimentShare, AnalysisError> {
        let counts = self.perform_sentiment_analysis();
        let total = counts.total();
        if total == 0 {
            return Err(AnalysisError::EmptyInput);
        }
        Ok(SentimentShare {
            positive: percentage(counts.positive, total),
            neutral: percentage(counts.neutral, total),
            negative: percentage(counts.negative, total),
        })
    }

    /// Sentiment class of one text under this analyzer's thresholds.
    pub fn classify_sentiment(&self, body: &str) -> Sentiment {
        Sentiment::from_polarity(
            polarity(body),
            self.config.positive_threshold,
            self.config.negative_threshold,
        )
    }
}

fn summarize<'r>(
    label: &str,
    records: impl Iterator<Item = &'r Record>,
) -> Option<UserStatistics> {
    let mine: Vec<&Record> = records.collect();
    let first = mine.first()?;

    let mut stats = UserStatistics {
        sender: label.to_string(),
        messages: mine.len(),
        words: 0,
        media: 0,
        deleted: 0,
        first_message: first.timestamp,
        last_message: first.timestamp,
        average_length: 0.0,
    };

    let mut total_length = 0usize;
    for record in &mine {
        match record.kind {
            MessageKind::Text => stats.words += record.body.split_whitespace().count(),
            MessageKind::Media => stats.media += 1,
            MessageKind::Deleted => stats.deleted += 1,
            MessageKind::System => {}
        }
        stats.first_message = stats.first_message.min(record.timestamp);
        stats.last_message = stats.last_message.max(record.timestamp);
        total_length += record.length();
    }
    stats.average_length = round2(total_length as f64 / mine.len() as f64);

    Some(stats)
}
