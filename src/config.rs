//! Configuration types for the parser, analyzer and store.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies:
//!
//! - [`ParserConfig`] - date order, two-digit year resolution, placeholders
//! - [`AnalyzerConfig`] - stop-words, token length, sentiment thresholds
//! - [`StoreConfig`] - where the SQLite backing store lives
//! - [`AppConfig`] - all of the above, loadable from a TOML file
//!
//! # Example
//!
//! ```rust
//! use chatstat::config::{DateOrder, ParserConfig};
//! use chatstat::parsers::WhatsAppParser;
//!
//! let config = ParserConfig::new()
//!     .with_date_order(DateOrder::DayFirst)
//!     .with_media_placeholder("<Medien ausgeschlossen>");
//!
//! let parser = WhatsAppParser::with_config(config);
//! ```
//!
//! # TOML
//!
//! Every section and field is optional; missing values take their defaults.
//!
//! ```toml
//! [parser]
//! date_order = "day-first"
//! deleted_placeholders = ["Diese Nachricht wurde gelöscht"]
//! system_phrases = ["hat den Betreff geändert"]
//!
//! [analyzer]
//! extra_stop_words = ["lol", "ok"]
//! positive_threshold = 0.1
//!
//! [store]
//! database = "chat.db"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChatstatError, Result};

/// How to read the first two numeric components of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// Decide once per file by majority vote over unambiguous dates.
    #[default]
    Auto,
    /// `DD/MM/YY`
    DayFirst,
    /// `MM/DD/YY`
    MonthFirst,
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrder::Auto => write!(f, "auto"),
            DateOrder::DayFirst => write!(f, "day-first"),
            DateOrder::MonthFirst => write!(f, "month-first"),
        }
    }
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(DateOrder::Auto),
            "day-first" | "dayfirst" | "dmy" => Ok(DateOrder::DayFirst),
            "month-first" | "monthfirst" | "mdy" => Ok(DateOrder::MonthFirst),
            _ => Err(format!(
                "Unknown date order: '{s}'. Expected one of: auto, day-first, month-first"
            )),
        }
    }
}

/// Configuration for transcript parsing.
///
/// Placeholders are matched exactly against the trimmed body. The defaults
/// cover English Android and iOS exports; other export languages need their
/// own phrases.
///
/// # Example
///
/// ```rust
/// use chatstat::config::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_reference_year(2020)
///     .with_deleted_placeholder("Este mensaje fue eliminado");
/// assert!(config.is_deleted_placeholder("Este mensaje fue eliminado"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Day-first / month-first resolution (default: auto-detect)
    pub date_order: DateOrder,

    /// Two-digit years resolve to the century nearest this year (default: 2000)
    pub reference_year: i32,

    /// Bodies that mark a deleted message
    pub deleted_placeholders: Vec<String>,

    /// Bodies that mark an omitted media attachment
    pub media_placeholders: Vec<String>,

    /// Notification phrases that follow an actor's name, e.g. `changed the subject`
    pub system_phrases: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            date_order: DateOrder::Auto,
            reference_year: 2000,
            deleted_placeholders: vec![
                "This message was deleted".to_string(),
                "You deleted this message".to_string(),
            ],
            media_placeholders: vec![
                "<Media omitted>".to_string(),
                "image omitted".to_string(),
                "video omitted".to_string(),
                "audio omitted".to_string(),
                "sticker omitted".to_string(),
                "GIF omitted".to_string(),
                "document omitted".to_string(),
                "Contact card omitted".to_string(),
            ],
            system_phrases: [
                "created group",
                "added",
                "removed",
                "left",
                "joined using this group's invite link",
                "changed the subject",
                "changed the group name",
                "changed the group description",
                "changed this group's icon",
                "deleted this group's icon",
                "changed the group settings",
                "changed their phone number",
                "is now an admin",
                "turned on disappearing messages",
                "turned off disappearing messages",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date order instead of auto-detecting it.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Sets the reference year for two-digit year resolution.
    #[must_use]
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    /// Adds a "message deleted" placeholder.
    #[must_use]
    pub fn with_deleted_placeholder(mut self, phrase: impl Into<String>) -> Self {
        self.deleted_placeholders.push(phrase.into());
        self
    }

    /// Adds a "media omitted" placeholder.
    #[must_use]
    pub fn with_media_placeholder(mut self, phrase: impl Into<String>) -> Self {
        self.media_placeholders.push(phrase.into());
        self
    }

    /// Returns `true` if `body` is a configured deleted-message placeholder.
    pub fn is_deleted_placeholder(&self, body: &str) -> bool {
        let body = body.trim();
        self.deleted_placeholders.iter().any(|p| p == body)
    }

    /// Returns `true` if `body` is a configured media placeholder.
    pub fn is_media_placeholder(&self, body: &str) -> bool {
        let body = body.trim();
        self.media_placeholders.iter().any(|p| p == body)
    }

    /// Adds a notification phrase.
    #[must_use]
    pub fn with_system_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.system_phrases.push(phrase.into());
        self
    }

    /// Returns `true` if `candidate` reads as `<actor> <system phrase> ...`.
    ///
    /// Matching is case-insensitive on whole words, and the phrase must come
    /// after at least one word, so a contact literally named "Left" still
    /// counts as a sender.
    pub fn is_system_notice(&self, candidate: &str) -> bool {
        let words: Vec<String> = candidate.split_whitespace().map(str::to_lowercase).collect();
        self.system_phrases.iter().any(|phrase| {
            let phrase: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
            !phrase.is_empty()
                && words.len() > phrase.len()
                && words[1..].windows(phrase.len()).any(|w| w == phrase.as_slice())
        })
    }
}

/// Configuration for text analysis.
///
/// # Example
///
/// ```rust
/// use chatstat::config::AnalyzerConfig;
///
/// let config = AnalyzerConfig::new()
///     .with_stop_word("lol")
///     .with_sentiment_band(0.1, -0.1);
/// assert_eq!(config.positive_threshold, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Words excluded from frequency counts in addition to the built-in list
    pub extra_stop_words: Vec<String>,

    /// Also exclude the large ISO English stop-word list (default: false)
    pub extended_stop_words: bool,

    /// Tokens shorter than this (in chars) are ignored (default: 2)
    pub min_token_len: usize,

    /// Polarity above this is positive (default: 0.05)
    pub positive_threshold: f64,

    /// Polarity below this is negative (default: -0.05)
    pub negative_threshold: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            extra_stop_words: Vec::new(),
            extended_stop_words: false,
            min_token_len: 2,
            positive_threshold: 0.05,
            negative_threshold: -0.05,
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stop-word.
    #[must_use]
    pub fn with_stop_word(mut self, word: impl Into<String>) -> Self {
        self.extra_stop_words.push(word.into().to_lowercase());
        self
    }

    /// Enables or disables the extended stop-word list.
    #[must_use]
    pub fn with_extended_stop_words(mut self, enabled: bool) -> Self {
        self.extended_stop_words = enabled;
        self
    }

    /// Sets the minimum token length.
    #[must_use]
    pub fn with_min_token_len(mut self, len: usize) -> Self {
        self.min_token_len = len;
        self
    }

    /// Sets the positive/negative polarity thresholds.
    #[must_use]
    pub fn with_sentiment_band(mut self, positive: f64, negative: f64) -> Self {
        self.positive_threshold = positive;
        self.negative_threshold = negative;
        self
    }
}

/// Configuration for the SQLite store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file; `None` keeps the store in memory
    pub database: Option<PathBuf>,
}

impl StoreConfig {
    /// Creates an in-memory store configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Persists the store to a file.
    #[must_use]
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = Some(path.into());
        self
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Parser settings
    pub parser: ParserConfig,
    /// Analyzer settings
    pub analyzer: AnalyzerConfig,
    /// Store settings
    pub store: StoreConfig,
}

impl AppConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| ChatstatError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads a configuration from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content, path)
    }
}
