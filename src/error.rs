//! Unified error types for chatstat.
//!
//! This module provides a single [`ChatstatError`] enum covering every failure
//! the library can surface, plus one typed kind per component:
//!
//! - [`ParseError`] - the transcript could not be turned into records
//! - [`StoreError`] - the store lifecycle was violated (double load, query before load)
//! - [`AnalysisError`] - an analysis was asked for something structurally invalid
//!
//! # Error Handling Philosophy
//!
//! - **Line-level anomalies never surface.** A header-shaped line with an
//!   impossible date is demoted to continuation text by the parser.
//! - **Component errors are not retried.** Everything runs over resident data,
//!   so a failure is either a precondition violation or a bad source file.
//! - **Library users** can match on the component kinds; the binary prints
//!   the `Display` chain.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatstat operations.
///
/// # Example
///
/// ```rust
/// use chatstat::error::Result;
/// use chatstat::Record;
///
/// fn my_function() -> Result<Vec<Record>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatError>;

/// The error type for all chatstat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when exporting a report)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The transcript could not be parsed.
    #[error("Failed to parse transcript{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// What went wrong
        #[source]
        source: ParseError,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The store was used outside its load-once lifecycle.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// An analysis was requested over structurally invalid input.
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// The SQLite backing store reported an error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid date in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A configuration file could not be read as TOML.
    #[error("Invalid config file {}: {source}", path.display())]
    Config {
        /// The config file that failed to parse
        path: PathBuf,
        /// The underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error while building textual output.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Kinds of transcript parse failures.
///
/// Only whole-file problems end up here. Individual malformed lines are
/// recovered locally and never abort a parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input was empty or contained only whitespace.
    #[error("input is empty")]
    EmptyInput,

    /// Not a single line matched the message-header pattern.
    #[error("no message headers found; make sure the file is a chat export")]
    NoMessagesFound,

    /// The input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8 (invalid byte at offset {valid_up_to})")]
    MalformedEncoding {
        /// Length of the longest valid UTF-8 prefix
        valid_up_to: usize,
    },
}

/// Store lifecycle violations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// `load` was called a second time on the same store.
    #[error("records were already loaded into this store")]
    AlreadyLoaded,

    /// A query ran before any records were loaded.
    #[error("no records loaded; call load() first")]
    NotLoaded,
}

/// Structurally invalid analysis requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A ratio was requested over a record set with nothing to divide by.
    #[error("no records to analyze")]
    EmptyInput,

    /// A rolling window of zero days was requested.
    #[error("rolling window must be at least one day")]
    InvalidWindow,

    /// No record was sent by the requested participant.
    #[error("no messages from '{0}'")]
    UnknownSender(String),
}

impl From<ParseError> for ChatstatError {
    fn from(err: ParseError) -> Self {
        ChatstatError::Parse {
            source: err,
            path: None,
        }
    }
}

impl From<std::string::FromUtf8Error> for ChatstatError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatstatError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatError {
    /// Creates a parse error tied to a file path.
    pub fn parse_at(source: ParseError, path: impl Into<PathBuf>) -> Self {
        ChatstatError::Parse {
            source,
            path: Some(path.into()),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatstatError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns the parse error kind, if this is a parse error.
    pub fn parse_kind(&self) -> Option<&ParseError> {
        match self {
            ChatstatError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatstatError::Parse { .. })
    }

    /// Returns `true` if this is a store lifecycle error.
    pub fn is_store(&self) -> bool {
        matches!(self, ChatstatError::Store(_))
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatstatError::InvalidDate { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
