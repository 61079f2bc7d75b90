//! # chatstat
//!
//! Parse WhatsApp-style chat exports and compute per-user and aggregate chat
//! analytics.
//!
//! ## Overview
//!
//! A transcript goes through three stages:
//!
//! 1. **Parse**: [`WhatsAppParser`](parsers::WhatsAppParser) turns the raw
//!    text into an ordered list of [`Record`]s. Multi-line messages are
//!    stitched together, ambiguous dates are resolved once per file and each
//!    record is classified as text, media, deleted or system.
//! 2. **Store**: [`ChatStore`](store::ChatStore) bulk-loads the records into
//!    SQLite and answers aggregate questions: most active user, peak hour,
//!    contribution shares, weekday distribution, quiet days.
//! 3. **Analyze**: [`Analyzer`](analyzer::Analyzer) mines the same records
//!    for word, bigram and emoji frequency, sentiment and activity trends.
//!
//! Every result row derives `Serialize`, so it can be written with the
//! [`report`] writers.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatstat::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let text = "\
//! 12/1/23, 10:00 AM - Alice: Hello there
//! 12/1/23, 10:01 AM - Bob: <Media omitted>
//! 12/1/23, 10:02 AM - Alice: This message was deleted";
//!
//!     let records = WhatsAppParser::new().parse_str(text)?;
//!     assert_eq!(records.len(), 3);
//!
//!     let mut store = ChatStore::in_memory()?;
//!     store.load(&records)?;
//!     let ratio = store.media_text_ratio()?;
//!     assert!(ratio.iter().all(|share| share.percentage == 33.33));
//!
//!     let analyzer = Analyzer::new(&records);
//!     let stats = analyzer.user_statistics("Alice").unwrap();
//!     assert_eq!(stats.deleted, 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - the [`Parser`](parser::Parser) trait
//! - [`parsers`] - [`WhatsAppParser`](parsers::WhatsAppParser)
//! - [`parsing`] - header recognition, date-order detection, classification
//! - [`message`] - [`Record`] and [`MessageKind`]
//! - [`store`] - [`ChatStore`](store::ChatStore) and its result rows
//! - [`analyzer`] - text mining, sentiment and activity series
//! - [`filter`] - [`FilterConfig`](filter::FilterConfig), [`apply_filters`](filter::apply_filters)
//! - [`report`] - CSV and JSON writers
//! - [`config`] - parser, analyzer and store configuration
//! - [`error`] - [`ChatstatError`] and per-component kinds
//! - [`prelude`] - convenient re-exports
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `csv-output` | CSV report writer | yes |
//! | `json-output` | JSON report writer | yes |
//! | `cli` | `chatstat` binary, clap args, logging setup | yes |
//! | `gen-test` | `gen_test` synthetic transcript generator | no |

pub mod analyzer;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
#[cfg(feature = "cli")]
pub mod logging;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod report;
pub mod store;

pub use error::{ChatstatError, Result};
pub use message::{MessageKind, Record};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstat::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{MessageKind, Record};

    pub use crate::error::{AnalysisError, ChatstatError, ParseError, Result, StoreError};

    pub use crate::parser::Parser;
    pub use crate::parsers::WhatsAppParser;

    pub use crate::config::{AnalyzerConfig, AppConfig, DateOrder, ParserConfig, StoreConfig};

    pub use crate::store::ChatStore;

    pub use crate::analyzer::{Analyzer, FrequencyTable, Sentiment, UserStatistics};

    pub use crate::filter::{FilterConfig, apply_filters};

    #[cfg(feature = "csv-output")]
    pub use crate::report::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::report::{to_json, write_json};
}
