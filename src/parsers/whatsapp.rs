//! `WhatsApp` TXT transcript parser.
//!
//! Exports vary by platform and locale. This parser detects the header style
//! (dashed or bracketed) and the date order once per file, then makes a single
//! left-to-right pass over the lines.
//!
//! Supported header shapes:
//! - Android: `12/1/23, 10:00 AM - Alice: Message`
//! - Android (24h): `26.10.2025, 20:40 - Alice: Message`
//! - iOS: `[1/15/24, 10:30:45 AM] Alice: Message`
//! - iOS (EU): `[15.01.24, 10:30:45] Alice: Message`
//! - ISO dates: `2024-01-15, 10:30 - Alice: Message`

use tracing::{debug, info};

use chrono::{DateTime, Utc};

use crate::Record;
use crate::config::{DateOrder, ParserConfig};
use crate::error::{ChatstatError, ParseError};
use crate::parser::Parser;
use crate::parsing::whatsapp::{
    classify, detect_date_order, detect_header_style, strip_marks,
};

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust
/// use chatstat::parsers::WhatsAppParser;
/// use chatstat::parser::Parser;
/// use chatstat::MessageKind;
///
/// let parser = WhatsAppParser::new();
/// let records = parser.parse_str(
///     "12/1/23, 10:00 AM - Alice: Hello there\n12/1/23, 10:01 AM - Bob: <Media omitted>",
/// )?;
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].kind, MessageKind::Media);
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub struct WhatsAppParser {
    config: ParserConfig,
}

impl WhatsAppParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

impl Default for WhatsAppParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A record whose body may still grow by continuation lines.
struct PendingRecord {
    timestamp: DateTime<Utc>,
    sender: Option<String>,
    body: String,
}

impl PendingRecord {
    fn finish(self, config: &ParserConfig) -> Record {
        let kind = classify(self.sender.as_deref(), &self.body, config);
        Record::new(self.timestamp, self.sender, self.body, kind)
    }
}

impl WhatsAppParser {
    /// Parses content from a string (internal implementation).
    fn parse_content(&self, content: &str) -> Result<Vec<Record>, ChatstatError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        if content.trim().is_empty() {
            return Err(ParseError::EmptyInput.into());
        }

        let lines: Vec<&str> = content.lines().collect();

        // Step 1: Detect header style over the whole file
        let style = detect_header_style(&lines).ok_or(ParseError::NoMessagesFound)?;

        // Step 2: Resolve date order once, before any timestamp is built
        let order = match self.config.date_order {
            DateOrder::Auto => {
                let headers: Vec<_> = lines
                    .iter()
                    .filter_map(|line| style.match_line(strip_marks(line)))
                    .collect();
                detect_date_order(&headers)
            }
            fixed => fixed,
        };
        let day_first = order == DateOrder::DayFirst;
        debug!(?style, ?order, lines = lines.len(), "detected transcript layout");

        // Step 3: Single pass; headers open records, everything else continues them
        let mut records: Vec<Record> = Vec::new();
        let mut pending: Option<PendingRecord> = None;
        let mut demoted = 0usize;

        for (line_no, line) in lines.iter().enumerate() {
            let header = style.match_line(strip_marks(line));
            let opened = header.and_then(|h| {
                h.timestamp(day_first, self.config.reference_year)
                    .map(|ts| (h, ts))
            });

            match opened {
                Some((h, timestamp)) => {
                    if let Some(done) = pending.take() {
                        records.push(done.finish(&self.config));
                    }
                    let (sender, body) = h.sender_and_body(&self.config);
                    pending = Some(PendingRecord {
                        timestamp,
                        sender: sender.map(str::to_string),
                        body: body.to_string(),
                    });
                }
                None => {
                    if header.is_some() {
                        demoted += 1;
                        debug!(line = line_no + 1, "header with invalid timestamp kept as text");
                    }
                    // Lines before the first header are export preamble
                    if let Some(current) = pending.as_mut() {
                        current.body.push('\n');
                        current.body.push_str(line);
                    }
                }
            }
        }

        if let Some(done) = pending.take() {
            records.push(done.finish(&self.config));
        }

        if records.is_empty() {
            return Err(ParseError::NoMessagesFound.into());
        }

        info!(
            records = records.len(),
            demoted,
            date_order = %order,
            "parsed transcript"
        );
        Ok(records)
    }
}

impl Parser for WhatsAppParser {
    fn name(&self) -> &'static str {
        "WhatsApp"
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Record>, ChatstatError> {
        self.parse_content(content)
    }
}
