//! Parser trait for chat transcripts.
//!
//! This module provides the single entry point for turning a transcript into
//! records. Implementors only provide [`Parser::parse_str`]; reading files and
//! validating their encoding is shared.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatstat::Result<()> {
//! use chatstat::parser::Parser;
//! use chatstat::parsers::WhatsAppParser;
//! use std::path::Path;
//!
//! let parser = WhatsAppParser::new();
//!
//! // From a file
//! let records = parser.parse(Path::new("WhatsApp Chat with Alice.txt"))?;
//!
//! // Or from memory
//! let records = parser.parse_str("12/1/23, 10:00 AM - Alice: Hello")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use crate::Record;
use crate::error::{ChatstatError, ParseError};

/// Trait for transcript parsers.
///
/// # Implementation Notes
///
/// Parsers must implement:
/// - [`name`](Parser::name) - Parser identifier
/// - [`parse_str`](Parser::parse_str) - Parse text already in memory
///
/// [`parse_bytes`](Parser::parse_bytes) and [`parse`](Parser::parse) are
/// provided and map invalid UTF-8 to [`ParseError::MalformedEncoding`].
pub trait Parser {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Parses transcript text into an ordered sequence of records.
    ///
    /// # Errors
    ///
    /// - [`ParseError::EmptyInput`] if the text is empty or whitespace-only
    /// - [`ParseError::NoMessagesFound`] if no line is a valid header
    fn parse_str(&self, content: &str) -> Result<Vec<Record>, ChatstatError>;

    /// Parses raw bytes, validating UTF-8 first.
    fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<Record>, ChatstatError> {
        let content = std::str::from_utf8(bytes).map_err(|e| ParseError::MalformedEncoding {
            valid_up_to: e.valid_up_to(),
        })?;
        self.parse_str(content)
    }

    /// Parses a transcript file.
    ///
    /// Parse errors carry the file path.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::Io`] if the file cannot be read, and
    /// [`ChatstatError::Parse`] if its content cannot be parsed.
    fn parse(&self, path: &Path) -> Result<Vec<Record>, ChatstatError> {
        let bytes = std::fs::read(path)?;
        self.parse_bytes(&bytes).map_err(|err| match err {
            ChatstatError::Parse { source, path: None } => ChatstatError::parse_at(source, path),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::WhatsAppParser;
    use std::io::Write;

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let parser = WhatsAppParser::new();
        let mut bytes = b"12/1/23, 10:00 AM - Alice: caf".to_vec();
        bytes.push(0xe9);
        let err = parser.parse_bytes(&bytes).unwrap_err();
        assert_eq!(
            err.parse_kind(),
            Some(&ParseError::MalformedEncoding { valid_up_to: 30 })
        );
    }

    #[test]
    fn test_parse_file_attaches_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "nothing that looks like a chat").unwrap();

        let parser = WhatsAppParser::new();
        let err = parser.parse(file.path()).unwrap_err();
        assert_eq!(err.parse_kind(), Some(&ParseError::NoMessagesFound));
        assert!(err.to_string().contains("file:"));
    }

    #[test]
    fn test_parse_missing_file_is_io() {
        let parser = WhatsAppParser::new();
        let err = parser.parse(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.is_io());
    }
}
