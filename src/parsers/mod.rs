//! Transcript parsers.
//!
//! Each parser implements the [`Parser`](crate::parser::Parser) trait.
//!
//! # Available Parsers
//!
//! - [`WhatsAppParser`] - Parses WhatsApp TXT exports (Android and iOS layouts)
//!
//! # Example
//!
//! ```rust
//! use chatstat::parser::Parser;
//! use chatstat::parsers::WhatsAppParser;
//!
//! let parser = WhatsAppParser::default();
//! assert_eq!(parser.name(), "WhatsApp");
//! ```

mod whatsapp;

pub use whatsapp::WhatsAppParser;
