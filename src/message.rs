//! The message record produced by the parser.
//!
//! This module provides [`Record`], one classified, timestamped message unit,
//! and [`MessageKind`], the closed set of message types every downstream
//! consumer matches on.
//!
//! # Overview
//!
//! A record consists of:
//! - **`timestamp`**: when the message was sent, normalized to UTC wall time
//! - **`sender`**: the author, or `None` for system notifications
//! - **`body`**: raw text, possibly spanning several lines
//! - **`kind`**: [`MessageKind`], decided once at parse time
//!
//! Records are never mutated after the parser hands them out.
//!
//! # Examples
//!
//! ```
//! use chatstat::{MessageKind, Record};
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2023, 12, 1, 10, 0, 0).unwrap();
//! let msg = Record::new(ts, Some("Alice".into()), "Hello there", MessageKind::Text);
//!
//! assert_eq!(msg.sender(), Some("Alice"));
//! assert_eq!(msg.length(), 11);
//! assert!(msg.is_authored());
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The type of a message, decided from its header and body.
///
/// The variants are mutually exclusive. A record without a sender is always
/// [`System`](MessageKind::System).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// An authored text message.
    Text,
    /// A "media omitted" placeholder (image, video, sticker, ...).
    Media,
    /// A "message deleted" placeholder.
    Deleted,
    /// A notification with no author (joins, leaves, encryption notice).
    System,
}

impl MessageKind {
    /// Returns the lowercase name used in the store and in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Media => "media",
            MessageKind::Deleted => "deleted",
            MessageKind::System => "system",
        }
    }

    /// Returns all kinds in declaration order.
    pub fn all() -> &'static [MessageKind] {
        &[
            MessageKind::Text,
            MessageKind::Media,
            MessageKind::Deleted,
            MessageKind::System,
        ]
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(MessageKind::Text),
            "media" => Ok(MessageKind::Media),
            "deleted" => Ok(MessageKind::Deleted),
            "system" => Ok(MessageKind::System),
            _ => Err(format!("Unknown message kind: '{s}'")),
        }
    }
}

/// One classified, timestamped message from a transcript.
///
/// Records are plain values. `kind` is decided once by the parser from the
/// body and sender, and nothing downstream re-derives it, so code that edits
/// `body` or `sender` after parsing must set a matching `kind` itself. The
/// store and analyzer never mutate the records they are given.
///
/// # Serialization
///
/// `sender` is omitted from JSON when `None`, and `kind` serializes as its
/// lowercase name:
///
/// ```
/// use chatstat::{MessageKind, Record};
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
/// let msg = Record::new(ts, None, "Alice joined", MessageKind::System);
/// let json = serde_json::to_string(&msg)?;
///
/// assert!(!json.contains("sender"));
/// assert!(json.contains("\"system\""));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// When the message was sent (export wall time, stored as UTC).
    pub timestamp: DateTime<Utc>,

    /// Display name or phone number of the author; `None` for system lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sender: Option<String>,

    /// Message text. Continuation lines are joined with `\n`.
    pub body: String,

    /// Message type.
    pub kind: MessageKind,
}

impl Record {
    /// Creates a record from its parts.
    pub fn new(
        timestamp: DateTime<Utc>,
        sender: Option<String>,
        body: impl Into<String>,
        kind: MessageKind,
    ) -> Self {
        Self {
            timestamp,
            sender,
            body: body.into(),
            kind,
        }
    }

    /// Returns the sender name, if any.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the message timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the message kind.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Character count of the body, in Unicode scalar values.
    pub fn length(&self) -> usize {
        self.body.chars().count()
    }

    /// Returns `true` for records that have an author (everything but system lines).
    pub fn is_authored(&self) -> bool {
        self.kind != MessageKind::System
    }

    /// Returns `true` if the record was sent by `sender`.
    pub fn is_from(&self, sender: &str) -> bool {
        self.sender.as_deref() == Some(sender)
    }
}
