//! Header recognition, timestamp normalization and classification for
//! WhatsApp-style transcripts.
//!
//! Exports vary by platform and locale along three independent axes:
//!
//! - **Header style**: `12/1/23, 10:00 AM - Alice: Hi` (Android, dashed) or
//!   `[12/1/23, 10:00:15 AM] Alice: Hi` (iOS, bracketed)
//! - **Date order**: day-first, month-first or year-first, with `/`, `.` or `-`
//! - **Clock**: 12-hour with an AM/PM marker, or 24-hour, seconds optional
//!
//! Style and date order are decided once per file; see [`detect_header_style`]
//! and [`detect_date_order`].

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::{Captures, Regex};

use crate::config::{DateOrder, ParserConfig};
use crate::message::MessageKind;

/// Header layout of a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderStyle {
    /// `date, time - sender: text`
    Dashed,
    /// `[date, time] sender: text`
    Bracketed,
}

impl HeaderStyle {
    /// Returns the regex pattern for this header style.
    pub fn pattern(self) -> &'static str {
        match self {
            // 12/1/23, 10:00 AM - Alice: Hello
            HeaderStyle::Dashed => {
                r"^(?P<date>\d{1,4}[./-]\d{1,2}[./-]\d{1,4}),?\s(?P<time>\d{1,2}[:.]\d{2}(?:[:.]\d{2})?)(?:\s?(?P<meridiem>[AaPp]\.?\s?[Mm]\.?))?\s[-–]\s(?P<rest>.*)$"
            }
            // [12/1/23, 10:00:15 AM] Alice: Hello
            HeaderStyle::Bracketed => {
                r"^\[(?P<date>\d{1,4}[./-]\d{1,2}[./-]\d{1,4}),?\s(?P<time>\d{1,2}[:.]\d{2}(?:[:.]\d{2})?)(?:\s?(?P<meridiem>[AaPp]\.?\s?[Mm]\.?))?\]\s?(?P<rest>.*)$"
            }
        }
    }

    /// Returns all header styles, in tie-break order.
    pub fn all() -> &'static [HeaderStyle] {
        &[HeaderStyle::Dashed, HeaderStyle::Bracketed]
    }

    fn regex(self) -> &'static Regex {
        static DASHED: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(HeaderStyle::Dashed.pattern()).expect("dashed header pattern is valid")
        });
        static BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(HeaderStyle::Bracketed.pattern()).expect("bracketed header pattern is valid")
        });
        match self {
            HeaderStyle::Dashed => &DASHED,
            HeaderStyle::Bracketed => &BRACKETED,
        }
    }

    /// Matches a line against this style's header shape.
    ///
    /// A match only means the line *looks* like a header; the timestamp may
    /// still fail calendar validation in [`HeaderLine::timestamp`].
    pub fn match_line(self, line: &str) -> Option<HeaderLine<'_>> {
        self.regex().captures(line).map(HeaderLine::from_captures)
    }
}

/// The raw fields of a header-shaped line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLine<'a> {
    /// Date token, e.g. `12/1/23`
    pub date: &'a str,
    /// Clock token, e.g. `10:00`
    pub time: &'a str,
    /// AM/PM marker, if present
    pub meridiem: Option<&'a str>,
    /// Everything after the header separator
    pub rest: &'a str,
}

impl<'a> HeaderLine<'a> {
    fn from_captures(caps: Captures<'a>) -> Self {
        let field = |name| caps.name(name).map_or("", |m| m.as_str());
        Self {
            date: field("date"),
            time: field("time"),
            meridiem: caps.name("meridiem").map(|m| m.as_str()),
            rest: field("rest"),
        }
    }

    /// Splits the remainder into `(sender, body)`.
    ///
    /// The sender is the text before the first `": "` (or a trailing `:`).
    /// Lines without one are notifications and yield `None`, and so are lines
    /// whose would-be sender reads as a notification, such as a new group
    /// subject that itself contains `": "`.
    pub fn sender_and_body(&self, config: &ParserConfig) -> (Option<&'a str>, &'a str) {
        let (sender, body) = match self.rest.find(": ") {
            Some(idx) => (&self.rest[..idx], &self.rest[idx + 2..]),
            None => match self.rest.strip_suffix(':') {
                Some(sender) => (sender, ""),
                None => return (None, self.rest),
            },
        };
        let sender = strip_marks(sender.trim());
        if sender.is_empty() || config.is_system_notice(sender) {
            (None, self.rest)
        } else {
            (Some(sender), body)
        }
    }

    /// Normalizes the timestamp, or `None` if it is not a real date and time.
    pub fn timestamp(&self, day_first: bool, reference_year: i32) -> Option<DateTime<Utc>> {
        let date = parse_date(self.date, day_first, reference_year)?;
        let time = parse_clock(self.time, self.meridiem)?;
        Some(NaiveDateTime::new(date, time).and_utc())
    }
}

/// Removes a byte-order mark and bidi marks from the start of a line.
pub fn strip_marks(line: &str) -> &str {
    line.trim_start_matches(['\u{feff}', '\u{200e}', '\u{200f}'])
}

/// Auto-detect the header style by scoring every line.
///
/// Returns `None` if no line matches any style. Ties go to the style listed
/// first in [`HeaderStyle::all`].
pub fn detect_header_style(lines: &[&str]) -> Option<HeaderStyle> {
    let mut scores = vec![0usize; HeaderStyle::all().len()];

    for line in lines {
        let line = strip_marks(line);
        for (i, style) in HeaderStyle::all().iter().enumerate() {
            if style.regex().is_match(line) {
                scores[i] += 1;
            }
        }
    }

    let max_score = *scores.iter().max()?;
    if max_score == 0 {
        return None;
    }

    let winner_idx = scores.iter().position(|&s| s == max_score)?;
    Some(HeaderStyle::all()[winner_idx])
}

/// Numeric components of a date token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateParts {
    first: u32,
    second: u32,
    third: u32,
    first_width: usize,
    third_width: usize,
}

impl DateParts {
    fn split(date: &str) -> Option<Self> {
        let mut pieces = date.split(['/', '.', '-']);
        let a = pieces.next()?;
        let b = pieces.next()?;
        let c = pieces.next()?;
        if pieces.next().is_some() {
            return None;
        }
        Some(Self {
            first: a.parse().ok()?,
            second: b.parse().ok()?,
            third: c.parse().ok()?,
            first_width: a.len(),
            third_width: c.len(),
        })
    }

    fn is_year_first(&self) -> bool {
        self.first_width == 4
    }
}

/// Resolves a two-digit year to the century that puts it nearest `reference_year`.
///
/// Exactly-halfway years resolve forward, so with a reference of 2000 the
/// range `00..=50` lands in the 2000s and `51..=99` in the 1900s.
pub fn resolve_two_digit_year(yy: u32, reference_year: i32) -> i32 {
    let yy = yy as i32 % 100;
    let century = reference_year.div_euclid(100) * 100;
    [century - 100 + yy, century + yy, century + 100 + yy]
        .into_iter()
        .min_by_key(|&y| ((y - reference_year).abs(), -y))
        .unwrap_or(century + yy)
}

fn parse_date(date: &str, day_first: bool, reference_year: i32) -> Option<NaiveDate> {
    let parts = DateParts::split(date)?;

    let (year, month, day) = if parts.is_year_first() {
        (parts.first as i32, parts.second, parts.third)
    } else {
        let year = if parts.third_width <= 2 {
            resolve_two_digit_year(parts.third, reference_year)
        } else {
            parts.third as i32
        };
        if day_first {
            (year, parts.second, parts.first)
        } else {
            (year, parts.first, parts.second)
        }
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_clock(time: &str, meridiem: Option<&str>) -> Option<NaiveTime> {
    let mut pieces = time.split([':', '.']);
    let mut hour: u32 = pieces.next()?.parse().ok()?;
    let minute: u32 = pieces.next()?.parse().ok()?;
    let second: u32 = match pieces.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };

    if let Some(marker) = meridiem {
        if !(1..=12).contains(&hour) {
            return None;
        }
        let is_pm = marker.starts_with(['p', 'P']);
        hour = match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
    }

    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Decide day-first vs month-first once for a whole file.
///
/// Every date whose first component exceeds 12 votes day-first; every date
/// whose second component exceeds 12 votes month-first. Year-first dates
/// abstain. Without a majority the file's clock convention decides: AM/PM
/// markers with `/` separators read month-first (US exports), anything else
/// reads day-first.
///
/// Never returns [`DateOrder::Auto`].
pub fn detect_date_order(headers: &[HeaderLine<'_>]) -> DateOrder {
    let mut day_first = 0usize;
    let mut month_first = 0usize;
    let mut us_style = 0usize;

    for header in headers {
        if header.meridiem.is_some() && header.date.contains('/') {
            us_style += 1;
        }
        let Some(parts) = DateParts::split(header.date) else {
            continue;
        };
        if parts.is_year_first() {
            continue;
        }
        if parts.first > 12 {
            day_first += 1;
        } else if parts.second > 12 {
            month_first += 1;
        }
    }

    if day_first > month_first {
        DateOrder::DayFirst
    } else if month_first > day_first {
        DateOrder::MonthFirst
    } else if us_style * 2 > headers.len() {
        DateOrder::MonthFirst
    } else {
        DateOrder::DayFirst
    }
}

/// Classify a finished record.
///
/// A missing sender always means [`MessageKind::System`]; otherwise the
/// trimmed body is compared exactly against the configured placeholders.
pub fn classify(sender: Option<&str>, body: &str, config: &ParserConfig) -> MessageKind {
    if sender.is_none() {
        return MessageKind::System;
    }

    let normalized = body.trim_matches(|c: char| c.is_whitespace() || c == '\u{200e}' || c == '\u{200f}');

    if config.is_deleted_placeholder(normalized) {
        MessageKind::Deleted
    } else if config.is_media_placeholder(normalized) {
        MessageKind::Media
    } else {
        MessageKind::Text
    }
}
