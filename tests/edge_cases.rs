//! Edge case tests for chatstat
//!
//! These tests cover awkward exports and boundary conditions that the
//! per-module unit tests do not reach.

use chatstat::analyzer::Analyzer;
use chatstat::config::{DateOrder, ParserConfig};
use chatstat::error::{AnalysisError, ParseError, StoreError};
use chatstat::parser::Parser;
use chatstat::parsers::WhatsAppParser;
use chatstat::parsing::whatsapp::resolve_two_digit_year;
use chatstat::store::ChatStore;
use chatstat::{ChatstatError, MessageKind, Record};
use chrono::{Datelike, TimeZone, Timelike, Utc};

fn parse(content: &str) -> Vec<Record> {
    WhatsAppParser::new().parse_str(content).unwrap()
}

fn loaded(records: &[Record]) -> ChatStore {
    let mut store = ChatStore::in_memory().unwrap();
    store.load(records).unwrap();
    store
}

// =========================================================================
// Encoding and line endings
// =========================================================================

#[test]
fn test_leading_bom_is_ignored() {
    let records = parse("\u{feff}12/1/23, 10:00 AM - Alice: Hello");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sender(), Some("Alice"));
    assert_eq!(records[0].body, "Hello");
}

#[test]
fn test_crlf_line_endings() {
    let content = "12/1/23, 10:00 AM - Alice: first\r\nsecond\r\n12/1/23, 10:01 AM - Bob: next\r\n";
    let records = parse(content);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].body, "first\nsecond");
    assert_eq!(records[1].body, "next");
}

#[test]
fn test_bidi_marks_before_ios_header() {
    let content = "\u{200e}[15.01.24, 10:30:45] Alice: hi\n[15.01.24, 10:31:00] \u{200e}Bob: \u{200e}image omitted";
    let records = parse(content);
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].sender(), Some("Bob"));
    assert_eq!(records[1].kind, MessageKind::Media);
}

#[test]
fn test_invalid_utf8_reports_offset() {
    let mut bytes = b"12/1/23, 10:00 AM - Alice: ok".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    let err = WhatsAppParser::new().parse_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err.parse_kind(),
        Some(ParseError::MalformedEncoding { .. })
    ));
}

// =========================================================================
// Senders and bodies
// =========================================================================

#[test]
fn test_unicode_senders() {
    let content = "12/1/23, 10:00 - Иван Петров: Привет мир!
12/1/23, 10:01 - 田中太郎: こんにちは
12/1/23, 10:02 - 🔥FireUser🔥: 🎉
12/1/23, 10:03 - +1 555 0100: call me";
    let records = parse(content);
    let senders: Vec<_> = records.iter().filter_map(|r| r.sender()).collect();
    assert_eq!(
        senders,
        vec!["Иван Петров", "田中太郎", "🔥FireUser🔥", "+1 555 0100"]
    );
}

#[test]
fn test_body_containing_colons() {
    let records = parse("12/1/23, 10:00 - Alice: meet at 8:30: bring snacks");
    assert_eq!(records[0].sender(), Some("Alice"));
    assert_eq!(records[0].body, "meet at 8:30: bring snacks");
}

#[test]
fn test_notifications_with_colons_do_not_count_as_senders() {
    let content = "12/1/23, 10:00 AM - Alice: hi
12/1/23, 10:01 AM - Alice changed the subject from \"a\" to \"Trip: Rome\"
12/1/23, 10:02 AM - Alice changed the group name: Rome 2024
12/1/23, 10:03 AM - Bob: ok";
    let records = parse(content);
    assert_eq!(records[1].kind, MessageKind::System);
    assert_eq!(records[2].kind, MessageKind::System);

    let store = loaded(&records);
    assert_eq!(
        store.senders().unwrap(),
        vec!["Alice".to_string(), "Bob".to_string()]
    );
    assert_eq!(store.user_contribution().unwrap().len(), 2);
}

#[test]
fn test_custom_system_phrase() {
    let parser = WhatsAppParser::with_config(
        ParserConfig::new().with_system_phrase("hat den Betreff geändert"),
    );
    let records = parser
        .parse_str("01.12.23, 10:00 - Anna hat den Betreff geändert zu \"Urlaub: Rom\"")
        .unwrap();
    assert_eq!(records[0].kind, MessageKind::System);
    assert!(records[0].sender().is_none());
}

#[test]
fn test_sender_with_empty_body() {
    let records = parse("12/1/23, 10:00 - Alice:\n12/1/23, 10:01 - Bob: hi");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sender(), Some("Alice"));
    assert_eq!(records[0].body, "");
    assert_eq!(records[0].kind, MessageKind::Text);
}

#[test]
fn test_huge_message() {
    let body = "x".repeat(100_000);
    let content = format!("12/1/23, 10:00 - Alice: {body}\n12/1/23, 10:01 - Bob: short");
    let records = parse(&content);
    assert_eq!(records[0].length(), 100_000);

    let store = loaded(&records);
    let longest = store.longest_message().unwrap().unwrap();
    assert_eq!(longest.sender(), Some("Alice"));
    assert_eq!(longest.length(), 100_000);
}

#[test]
fn test_length_counts_characters_not_bytes() {
    let records = parse("12/1/23, 10:00 - Alice: Привет 👋");
    assert_eq!(records[0].length(), 8);
}

#[test]
fn test_placeholder_with_trailing_whitespace() {
    let records = parse("12/1/23, 10:00 - Bob: <Media omitted>   ");
    assert_eq!(records[0].kind, MessageKind::Media);
}

// =========================================================================
// Timestamps
// =========================================================================

#[test]
fn test_24_hour_clock_with_dotted_date() {
    let records = parse("26.10.2025, 20:40 - Alice: evening");
    let ts = records[0].timestamp;
    assert_eq!((ts.year(), ts.month(), ts.day()), (2025, 10, 26));
    assert_eq!((ts.hour(), ts.minute()), (20, 40));
}

#[test]
fn test_midnight_and_noon_in_12_hour_clock() {
    let records = parse("12/1/23, 12:05 AM - Alice: late\n12/1/23, 12:05 PM - Alice: lunch");
    assert_eq!(records[0].timestamp.hour(), 0);
    assert_eq!(records[1].timestamp.hour(), 12);
}

#[test]
fn test_iso_dates() {
    let records = parse("2024-01-15, 10:30 - Alice: iso");
    let ts = records[0].timestamp;
    assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 1, 15));
}

#[test]
fn test_two_digit_years() {
    let records = parse("1/15/99, 10:00 AM - Alice: party\n1/15/24, 10:00 AM - Alice: again");
    assert_eq!(records[0].timestamp.year(), 1999);
    assert_eq!(records[1].timestamp.year(), 2024);

    assert_eq!(resolve_two_digit_year(50, 2000), 2050);
    assert_eq!(resolve_two_digit_year(51, 2000), 1951);
    assert_eq!(resolve_two_digit_year(5, 2090), 2105);
}

#[test]
fn test_reference_year_shifts_century() {
    let parser = WhatsAppParser::with_config(ParserConfig::new().with_reference_year(1950));
    let records = parser.parse_str("1/15/24, 10:00 AM - Alice: old").unwrap();
    assert_eq!(records[0].timestamp.year(), 1924);
}

#[test]
fn test_single_unambiguous_date_decides_whole_file() {
    let content = "03/04/24, 10:00 - Alice: ambiguous\n13/04/24, 11:00 - Bob: day first";
    let records = parse(content);
    // 03/04 is read with the same order as 13/04
    assert_eq!(records[0].timestamp.month(), 4);
    assert_eq!(records[0].timestamp.day(), 3);
    assert_eq!(records[1].timestamp.day(), 13);
}

#[test]
fn test_ambiguous_us_file_reads_month_first() {
    let records = parse("3/4/24, 10:00 AM - Alice: hi\n3/5/24, 10:00 AM - Bob: hey");
    assert_eq!(records[0].timestamp.month(), 3);
    assert_eq!(records[0].timestamp.day(), 4);
}

#[test]
fn test_forced_date_order_overrides_vote() {
    let parser = WhatsAppParser::with_config(
        ParserConfig::new().with_date_order(DateOrder::DayFirst),
    );
    let records = parser.parse_str("3/4/24, 10:00 AM - Alice: hi").unwrap();
    assert_eq!(records[0].timestamp.month(), 4);
    assert_eq!(records[0].timestamp.day(), 3);
}

#[test]
fn test_impossible_date_becomes_continuation() {
    let content = "1/15/24, 10:00 AM - Alice: hi\n2/30/24, 10:05 AM - Nobody: impossible\n1/16/24, 9:00 AM - Bob: next";
    let records = parse(content);
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].body,
        "hi\n2/30/24, 10:05 AM - Nobody: impossible"
    );
    assert_eq!(records[1].sender(), Some("Bob"));
}

#[test]
fn test_out_of_range_clock_becomes_continuation() {
    let content = "1/15/24, 10:00 AM - Alice: hi\n1/15/24, 13:00 PM - Alice: bad clock";
    let records = parse(content);
    assert_eq!(records.len(), 1);
    assert!(records[0].body.ends_with("bad clock"));
}

// =========================================================================
// Whole-file failures
// =========================================================================

#[test]
fn test_empty_and_blank_input() {
    for content in ["", "   \n\t\n", "\u{feff}"] {
        let err = WhatsAppParser::new().parse_str(content).unwrap_err();
        assert_eq!(err.parse_kind(), Some(&ParseError::EmptyInput));
    }
}

#[test]
fn test_no_headers_at_all() {
    let err = WhatsAppParser::new()
        .parse_str("just some notes\nwithout any timestamps")
        .unwrap_err();
    assert_eq!(err.parse_kind(), Some(&ParseError::NoMessagesFound));
}

#[test]
fn test_only_invalid_headers() {
    let err = WhatsAppParser::new()
        .parse_str("31/31/24, 10:00 - Nobody: impossible")
        .unwrap_err();
    assert_eq!(err.parse_kind(), Some(&ParseError::NoMessagesFound));
}

// =========================================================================
// Store boundaries
// =========================================================================

#[test]
fn test_queries_before_load() {
    let store = ChatStore::in_memory().unwrap();
    assert!(!store.is_loaded());

    let err = store.user_contribution().unwrap_err();
    assert!(err.is_store());
    assert!(matches!(err, ChatstatError::Store(StoreError::NotLoaded)));
    assert!(matches!(
        store.peak_hour(),
        Err(ChatstatError::Store(StoreError::NotLoaded))
    ));
    assert!(matches!(
        store.inactive_periods_with_gaps(5),
        Err(ChatstatError::Store(StoreError::NotLoaded))
    ));
}

#[test]
fn test_second_load_rejected_and_first_kept() {
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let first = vec![Record::new(ts, Some("Alice".into()), "hi", MessageKind::Text)];
    let mut store = loaded(&first);

    let err = store.load(&[]).unwrap_err();
    assert!(matches!(err, ChatstatError::Store(StoreError::AlreadyLoaded)));
    assert_eq!(store.total_records().unwrap(), 1);
}

#[test]
fn test_empty_load_answers_every_query() {
    let store = loaded(&[]);

    assert!(store.most_active_user().unwrap().is_none());
    assert_eq!(store.messages_per_day().unwrap(), 0.0);
    assert!(store.peak_hour().unwrap().is_none());
    assert!(store.user_contribution().unwrap().is_empty());
    assert!(store.media_text_ratio().unwrap().is_empty());
    assert!(store.weekday_distribution().unwrap().is_empty());
    assert!(store.longest_message().unwrap().is_none());
    assert!(store.monthly_growth().unwrap().is_empty());
    assert!(store.inactive_periods(5).unwrap().is_empty());
    assert!(store.inactive_periods_with_gaps(5).unwrap().is_empty());
    assert!(store.hourly_activity_by_user().unwrap().is_empty());
    assert!(store.date_range().unwrap().is_none());
    assert_eq!(store.total_records().unwrap(), 0);
}

#[test]
fn test_system_only_chat() {
    let records = parse("12/1/23, 10:00 - Alice created group \"Trip\"\n12/1/23, 10:01 - Bob joined");
    let store = loaded(&records);

    assert!(store.most_active_user().unwrap().is_none());
    assert!(store.user_contribution().unwrap().is_empty());
    assert_eq!(store.kind_count(MessageKind::System).unwrap(), 2);
    assert!(store.date_range().unwrap().is_some());
}

#[test]
fn test_zero_limit_quiet_days() {
    let records = parse("12/1/23, 10:00 - Alice: hi\n12/5/23, 10:00 - Bob: hey");
    let store = loaded(&records);
    assert!(store.inactive_periods(0).unwrap().is_empty());
    assert!(store.inactive_periods_with_gaps(0).unwrap().is_empty());
}

// =========================================================================
// Analyzer boundaries
// =========================================================================

#[test]
fn test_analyzer_on_empty_records() {
    let records: Vec<Record> = Vec::new();
    let analyzer = Analyzer::new(&records);
    assert!(analyzer.word_frequency(10).is_empty());
    assert!(analyzer.bigrams(10).is_empty());
    assert!(analyzer.emoji_frequency(10).is_empty());
    assert_eq!(analyzer.perform_sentiment_analysis().total(), 0);
    assert_eq!(analyzer.sentiment_share(), Err(AnalysisError::EmptyInput));
    assert!(analyzer.daily_counts().is_empty());
    assert!(analyzer.user_statistics("Alice").is_none());
}

#[test]
fn test_rolling_window_of_zero() {
    let records = parse("12/1/23, 10:00 - Alice: hi");
    let analyzer = Analyzer::new(&records);
    assert_eq!(analyzer.rolling_average(0), Err(AnalysisError::InvalidWindow));
}

#[test]
fn test_rolling_window_longer_than_chat() {
    let records = parse("12/1/23, 10:00 AM - Alice: hi\n12/1/23, 11:00 AM - Bob: hey\n12/3/23, 10:00 AM - Alice: back");
    let points = Analyzer::new(&records).rolling_average(30).unwrap();
    let averages: Vec<f64> = points.iter().map(|p| p.average).collect();
    assert_eq!(averages, vec![2.0, 1.0, 1.0]);
}

#[test]
fn test_bigrams_do_not_cross_records() {
    let records = parse("12/1/23, 10:00 - Alice: pizza\n12/1/23, 10:01 - Bob: party");
    assert!(Analyzer::new(&records).bigrams(10).is_empty());
}

#[test]
fn test_media_and_deleted_bodies_carry_no_words() {
    let records = parse("12/1/23, 10:00 - Bob: <Media omitted>\n12/1/23, 10:01 - Alice: This message was deleted");
    let analyzer = Analyzer::new(&records);
    assert!(analyzer.word_frequency(10).is_empty());
    assert_eq!(analyzer.perform_sentiment_analysis().total(), 0);
}
