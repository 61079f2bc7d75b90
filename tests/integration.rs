//! Integration tests: parse real files, load them into the store, analyze
//! and export.

use chatstat::prelude::*;
use chatstat::store::{Contribution, DateCount};
use chrono::{Datelike, NaiveDate, Timelike};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

// ============================================================================
// Fixtures
// ============================================================================

const SCENARIO: &str = "12/1/23, 10:00 AM - Alice: Hello there\n\
12/1/23, 10:01 AM - Bob: <Media omitted>\n\
12/1/23, 10:02 AM - Alice: This message was deleted";

const ANDROID_GROUP: &str = "\
1/14/24, 9:58 PM - Messages and calls are end-to-end encrypted. No one outside of this chat, not even WhatsApp, can read or listen to them.
1/14/24, 9:59 PM - Alice created group \"Trip\"
1/15/24, 8:00 AM - Alice: good morning! 😀
1/15/24, 8:01 AM - Bob: morning 😀😀
1/15/24, 8:05 AM - Carol: who is driving tomorrow?
I can take four people
and the dog
1/15/24, 8:06 AM - Bob: <Media omitted>
1/17/24, 11:30 PM - Alice: This message was deleted
1/17/24, 11:31 PM - Alice: I love this plan, it's awesome
1/17/24, 11:32 PM - Carol: terrible traffic though
1/17/24, 11:33 PM - Bob left
";

const IOS_EU: &str = "\u{feff}[15.01.24, 10:30:00] Иван: Привет всем!
[15.01.24, 10:31:00] Мария: image omitted
[16.01.24, 22:05:12] Иван: Как дела?
[16.01.24, 22:06:00] Мария: отлично 👍
";

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn loaded(records: &[Record]) -> ChatStore {
    let mut store = ChatStore::in_memory().unwrap();
    store.load(records).unwrap();
    store
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Scenario
// ============================================================================

#[test]
fn test_scenario_end_to_end() {
    let records = WhatsAppParser::new().parse_str(SCENARIO).unwrap();

    let kinds: Vec<_> = records.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![MessageKind::Text, MessageKind::Media, MessageKind::Deleted]
    );

    let store = loaded(&records);
    let ratio = store.media_text_ratio().unwrap();
    assert_eq!(ratio.len(), 3);
    for share in &ratio {
        assert_eq!(share.count, 1);
        assert_eq!(share.percentage, 33.33);
    }

    let longest = store.longest_message().unwrap().unwrap();
    assert!(records.contains(&longest));
    assert_eq!(longest.body, "Hello there");
}

// ============================================================================
// Android group chat
// ============================================================================

#[test]
fn test_android_group_from_file() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "group.txt", ANDROID_GROUP);

    let records = WhatsAppParser::new().parse(&path).unwrap();
    assert_eq!(records.len(), 10);

    // Two system lines at the start, one at the end
    assert_eq!(records[0].kind, MessageKind::System);
    assert_eq!(records[1].kind, MessageKind::System);
    assert_eq!(records[9].kind, MessageKind::System);
    assert_eq!(records[9].sender(), None);
    assert_eq!(records[9].body, "Bob left");

    let carol = &records[4];
    assert_eq!(carol.sender(), Some("Carol"));
    assert_eq!(
        carol.body,
        "who is driving tomorrow?\nI can take four people\nand the dog"
    );

    let late = &records[6];
    assert_eq!(late.kind, MessageKind::Deleted);
    assert_eq!(late.timestamp.day(), 17);
    assert_eq!(late.timestamp.hour(), 23);
}

#[test]
fn test_android_group_store_queries() {
    let records = WhatsAppParser::new().parse_str(ANDROID_GROUP).unwrap();
    let store = loaded(&records);

    assert_eq!(store.total_records().unwrap(), 10);
    assert_eq!(store.kind_count(MessageKind::System).unwrap(), 3);
    assert_eq!(store.senders().unwrap(), vec!["Alice", "Bob", "Carol"]);

    let top = store.most_active_user().unwrap().unwrap();
    assert_eq!(top.sender, "Alice");
    assert_eq!(top.count, 3);

    let contribution = store.user_contribution().unwrap();
    assert_eq!(
        contribution,
        vec![
            Contribution {
                sender: "Alice".into(),
                messages: 3,
                percentage: 42.86
            },
            Contribution {
                sender: "Bob".into(),
                messages: 2,
                percentage: 28.57
            },
            Contribution {
                sender: "Carol".into(),
                messages: 2,
                percentage: 28.57
            },
        ]
    );
    let total: f64 = contribution.iter().map(|c| c.percentage).sum();
    assert!((total - 100.0).abs() < 0.01);

    // 2024-01-15 is a Monday, 2024-01-17 a Wednesday
    let weekdays = store.weekday_distribution().unwrap();
    assert_eq!(weekdays[0].day, "Monday");
    assert_eq!(weekdays[0].count, 4);
    assert_eq!(weekdays[1].day, "Wednesday");

    let quiet = store.inactive_periods_with_gaps(1).unwrap();
    assert_eq!(
        quiet,
        vec![DateCount {
            date: date(2024, 1, 16),
            count: 0
        }]
    );
    let observed = store.inactive_periods(1).unwrap();
    assert_eq!(observed[0].date, date(2024, 1, 17));

    let range = store.date_range().unwrap().unwrap();
    assert_eq!(range.days(), 4);
}

#[test]
fn test_android_group_analysis() {
    let records = WhatsAppParser::new().parse_str(ANDROID_GROUP).unwrap();
    let analyzer = Analyzer::new(&records);

    assert_eq!(analyzer.emoji_frequency(5).get("😀"), Some(3));
    assert_eq!(analyzer.word_frequency(10).get("morning"), Some(2));
    assert_eq!(analyzer.bigrams(10).get("good morning"), Some(1));

    let counts = analyzer.perform_sentiment_analysis();
    assert_eq!(counts.total(), 5);
    assert_eq!(counts.positive, 2);
    assert_eq!(counts.neutral, 2);
    assert_eq!(counts.negative, 1);

    let alice = analyzer.user_statistics("Alice").unwrap();
    assert_eq!(alice.messages, 3);
    assert_eq!(alice.deleted, 1);

    let density = analyzer.conversation_density();
    assert_eq!(density.len(), 2);
    assert_eq!(density[0].participants, 3);
}

// ============================================================================
// iOS, day-first, unicode
// ============================================================================

#[test]
fn test_ios_day_first_unicode() {
    let records = WhatsAppParser::new().parse_str(IOS_EU).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].sender(), Some("Иван"));
    assert_eq!(records[0].timestamp.date_naive(), date(2024, 1, 15));
    assert_eq!(records[1].kind, MessageKind::Media);
    assert_eq!(records[2].timestamp.second(), 12);

    // 10h and 22h tie; the earlier hour wins
    let store = loaded(&records);
    assert_eq!(store.peak_hour().unwrap().unwrap().hour, 10);

    let analyzer = Analyzer::new(&records);
    assert_eq!(analyzer.word_frequency(10).get("привет"), Some(1));
    assert_eq!(analyzer.emoji_frequency(5).get("👍"), Some(1));
}

#[test]
fn test_custom_placeholders_from_config_file() {
    let dir = tempdir().unwrap();
    let config_path = write_fixture(
        &dir,
        "chatstat.toml",
        r#"
[parser]
date_order = "day-first"
media_placeholders = ["<Medien ausgeschlossen>"]
deleted_placeholders = ["Diese Nachricht wurde gelöscht"]

[analyzer]
extra_stop_words = ["hallo"]
"#,
    );
    let config = AppConfig::load_from(&config_path).unwrap();
    assert_eq!(config.parser.date_order, DateOrder::DayFirst);

    let chat = "03.04.24, 10:00 - Anna: <Medien ausgeschlossen>\n\
03.04.24, 10:01 - Ben: Diese Nachricht wurde gelöscht\n\
03.04.24, 10:02 - Anna: hallo hallo welt";
    let records = WhatsAppParser::with_config(config.parser.clone())
        .parse_str(chat)
        .unwrap();

    assert_eq!(records[0].kind, MessageKind::Media);
    assert_eq!(records[1].kind, MessageKind::Deleted);
    assert_eq!(records[0].timestamp.date_naive(), date(2024, 4, 3));

    let words = Analyzer::with_config(&records, config.analyzer).word_frequency(5);
    assert_eq!(words.iter().collect::<Vec<_>>(), vec![("welt", 1)]);
}

// ============================================================================
// Filtering then analysis
// ============================================================================

#[test]
fn test_filter_then_store() {
    let records = WhatsAppParser::new().parse_str(ANDROID_GROUP).unwrap();

    let filter = FilterConfig::new().with_date_from("2024-01-17").unwrap();
    let late = apply_filters(records.clone(), &filter);
    assert_eq!(late.len(), 4);

    let store = loaded(&late);
    assert_eq!(store.peak_hour().unwrap().unwrap().hour, 23);
    assert_eq!(store.messages_per_day().unwrap(), 3.0);

    let bob = apply_filters(records, &FilterConfig::new().with_sender("BOB"));
    assert_eq!(bob.len(), 2);
    assert!(bob.iter().all(|r| r.sender() == Some("Bob")));
}

// ============================================================================
// Store lifecycle on disk
// ============================================================================

#[test]
fn test_store_file_survives_reopen() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("nested/chat.db");
    let records = WhatsAppParser::new().parse_str(SCENARIO).unwrap();

    let mut store = ChatStore::with_config(&StoreConfig::new().with_database(&db)).unwrap();
    assert_eq!(store.path(), Some(db.as_path()));
    store.load(&records).unwrap();
    store.close().unwrap();
    assert!(db.exists());

    // A new session replaces the old rows instead of appending
    let mut store = ChatStore::open(&db).unwrap();
    store.load(&records[..1]).unwrap();
    assert_eq!(store.total_records().unwrap(), 1);
}

#[test]
fn test_store_lifecycle_errors() {
    let records = WhatsAppParser::new().parse_str(SCENARIO).unwrap();
    let mut store = ChatStore::in_memory().unwrap();

    let err = store.total_records().unwrap_err();
    assert!(matches!(err, ChatstatError::Store(StoreError::NotLoaded)));

    store.load(&records).unwrap();
    let err = store.load(&records).unwrap_err();
    assert!(matches!(err, ChatstatError::Store(StoreError::AlreadyLoaded)));
    assert_eq!(store.total_records().unwrap(), 3);
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn test_write_reports_to_files() {
    let dir = tempdir().unwrap();
    let records = WhatsAppParser::new().parse_str(ANDROID_GROUP).unwrap();
    let store = loaded(&records);

    let csv_path = dir.path().join("users.csv");
    write_csv(&store.user_contribution().unwrap(), &csv_path).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_path(&csv_path)
        .unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["sender", "messages", "percentage"]);
    let rows: Vec<csv::StringRecord> = reader.records().map(std::result::Result::unwrap).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "Alice");
    assert_eq!(&rows[0][1], "3");

    let json_path = dir.path().join("months.json");
    write_json(&store.monthly_growth().unwrap(), &json_path).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value[0]["year"], 2024);
    assert_eq!(value[0]["month"], 1);
    assert_eq!(value[0]["count"], 7);
}

#[test]
fn test_records_export_as_json() {
    let records = WhatsAppParser::new().parse_str(SCENARIO).unwrap();
    let json = to_json(&records).unwrap();
    let back: Vec<Record> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, records);
}

#[test]
fn test_parse_error_carries_path() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "notes.txt", "no headers\nat all\n");

    let err = WhatsAppParser::new().parse(&path).unwrap_err();
    assert_eq!(err.parse_kind(), Some(&ParseError::NoMessagesFound));
    assert!(err.to_string().contains("notes.txt"));

    let missing = WhatsAppParser::new()
        .parse(Path::new("/definitely/not/here.txt"))
        .unwrap_err();
    assert!(missing.is_io());
}
