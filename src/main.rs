//! # chatstat CLI
//!
//! Parses one chat export, loads it into the store and prints or exports a
//! single report.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use serde::Serialize;
use tracing::info;

use chatstat::analyzer::{Analyzer, FrequencyTable};
use chatstat::cli::{Args, Command, ExportTable, ReportFormat};
use chatstat::config::{AnalyzerConfig, AppConfig};
use chatstat::error::AnalysisError;
use chatstat::filter::{FilterConfig, apply_filters};
use chatstat::logging::init_logging;
use chatstat::parser::Parser;
use chatstat::parsers::WhatsAppParser;
use chatstat::report::{to_csv, to_json, write_csv, write_json};
use chatstat::store::{ChatStore, UserHourCount};
use chatstat::{ChatstatError, Record};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const ROLLING_WINDOW: usize = 7;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatstatError> {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose, args.quiet);

    let config = build_config(&args)?;
    let filter = build_filter(&args)?;

    let parse_start = Instant::now();
    let parser = WhatsAppParser::with_config(config.parser.clone());
    let parsed = parser.parse(&args.input)?;
    let parsed_count = parsed.len();
    let records = apply_filters(parsed, &filter);
    info!(
        parsed = parsed_count,
        kept = records.len(),
        elapsed_ms = parse_start.elapsed().as_millis() as u64,
        "transcript ready"
    );

    let mut store = ChatStore::with_config(&config.store)?;
    store.load(&records)?;

    let analyzer = Analyzer::with_config(&records, config.analyzer.clone());

    match &args.command {
        Command::Overview => print_overview(&args, &store)?,
        Command::Users => print_users(&store)?,
        Command::User { name } => print_user(&records, &config.analyzer, name)?,
        Command::Insights { limit } => print_insights(&store, &analyzer, *limit)?,
        Command::Text { top } => print_text(&analyzer, *top),
        Command::Export {
            table,
            format,
            output,
            top,
        } => export(&store, &analyzer, *table, *format, output.as_deref(), *top)?,
    }

    store.close()
}

/// Config file first, then command-line overrides.
fn build_config(args: &Args) -> Result<AppConfig, ChatstatError> {
    let mut config = match args.config {
        Some(ref path) => AppConfig::load_from(path)?,
        None => AppConfig::default(),
    };

    if let Some(order) = args.date_order {
        config.parser.date_order = order.into();
    }
    if let Some(ref db) = args.db {
        config.store.database = Some(db.clone());
    }

    Ok(config)
}

fn build_filter(args: &Args) -> Result<FilterConfig, ChatstatError> {
    let mut filter = FilterConfig::new();
    if let Some(ref after) = args.after {
        filter = filter.with_date_from(after)?;
    }
    if let Some(ref before) = args.before {
        filter = filter.with_date_to(before)?;
    }
    Ok(filter)
}

// ============================================================================
// Reports
// ============================================================================

fn print_overview(args: &Args, store: &ChatStore) -> Result<(), ChatstatError> {
    println!("📊 chatstat v{}", env!("CARGO_PKG_VERSION"));
    println!("{RULE}");
    println!("📂 Input:        {}", args.input.display());
    println!("💬 Messages:     {}", store.total_records()?);

    let senders = store.senders()?;
    println!("👥 Participants: {} ({})", senders.len(), senders.join(", "));

    if let Some(range) = store.date_range()? {
        println!(
            "📅 Range:        {} → {} ({} days)",
            range.first.format(TIME_FORMAT),
            range.last.format(TIME_FORMAT),
            range.days()
        );
    }
    println!("📈 Per day:      {:.2}", store.messages_per_day()?);

    if let Some(top) = store.most_active_user()? {
        println!("🏆 Most active:  {} ({} messages)", top.sender, top.count);
    }
    if let Some(peak) = store.peak_hour()? {
        println!("🕐 Peak hour:    {:02}:00 ({} messages)", peak.hour, peak.count);
    }

    println!();
    println!("📎 Message types:");
    for share in store.media_text_ratio()? {
        println!(
            "   {:<8} {:>6}  {:>6.2}%",
            share.kind.as_str(),
            share.count,
            share.percentage
        );
    }

    Ok(())
}

fn print_users(store: &ChatStore) -> Result<(), ChatstatError> {
    let contributions = store.user_contribution()?;

    println!("👥 Contributions");
    println!("{RULE}");
    if contributions.is_empty() {
        println!("   (no authored messages)");
    }
    for c in &contributions {
        println!("   {:<24} {:>6}  {:>6.2}%", c.sender, c.messages, c.percentage);
    }

    Ok(())
}

fn print_user(records: &[Record], config: &AnalyzerConfig, name: &str) -> Result<(), ChatstatError> {
    let filter = FilterConfig::new().with_sender(name);
    let sender = records
        .iter()
        .find(|r| filter.matches(r))
        .and_then(Record::sender)
        .ok_or_else(|| AnalysisError::UnknownSender(name.to_string()))?;

    let theirs = apply_filters(records.to_vec(), &filter);
    let analyzer = Analyzer::with_config(&theirs, config.clone());
    let stats = analyzer
        .combined_statistics(sender)
        .ok_or_else(|| AnalysisError::UnknownSender(name.to_string()))?;

    println!("👤 {}", stats.sender);
    println!("{RULE}");
    println!("💬 Messages:     {}", stats.messages);
    println!("📝 Words:        {}", stats.words);
    println!("🖼️  Media:        {}", stats.media);
    println!("🗑️  Deleted:      {}", stats.deleted);
    println!("📏 Avg length:   {:.2} chars", stats.average_length);
    println!("📅 First:        {}", stats.first_message.format(TIME_FORMAT));
    println!("📅 Last:         {}", stats.last_message.format(TIME_FORMAT));

    let sentiment = analyzer.perform_sentiment_analysis();
    println!(
        "💭 Sentiment:    {} positive, {} neutral, {} negative",
        sentiment.positive, sentiment.neutral, sentiment.negative
    );

    let words = analyzer.word_frequency(5);
    if !words.is_empty() {
        let top: Vec<String> = words.iter().map(|(w, n)| format!("{w} ({n})")).collect();
        println!("🔤 Top words:    {}", top.join(", "));
    }

    Ok(())
}

fn print_insights(
    store: &ChatStore,
    analyzer: &Analyzer<'_>,
    limit: usize,
) -> Result<(), ChatstatError> {
    println!("🔎 Insights");
    println!("{RULE}");

    if let Some(peak) = store.peak_hour()? {
        println!("🕐 Peak hour: {:02}:00 ({} messages)", peak.hour, peak.count);
    }

    if let Some(longest) = store.longest_message()? {
        println!(
            "📏 Longest message: {} chars by {} on {}",
            longest.length(),
            longest.sender().unwrap_or("?"),
            longest.timestamp.format(TIME_FORMAT)
        );
        println!("   \"{}\"", preview(longest.body(), 60));
    }

    println!();
    println!("📅 Weekdays:");
    for day in store.weekday_distribution()? {
        println!("   {:<10} {:>6}", day.day, day.count);
    }

    println!();
    println!("📈 Monthly growth:");
    for month in store.monthly_growth()? {
        println!("   {}    {:>6}", month.label(), month.count);
    }

    println!();
    println!("😴 Quietest days:");
    for day in store.inactive_periods_with_gaps(limit)? {
        println!("   {}  {:>6}", day.date, day.count);
    }

    println!();
    println!("⏰ Busiest hours per participant:");
    for (sender, hours) in group_by_sender(&store.hourly_activity_by_user()?) {
        let top: Vec<String> = hours
            .iter()
            .take(3)
            .map(|h| format!("{:02}h×{}", h.hour, h.count))
            .collect();
        println!("   {:<24} {}", sender, top.join("  "));
    }

    let rolling = analyzer.rolling_average(ROLLING_WINDOW)?;
    if !rolling.is_empty() {
        println!();
        println!("📉 {ROLLING_WINDOW}-day average (latest days):");
        let skip = rolling.len().saturating_sub(ROLLING_WINDOW);
        for point in &rolling[skip..] {
            println!("   {}  {:>6}  {:>8.2}", point.date, point.count, point.average);
        }
    }

    Ok(())
}

fn print_text(analyzer: &Analyzer<'_>, top: usize) {
    print_table("🔤 Top words", &analyzer.word_frequency(top));
    println!();
    print_table("🔗 Top word pairs", &analyzer.bigrams(top));
    println!();
    print_table("😀 Top emoji", &analyzer.emoji_frequency(top));
    println!();

    println!("💭 Sentiment");
    println!("{RULE}");
    let counts = analyzer.perform_sentiment_analysis();
    match analyzer.sentiment_share() {
        Ok(share) => {
            println!("   {:<10} {:>6}  {:>6.2}%", "positive", counts.positive, share.positive);
            println!("   {:<10} {:>6}  {:>6.2}%", "neutral", counts.neutral, share.neutral);
            println!("   {:<10} {:>6}  {:>6.2}%", "negative", counts.negative, share.negative);
        }
        Err(_) => println!("   (no text messages)"),
    }
}

fn print_table(title: &str, table: &FrequencyTable) {
    println!("{title}");
    println!("{RULE}");
    if table.is_empty() {
        println!("   (none)");
    }
    for entry in table {
        println!("   {:<24} {:>6}", entry.term, entry.count);
    }
}

// ============================================================================
// Export
// ============================================================================

fn export(
    store: &ChatStore,
    analyzer: &Analyzer<'_>,
    table: ExportTable,
    format: ReportFormat,
    output: Option<&Path>,
    top: usize,
) -> Result<(), ChatstatError> {
    match table {
        ExportTable::Users => emit(&store.user_contribution()?, format, output),
        ExportTable::Kinds => emit(&store.media_text_ratio()?, format, output),
        ExportTable::Weekdays => emit(&store.weekday_distribution()?, format, output),
        ExportTable::Hours => emit(&store.hourly_activity_by_user()?, format, output),
        ExportTable::Months => emit(&store.monthly_growth()?, format, output),
        ExportTable::QuietDays => emit(&store.inactive_periods_with_gaps(top)?, format, output),
        ExportTable::Daily => emit(&analyzer.rolling_average(ROLLING_WINDOW)?, format, output),
        ExportTable::Density => emit(&analyzer.conversation_density(), format, output),
        ExportTable::Words => emit(analyzer.word_frequency(top).entries(), format, output),
        ExportTable::Bigrams => emit(analyzer.bigrams(top).entries(), format, output),
        ExportTable::Emojis => emit(analyzer.emoji_frequency(top).entries(), format, output),
    }
}

/// Writes `rows` to `output`, or to stdout when no file is given.
fn emit<T: Serialize>(
    rows: &[T],
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<(), ChatstatError> {
    match output {
        Some(path) => {
            match format {
                ReportFormat::Csv => write_csv(rows, path)?,
                ReportFormat::Json => write_json(rows, path)?,
            }
            println!("✅ Wrote {} rows as {} to {}", rows.len(), format, path.display());
        }
        None => {
            let text = match format {
                ReportFormat::Csv => to_csv(rows)?,
                ReportFormat::Json => to_json(rows)?,
            };
            print!("{text}");
            if format == ReportFormat::Json {
                println!();
            }
        }
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// First `max` chars of the first line, with an ellipsis when cut.
fn preview(body: &str, max: usize) -> String {
    let line = body.lines().next().unwrap_or("");
    let mut out: String = line.chars().take(max).collect();
    if line.chars().count() > max || body.lines().nth(1).is_some() {
        out.push('…');
    }
    out
}

/// Groups hour rows by sender, keeping the row order within each sender.
fn group_by_sender(rows: &[UserHourCount]) -> Vec<(&str, Vec<&UserHourCount>)> {
    let mut groups: Vec<(&str, Vec<&UserHourCount>)> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|(sender, _)| *sender == row.sender) {
            Some((_, hours)) => hours.push(row),
            None => groups.push((row.sender.as_str(), vec![row])),
        }
    }
    groups
}
