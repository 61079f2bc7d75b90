//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - global options and the input transcript
//! - [`Command`] - the report to print
//! - [`ExportTable`] / [`ReportFormat`] - what `export` writes and how
//! - [`DateOrderArg`] - `--date-order` values
//!
//! # Example
//!
//! ```rust
//! use chatstat::cli::{Args, Command};
//! use clap::Parser;
//!
//! let args = Args::try_parse_from(["chatstat", "chat.txt", "user", "Alice"]).unwrap();
//! assert!(matches!(args.command, Command::User { ref name } if name == "Alice"));
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::DateOrder;

/// Analyze a WhatsApp chat export: activity, contributors, words, emoji
/// and sentiment.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstat")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstat chat.txt overview
    chatstat chat.txt users
    chatstat chat.txt user \"Alice\"
    chatstat chat.txt --after 2024-01-01 insights
    chatstat chat.txt text --top 20
    chatstat chat.txt --db chat.db export users -f json -o users.json")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Report to produce
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file
    #[arg(short, long, value_name = "TOML", global = true)]
    pub config: Option<PathBuf>,

    /// How to read ambiguous dates like 03/04/24
    #[arg(long, value_enum, global = true)]
    pub date_order: Option<DateOrderArg>,

    /// Keep the message store in this SQLite file instead of memory
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Only analyze messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", global = true)]
    pub after: Option<String>,

    /// Only analyze messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", global = true)]
    pub before: Option<String>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Reports.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Totals, participants, date range and message types
    Overview,

    /// Each participant's share of the conversation
    Users,

    /// Statistics for one participant
    User {
        /// Sender name as it appears in the chat
        name: String,
    },

    /// Peak hours, weekdays, longest message, growth and quiet days
    Insights {
        /// Number of quiet days to list
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },

    /// Word, bigram and emoji frequency plus sentiment
    Text {
        /// Number of entries per table
        #[arg(short = 'n', long, default_value_t = 10)]
        top: usize,
    },

    /// Write one result table as CSV or JSON
    Export {
        /// Table to export
        #[arg(value_enum)]
        table: ExportTable,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ReportFormat,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Row limit for ranked tables
        #[arg(short = 'n', long, default_value_t = 20)]
        top: usize,
    },
}

/// Tables available to `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ExportTable {
    /// Messages and share per participant
    Users,
    /// Count and share per message type
    Kinds,
    /// Messages per weekday
    Weekdays,
    /// Messages per participant and hour
    Hours,
    /// Messages per month
    Months,
    /// Quietest days, silent days included
    QuietDays,
    /// Daily counts with a 7-day rolling mean
    Daily,
    /// Messages and participants per day
    Density,
    /// Most frequent words
    Words,
    /// Most frequent word pairs
    Bigrams,
    /// Most frequent emoji
    Emojis,
}

/// Export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum ReportFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// Pretty-printed JSON array
    Json,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Csv => write!(f, "CSV"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}

/// `--date-order` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DateOrderArg {
    /// Detect from the file
    Auto,
    /// DD/MM/YY
    #[value(alias = "dmy")]
    DayFirst,
    /// MM/DD/YY
    #[value(alias = "mdy")]
    MonthFirst,
}

impl From<DateOrderArg> for DateOrder {
    fn from(arg: DateOrderArg) -> Self {
        match arg {
            DateOrderArg::Auto => DateOrder::Auto,
            DateOrderArg::DayFirst => DateOrder::DayFirst,
            DateOrderArg::MonthFirst => DateOrder::MonthFirst,
        }
    }
}
