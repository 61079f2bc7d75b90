//! Table layout and column conversions for the message store.
//!
//! One row per [`Record`](crate::Record). The calendar columns are derived at
//! load time so aggregate queries group on plain integers and strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::message::MessageKind;

/// Stored timestamp layout, nanoseconds included; fixed width, so it sorts
/// lexicographically in time order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f";

/// Layout accepted when reading a timestamp back; the fraction is optional.
const TIMESTAMP_READ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Stored date layout.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const CREATE: &str = r"
    CREATE TABLE IF NOT EXISTS messages (
        seq       INTEGER PRIMARY KEY,
        timestamp TEXT    NOT NULL,
        sender    TEXT,
        body      TEXT    NOT NULL,
        kind      TEXT    NOT NULL,
        length    INTEGER NOT NULL,
        date      TEXT    NOT NULL,
        hour      INTEGER NOT NULL,
        weekday   INTEGER NOT NULL,
        day_name  TEXT    NOT NULL,
        year      INTEGER NOT NULL,
        month     INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_messages_sender ON messages(sender);
    CREATE INDEX IF NOT EXISTS idx_messages_date ON messages(date);
";

pub const CLEAR: &str = "DELETE FROM messages";

pub const INSERT: &str = r"
    INSERT INTO messages (
        seq, timestamp, sender, body, kind, length,
        date, hour, weekday, day_name, year, month
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
";

impl ToSql for MessageKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for MessageKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// Reads a `TIMESTAMP_FORMAT` column back into UTC.
pub fn read_timestamp(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&text, TIMESTAMP_READ_FORMAT)
        .map(|ts| ts.and_utc())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e)))
}

/// Reads a `DATE_FORMAT` column.
pub fn read_date(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e)))
}

/// Reads a `COUNT(*)` column.
pub fn read_count(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<usize> {
    let n: i64 = row.get(idx)?;
    Ok(usize::try_from(n).unwrap_or(0))
}
