//! Aggregate queries over a loaded [`ChatStore`].
//!
//! Activity queries count authored records only (`kind != 'system'`);
//! [`media_text_ratio`](ChatStore::media_text_ratio) counts every record.
//! Ties are broken deterministically, usually by source order (`seq`).

use std::collections::BTreeMap;

use rusqlite::{OptionalExtension, params};

use super::ChatStore;
use super::models::{
    Contribution, DateCount, DateRange, HourCount, KindShare, MonthCount, UserCount,
    UserHourCount, WeekdayCount, apportion, percentage,
};
use super::schema::{read_count, read_date, read_timestamp};
use crate::Record;
use crate::error::Result;
use crate::message::MessageKind;

const MOST_ACTIVE_USER: &str = r"
    SELECT sender, COUNT(*) AS n
    FROM messages
    WHERE kind != 'system'
    GROUP BY sender
    ORDER BY n DESC, MIN(seq) ASC
    LIMIT 1
";

const MESSAGES_AND_DAYS: &str = r"
    SELECT COUNT(*), COUNT(DISTINCT date)
    FROM messages
    WHERE kind != 'system'
";

const PEAK_HOUR: &str = r"
    SELECT hour, COUNT(*) AS n
    FROM messages
    WHERE kind != 'system'
    GROUP BY hour
    ORDER BY n DESC, hour ASC
    LIMIT 1
";

const COUNT_BY_SENDER: &str = r"
    SELECT sender, COUNT(*) AS n
    FROM messages
    WHERE kind != 'system'
    GROUP BY sender
    ORDER BY n DESC, MIN(seq) ASC
";

const COUNT_BY_KIND: &str = r"
    SELECT kind, COUNT(*) AS n
    FROM messages
    GROUP BY kind
    ORDER BY n DESC, MIN(seq) ASC
";

const COUNT_BY_WEEKDAY: &str = r"
    SELECT day_name, COUNT(*) AS n
    FROM messages
    WHERE kind != 'system'
    GROUP BY weekday
    ORDER BY n DESC, weekday ASC
";

const LONGEST_MESSAGE: &str = r"
    SELECT timestamp, sender, body, kind
    FROM messages
    WHERE kind IN ('text', 'media')
    ORDER BY length DESC, seq ASC
    LIMIT 1
";

const COUNT_BY_MONTH: &str = r"
    SELECT year, month, COUNT(*)
    FROM messages
    WHERE kind != 'system'
    GROUP BY year, month
    ORDER BY year ASC, month ASC
";

const QUIETEST_DATES: &str = r"
    SELECT date, COUNT(*) AS n
    FROM messages
    WHERE kind != 'system'
    GROUP BY date
    ORDER BY n ASC, date ASC
    LIMIT ?1
";

const COUNT_BY_DATE: &str = r"
    SELECT date, COUNT(*)
    FROM messages
    WHERE kind != 'system'
    GROUP BY date
    ORDER BY date ASC
";

const COUNT_BY_SENDER_HOUR: &str = r"
    SELECT m.sender, m.hour, COUNT(*) AS n
    FROM messages m
    JOIN (
        SELECT sender, MIN(seq) AS first_seq
        FROM messages
        WHERE kind != 'system'
        GROUP BY sender
    ) f ON f.sender = m.sender
    WHERE m.kind != 'system'
    GROUP BY m.sender, m.hour
    ORDER BY n DESC, MIN(f.first_seq) ASC, m.hour ASC
";

const SENDERS: &str = r"
    SELECT sender
    FROM messages
    WHERE sender IS NOT NULL
    GROUP BY sender
    ORDER BY MIN(seq) ASC
";

impl ChatStore {
    /// Sender with the most authored records; ties go to whoever spoke first.
    pub fn most_active_user(&self) -> Result<Option<UserCount>> {
        self.ensure_loaded()?;
        let top = self
            .conn
            .query_row(MOST_ACTIVE_USER, [], |row| {
                Ok(UserCount {
                    sender: row.get(0)?,
                    count: read_count(row, 1)?,
                })
            })
            .optional()?;
        Ok(top)
    }

    /// Average authored records per active day; `0.0` for an empty chat.
    pub fn messages_per_day(&self) -> Result<f64> {
        self.ensure_loaded()?;
        let (messages, days) = self.conn.query_row(MESSAGES_AND_DAYS, [], |row| {
            Ok((read_count(row, 0)?, read_count(row, 1)?))
        })?;
        Ok(messages as f64 / days.max(1) as f64)
    }

    /// Busiest hour of day; ties go to the earliest hour.
    pub fn peak_hour(&self) -> Result<Option<HourCount>> {
        self.ensure_loaded()?;
        let peak = self
            .conn
            .query_row(PEAK_HOUR, [], |row| {
                Ok(HourCount {
                    hour: row.get(0)?,
                    count: read_count(row, 1)?,
                })
            })
            .optional()?;
        Ok(peak)
    }

    /// Each sender's share of authored records, largest first.
    ///
    /// Percentages have two decimals and always sum to exactly 100. Shares are
    /// apportioned by largest remainder rather than rounded row by row, so
    /// three equal senders get `33.34`, `33.33`, `33.33` instead of three
    /// `33.33`. [`ChatStore::media_text_ratio`] rounds each row on its own.
    pub fn user_contribution(&self) -> Result<Vec<Contribution>> {
        self.ensure_loaded()?;
        let counts = self.user_counts()?;
        let shares = apportion(&counts.iter().map(|c| c.count).collect::<Vec<_>>());

        Ok(counts
            .into_iter()
            .zip(shares)
            .map(|(user, percentage)| Contribution {
                sender: user.sender,
                messages: user.count,
                percentage,
            })
            .collect())
    }

    /// Count and share of every message kind present, largest first.
    pub fn media_text_ratio(&self) -> Result<Vec<KindShare>> {
        self.ensure_loaded()?;
        let mut stmt = self.conn.prepare(COUNT_BY_KIND)?;
        let counts = stmt
            .query_map([], |row| Ok((row.get::<_, MessageKind>(0)?, read_count(row, 1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let total: usize = counts.iter().map(|(_, n)| n).sum();
        Ok(counts
            .into_iter()
            .map(|(kind, count)| KindShare {
                kind,
                count,
                percentage: percentage(count, total),
            })
            .collect())
    }

    /// Authored records per weekday, busiest first; ties in Monday-first order.
    pub fn weekday_distribution(&self) -> Result<Vec<WeekdayCount>> {
        self.ensure_loaded()?;
        let mut stmt = self.conn.prepare(COUNT_BY_WEEKDAY)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(WeekdayCount {
                    day: row.get(0)?,
                    count: read_count(row, 1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// The longest text or media record; ties go to the first occurrence.
    pub fn longest_message(&self) -> Result<Option<Record>> {
        self.ensure_loaded()?;
        let record = self
            .conn
            .query_row(LONGEST_MESSAGE, [], |row| {
                Ok(Record {
                    timestamp: read_timestamp(row, 0)?,
                    sender: row.get(1)?,
                    body: row.get(2)?,
                    kind: row.get(3)?,
                })
            })
            .optional()?;
        Ok(record)
    }

    /// Authored records per calendar month, oldest first.
    pub fn monthly_growth(&self) -> Result<Vec<MonthCount>> {
        self.ensure_loaded()?;
        let mut stmt = self.conn.prepare(COUNT_BY_MONTH)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(MonthCount {
                    year: row.get(0)?,
                    month: row.get(1)?,
                    count: read_count(row, 2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// The `limit` quietest dates among those with at least one authored record.
    ///
    /// Ascending by count, ties go to the earlier date.
    pub fn inactive_periods(&self, limit: usize) -> Result<Vec<DateCount>> {
        self.ensure_loaded()?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(QUIETEST_DATES)?;
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok(DateCount {
                    date: read_date(row, 0)?,
                    count: read_count(row, 1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Like [`inactive_periods`](Self::inactive_periods), but every date between
    /// the first and last authored record is a candidate, including silent days.
    pub fn inactive_periods_with_gaps(&self, limit: usize) -> Result<Vec<DateCount>> {
        self.ensure_loaded()?;
        let mut stmt = self.conn.prepare(COUNT_BY_DATE)?;
        let observed = stmt
            .query_map([], |row| Ok((read_date(row, 0)?, read_count(row, 1)?)))?
            .collect::<std::result::Result<BTreeMap<_, _>, _>>()?;

        let (Some(&first), Some(&last)) = (observed.keys().next(), observed.keys().next_back())
        else {
            return Ok(Vec::new());
        };

        let mut days: Vec<DateCount> = first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| DateCount {
                date,
                count: observed.get(&date).copied().unwrap_or(0),
            })
            .collect();

        // Dates are already ascending, so a stable sort keeps earlier dates first
        days.sort_by_key(|d| d.count);
        days.truncate(limit);
        Ok(days)
    }

    /// Authored records per (sender, hour), busiest first.
    ///
    /// Ties go to the sender who spoke first, then to the earlier hour.
    pub fn hourly_activity_by_user(&self) -> Result<Vec<UserHourCount>> {
        self.ensure_loaded()?;
        let mut stmt = self.conn.prepare(COUNT_BY_SENDER_HOUR)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(UserHourCount {
                    sender: row.get(0)?,
                    hour: row.get(1)?,
                    count: read_count(row, 2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Number of records of every kind.
    pub fn total_records(&self) -> Result<usize> {
        self.ensure_loaded()?;
        let total = self
            .conn
            .query_row("SELECT COUNT(*) FROM messages", [], |row| read_count(row, 0))?;
        Ok(total)
    }

    /// Number of records of one kind.
    pub fn kind_count(&self, kind: MessageKind) -> Result<usize> {
        self.ensure_loaded()?;
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM messages WHERE kind = ?1",
            params![kind],
            |row| read_count(row, 0),
        )?;
        Ok(count)
    }

    /// Distinct senders in order of first appearance.
    pub fn senders(&self) -> Result<Vec<String>> {
        self.ensure_loaded()?;
        let mut stmt = self.conn.prepare(SENDERS)?;
        let senders = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(senders)
    }

    /// Timestamps of the earliest and latest record, if any.
    pub fn date_range(&self) -> Result<Option<DateRange>> {
        self.ensure_loaded()?;
        let range = self.conn.query_row(
            "SELECT MIN(timestamp), MAX(timestamp) FROM messages",
            [],
            |row| {
                let first: Option<String> = row.get(0)?;
                if first.is_none() {
                    return Ok(None);
                }
                Ok(Some(DateRange {
                    first: read_timestamp(row, 0)?,
                    last: read_timestamp(row, 1)?,
                }))
            },
        )?;
        Ok(range)
    }

    fn user_counts(&self) -> Result<Vec<UserCount>> {
        let mut stmt = self.conn.prepare(COUNT_BY_SENDER)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(UserCount {
                    sender: row.get(0)?,
                    count: read_count(row, 1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
