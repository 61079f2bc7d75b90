//! Result rows returned by [`ChatStore`](super::ChatStore) queries.
//!
//! Every row derives `Serialize` so it can go straight to
//! [`report::write_csv`](crate::report) or a JSON dump.

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::Serialize;

use crate::message::MessageKind;

/// Message count for one sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCount {
    /// Sender name
    pub sender: String,
    /// Number of authored records
    pub count: usize,
}

/// Message count for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourCount {
    /// Hour of day, `0..=23`
    pub hour: u32,
    /// Number of authored records sent in that hour
    pub count: usize,
}

/// A sender's share of all authored records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    /// Sender name
    pub sender: String,
    /// Number of authored records
    pub messages: usize,
    /// Share of the total, in percent with two decimals
    pub percentage: f64,
}

/// Count and share of one message kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KindShare {
    /// Message kind
    pub kind: MessageKind,
    /// Number of records of this kind
    pub count: usize,
    /// Share of all records, in percent with two decimals
    pub percentage: f64,
}

/// Message count for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayCount {
    /// Full weekday name, e.g. `Monday`
    pub day: String,
    /// Number of authored records
    pub count: usize,
}

/// Message count for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// Calendar year
    pub year: i32,
    /// Month, `1..=12`
    pub month: u32,
    /// Number of authored records
    pub count: usize,
}

impl MonthCount {
    /// Returns the month as `YYYY-MM`.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Message count for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateCount {
    /// Calendar date
    pub date: NaiveDate,
    /// Number of authored records
    pub count: usize,
}

/// Message count for one sender in one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserHourCount {
    /// Sender name
    pub sender: String,
    /// Hour of day, `0..=23`
    pub hour: u32,
    /// Number of authored records
    pub count: usize,
}

/// First and last timestamp in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// Earliest record
    pub first: DateTime<Utc>,
    /// Latest record
    pub last: DateTime<Utc>,
}

impl DateRange {
    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.last.date_naive() - self.first.date_naive()).num_days() + 1
    }
}

/// Full English weekday name.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `100 * part / total`, rounded to two decimals; `0.0` when `total` is zero.
pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(100.0 * part as f64 / total as f64)
}

/// Splits 100% across `counts` in hundredths so the shares sum exactly to 100.
///
/// Each share is floored first; leftover hundredths go to the largest
/// remainders, earlier entries first on ties. Every share stays within 0.01 of
/// the exact value.
pub(crate) fn apportion(counts: &[usize]) -> Vec<f64> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }

    let mut units: Vec<usize> = Vec::with_capacity(counts.len());
    let mut remainders: Vec<(usize, usize)> = Vec::with_capacity(counts.len());
    for (i, &count) in counts.iter().enumerate() {
        let scaled = count * 10_000;
        units.push(scaled / total);
        remainders.push((scaled % total, i));
    }

    let assigned: usize = units.iter().sum();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in remainders.iter().take(10_000 - assigned) {
        units[i] += 1;
    }

    units.into_iter().map(|u| u as f64 / 100.0).collect()
}
