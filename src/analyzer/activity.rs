//! Time-series views of chat activity.
//!
//! These are computed from the record slice directly and back the charts of
//! a report: daily volume with a rolling mean, monthly trend, a weekday/hour
//! heatmap, per-user hour profiles and conversation density.
//!
//! All of them count authored records only.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use serde::Serialize;

use super::Analyzer;
use crate::error::AnalysisError;
use crate::store::models::{DateCount, MonthCount, round2, weekday_name};

/// Daily count with its trailing mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RollingPoint {
    /// Calendar date
    pub date: NaiveDate,
    /// Authored records that day
    pub count: usize,
    /// Mean of this day and up to `window - 1` preceding days, two decimals
    pub average: f64,
}

/// Authored records per weekday and hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityHeatmap {
    counts: [[usize; 24]; 7],
}

/// One weekday row of an [`ActivityHeatmap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapRow {
    /// Full weekday name
    pub day: &'static str,
    /// Counts for hours `0..24`
    pub hours: [usize; 24],
}

impl ActivityHeatmap {
    /// Count for one cell.
    pub fn get(&self, day: Weekday, hour: u32) -> usize {
        self.counts[day.num_days_from_monday() as usize]
            .get(hour as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Rows from Monday to Sunday.
    pub fn rows(&self) -> Vec<HeatmapRow> {
        let mut day = Weekday::Mon;
        self.counts
            .iter()
            .map(|hours| {
                let row = HeatmapRow {
                    day: weekday_name(day),
                    hours: *hours,
                };
                day = day.succ();
                row
            })
            .collect()
    }

    /// Largest cell value.
    pub fn max(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all cells.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

/// One sender's activity by hour of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserHourRow {
    /// Sender name
    pub sender: String,
    /// Counts for hours `0..24`
    pub hours: [usize; 24],
}

/// Messages and distinct active senders on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DensityRow {
    /// Calendar date
    pub date: NaiveDate,
    /// Authored records
    pub messages: usize,
    /// Distinct senders
    pub participants: usize,
}

impl Analyzer<'_> {
    /// Authored records per date, oldest first.
    ///
    /// Every date between the first and last authored record is present,
    /// silent days with a count of zero.
    pub fn daily_counts(&self) -> Vec<DateCount> {
        let mut observed: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for record in self.authored() {
            *observed.entry(record.timestamp.date_naive()).or_default() += 1;
        }

        let (Some(&first), Some(&last)) = (observed.keys().next(), observed.keys().next_back())
        else {
            return Vec::new();
        };

        first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| DateCount {
                date,
                count: observed.get(&date).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Daily counts with a trailing mean over `window` days.
    ///
    /// The first `window - 1` days average over the days available so far.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidWindow`] if `window` is zero.
    pub fn rolling_average(&self, window: usize) -> Result<Vec<RollingPoint>, AnalysisError> {
        if window == 0 {
            return Err(AnalysisError::InvalidWindow);
        }

        let daily = self.daily_counts();
        let mut sum = 0usize;
        let mut points = Vec::with_capacity(daily.len());

        for (i, day) in daily.iter().enumerate() {
            sum += day.count;
            if i >= window {
                sum -= daily[i - window].count;
            }
            let span = (i + 1).min(window);
            points.push(RollingPoint {
                date: day.date,
                count: day.count,
                average: round2(sum as f64 / span as f64),
            });
        }

        Ok(points)
    }

    /// Authored records per calendar month, oldest first.
    pub fn monthly_trend(&self) -> Vec<MonthCount> {
        let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
        for record in self.authored() {
            let ts = record.timestamp;
            *months.entry((ts.year(), ts.month())).or_default() += 1;
        }

        months
            .into_iter()
            .map(|((year, month), count)| MonthCount { year, month, count })
            .collect()
    }

    /// Weekday × hour activity grid.
    pub fn activity_heatmap(&self) -> ActivityHeatmap {
        let mut counts = [[0usize; 24]; 7];
        for record in self.authored() {
            let ts = record.timestamp;
            counts[ts.weekday().num_days_from_monday() as usize][ts.hour() as usize] += 1;
        }
        ActivityHeatmap { counts }
    }

    /// Hour-of-day profile per sender, senders in order of first appearance.
    pub fn user_hour_matrix(&self) -> Vec<UserHourRow> {
        let mut rows: Vec<UserHourRow> = Vec::new();
        for record in self.authored() {
            let Some(sender) = record.sender() else {
                continue;
            };
            let idx = match rows.iter().position(|r| r.sender == sender) {
                Some(idx) => idx,
                None => {
                    rows.push(UserHourRow {
                        sender: sender.to_string(),
                        hours: [0; 24],
                    });
                    rows.len() - 1
                }
            };
            rows[idx].hours[record.timestamp.hour() as usize] += 1;
        }
        rows
    }

    /// Messages and distinct senders for every date with authored records.
    pub fn conversation_density(&self) -> Vec<DensityRow> {
        let mut days: BTreeMap<NaiveDate, (usize, HashSet<&str>)> = BTreeMap::new();
        for record in self.authored() {
            let entry = days.entry(record.timestamp.date_naive()).or_default();
            entry.0 += 1;
            if let Some(sender) = record.sender() {
                entry.1.insert(sender);
            }
        }

        days.into_iter()
            .map(|(date, (messages, senders))| DensityRow {
                date,
                messages,
                participants: senders.len(),
            })
            .collect()
    }
}
