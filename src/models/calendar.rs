//! Calendar arithmetic for duty rosters.
//!
//! Shifts are stamped with a calendar date only (UTC midnight semantics).
//! Rest gaps are therefore whole multiples of 24 hours, and week-based
//! limits bucket dates into Sunday-start weeks.
//!
//! # Week Model
//! A week runs from Sunday 00:00 through the following Saturday 23:59.
//! This boundary decides which assignments count against weekly limits,
//! so every component buckets dates through [`Week::containing`].

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Hours between two consecutive calendar dates.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Wire format of a calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Widest look-back any rule takes from a shift date (days).
pub const MAX_LOOKBACK_DAYS: i64 = 7;

/// Day-of-week index with Sunday = 0 through Saturday = 6.
#[inline]
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Day-of-week index of a date (Sunday = 0).
#[inline]
pub fn day_index(date: NaiveDate) -> u8 {
    weekday_index(date.weekday())
}

/// Whether the date falls on a Saturday or Sunday.
#[inline]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Signed hours from `from` to `to`.
pub fn hours_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 * HOURS_PER_DAY
}

/// Whether every rule can evaluate `date` without leaving chrono's range.
///
/// Needs the 7-day look-back and the whole Sunday-to-Saturday week.
pub fn is_plannable(date: NaiveDate) -> bool {
    date.checked_sub_signed(Duration::days(MAX_LOOKBACK_DAYS)).is_some()
        && Week::containing(date)
            .start
            .checked_add_signed(Duration::days(6))
            .is_some()
}

/// Parses a wire date.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its UTC date
/// (`2024-01-08T00:00:00.000Z` is 2024-01-08).
pub fn parse_wire_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok().or_else(|| {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|ts| ts.with_timezone(&Utc).date_naive())
    })
}

/// Serde `deserialize_with` helper for [`parse_wire_date`].
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_wire_date(&raw).ok_or_else(|| {
        de::Error::custom(format!(
            "invalid date '{raw}': expected YYYY-MM-DD or an RFC 3339 timestamp"
        ))
    })
}

/// A Sunday-start calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Week {
    start: NaiveDate,
}

impl Week {
    /// The week that contains `date`.
    ///
    /// Clamped to the first representable date at the bottom of chrono's
    /// range; see [`is_plannable`].
    pub fn containing(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_sunday() as i64;
        Self {
            start: date
                .checked_sub_signed(Duration::days(offset))
                .unwrap_or(NaiveDate::MIN),
        }
    }

    /// First day of the week (a Sunday).
    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the week (a Saturday), clamped to the last
    /// representable date.
    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.start
            .checked_add_signed(Duration::days(6))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whether `date` falls inside this week.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// The following week, if representable.
    pub fn next(&self) -> Option<Self> {
        self.start
            .checked_add_signed(Duration::days(7))
            .map(|start| Self { start })
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First date (inclusive).
    pub start_date: NaiveDate,
    /// Last date (inclusive).
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range. Returns `None` when `start > end`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Option<Self> {
        (start_date <= end_date).then_some(Self {
            start_date,
            end_date,
        })
    }

    /// Number of calendar days covered.
    pub fn len_days(&self) -> usize {
        (self.end_date - self.start_date).num_days() as usize + 1
    }

    /// Whether `date` lies within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates the dates in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start_date;
        (0..self.len_days() as i64).map(move |offset| start + Duration::days(offset))
    }
}
