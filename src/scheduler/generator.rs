//! Shift generation.
//!
//! Expands an inclusive date range into two shifts per day, day before
//! night, with sequential ids `shift_1`, `shift_2`, ...

use chrono::NaiveDate;

use crate::error::ScheduleError;
use crate::models::calendar;
use crate::models::{DateRange, Shift, ShiftKind, ShiftRequirements};

pub use crate::models::calendar::DATE_FORMAT;

/// Produces the required shifts for a date range.
#[derive(Debug, Clone, Copy)]
pub struct ShiftGenerator {
    range: DateRange,
    requirements: ShiftRequirements,
}

impl ShiftGenerator {
    /// Creates a generator for `start..=end`.
    ///
    /// Generated shifts require TEMI only.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ScheduleError> {
        let range =
            DateRange::new(start, end).ok_or(ScheduleError::InvalidDateRange { start, end })?;
        Ok(Self {
            range,
            requirements: ShiftRequirements::intensivist_cover(),
        })
    }

    /// Creates a generator from `YYYY-MM-DD` strings or RFC 3339
    /// timestamps.
    pub fn parse(start: &str, end: &str) -> Result<Self, ScheduleError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Overrides the requirements stamped on every shift.
    pub fn with_requirements(mut self, requirements: ShiftRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    /// The covered date range.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Number of shifts [`generate`](Self::generate) will produce.
    pub fn shift_count(&self) -> usize {
        self.range.len_days() * 2
    }

    /// Generates the shifts: date ascending, day before night.
    pub fn generate(&self) -> Vec<Shift> {
        let mut shifts = Vec::with_capacity(self.shift_count());
        for date in self.range.days() {
            for kind in [ShiftKind::Day, ShiftKind::Night] {
                let id = format!("shift_{}", shifts.len() + 1);
                shifts.push(Shift::new(id, date, kind).with_requirements(self.requirements));
            }
        }
        shifts
    }
}

/// Parses a `YYYY-MM-DD` date, or the UTC date of an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Result<NaiveDate, ScheduleError> {
    calendar::parse_wire_date(value).ok_or_else(|| ScheduleError::MalformedDate {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_single_day() {
        let shifts = ShiftGenerator::new(date(1), date(1)).unwrap().generate();

        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].id, "shift_1");
        assert_eq!(shifts[0].kind, ShiftKind::Day);
        assert_eq!(shifts[1].id, "shift_2");
        assert_eq!(shifts[1].kind, ShiftKind::Night);
        assert!(shifts.iter().all(|s| s.date == date(1)));
    }

    #[test]
    fn test_default_requirements_temi_only() {
        let shifts = ShiftGenerator::new(date(1), date(3)).unwrap().generate();
        assert!(shifts
            .iter()
            .all(|s| s.requirements == ShiftRequirements::intensivist_cover()));
    }

    #[test]
    fn test_order_and_ids() {
        let generator = ShiftGenerator::new(date(30), date(31)).unwrap();
        let shifts = generator.generate();

        assert_eq!(shifts.len(), generator.shift_count());
        let summary: Vec<_> = shifts
            .iter()
            .map(|s| (s.id.as_str(), s.date, s.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("shift_1", date(30), ShiftKind::Day),
                ("shift_2", date(30), ShiftKind::Night),
                ("shift_3", date(31), ShiftKind::Day),
                ("shift_4", date(31), ShiftKind::Night),
            ]
        );
    }

    #[test]
    fn test_crosses_month_boundary() {
        let shifts = ShiftGenerator::parse("2024-02-28", "2024-03-01")
            .unwrap()
            .generate();
        // 2024 is a leap year: Feb 28, Feb 29, Mar 1
        assert_eq!(shifts.len(), 6);
        assert_eq!(shifts[2].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_custom_requirements() {
        let req = ShiftRequirements::none().with_resident(true);
        let shifts = ShiftGenerator::new(date(1), date(1))
            .unwrap()
            .with_requirements(req)
            .generate();
        assert!(shifts.iter().all(|s| s.requirements.resident && !s.requirements.temi));
    }

    #[test]
    fn test_inverted_range() {
        let err = ShiftGenerator::new(date(5), date(4)).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_malformed_date() {
        let err = ShiftGenerator::parse("2024-13-01", "2024-12-31").unwrap_err();
        assert_eq!(
            err,
            ScheduleError::MalformedDate {
                value: "2024-13-01".into()
            }
        );
        assert!(parse_date("01/02/2024").is_err());
        assert_eq!(parse_date(" 2024-01-02 ").unwrap(), date(2));
    }

    #[test]
    fn test_parse_timestamps() {
        let generator =
            ShiftGenerator::parse("2024-01-08T00:00:00.000Z", "2024-01-09T00:00:00.000Z").unwrap();
        assert_eq!(generator.range().start_date, date(8));
        assert_eq!(generator.shift_count(), 4);
    }
}
