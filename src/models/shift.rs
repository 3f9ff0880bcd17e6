//! Shift model.
//!
//! A shift is one staffing slot on a calendar date: either the day or the
//! night duty. Each shift states which qualifications the assigned doctor
//! must hold.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::calendar;

/// Day or night duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    /// Daytime duty.
    Day,
    /// Overnight duty.
    Night,
}

impl ShiftKind {
    /// Wire name (`"day"` / `"night"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftKind::Day => "day",
            ShiftKind::Night => "night",
        }
    }

    /// Whether this is the overnight duty.
    #[inline]
    pub fn is_night(&self) -> bool {
        matches!(self, ShiftKind::Night)
    }

    /// Staffing priority within a date (higher is processed first).
    pub(crate) fn staffing_priority(&self) -> u8 {
        match self {
            ShiftKind::Night => 2,
            ShiftKind::Day => 1,
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualifications a shift demands from its assignee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequirements {
    /// Board-certified intensivist required.
    #[serde(rename = "requiresTEMI", default)]
    pub temi: bool,
    /// AMIB certification required.
    #[serde(rename = "requiresAMIB", default)]
    pub amib: bool,
    /// Resident required.
    #[serde(rename = "requiresResident", default)]
    pub resident: bool,
}

impl ShiftRequirements {
    /// No qualification demanded.
    pub fn none() -> Self {
        Self::default()
    }

    /// Unit policy: every shift is covered by at least one intensivist.
    pub fn intensivist_cover() -> Self {
        Self {
            temi: true,
            ..Self::default()
        }
    }

    /// Sets the TEMI requirement.
    pub fn with_temi(mut self, required: bool) -> Self {
        self.temi = required;
        self
    }

    /// Sets the AMIB requirement.
    pub fn with_amib(mut self, required: bool) -> Self {
        self.amib = required;
        self
    }

    /// Sets the residency requirement.
    pub fn with_resident(mut self, required: bool) -> Self {
        self.resident = required;
        self
    }
}

/// A shift instance to be staffed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique shift identifier.
    pub id: String,
    /// Calendar date of the duty.
    ///
    /// Read from `YYYY-MM-DD` or an RFC 3339 timestamp (UTC date).
    #[serde(deserialize_with = "calendar::deserialize_date")]
    pub date: NaiveDate,
    /// Day or night.
    #[serde(rename = "type")]
    pub kind: ShiftKind,
    /// Required qualifications.
    #[serde(flatten)]
    pub requirements: ShiftRequirements,
}

impl Shift {
    /// Creates a shift with no qualification requirements.
    pub fn new(id: impl Into<String>, date: NaiveDate, kind: ShiftKind) -> Self {
        Self {
            id: id.into(),
            date,
            kind,
            requirements: ShiftRequirements::none(),
        }
    }

    /// Creates a day shift.
    pub fn day(id: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(id, date, ShiftKind::Day)
    }

    /// Creates a night shift.
    pub fn night(id: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(id, date, ShiftKind::Night)
    }

    /// Replaces the qualification requirements.
    pub fn with_requirements(mut self, requirements: ShiftRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    /// Requires a TEMI-certified doctor.
    pub fn requiring_temi(mut self) -> Self {
        self.requirements.temi = true;
        self
    }

    /// Requires an AMIB-certified doctor.
    pub fn requiring_amib(mut self) -> Self {
        self.requirements.amib = true;
        self
    }

    /// Requires a resident.
    pub fn requiring_resident(mut self) -> Self {
        self.requirements.resident = true;
        self
    }

    /// Day-of-week index of the shift date (Sunday = 0).
    pub fn day_index(&self) -> u8 {
        calendar::day_index(self.date)
    }

    /// Whether the shift falls on a Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        calendar::is_weekend(self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_shift_builder() {
        let shift = Shift::night("S1", date(2024, 1, 6))
            .requiring_temi()
            .requiring_resident();

        assert_eq!(shift.id, "S1");
        assert_eq!(shift.kind, ShiftKind::Night);
        assert!(shift.requirements.temi);
        assert!(!shift.requirements.amib);
        assert!(shift.requirements.resident);
        assert!(shift.is_weekend());
        assert_eq!(shift.day_index(), 6);
    }

    #[test]
    fn test_intensivist_cover_policy() {
        let req = ShiftRequirements::intensivist_cover();
        assert!(req.temi);
        assert!(!req.amib);
        assert!(!req.resident);
        assert_eq!(ShiftRequirements::none(), ShiftRequirements::default());
    }

    #[test]
    fn test_staffing_priority_night_first() {
        assert!(ShiftKind::Night.staffing_priority() > ShiftKind::Day.staffing_priority());
        assert!(ShiftKind::Night.is_night());
        assert_eq!(ShiftKind::Day.to_string(), "day");
    }

    #[test]
    fn test_shift_wire_format() {
        let shift = Shift::day("shift_1", date(2024, 3, 4)).requiring_temi();
        let json = serde_json::to_value(&shift).unwrap();
        assert_eq!(json["id"], "shift_1");
        assert_eq!(json["date"], "2024-03-04");
        assert_eq!(json["type"], "day");
        assert_eq!(json["requiresTEMI"], true);
        assert_eq!(json["requiresAMIB"], false);
        assert_eq!(json["requiresResident"], false);
    }

    #[test]
    fn test_shift_accepts_timestamp_dates() {
        let shift: Shift = serde_json::from_str(
            r#"{"id":"shift_1","date":"2024-01-08T00:00:00.000Z","type":"day","requiresTEMI":true}"#,
        )
        .unwrap();
        assert_eq!(shift.date, date(2024, 1, 8));
        assert!(shift.requirements.temi);

        // serialized back as a plain date
        assert_eq!(serde_json::to_value(&shift).unwrap()["date"], "2024-01-08");
    }

    #[test]
    fn test_shift_rejects_malformed_date() {
        let err = serde_json::from_str::<Shift>(r#"{"id":"x","date":"08/01/2024","type":"day"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("08/01/2024"));
    }

    #[test]
    fn test_shift_requirements_default_when_absent() {
        let shift: Shift =
            serde_json::from_str(r#"{"id":"x","date":"2024-03-04","type":"night"}"#).unwrap();
        assert_eq!(shift.kind, ShiftKind::Night);
        assert_eq!(shift.requirements, ShiftRequirements::none());
    }
}
