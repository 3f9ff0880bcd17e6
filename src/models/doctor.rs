//! Doctor model.
//!
//! Doctors are the staff that cover shifts. Each carries qualification
//! flags, a tenure used for tie-breaking, and two weekly grids keyed by
//! day-of-week × shift kind: availability and preference scores.
//!
//! Doctors are read-only inputs to the engine. Every optional field has a
//! permissive default: no grid entry means available and neutral.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::calendar;
use super::{ShiftKind, ShiftRequirements};

/// Values keyed by day-of-week (Sunday = 0) and shift kind.
///
/// Serializes as `{"0": {"day": v, "night": v}, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyGrid<T> {
    cells: BTreeMap<u8, BTreeMap<ShiftKind, T>>,
}

impl<T> Default for WeeklyGrid<T> {
    fn default() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }
}

impl<T> WeeklyGrid<T> {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for a weekday and shift kind.
    pub fn set(&mut self, weekday: Weekday, kind: ShiftKind, value: T) {
        self.cells
            .entry(calendar::weekday_index(weekday))
            .or_default()
            .insert(kind, value);
    }

    /// Value for a day index (Sunday = 0) and shift kind, if recorded.
    pub fn get(&self, day_index: u8, kind: ShiftKind) -> Option<&T> {
        self.cells.get(&day_index).and_then(|row| row.get(&kind))
    }

    /// Value for the weekday of `date`, if recorded.
    pub fn get_on(&self, date: NaiveDate, kind: ShiftKind) -> Option<&T> {
        self.get(calendar::day_index(date), kind)
    }

    /// Whether no entries are recorded.
    pub fn is_empty(&self) -> bool {
        self.cells.values().all(BTreeMap::is_empty)
    }
}

/// A qualification a shift can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Qualification {
    /// Board certification in intensive-care medicine.
    Temi,
    /// AMIB certification.
    Amib,
    /// Residency program membership.
    Residence,
}

impl fmt::Display for Qualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Qualification::Temi => "TEMI",
            Qualification::Amib => "AMIB",
            Qualification::Residence => "residence",
        })
    }
}

/// A doctor on the unit roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    /// Unique doctor identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Board-certified intensivist.
    #[serde(default)]
    pub temi: bool,
    /// AMIB-certified.
    #[serde(default)]
    pub amib: bool,
    /// In a residency program.
    #[serde(default)]
    pub residence: bool,
    /// Time in the unit. Only used to break ties.
    #[serde(default)]
    pub tenure: i64,
    /// Declared availability. Missing entries count as available.
    #[serde(default)]
    pub availability: WeeklyGrid<bool>,
    /// Preference scores, higher is preferred. Missing entries score 0.
    #[serde(default)]
    pub preferences: WeeklyGrid<i32>,
}

impl Doctor {
    /// Creates a doctor with no qualifications and no declared grids.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            temi: false,
            amib: false,
            residence: false,
            tenure: 0,
            availability: WeeklyGrid::new(),
            preferences: WeeklyGrid::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the TEMI flag.
    pub fn with_temi(mut self, temi: bool) -> Self {
        self.temi = temi;
        self
    }

    /// Sets the AMIB flag.
    pub fn with_amib(mut self, amib: bool) -> Self {
        self.amib = amib;
        self
    }

    /// Sets the residency flag.
    pub fn with_residence(mut self, residence: bool) -> Self {
        self.residence = residence;
        self
    }

    /// Sets the tenure.
    pub fn with_tenure(mut self, tenure: i64) -> Self {
        self.tenure = tenure;
        self
    }

    /// Declares availability for a weekday and shift kind.
    pub fn with_availability(mut self, weekday: Weekday, kind: ShiftKind, available: bool) -> Self {
        self.availability.set(weekday, kind, available);
        self
    }

    /// Declares a preference score for a weekday and shift kind.
    pub fn with_preference(mut self, weekday: Weekday, kind: ShiftKind, score: i32) -> Self {
        self.preferences.set(weekday, kind, score);
        self
    }

    /// Whether the doctor declared themselves available (default: yes).
    pub fn is_available(&self, date: NaiveDate, kind: ShiftKind) -> bool {
        self.availability.get_on(date, kind).copied().unwrap_or(true)
    }

    /// Preference score for a date and shift kind (default: 0).
    pub fn preference_for(&self, date: NaiveDate, kind: ShiftKind) -> i32 {
        self.preferences.get_on(date, kind).copied().unwrap_or(0)
    }

    /// Whether the doctor holds a qualification.
    pub fn holds(&self, qualification: Qualification) -> bool {
        match qualification {
            Qualification::Temi => self.temi,
            Qualification::Amib => self.amib,
            Qualification::Residence => self.residence,
        }
    }

    /// Required qualifications this doctor lacks.
    pub fn missing_qualifications(&self, requirements: &ShiftRequirements) -> Vec<Qualification> {
        [
            (requirements.temi, Qualification::Temi),
            (requirements.amib, Qualification::Amib),
            (requirements.resident, Qualification::Residence),
        ]
        .into_iter()
        .filter(|&(required, q)| required && !self.holds(q))
        .map(|(_, q)| q)
        .collect()
    }

    /// Whether every required qualification is held.
    pub fn meets(&self, requirements: &ShiftRequirements) -> bool {
        self.missing_qualifications(requirements).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_doctor_builder() {
        let d = Doctor::new("D1")
            .with_name("Dr. Ana")
            .with_temi(true)
            .with_residence(true)
            .with_tenure(36);

        assert_eq!(d.id, "D1");
        assert_eq!(d.name, "Dr. Ana");
        assert!(d.temi);
        assert!(!d.amib);
        assert!(d.residence);
        assert_eq!(d.tenure, 36);
        assert!(d.availability.is_empty());
    }

    #[test]
    fn test_availability_defaults_to_available() {
        // 2024-01-08 is a Monday
        let d = Doctor::new("D1").with_availability(Weekday::Mon, ShiftKind::Night, false);

        assert!(!d.is_available(date(2024, 1, 8), ShiftKind::Night));
        assert!(d.is_available(date(2024, 1, 8), ShiftKind::Day));
        assert!(d.is_available(date(2024, 1, 9), ShiftKind::Night));
    }

    #[test]
    fn test_preference_defaults_to_zero() {
        let d = Doctor::new("D1").with_preference(Weekday::Sun, ShiftKind::Day, 5);

        assert_eq!(d.preference_for(date(2024, 1, 7), ShiftKind::Day), 5);
        assert_eq!(d.preference_for(date(2024, 1, 7), ShiftKind::Night), 0);
        assert_eq!(d.preference_for(date(2024, 1, 8), ShiftKind::Day), 0);
    }

    #[test]
    fn test_missing_qualifications() {
        let d = Doctor::new("D1").with_temi(true);
        let req = ShiftRequirements::none().with_temi(true).with_amib(true);

        assert_eq!(d.missing_qualifications(&req), vec![Qualification::Amib]);
        assert!(!d.meets(&req));
        assert!(d.meets(&ShiftRequirements::intensivist_cover()));
        assert!(Doctor::new("D2").meets(&ShiftRequirements::none()));
    }

    #[test]
    fn test_doctor_from_sparse_json() {
        let d: Doctor = serde_json::from_str(
            r#"{
                "id": "D7",
                "temi": true,
                "availability": {"1": {"night": false}},
                "preferences": {"0": {"day": 3}}
            }"#,
        )
        .unwrap();

        assert_eq!(d.id, "D7");
        assert!(d.temi);
        assert!(!d.residence);
        assert_eq!(d.tenure, 0);
        assert!(!d.is_available(date(2024, 1, 8), ShiftKind::Night));
        assert_eq!(d.preference_for(date(2024, 1, 7), ShiftKind::Day), 3);
    }
}
