//! Schedule (solution) model.
//!
//! A [`ScheduleState`] is built up by exactly one engine run: it starts
//! empty, receives one assignment or one unfilled entry per shift, and is
//! handed back read-only. Only the assigner mutates it.
//!
//! Per-doctor maps are ordered by doctor id so serialized output is
//! byte-for-byte stable across runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Shift, ShiftKind};

/// A doctor committed to a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Covered shift.
    pub shift_id: String,
    /// Assigned doctor.
    pub doctor_id: String,
    /// Doctor display name (denormalized for reporting).
    #[serde(default)]
    pub doctor_name: String,
    /// Shift date.
    #[serde(deserialize_with = "super::calendar::deserialize_date")]
    pub date: NaiveDate,
    /// Shift kind.
    #[serde(rename = "type")]
    pub kind: ShiftKind,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(
        shift_id: impl Into<String>,
        doctor_id: impl Into<String>,
        date: NaiveDate,
        kind: ShiftKind,
    ) -> Self {
        Self {
            shift_id: shift_id.into(),
            doctor_id: doctor_id.into(),
            doctor_name: String::new(),
            date,
            kind,
        }
    }

    /// Sets the doctor display name.
    pub fn with_doctor_name(mut self, name: impl Into<String>) -> Self {
        self.doctor_name = name.into();
        self
    }
}

/// Running shift counters for one doctor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCounts {
    /// All shifts.
    pub total: u32,
    /// Day shifts.
    pub day: u32,
    /// Night shifts.
    pub night: u32,
    /// Shifts on Saturday or Sunday (of either kind).
    pub weekend: u32,
}

/// Incrementally built schedule of one engine run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleState {
    pub(crate) assignments: Vec<Assignment>,
    pub(crate) doctor_assignments: BTreeMap<String, Vec<Assignment>>,
    pub(crate) shift_counts: BTreeMap<String, ShiftCounts>,
    pub(crate) unfilled: Vec<Shift>,
}

impl ScheduleState {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// All assignments in commit order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// A doctor's assignments in commit order (not date order).
    pub fn assignments_for(&self, doctor_id: &str) -> &[Assignment] {
        self.doctor_assignments
            .get(doctor_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// A doctor's counters; zero when the doctor has no assignment.
    pub fn counts_for(&self, doctor_id: &str) -> ShiftCounts {
        self.shift_counts.get(doctor_id).copied().unwrap_or_default()
    }

    /// Counters of every doctor with at least one assignment.
    pub fn shift_counts(&self) -> &BTreeMap<String, ShiftCounts> {
        &self.shift_counts
    }

    /// Shifts that found no eligible doctor, in processing order.
    pub fn unfilled(&self) -> &[Shift] {
        &self.unfilled
    }

    /// Finds the assignment covering a shift.
    pub fn assignment_for_shift(&self, shift_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.shift_id == shift_id)
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Number of unfilled shifts.
    pub fn unfilled_count(&self) -> usize {
        self.unfilled.len()
    }

    /// Number of shifts the run visited (assigned + unfilled).
    pub fn shift_total(&self) -> usize {
        self.assignments.len() + self.unfilled.len()
    }

    /// Whether every visited shift was staffed.
    pub fn is_fully_covered(&self) -> bool {
        self.unfilled.is_empty()
    }
}

/// A constraint breach found by the compliance audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Doctor in breach.
    pub doctor_id: String,
    /// Doctor display name.
    pub doctor_name: String,
    /// What was breached.
    #[serde(flatten)]
    pub kind: ViolationKind,
}

/// Classification of constraint breaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViolationKind {
    /// More shifts in a week than allowed.
    MaxShiftsPerWeek {
        /// Sunday the week starts on.
        week: NaiveDate,
        count: u32,
        limit: u32,
    },
    /// More night shifts in a week than allowed.
    MaxNightShiftsPerWeek {
        /// Sunday the week starts on.
        week: NaiveDate,
        count: u32,
        limit: u32,
    },
    /// Two date-adjacent shifts closer than the minimum rest.
    MinRestHours {
        #[serde(rename = "shift1")]
        first: Assignment,
        #[serde(rename = "shift2")]
        second: Assignment,
        #[serde(rename = "hoursBetween")]
        hours_between: f64,
        limit: f64,
    },
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        doctor_id: impl Into<String>,
        doctor_name: impl Into<String>,
        kind: ViolationKind,
    ) -> Self {
        Self {
            doctor_id: doctor_id.into(),
            doctor_name: doctor_name.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::MaxShiftsPerWeek { week, count, limit } => write!(
                f,
                "doctor '{}' has {count} shifts in week of {week} (limit {limit})",
                self.doctor_id
            ),
            ViolationKind::MaxNightShiftsPerWeek { week, count, limit } => write!(
                f,
                "doctor '{}' has {count} night shifts in week of {week} (limit {limit})",
                self.doctor_id
            ),
            ViolationKind::MinRestHours {
                first,
                second,
                hours_between,
                limit,
            } => write!(
                f,
                "doctor '{}' rests {hours_between}h between '{}' and '{}' (minimum {limit}h)",
                self.doctor_id, first.shift_id, second.shift_id
            ),
        }
    }
}
