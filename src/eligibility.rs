//! Hard eligibility gates.
//!
//! Decides whether a doctor may take a shift given the partial schedule
//! built so far. A doctor is eligible iff every gate passes:
//!
//! 1. **Availability**: a declared `false` for the weekday × kind blocks.
//! 2. **Same-day conflict**: at most one shift per calendar date.
//! 3. **Qualification**: every flag the shift requires is held.
//! 4. **Constraints**: consecutive run, weekly shifts, weekly nights,
//!    minimum rest. Only thresholds that are set are checked.
//!
//! Gates run in that order and [`EligibilityFilter::is_eligible`] stops at
//! the first rejection. [`EligibilityFilter::explain`] reports all of them.

use chrono::{Duration, NaiveDate};
use std::fmt;
use std::iter;

use crate::models::calendar::{self, Week};
use crate::models::{Assignment, Constraints, Doctor, Qualification, ScheduleState, Shift, ShiftKind};

/// How far back the consecutive-run scan looks (days).
pub const CONSECUTIVE_LOOKBACK_DAYS: u32 = 7;

/// Why a doctor cannot take a shift.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// Declared unavailable for this weekday and shift kind.
    Unavailable { day_index: u8, kind: ShiftKind },
    /// Already holds another shift on the same date.
    SameDayConflict { shift_id: String },
    /// Lacks a qualification the shift requires.
    MissingQualification(Qualification),
    /// Unbroken run of duty days right before the shift reached the limit.
    ConsecutiveLimit { run: u32, limit: u32 },
    /// Weekly shift count reached the limit.
    WeeklyLimit { week: Week, count: u32, limit: u32 },
    /// Weekly night-shift count reached the limit.
    WeeklyNightLimit { week: Week, count: u32, limit: u32 },
    /// An existing assignment is closer than the minimum rest.
    InsufficientRest {
        shift_id: String,
        hours: f64,
        limit: f64,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Unavailable { day_index, kind } => {
                write!(f, "unavailable on day {day_index} ({kind})")
            }
            Rejection::SameDayConflict { shift_id } => {
                write!(f, "already assigned to '{shift_id}' that day")
            }
            Rejection::MissingQualification(q) => write!(f, "lacks {q}"),
            Rejection::ConsecutiveLimit { run, limit } => {
                write!(f, "{run} consecutive duty days (limit {limit})")
            }
            Rejection::WeeklyLimit { week, count, limit } => {
                write!(f, "{count} shifts in week {week} (limit {limit})")
            }
            Rejection::WeeklyNightLimit { week, count, limit } => {
                write!(f, "{count} night shifts in week {week} (limit {limit})")
            }
            Rejection::InsufficientRest {
                shift_id,
                hours,
                limit,
            } => write!(f, "only {hours}h from '{shift_id}' (minimum {limit}h)"),
        }
    }
}

/// Eligibility gate bound to one constraint set.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityFilter<'c> {
    constraints: &'c Constraints,
}

impl<'c> EligibilityFilter<'c> {
    /// Creates a filter enforcing `constraints`.
    pub fn new(constraints: &'c Constraints) -> Self {
        Self { constraints }
    }

    /// Whether `doctor` may take `shift` given `state`.
    pub fn is_eligible(&self, doctor: &Doctor, shift: &Shift, state: &ScheduleState) -> bool {
        self.rejections(doctor, shift, state).next().is_none()
    }

    /// Every reason `doctor` cannot take `shift`; empty when eligible.
    pub fn explain(&self, doctor: &Doctor, shift: &Shift, state: &ScheduleState) -> Vec<Rejection> {
        self.rejections(doctor, shift, state).collect()
    }

    /// Eligible doctors for `shift`, in roster order.
    pub fn eligible<'d>(
        &self,
        doctors: &'d [Doctor],
        shift: &Shift,
        state: &ScheduleState,
    ) -> Vec<&'d Doctor> {
        doctors
            .iter()
            .filter(|doctor| self.is_eligible(doctor, shift, state))
            .collect()
    }

    /// Lazily evaluated gate chain.
    fn rejections<'a>(
        &'a self,
        doctor: &'a Doctor,
        shift: &'a Shift,
        state: &'a ScheduleState,
    ) -> impl Iterator<Item = Rejection> + 'a {
        let history = state.assignments_for(&doctor.id);

        iter::once_with(move || availability(doctor, shift))
            .flatten()
            .chain(iter::once_with(move || same_day_conflict(history, shift)).flatten())
            .chain(
                iter::once_with(move || {
                    doctor
                        .missing_qualifications(&shift.requirements)
                        .into_iter()
                        .map(Rejection::MissingQualification)
                })
                .flatten(),
            )
            .chain(iter::once_with(move || self.consecutive_limit(history, shift)).flatten())
            .chain(iter::once_with(move || self.weekly_limit(history, shift)).flatten())
            .chain(iter::once_with(move || self.weekly_night_limit(history, shift)).flatten())
            .chain(iter::once_with(move || self.rest_limit(history, shift)).flatten())
    }

    fn consecutive_limit(&self, history: &[Assignment], shift: &Shift) -> Option<Rejection> {
        let limit = self.constraints.max_consecutive_shifts?;
        let run = consecutive_run_before(history, shift.date);
        (run >= limit).then_some(Rejection::ConsecutiveLimit { run, limit })
    }

    fn weekly_limit(&self, history: &[Assignment], shift: &Shift) -> Option<Rejection> {
        let limit = self.constraints.max_shifts_per_week?;
        let week = Week::containing(shift.date);
        let count = count_in_week(history, week, None);
        (count >= limit).then_some(Rejection::WeeklyLimit { week, count, limit })
    }

    fn weekly_night_limit(&self, history: &[Assignment], shift: &Shift) -> Option<Rejection> {
        if !shift.kind.is_night() {
            return None;
        }
        let limit = self.constraints.max_night_shifts_per_week?;
        let week = Week::containing(shift.date);
        let count = count_in_week(history, week, Some(ShiftKind::Night));
        (count >= limit).then_some(Rejection::WeeklyNightLimit { week, count, limit })
    }

    // Compares against every existing assignment, not only the nearest one.
    fn rest_limit(&self, history: &[Assignment], shift: &Shift) -> Option<Rejection> {
        let limit = self.constraints.min_rest_hours?;
        history.iter().find_map(|a| {
            let hours = calendar::hours_between(a.date, shift.date).abs();
            (hours < limit).then(|| Rejection::InsufficientRest {
                shift_id: a.shift_id.clone(),
                hours,
                limit,
            })
        })
    }
}

fn availability(doctor: &Doctor, shift: &Shift) -> Option<Rejection> {
    (!doctor.is_available(shift.date, shift.kind)).then(|| Rejection::Unavailable {
        day_index: shift.day_index(),
        kind: shift.kind,
    })
}

fn same_day_conflict(history: &[Assignment], shift: &Shift) -> Option<Rejection> {
    history
        .iter()
        .find(|a| a.date == shift.date)
        .map(|a| Rejection::SameDayConflict {
            shift_id: a.shift_id.clone(),
        })
}

/// Length of the unbroken run of duty days immediately before `date`.
///
/// Scans back at most [`CONSECUTIVE_LOOKBACK_DAYS`] days and stops at the
/// first day without an assignment or at the start of chrono's range.
pub fn consecutive_run_before(history: &[Assignment], date: NaiveDate) -> u32 {
    (1..=CONSECUTIVE_LOOKBACK_DAYS)
        .map_while(|back| date.checked_sub_signed(Duration::days(back as i64)))
        .take_while(|day| history.iter().any(|a| a.date == *day))
        .count() as u32
}

/// Assignments inside `week`, optionally restricted to one shift kind.
pub fn count_in_week(history: &[Assignment], week: Week, kind: Option<ShiftKind>) -> u32 {
    history
        .iter()
        .filter(|a| week.contains(a.date))
        .filter(|a| kind.map_or(true, |k| a.kind == k))
        .count() as u32
}
