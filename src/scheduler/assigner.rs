//! Schedule mutation.
//!
//! The only code allowed to change a [`ScheduleState`]: committing a
//! doctor to a shift, or recording a shift as unfilled.

use crate::models::{Assignment, Doctor, ScheduleState, Shift, ShiftKind};

/// Commits decisions into a schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assigner;

impl Assigner {
    /// Assigns `doctor` to `shift` and updates the doctor's counters.
    ///
    /// Performs no eligibility check; callers decide who is assigned.
    pub fn assign<'s>(state: &'s mut ScheduleState, shift: &Shift, doctor: &Doctor) -> &'s Assignment {
        let assignment = Assignment::new(&shift.id, &doctor.id, shift.date, shift.kind)
            .with_doctor_name(&doctor.name);

        state
            .doctor_assignments
            .entry(doctor.id.clone())
            .or_default()
            .push(assignment.clone());

        let counts = state.shift_counts.entry(doctor.id.clone()).or_default();
        counts.total += 1;
        match shift.kind {
            ShiftKind::Day => counts.day += 1,
            ShiftKind::Night => counts.night += 1,
        }
        if shift.is_weekend() {
            counts.weekend += 1;
        }

        state.assignments.push(assignment);
        &state.assignments[state.assignments.len() - 1]
    }

    /// Records that no doctor could take `shift`.
    pub fn leave_unfilled(state: &mut ScheduleState, shift: &Shift) {
        state.unfilled.push(shift.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftCounts;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_assign_updates_every_view() {
        let doctor = Doctor::new("D1").with_name("Dr. Ana");
        let mut state = ScheduleState::new();

        let a = Assigner::assign(&mut state, &Shift::night("S1", date(8)), &doctor);
        assert_eq!(a.shift_id, "S1");
        assert_eq!(a.doctor_name, "Dr. Ana");

        assert_eq!(state.assignment_count(), 1);
        assert_eq!(state.assignments_for("D1").len(), 1);
        assert_eq!(
            state.counts_for("D1"),
            ShiftCounts {
                total: 1,
                day: 0,
                night: 1,
                weekend: 0
            }
        );
    }

    #[test]
    fn test_weekend_counter() {
        let doctor = Doctor::new("D1");
        let mut state = ScheduleState::new();

        Assigner::assign(&mut state, &Shift::day("S1", date(6)), &doctor); // Sat
        Assigner::assign(&mut state, &Shift::night("S2", date(7)), &doctor); // Sun
        Assigner::assign(&mut state, &Shift::day("S3", date(8)), &doctor); // Mon

        let counts = state.counts_for("D1");
        assert_eq!(counts.total, 3);
        assert_eq!(counts.day, 2);
        assert_eq!(counts.night, 1);
        assert_eq!(counts.weekend, 2);
    }

    #[test]
    fn test_doctor_history_keeps_commit_order() {
        let doctor = Doctor::new("D1");
        let mut state = ScheduleState::new();

        Assigner::assign(&mut state, &Shift::day("late", date(20)), &doctor);
        Assigner::assign(&mut state, &Shift::day("early", date(2)), &doctor);

        let history: Vec<_> = state
            .assignments_for("D1")
            .iter()
            .map(|a| a.shift_id.as_str())
            .collect();
        assert_eq!(history, vec!["late", "early"]);
    }

    #[test]
    fn test_leave_unfilled() {
        let mut state = ScheduleState::new();
        Assigner::leave_unfilled(&mut state, &Shift::night("S1", date(8)));

        assert_eq!(state.unfilled_count(), 1);
        assert_eq!(state.shift_total(), 1);
        assert!(!state.is_fully_covered());
        assert!(state.shift_counts().is_empty());
    }
}
