//! Post-hoc compliance audit.
//!
//! Re-derives weekly counts and rest gaps from a finished assignment list,
//! independently of how the schedule was built. Reports breaches without
//! touching the schedule.
//!
//! - Weekly shifts and weekly night shifts: a Sunday-start week holding
//!   more than the limit is a breach.
//! - Minimum rest: per doctor, assignments are sorted by date and each
//!   consecutive pair closer than the limit is a breach.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::calendar::{self, Week};
use crate::models::{Assignment, Constraints, Doctor, ScheduleState, Violation, ViolationKind};

/// Outcome of a compliance audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// `true` iff no violation was found.
    pub valid: bool,
    pub violations: Vec<Violation>,
}

impl ComplianceReport {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }

    /// Number of violations.
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Violations of one doctor.
    pub fn for_doctor<'a>(&'a self, doctor_id: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.doctor_id == doctor_id)
    }
}

/// Audits `state` against `constraints` for every roster doctor.
///
/// Doctors are visited in roster order; assignments to doctors outside the
/// roster are ignored.
pub fn audit(state: &ScheduleState, doctors: &[Doctor], constraints: &Constraints) -> ComplianceReport {
    let mut violations = Vec::new();

    for doctor in doctors {
        let assignments: Vec<&Assignment> = state
            .assignments()
            .iter()
            .filter(|a| a.doctor_id == doctor.id)
            .collect();
        if assignments.is_empty() {
            continue;
        }

        weekly_violations(doctor, &assignments, constraints, &mut violations);
        rest_violations(doctor, &assignments, constraints, &mut violations);
    }

    ComplianceReport::from_violations(violations)
}

fn weekly_violations(
    doctor: &Doctor,
    assignments: &[&Assignment],
    constraints: &Constraints,
    out: &mut Vec<Violation>,
) {
    let mut per_week: BTreeMap<Week, (u32, u32)> = BTreeMap::new();
    for a in assignments {
        let entry = per_week.entry(Week::containing(a.date)).or_default();
        entry.0 += 1;
        if a.kind.is_night() {
            entry.1 += 1;
        }
    }

    for (week, (total, nights)) in per_week {
        if let Some(limit) = constraints.max_shifts_per_week {
            if total > limit {
                out.push(Violation::new(
                    &doctor.id,
                    &doctor.name,
                    ViolationKind::MaxShiftsPerWeek {
                        week: week.start(),
                        count: total,
                        limit,
                    },
                ));
            }
        }
        if let Some(limit) = constraints.max_night_shifts_per_week {
            if nights > limit {
                out.push(Violation::new(
                    &doctor.id,
                    &doctor.name,
                    ViolationKind::MaxNightShiftsPerWeek {
                        week: week.start(),
                        count: nights,
                        limit,
                    },
                ));
            }
        }
    }
}

fn rest_violations(
    doctor: &Doctor,
    assignments: &[&Assignment],
    constraints: &Constraints,
    out: &mut Vec<Violation>,
) {
    let Some(limit) = constraints.min_rest_hours else {
        return;
    };

    let mut sorted = assignments.to_vec();
    sorted.sort_by_key(|a| a.date);

    for pair in sorted.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        let hours = calendar::hours_between(first.date, second.date);
        if hours < limit {
            out.push(Violation::new(
                &doctor.id,
                &doctor.name,
                ViolationKind::MinRestHours {
                    first: first.clone(),
                    second: second.clone(),
                    hours_between: hours,
                    limit,
                },
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Shift, ShiftKind};
    use crate::scheduler::Assigner;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn state_with(doctor: &Doctor, shifts: &[Shift]) -> ScheduleState {
        let mut state = ScheduleState::new();
        for shift in shifts {
            Assigner::assign(&mut state, shift, doctor);
        }
        state
    }

    #[test]
    fn test_empty_schedule_is_valid() {
        let report = audit(&ScheduleState::new(), &[Doctor::new("A")], &Constraints::conventional());
        assert!(report.valid);
        assert_eq!(report.violation_count(), 0);
    }

    #[test]
    fn test_weekly_limit_exceeded() {
        let a = Doctor::new("A").with_name("Ana");
        // Sun 7 .. Sat 13 is one week
        let shifts: Vec<_> = (7..=10).map(|d| Shift::day(format!("S{d}"), date(d))).collect();
        let state = state_with(&a, &shifts);

        let constraints = Constraints::unrestricted().with_max_shifts_per_week(3);
        let report = audit(&state, &[a], &constraints);

        assert!(!report.valid);
        assert_eq!(
            report.violations,
            vec![Violation::new(
                "A",
                "Ana",
                ViolationKind::MaxShiftsPerWeek {
                    week: date(7),
                    count: 4,
                    limit: 3
                }
            )]
        );
    }

    #[test]
    fn test_weekly_limit_met_exactly_is_valid() {
        let a = Doctor::new("A");
        let shifts: Vec<_> = (7..=9).map(|d| Shift::day(format!("S{d}"), date(d))).collect();
        let state = state_with(&a, &shifts);

        let constraints = Constraints::unrestricted().with_max_shifts_per_week(3);
        assert!(audit(&state, &[a], &constraints).valid);
    }

    #[test]
    fn test_week_boundary_is_sunday() {
        let a = Doctor::new("A");
        // Fri 12, Sat 13 | Sun 14, Mon 15
        let shifts: Vec<_> = (12..=15).map(|d| Shift::night(format!("S{d}"), date(d))).collect();
        let state = state_with(&a, &shifts);

        let constraints = Constraints::unrestricted().with_max_night_shifts_per_week(2);
        assert!(audit(&state, &[a.clone()], &constraints).valid);

        let tighter = Constraints::unrestricted().with_max_night_shifts_per_week(1);
        let report = audit(&state, &[a], &tighter);
        let weeks: Vec<_> = report
            .violations
            .iter()
            .map(|v| match v.kind {
                ViolationKind::MaxNightShiftsPerWeek { week, .. } => week,
                _ => panic!("unexpected violation {v}"),
            })
            .collect();
        assert_eq!(weeks, vec![date(7), date(14)]);
    }

    #[test]
    fn test_rest_checks_adjacent_pairs_only() {
        let a = Doctor::new("A");
        // committed out of date order
        let state = state_with(
            &a,
            &[
                Shift::day("S10", date(10)),
                Shift::day("S8", date(8)),
                Shift::night("S9", date(9)),
            ],
        );

        // 24h between each adjacent pair; 48h between 8 and 10 is never checked
        let constraints = Constraints::unrestricted().with_min_rest_hours(36.0);
        let report = audit(&state, &[a], &constraints);

        assert_eq!(report.violation_count(), 2);
        match &report.violations[0].kind {
            ViolationKind::MinRestHours {
                first,
                second,
                hours_between,
                limit,
            } => {
                assert_eq!(first.shift_id, "S8");
                assert_eq!(second.shift_id, "S9");
                assert_eq!(*hours_between, 24.0);
                assert_eq!(*limit, 36.0);
            }
            other => panic!("unexpected violation {other:?}"),
        }
    }

    #[test]
    fn test_same_day_pair_has_zero_rest() {
        let a = Doctor::new("A");
        let state = state_with(&a, &[Shift::day("D", date(8)), Shift::night("N", date(8))]);

        let report = audit(&state, &[a], &Constraints::unrestricted().with_min_rest_hours(12.0));
        assert_eq!(report.violation_count(), 1);
        assert!(matches!(
            report.violations[0].kind,
            ViolationKind::MinRestHours { hours_between, .. } if hours_between == 0.0
        ));
    }

    #[test]
    fn test_unrestricted_never_flags() {
        let a = Doctor::new("A");
        let shifts: Vec<_> = (1..=20)
            .map(|d| Shift::new(format!("S{d}"), date(d), ShiftKind::Night))
            .collect();
        let state = state_with(&a, &shifts);
        assert!(audit(&state, &[a], &Constraints::unrestricted()).valid);
    }

    #[test]
    fn test_audit_at_calendar_end() {
        let a = Doctor::new("A");
        let last = NaiveDate::MAX;
        let state = state_with(
            &a,
            &[Shift::day("S1", last.pred_opt().unwrap()), Shift::day("S2", last)],
        );

        let constraints = Constraints::unrestricted()
            .with_max_shifts_per_week(1)
            .with_min_rest_hours(12.0);
        let report = audit(&state, &[a], &constraints);
        assert_eq!(report.violation_count(), 1);
        assert!(matches!(
            report.violations[0].kind,
            ViolationKind::MaxShiftsPerWeek { count: 2, .. }
        ));
    }

    #[test]
    fn test_ignores_doctors_outside_roster() {
        let ghost = Doctor::new("ghost");
        let shifts: Vec<_> = (7..=12).map(|d| Shift::day(format!("S{d}"), date(d))).collect();
        let state = state_with(&ghost, &shifts);

        let constraints = Constraints::unrestricted().with_max_shifts_per_week(1);
        assert!(audit(&state, &[Doctor::new("A")], &constraints).valid);
    }

    #[test]
    fn test_report_json_shape() {
        let a = Doctor::new("A").with_name("Ana");
        let state = state_with(&a, &[Shift::day("S1", date(8)), Shift::day("S2", date(9))]);
        let report = audit(&state, &[a], &Constraints::unrestricted().with_min_rest_hours(48.0));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid"], false);
        let v = &json["violations"][0];
        assert_eq!(v["type"], "minRestHours");
        assert_eq!(v["doctorName"], "Ana");
        assert_eq!(v["shift1"]["shiftId"], "S1");
        assert_eq!(v["hoursBetween"], 24.0);
    }

    #[test]
    fn test_for_doctor_filter() {
        let a = Doctor::new("A");
        let b = Doctor::new("B");
        let mut state = ScheduleState::new();
        Assigner::assign(&mut state, &Shift::day("S1", date(8)), &a);
        Assigner::assign(&mut state, &Shift::day("S2", date(9)), &a);
        Assigner::assign(&mut state, &Shift::day("S3", date(8)), &b);

        let constraints = Constraints::unrestricted().with_max_shifts_per_week(1);
        let report = audit(&state, &[a, b], &constraints);
        assert_eq!(report.for_doctor("A").count(), 1);
        assert_eq!(report.for_doctor("B").count(), 0);
    }
}
