//! Greedy shift scheduler.
//!
//! # Algorithm
//!
//! 1. Validate the input; ill-formed input fails before any shift is
//!    processed.
//! 2. Order shifts: date ascending, weekend first, night before day.
//!    Ties keep input order.
//! 3. For each shift, filter the roster through the eligibility gates
//!    against the schedule built so far.
//! 4. Rank survivors with the rule engine and commit the first one, or
//!    record the shift as unfilled.
//!
//! Every shift is visited exactly once and no decision is revisited, so a
//! shift may stay unfilled even when a different earlier choice would
//! have covered it.
//!
//! # Complexity
//! O(s · d · (a + r)) where s=shifts, d=doctors, a=assignments per doctor,
//! r=ranking rules.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::generator::ShiftGenerator;
use super::statistics::ScheduleStatistics;
use super::Assigner;
use crate::dispatching::{RankingContext, RuleEngine};
use crate::eligibility::EligibilityFilter;
use crate::error::ScheduleError;
use crate::models::{
    Constraints, Doctor, PerformanceLedger, PerformanceRecord, ScheduleState, Shift,
};
use crate::validation::validate_input;

/// Input container for one schedule run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Roster; its order is the final tie-break.
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    /// Shifts to staff.
    #[serde(default)]
    pub shifts: Vec<Shift>,
    /// Historical workload ledger.
    #[serde(default)]
    pub performance: Vec<PerformanceRecord>,
    /// Absent thresholds disable their rule.
    #[serde(default)]
    pub constraints: Constraints,
}

impl ScheduleRequest {
    /// Creates a request with no history and no constraints.
    pub fn new(doctors: Vec<Doctor>, shifts: Vec<Shift>) -> Self {
        Self {
            doctors,
            shifts,
            performance: Vec::new(),
            constraints: Constraints::unrestricted(),
        }
    }

    /// Creates a request whose shifts are generated for `start..=end`.
    pub fn for_date_range(
        doctors: Vec<Doctor>,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    ) -> Result<Self, ScheduleError> {
        let shifts = ShiftGenerator::new(start, end)?.generate();
        Ok(Self::new(doctors, shifts))
    }

    /// Sets the performance history.
    pub fn with_performance(mut self, performance: Vec<PerformanceRecord>) -> Self {
        self.performance = performance;
        self
    }

    /// Sets the constraints.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }
}

/// Result of one schedule run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleOutcome {
    /// Final schedule state.
    pub schedule: ScheduleState,
    pub statistics: ScheduleStatistics,
    /// Shifts no eligible doctor could take, in processing order.
    pub unfilled: Vec<Shift>,
}

/// Greedy, single-pass shift scheduler.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use icu_roster::models::Doctor;
/// use icu_roster::scheduler::{ScheduleRequest, ShiftScheduler};
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
/// let doctors = vec![Doctor::new("D1").with_temi(true), Doctor::new("D2").with_temi(true)];
/// let request = ScheduleRequest::for_date_range(doctors, day, day).unwrap();
///
/// let outcome = ShiftScheduler::new().generate(&request).unwrap();
/// assert_eq!(outcome.schedule.assignment_count(), 2);
/// assert!(outcome.unfilled.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ShiftScheduler {
    rule_engine: RuleEngine,
}

impl ShiftScheduler {
    /// Creates a scheduler ranking with the standard chain.
    pub fn new() -> Self {
        Self {
            rule_engine: RuleEngine::standard(),
        }
    }

    /// Replaces the ranking chain.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Schedules from a request.
    pub fn generate(&self, request: &ScheduleRequest) -> Result<ScheduleOutcome, ScheduleError> {
        self.schedule(
            &request.doctors,
            &request.shifts,
            &request.performance,
            &request.constraints,
        )
    }

    /// Assigns doctors to shifts.
    pub fn schedule(
        &self,
        doctors: &[Doctor],
        shifts: &[Shift],
        performance: &[PerformanceRecord],
        constraints: &Constraints,
    ) -> Result<ScheduleOutcome, ScheduleError> {
        validate_input(doctors, shifts, constraints).map_err(ScheduleError::InvalidInput)?;

        info!(
            doctors = doctors.len(),
            shifts = shifts.len(),
            records = performance.len(),
            "generating schedule"
        );

        let ledger = PerformanceLedger::from_records(performance);
        let filter = EligibilityFilter::new(constraints);
        let mut state = ScheduleState::new();

        for index in processing_order(shifts) {
            let shift = &shifts[index];
            let candidates = filter.eligible(doctors, shift, &state);

            let context = RankingContext::new(shift, &state, &ledger);
            let ranked = self.rule_engine.sort_indices(&candidates, &context);
            if tracing::enabled!(tracing::Level::TRACE) {
                for &i in &ranked {
                    trace!(
                        shift_id = %shift.id,
                        doctor_id = %candidates[i].id,
                        scores = ?self.rule_engine.evaluate(candidates[i], &context),
                        "ranked candidate"
                    );
                }
            }

            match ranked.first() {
                Some(&best) => {
                    let doctor = candidates[best];
                    let assignment = Assigner::assign(&mut state, shift, doctor);
                    debug!(
                        shift_id = %assignment.shift_id,
                        doctor_id = %assignment.doctor_id,
                        date = %assignment.date,
                        kind = %assignment.kind,
                        candidates = candidates.len(),
                        "shift assigned"
                    );
                }
                None => {
                    warn!(
                        shift_id = %shift.id,
                        date = %shift.date,
                        kind = %shift.kind,
                        reasons = %rejection_summary(&filter, doctors, shift, &state),
                        "no eligible doctor, shift left unfilled"
                    );
                    Assigner::leave_unfilled(&mut state, shift);
                }
            }
        }

        let statistics = ScheduleStatistics::calculate(&state, doctors);
        info!(
            assigned = statistics.total_shifts,
            unfilled = statistics.unfilled_shifts,
            coverage = statistics.coverage_rate,
            "schedule generated"
        );

        Ok(ScheduleOutcome {
            unfilled: state.unfilled().to_vec(),
            schedule: state,
            statistics,
        })
    }
}

impl Default for ShiftScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Indices of `shifts` in processing order.
///
/// Date ascending, then weekend before weekday, then night before day.
/// The sort is stable.
pub fn processing_order(shifts: &[Shift]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..shifts.len()).collect();
    order.sort_by_key(|&i| {
        let shift = &shifts[i];
        (
            shift.date,
            Reverse(shift.is_weekend()),
            Reverse(shift.kind.staffing_priority()),
        )
    });
    order
}

fn rejection_summary(
    filter: &EligibilityFilter<'_>,
    doctors: &[Doctor],
    shift: &Shift,
    state: &ScheduleState,
) -> String {
    if doctors.is_empty() {
        return "empty roster".to_string();
    }
    doctors
        .iter()
        .map(|doctor| {
            let reasons: Vec<String> = filter
                .explain(doctor, shift, state)
                .iter()
                .map(ToString::to_string)
                .collect();
            format!("{}: {}", doctor.id, reasons.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
