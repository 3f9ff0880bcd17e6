//! Shift generation, greedy assignment, statistics and compliance audit.
//!
//! # Pipeline
//!
//! `ShiftGenerator` expands a date range into shifts. `ShiftScheduler`
//! walks the shifts once in priority order, narrows the roster through
//! the eligibility gates, ranks the survivors and commits the best one
//! through the `Assigner`. `ScheduleStatistics` and the compliance audit
//! then run once over the final state.
//!
//! # Entry Points
//!
//! - [`generate_schedule`]: build a schedule
//! - [`validate_schedule`]: audit a finished schedule

mod assigner;
mod compliance;
mod generator;
mod greedy;
mod statistics;

pub use assigner::Assigner;
pub use compliance::ComplianceReport;
pub use generator::{parse_date, ShiftGenerator, DATE_FORMAT};
pub use greedy::{processing_order, ScheduleOutcome, ScheduleRequest, ShiftScheduler};
pub use statistics::{DoctorStatistics, ScheduleStatistics, ShiftTypeDistribution};

use crate::error::ScheduleError;
use crate::models::{Constraints, Doctor, PerformanceRecord, ScheduleState, Shift};

/// Builds a schedule with the standard ranking chain.
///
/// Absent constraint thresholds disable their rule.
pub fn generate_schedule(
    doctors: &[Doctor],
    shifts: &[Shift],
    performance: &[PerformanceRecord],
    constraints: &Constraints,
) -> Result<ScheduleOutcome, ScheduleError> {
    ShiftScheduler::new().schedule(doctors, shifts, performance, constraints)
}

/// Audits a finished schedule for weekly-count and rest violations.
///
/// Never fails and never modifies the schedule.
pub fn validate_schedule(
    schedule: &ScheduleState,
    doctors: &[Doctor],
    constraints: &Constraints,
) -> ComplianceReport {
    compliance::audit(schedule, doctors, constraints)
}
