//! Schedule statistics.
//!
//! Coverage and workload distribution computed from a finished schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Coverage rate | assigned / (assigned + unfilled), 0 when both are empty |
//! | Per-doctor counts | total, day, night, weekend for every roster doctor |
//! | Shift type distribution | day, night, weekend summed across doctors |
//! | Load spread | max − min total among roster doctors |

use serde::{Deserialize, Serialize};

use crate::models::{Doctor, ScheduleState};

/// Workload of one doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorStatistics {
    pub doctor_id: String,
    pub name: String,
    pub total_shifts: u32,
    pub day_shifts: u32,
    pub night_shifts: u32,
    pub weekend_shifts: u32,
}

/// Shift-type totals across the whole schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTypeDistribution {
    pub day: u32,
    pub night: u32,
    pub weekend: u32,
}

/// Coverage and fairness indicators of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStatistics {
    /// Assigned shifts.
    pub total_shifts: usize,
    /// Shifts nobody could take.
    pub unfilled_shifts: usize,
    /// Fraction of required shifts filled (0.0..=1.0).
    pub coverage_rate: f64,
    /// One entry per roster doctor, in roster order.
    pub doctor_stats: Vec<DoctorStatistics>,
    pub shift_type_distribution: ShiftTypeDistribution,
}

impl ScheduleStatistics {
    /// Computes statistics for `state` over the roster `doctors`.
    ///
    /// Doctors without assignments are listed with zero counts. The
    /// distribution sums the schedule's own counters, so assignments to
    /// doctors outside the roster are still counted there.
    pub fn calculate(state: &ScheduleState, doctors: &[Doctor]) -> Self {
        let assigned = state.assignment_count();
        let unfilled = state.unfilled_count();
        let required = assigned + unfilled;

        let coverage_rate = if required == 0 {
            0.0
        } else {
            assigned as f64 / required as f64
        };

        let doctor_stats = doctors
            .iter()
            .map(|doctor| {
                let counts = state.counts_for(&doctor.id);
                DoctorStatistics {
                    doctor_id: doctor.id.clone(),
                    name: doctor.name.clone(),
                    total_shifts: counts.total,
                    day_shifts: counts.day,
                    night_shifts: counts.night,
                    weekend_shifts: counts.weekend,
                }
            })
            .collect();

        let shift_type_distribution = state.shift_counts().values().fold(
            ShiftTypeDistribution::default(),
            |acc, counts| ShiftTypeDistribution {
                day: acc.day + counts.day,
                night: acc.night + counts.night,
                weekend: acc.weekend + counts.weekend,
            },
        );

        Self {
            total_shifts: assigned,
            unfilled_shifts: unfilled,
            coverage_rate,
            doctor_stats,
            shift_type_distribution,
        }
    }

    /// Difference between the busiest and the idlest roster doctor.
    ///
    /// 0 for an empty roster.
    pub fn load_spread(&self) -> u32 {
        let totals = self.doctor_stats.iter().map(|s| s.total_shifts);
        match (totals.clone().max(), totals.min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }

    /// Statistics of one doctor.
    pub fn for_doctor(&self, doctor_id: &str) -> Option<&DoctorStatistics> {
        self.doctor_stats.iter().find(|s| s.doctor_id == doctor_id)
    }

    /// Whether coverage reaches `min_rate` and the spread stays within
    /// `max_spread`.
    pub fn meets_thresholds(&self, min_rate: f64, max_spread: u32) -> bool {
        self.coverage_rate >= min_rate && self.load_spread() <= max_spread
    }
}
