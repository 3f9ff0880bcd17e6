//! Duty-roster domain models.
//!
//! Plain data shapes shared by every engine component. Inputs (doctors,
//! shifts, performance history, constraints) are never mutated by the
//! engine; the [`ScheduleState`] is the only evolving value.
//!
//! # Domain Mappings
//!
//! | icu-roster | Meaning |
//! |------------|---------|
//! | Doctor | Staff member with qualifications and weekly grids |
//! | Shift | One day or night duty on a calendar date |
//! | PerformanceRecord | Past month of expected vs. actual shifts |
//! | Constraints | Optional workload limits |
//! | ScheduleState | Assignments, per-doctor load, unfilled shifts |

pub mod calendar;
mod constraint;
mod doctor;
mod performance;
mod schedule;
mod shift;

pub use calendar::{DateRange, Week};
pub use constraint::Constraints;
pub use doctor::{Doctor, Qualification, WeeklyGrid};
pub use performance::{PerformanceLedger, PerformanceRecord};
pub use schedule::{Assignment, ScheduleState, ShiftCounts, Violation, ViolationKind};
pub use shift::{Shift, ShiftKind, ShiftRequirements};
