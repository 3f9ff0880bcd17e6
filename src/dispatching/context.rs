//! Ranking context for rule evaluation.

use crate::models::{PerformanceLedger, ScheduleState, Shift};

/// Read-only view handed to ranking rules.
///
/// Holds the shift being staffed, the schedule built so far, and the
/// historical balance of every doctor.
#[derive(Debug, Clone, Copy)]
pub struct RankingContext<'a> {
    /// Shift being staffed.
    pub shift: &'a Shift,
    /// Assignments committed so far in this run.
    pub state: &'a ScheduleState,
    /// Expected-minus-actual history per doctor.
    pub ledger: &'a PerformanceLedger,
}

impl<'a> RankingContext<'a> {
    /// Creates a context for one shift.
    pub fn new(shift: &'a Shift, state: &'a ScheduleState, ledger: &'a PerformanceLedger) -> Self {
        Self {
            shift,
            state,
            ledger,
        }
    }
}
