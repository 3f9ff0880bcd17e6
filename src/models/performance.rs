//! Historical workload ledger.
//!
//! Performance records state how many shifts a doctor was expected to
//! work in a past month and how many they actually worked. The engine
//! only reads them to derive a fairness balance.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One month of expected vs. actual shifts for a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    /// Doctor the record belongs to.
    pub doctor_id: String,
    /// Calendar month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Shifts the doctor was expected to cover.
    pub expected_shifts: i64,
    /// Shifts the doctor actually covered.
    pub actual_shifts: i64,
}

impl PerformanceRecord {
    /// Creates a record.
    pub fn new(
        doctor_id: impl Into<String>,
        year: i32,
        month: u32,
        expected_shifts: i64,
        actual_shifts: i64,
    ) -> Self {
        Self {
            doctor_id: doctor_id.into(),
            month,
            year,
            expected_shifts,
            actual_shifts,
        }
    }

    /// Expected minus actual for this record.
    #[inline]
    pub fn balance(&self) -> i64 {
        self.expected_shifts - self.actual_shifts
    }
}

/// Per-doctor balance aggregated over all records.
///
/// A positive balance means the doctor is owed shifts.
#[derive(Debug, Clone, Default)]
pub struct PerformanceLedger {
    balances: HashMap<String, i64>,
}

impl PerformanceLedger {
    /// Sums `expected - actual` per doctor.
    pub fn from_records(records: &[PerformanceRecord]) -> Self {
        let mut balances: HashMap<String, i64> = HashMap::new();
        for record in records {
            *balances.entry(record.doctor_id.clone()).or_insert(0) += record.balance();
        }
        Self { balances }
    }

    /// Balance for a doctor; 0 when there is no history.
    pub fn balance(&self, doctor_id: &str) -> i64 {
        self.balances.get(doctor_id).copied().unwrap_or(0)
    }

    /// Number of doctors with history.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Whether no history was recorded.
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}
