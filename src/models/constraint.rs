//! Workload constraints.
//!
//! Every threshold is optional. An absent threshold disables its rule;
//! the engine never substitutes a default. The conventional unit policy
//! (3 consecutive days, 5 shifts and 3 nights per week, 12 h rest) is a
//! caller choice exposed through [`Constraints::conventional`].

use serde::{Deserialize, Serialize};

/// Hard workload limits applied during assignment and audited afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    /// Longest unbroken run of consecutive duty days before a day off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_consecutive_shifts: Option<u32>,
    /// Shifts per Sunday-start week.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shifts_per_week: Option<u32>,
    /// Night shifts per Sunday-start week.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_night_shifts_per_week: Option<u32>,
    /// Minimum hours between two of a doctor's shifts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rest_hours: Option<f64>,
}

impl Constraints {
    /// No rule enabled.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// The unit's conventional policy: 3 / 5 / 3 / 12 h.
    pub fn conventional() -> Self {
        Self {
            max_consecutive_shifts: Some(3),
            max_shifts_per_week: Some(5),
            max_night_shifts_per_week: Some(3),
            min_rest_hours: Some(12.0),
        }
    }

    /// Sets the consecutive-days limit.
    pub fn with_max_consecutive_shifts(mut self, limit: u32) -> Self {
        self.max_consecutive_shifts = Some(limit);
        self
    }

    /// Sets the weekly shift limit.
    pub fn with_max_shifts_per_week(mut self, limit: u32) -> Self {
        self.max_shifts_per_week = Some(limit);
        self
    }

    /// Sets the weekly night-shift limit.
    pub fn with_max_night_shifts_per_week(mut self, limit: u32) -> Self {
        self.max_night_shifts_per_week = Some(limit);
        self
    }

    /// Sets the minimum rest.
    pub fn with_min_rest_hours(mut self, hours: f64) -> Self {
        self.min_rest_hours = Some(hours);
        self
    }

    /// Fills every unset threshold from `fallback`.
    ///
    /// Thresholds already set on `self` win.
    pub fn with_defaults_from(self, fallback: &Constraints) -> Self {
        Self {
            max_consecutive_shifts: self
                .max_consecutive_shifts
                .or(fallback.max_consecutive_shifts),
            max_shifts_per_week: self.max_shifts_per_week.or(fallback.max_shifts_per_week),
            max_night_shifts_per_week: self
                .max_night_shifts_per_week
                .or(fallback.max_night_shifts_per_week),
            min_rest_hours: self.min_rest_hours.or(fallback.min_rest_hours),
        }
    }

    /// Whether no rule is enabled.
    pub fn is_unrestricted(&self) -> bool {
        *self == Self::unrestricted()
    }
}
