//! Input validation for roster requests.
//!
//! Checks structural integrity of the roster, the shift list, and the
//! constraint thresholds before scheduling. Detects:
//! - Duplicate shift IDs
//! - Shift dates too close to the ends of the supported calendar
//! - Duplicate doctor IDs
//! - Zero count thresholds (a limit of 0 would forbid every shift)
//! - Non-finite or negative minimum rest
//!
//! All problems are collected in one pass so the caller sees every issue.

use std::collections::HashSet;
use thiserror::Error;

use crate::models::calendar;
use crate::models::{Constraints, Doctor, Shift};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two shifts share the same ID.
    DuplicateShiftId,
    /// A shift date leaves no room for its week or look-back window.
    DateOutOfRange,
    /// Two doctors share the same ID.
    DuplicateDoctorId,
    /// A constraint threshold is out of range.
    InvalidThreshold,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of one schedule run.
///
/// Checks:
/// 1. No duplicate shift IDs
/// 2. Every shift date leaves room for its week and 7-day look-back
/// 3. No duplicate doctor IDs
/// 4. Count thresholds, when set, are at least 1
/// 5. `min_rest_hours`, when set, is finite and non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    doctors: &[Doctor],
    shifts: &[Shift],
    constraints: &Constraints,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut shift_ids = HashSet::new();
    for shift in shifts {
        if !shift_ids.insert(shift.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateShiftId,
                format!("Duplicate shift ID: {}", shift.id),
            ));
        }
        if !calendar::is_plannable(shift.date) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DateOutOfRange,
                format!(
                    "Shift {} date {} is outside the supported calendar",
                    shift.id, shift.date
                ),
            ));
        }
    }

    let mut doctor_ids = HashSet::new();
    for doctor in doctors {
        if !doctor_ids.insert(doctor.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateDoctorId,
                format!("Duplicate doctor ID: {}", doctor.id),
            ));
        }
    }

    errors.extend(validate_constraints(constraints));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks constraint thresholds only.
pub fn validate_constraints(constraints: &Constraints) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let counts = [
        ("maxConsecutiveShifts", constraints.max_consecutive_shifts),
        ("maxShiftsPerWeek", constraints.max_shifts_per_week),
        ("maxNightShiftsPerWeek", constraints.max_night_shifts_per_week),
    ];
    for (name, limit) in counts {
        if limit == Some(0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidThreshold,
                format!("{name} must be a positive integer, got 0"),
            ));
        }
    }

    if let Some(hours) = constraints.min_rest_hours {
        if !hours.is_finite() || hours < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidThreshold,
                format!("minRestHours must be a finite non-negative number, got {hours}"),
            ));
        }
    }

    errors
}
