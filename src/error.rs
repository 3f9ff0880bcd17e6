//! Boundary errors.
//!
//! Ordinary data conditions (empty roster, no eligible doctor) are normal
//! outcomes, not errors. Only ill-formed input is rejected, and it is
//! rejected before any shift is processed.

use chrono::NaiveDate;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised at the engine boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("malformed date '{value}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    MalformedDate { value: String },

    #[error("invalid schedule input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),
}

impl ScheduleError {
    /// Integrity problems carried by an `InvalidInput` error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ScheduleError::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_message_lists_every_problem() {
        let err = ScheduleError::InvalidInput(vec![
            ValidationError::new(ValidationErrorKind::DuplicateShiftId, "Duplicate shift ID: S1"),
            ValidationError::new(ValidationErrorKind::InvalidThreshold, "bad rest"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid schedule input: Duplicate shift ID: S1; bad rest"
        );
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_date_range_message() {
        let err = ScheduleError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert!(err.to_string().contains("2024-02-01"));
        assert!(err.validation_errors().is_empty());
    }
}
