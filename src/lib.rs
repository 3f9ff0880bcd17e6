//! Shift-assignment engine for ICU doctor rosters.
//!
//! Assigns doctors to recurring day/night duty shifts over a date range.
//! Hard eligibility gates (availability, same-day conflict, qualification,
//! workload limits) decide who may work a shift; a deterministic chain of
//! ranking rules decides who does. The run is a single greedy pass with no
//! backtracking: identical inputs, including roster order, always produce
//! identical schedules.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Doctor`, `Shift`, `Constraints`,
//!   `PerformanceRecord`, `ScheduleState`, `Assignment`, `Violation`
//! - **`eligibility`**: Hard gates deciding whether a doctor may take a shift
//! - **`dispatching`**: Ranking rules and the `RuleEngine` that chains them
//! - **`scheduler`**: Shift generation, greedy assignment, statistics and
//!   the post-hoc compliance audit
//! - **`validation`**: Input integrity checks (duplicate IDs, thresholds)
//! - **`config`**: Caller-side policy defaults and environment overrides
//! - **`logging`**: `tracing` subscriber setup
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use icu_roster::models::{Constraints, Doctor};
//! use icu_roster::scheduler::{generate_schedule, validate_schedule, ShiftGenerator};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
//! let shifts = ShiftGenerator::new(start, end).unwrap().generate();
//! let doctors: Vec<Doctor> = (1..=4)
//!     .map(|i| Doctor::new(format!("D{i}")).with_temi(true))
//!     .collect();
//! let constraints = Constraints::conventional();
//!
//! let outcome = generate_schedule(&doctors, &shifts, &[], &constraints).unwrap();
//! assert_eq!(outcome.schedule.shift_total(), shifts.len());
//!
//! let report = validate_schedule(&outcome.schedule, &doctors, &constraints);
//! assert!(report.valid);
//! ```

pub mod config;
pub mod dispatching;
pub mod eligibility;
pub mod error;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::ScheduleError;
pub use scheduler::{generate_schedule, validate_schedule};
