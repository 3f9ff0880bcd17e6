//! Caller-side scheduling policy.
//!
//! The engine treats an absent threshold as "rule disabled". Deployments
//! instead start from the conventional policy, optionally loaded from a
//! JSON file, and let environment variables override single thresholds:
//!
//! | Variable | Threshold |
//! |----------|-----------|
//! | `MIN_REST_HOURS` | `minRestHours` |
//! | `MAX_CONSECUTIVE_SHIFTS` | `maxConsecutiveShifts` |
//! | `MAX_SHIFTS_PER_WEEK` | `maxShiftsPerWeek` |
//! | `MAX_NIGHT_SHIFTS_PER_WEEK` | `maxNightShiftsPerWeek` |
//!
//! Every loaded or overridden config is validated before it is returned.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{Constraints, ShiftRequirements};
use crate::validation::{validate_constraints, ValidationError};

pub const ENV_MIN_REST_HOURS: &str = "MIN_REST_HOURS";
pub const ENV_MAX_CONSECUTIVE_SHIFTS: &str = "MAX_CONSECUTIVE_SHIFTS";
pub const ENV_MAX_SHIFTS_PER_WEEK: &str = "MAX_SHIFTS_PER_WEEK";
pub const ENV_MAX_NIGHT_SHIFTS_PER_WEEK: &str = "MAX_NIGHT_SHIFTS_PER_WEEK";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {key}: '{value}'")]
    InvalidOverride { key: &'static str, value: String },

    #[error("invalid constraints: {}", join(.0))]
    InvalidConstraints(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Scheduling policy of a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Thresholds applied when a request leaves them unset.
    ///
    /// A missing `constraints` object means the conventional policy; a
    /// present object is taken as written.
    #[serde(default = "Constraints::conventional")]
    pub constraints: Constraints,
    /// Requirements stamped on generated shifts.
    #[serde(default = "ShiftRequirements::intensivist_cover")]
    pub shift_requirements: ShiftRequirements,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            constraints: Constraints::conventional(),
            shift_requirements: ShiftRequirements::intensivist_cover(),
        }
    }
}

impl SchedulerConfig {
    /// Parses a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Reads and parses a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded scheduler config");
        Self::from_json_str(&json)
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by the `ENV_*` names.
    ///
    /// Blank values are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let c = &mut self.constraints;
        if let Some(v) = parse_override(&lookup, ENV_MAX_CONSECUTIVE_SHIFTS)? {
            c.max_consecutive_shifts = Some(v);
        }
        if let Some(v) = parse_override(&lookup, ENV_MAX_SHIFTS_PER_WEEK)? {
            c.max_shifts_per_week = Some(v);
        }
        if let Some(v) = parse_override(&lookup, ENV_MAX_NIGHT_SHIFTS_PER_WEEK)? {
            c.max_night_shifts_per_week = Some(v);
        }
        if let Some(v) = parse_override(&lookup, ENV_MIN_REST_HOURS)? {
            c.min_rest_hours = Some(v);
        }
        self.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = validate_constraints(&self.constraints);
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::InvalidConstraints(errors))
        }
    }
}

fn parse_override<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let parsed = value.parse().map_err(|_| ConfigError::InvalidOverride {
        key,
        value: raw.clone(),
    })?;
    debug!(key, value, "constraint override applied");
    Ok(Some(parsed))
}
