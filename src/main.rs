//! `icu-roster <request.json> [config.json]`
//!
//! Reads a schedule request, fills unset constraints from the config file
//! (or the conventional policy) and environment overrides, then prints the
//! schedule and its compliance report as JSON.

use std::fs;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use icu_roster::config::SchedulerConfig;
use icu_roster::logging;
use icu_roster::scheduler::{validate_schedule, ScheduleRequest, ShiftGenerator, ShiftScheduler};

const USAGE: &str = "usage: icu-roster <request.json> [config.json]";

/// Optional date range for generating shifts, read beside the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DateWindow {
    start_date: Option<String>,
    end_date: Option<String>,
}

/// Splits a request file into the schedule request and its date window.
///
/// Both are read from one parsed JSON value so that numeric weekday keys in
/// availability and preference grids keep their integer form.
fn parse_request(raw: &str) -> Result<(ScheduleRequest, DateWindow)> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let window = DateWindow::deserialize(&value)?;
    let request = ScheduleRequest::deserialize(value)?;
    Ok((request, window))
}

fn main() -> Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let request_path = args.next().context(USAGE)?;

    let config = match args.next() {
        Some(path) => SchedulerConfig::from_path(&path)
            .with_context(|| format!("loading config {path}"))?,
        None => SchedulerConfig::default(),
    }
    .with_env_overrides()
    .context("applying environment overrides")?;

    let raw = fs::read_to_string(&request_path)
        .with_context(|| format!("reading request {request_path}"))?;
    let (mut request, window) =
        parse_request(&raw).with_context(|| format!("parsing request {request_path}"))?;

    match (window.start_date, window.end_date) {
        (Some(start), Some(end)) if request.shifts.is_empty() => {
            request.shifts = ShiftGenerator::parse(&start, &end)?
                .with_requirements(config.shift_requirements)
                .generate();
            info!(start = %start, end = %end, shifts = request.shifts.len(), "generated shifts");
        }
        (Some(_), Some(_)) => bail!("request has both shifts and a date range"),
        (Some(_), None) | (None, Some(_)) => bail!("startDate and endDate must be given together"),
        (None, None) => {}
    }
    request.constraints = request.constraints.with_defaults_from(&config.constraints);

    let outcome = ShiftScheduler::new()
        .generate(&request)
        .context("generating schedule")?;
    let compliance = validate_schedule(&outcome.schedule, &request.doctors, &request.constraints);

    let output = json!({
        "schedule": outcome.schedule,
        "statistics": outcome.statistics,
        "unfilled": outcome.unfilled,
        "compliance": compliance,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use icu_roster::models::ShiftKind;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_parse_request_with_grids_and_range() {
        let raw = r#"{
            "doctors": [{
                "id": "D1",
                "temi": true,
                "availability": {"1": {"night": false}},
                "preferences": {"1": {"day": 5}}
            }],
            "startDate": "2024-01-08",
            "endDate": "2024-01-08"
        }"#;

        let (request, window) = parse_request(raw).unwrap();
        let doctor = &request.doctors[0];
        // 2024-01-08 is a Monday
        assert!(!doctor.is_available(date(8), ShiftKind::Night));
        assert!(doctor.is_available(date(8), ShiftKind::Day));
        assert_eq!(doctor.preference_for(date(8), ShiftKind::Day), 5);
        assert!(request.shifts.is_empty());
        assert_eq!(window.start_date.as_deref(), Some("2024-01-08"));
        assert_eq!(window.end_date.as_deref(), Some("2024-01-08"));
    }

    #[test]
    fn test_parse_request_without_range() {
        let raw = r#"{
            "doctors": [{"id": "D1"}],
            "shifts": [{"id": "S1", "date": "2024-01-08T00:00:00.000Z", "type": "day"}],
            "constraints": {"maxShiftsPerWeek": 5}
        }"#;

        let (request, window) = parse_request(raw).unwrap();
        assert_eq!(request.shifts[0].date, date(8));
        assert_eq!(request.constraints.max_shifts_per_week, Some(5));
        assert!(window.start_date.is_none() && window.end_date.is_none());
    }

    #[test]
    fn test_parse_request_rejects_bad_grid_key() {
        let raw = r#"{"doctors": [{"id": "D1", "availability": {"monday": {"night": false}}}]}"#;
        assert!(parse_request(raw).is_err());
    }
}
