//! CLI command implementations.

pub mod analytics;
pub mod config;
pub mod dayoff;
pub mod longterm;
pub mod phase;
pub mod plan;
pub mod readiness;
pub mod report;

use chrono::NaiveDate;

/// Resolve "today": an explicit `--as-of` date wins, otherwise the local
/// wall-clock calendar date.
pub fn resolve_today(as_of: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match as_of {
        Some(value) => Ok(daykeeper_core::parse_date(value)?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Pretty-print a result to stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
