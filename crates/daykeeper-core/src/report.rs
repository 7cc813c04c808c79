//! Report ingestion.
//!
//! One entry point, three mutually exclusive branches: holiday, absence,
//! normal completion report. Holiday is checked before absence, absence
//! before the normal path. Rest events only append to their log and reset
//! the intensity streak; they never create a `reports` entry and never
//! trigger trend recalculation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::{self, round2};
use crate::document::{Document, Report, RestEntry, TaskOutcome};
use crate::error::CoreError;

/// Skip count at which a task group is flagged. The check is `>=`, so the
/// alert re-fires on every report past the threshold.
pub const SKIP_PATTERN_THRESHOLD: u32 = 3;

/// Caller input for one report call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportInput {
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: Vec<String>,
    #[serde(default)]
    pub partial: Vec<TaskOutcome>,
    #[serde(default)]
    pub skipped: Vec<TaskOutcome>,
    #[serde(default)]
    pub was_absent: bool,
    #[serde(default)]
    pub absence_reason: Option<String>,
    #[serde(default)]
    pub was_holiday: bool,
    #[serde(default)]
    pub holiday_reason: Option<String>,
}

/// Result of a report call, tagged by which branch ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportAck {
    HolidayLogged {
        date: NaiveDate,
    },
    AbsenceLogged {
        date: NaiveDate,
    },
    Recorded {
        date: NaiveDate,
        completion_rate: f64,
        new_dedication: f64,
        pattern_alerts: Vec<String>,
    },
}

/// Apply a report to the document. The caller persists afterwards.
pub fn ingest(
    doc: &mut Document,
    input: &ReportInput,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<ReportAck, CoreError> {
    if input.was_holiday {
        doc.analytics.holidays_log.push(RestEntry {
            date: input.date,
            reason: input.holiday_reason.clone().unwrap_or_default(),
            logged_at: today,
        });
        doc.analytics.consecutive_high_intensity_days = 0;
        return Ok(ReportAck::HolidayLogged { date: input.date });
    }

    if input.was_absent {
        doc.analytics.absence_log.push(RestEntry {
            date: input.date,
            reason: input.absence_reason.clone().unwrap_or_default(),
            logged_at: today,
        });
        doc.analytics.consecutive_high_intensity_days = 0;
        return Ok(ReportAck::AbsenceLogged { date: input.date });
    }

    let total_tasks = doc
        .plan
        .get(&input.date)
        .map(|plan| plan.tasks.len())
        .ok_or(CoreError::NoPlanForDate(input.date))?;

    let completion_rate = if total_tasks == 0 {
        0.0
    } else {
        round2(input.completed.len() as f64 / total_tasks as f64)
    };

    doc.reports.insert(
        input.date,
        Report {
            completed: input.completed.clone(),
            partial: input.partial.clone(),
            skipped: input.skipped.clone(),
            completion_rate,
            reported_at: now,
        },
    );

    let pattern_alerts = track_skips(doc, &input.skipped);
    analytics::recompute(doc, today);

    Ok(ReportAck::Recorded {
        date: input.date,
        completion_rate,
        new_dedication: doc.analytics.dedication_percentage,
        pattern_alerts,
    })
}

/// Update per-group skip counters and collect alerts for every group at or
/// past the threshold.
fn track_skips(doc: &mut Document, skipped: &[TaskOutcome]) -> Vec<String> {
    let mut alerts = Vec::new();
    for outcome in skipped {
        let key = first_token(&outcome.name).to_string();
        let entry = doc.analytics.problem_tasks.entry(key.clone()).or_default();
        entry.skip_count += 1;
        entry
            .skip_reasons
            .push(outcome.reason.clone().unwrap_or_else(|| "unknown".to_string()));
        if entry.skip_count >= SKIP_PATTERN_THRESHOLD {
            let count = entry.skip_count;
            tracing::info!(task = %key, count, "skip pattern detected");
            alerts.push(format!("'{key}' has been skipped {count} times"));
        }
    }
    alerts
}

/// Grouping key: the task name's first whitespace-delimited token, so
/// "Math homework" and "Math revision" land in the same bucket.
fn first_token(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}
