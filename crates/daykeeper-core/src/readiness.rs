//! Readiness gate for daily planning.
//!
//! [`evaluate`] decides whether planning may proceed today. Unresolved
//! history always wins: a past plan with no matching report blocks
//! everything until it is reported. The gate itself never writes; the
//! READY branch recomputes analytics on a projection only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics;
use crate::document::{
    Analytics, BurnoutRisk, Document, Plan, PlanTask, Report, SemesterPhase,
};

/// Days after a logged holiday during which rest advice is suppressed.
const HOLIDAY_RECENCY_DAYS: i64 = 2;

/// Outcome of the readiness check, serialized with a `status` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Readiness {
    /// A past plan has no report; nothing else is permitted until the
    /// caller resolves it via `report`.
    #[serde(rename = "BLOCKED")]
    Blocked {
        unreported_date: NaiveDate,
        tasks: Vec<PlanTask>,
        message: String,
    },
    /// Today is already planned.
    #[serde(rename = "PLAN_EXISTS")]
    PlanExists {
        date: NaiveDate,
        plan: Plan,
        semester_phase: Option<SemesterPhase>,
    },
    /// Today is already reported; planning again makes no sense.
    #[serde(rename = "ALREADY_REPORTED")]
    AlreadyReported { report: Report, comment: String },
    /// Planning may proceed.
    #[serde(rename = "READY")]
    Ready {
        rest_or_light_day: RestAdvice,
        long_term_tasks: serde_json::Value,
        day_of_week: String,
        semester_phase: Option<SemesterPhase>,
        absence_counter: u32,
    },
}

/// Advisory on whether today should be a rest or light day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestAdvice {
    pub recommendation: RestRecommendation,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RestRecommendation {
    ProceedNormally,
    MandatoryRest,
    RecommendedRest,
    RecommendedLightDay,
}

/// Evaluate the gate for `today`. Read-only.
pub fn evaluate(doc: &Document, today: NaiveDate) -> Readiness {
    // BLOCKED wins over everything else. The map iterates in date order,
    // so the first hit is the earliest unreported date.
    let unreported = doc
        .plan
        .iter()
        .find(|(date, _)| **date < today && !doc.reports.contains_key(date));
    if let Some((date, plan)) = unreported {
        return Readiness::Blocked {
            unreported_date: *date,
            tasks: plan.tasks.clone(),
            message: format!("Unreported plan for {date}. Accountability check required."),
        };
    }

    if let Some(plan) = doc.plan.get(&today) {
        return Readiness::PlanExists {
            date: today,
            plan: plan.clone(),
            semester_phase: doc.analytics.semester_phase,
        };
    }

    if let Some(report) = doc.reports.get(&today) {
        return Readiness::AlreadyReported {
            report: report.clone(),
            comment: performance_comment(report.completion_rate).to_string(),
        };
    }

    let fresh = analytics::projection(doc, today);
    Readiness::Ready {
        rest_or_light_day: recommend_rest(&fresh, today),
        long_term_tasks: doc.long_term_tasks.clone(),
        day_of_week: today.format("%A").to_string(),
        semester_phase: fresh.semester_phase,
        absence_counter: fresh.absence_counter,
    }
}

/// Canned performance comment by completion-rate threshold.
fn performance_comment(completion_rate: f64) -> &'static str {
    if completion_rate >= 0.9 {
        "Excellent work! See you tomorrow."
    } else if completion_rate >= 0.75 {
        "Good job, see you tomorrow."
    } else if completion_rate >= 0.5 {
        "Decent effort, see you tomorrow."
    } else {
        "Try to improve tomorrow."
    }
}

/// Rest/light-day advisory from current analytics.
///
/// A holiday within the last two days overrides everything: the user just
/// rested, so planning proceeds normally regardless of risk.
pub fn recommend_rest(analytics: &Analytics, today: NaiveDate) -> RestAdvice {
    if let Some(last) = analytics.holidays_log.last() {
        if (today - last.date).num_days() <= HOLIDAY_RECENCY_DAYS {
            return RestAdvice {
                recommendation: RestRecommendation::ProceedNormally,
                reason: "A day off was taken very recently.".to_string(),
            };
        }
    }

    match analytics.burnout_risk {
        BurnoutRisk::Critical => RestAdvice {
            recommendation: RestRecommendation::MandatoryRest,
            reason: "Critical burnout risk detected. Rest is required.".to_string(),
        },
        BurnoutRisk::High => RestAdvice {
            recommendation: RestRecommendation::RecommendedRest,
            reason: "High burnout risk detected.".to_string(),
        },
        _ if analytics.burnout_risk == BurnoutRisk::Medium
            || analytics.consecutive_high_intensity_days >= 3 =>
        {
            RestAdvice {
                recommendation: RestRecommendation::RecommendedLightDay,
                reason: "Burnout risk is medium or several consecutive demanding days."
                    .to_string(),
            }
        }
        _ => RestAdvice {
            recommendation: RestRecommendation::ProceedNormally,
            reason: "Analytics indicate readiness for a productive day.".to_string(),
        },
    }
}
