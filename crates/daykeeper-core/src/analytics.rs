//! Analytics recalculation.
//!
//! [`recompute`] rebuilds every derived field of [`Analytics`] from the
//! report history plus the incrementally maintained counters. It runs in a
//! fixed order because later steps read earlier outputs: absence counter,
//! completion trends, dedication, burnout risk.
//!
//! The function is deterministic in `(document, today)` and is the only
//! place derived analytics are written, which keeps the pure/impure
//! boundary in one spot.

use chrono::NaiveDate;

use crate::document::{
    Analytics, BurnoutRisk, CompletionTrends, Document, Report, SemesterPhase,
};

/// Trailing window used by the dedication formula.
const DEDICATION_WINDOW_DAYS: i64 = 14;

/// Streak length past which additional high-intensity days start eroding
/// the dedication score.
const SUSTAINABLE_INTENSITY_DAYS: u32 = 3;

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reports whose date `d` satisfies `0 <= today - d < days`.
pub fn reports_within(
    doc: &Document,
    today: NaiveDate,
    days: i64,
) -> impl Iterator<Item = (&NaiveDate, &Report)> {
    doc.reports.iter().filter(move |(date, _)| {
        let age = (today - **date).num_days();
        age >= 0 && age < days
    })
}

/// Mean completion rate over a trailing window, 0.0 when no report falls
/// inside it.
fn mean_completion_rate(doc: &Document, today: NaiveDate, days: i64) -> f64 {
    let mut sum = 0.0;
    let mut count = 0u32;
    for (_, report) in reports_within(doc, today, days) {
        sum += report.completion_rate;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

/// Rebuild all derived analytics fields in place.
pub fn recompute(doc: &mut Document, today: NaiveDate) {
    // 1. Absence counter: full days missed since the last planned date.
    //    Left untouched when no plan was ever set.
    if let Some(last) = doc.analytics.last_task_date {
        let delta = (today - last).num_days();
        doc.analytics.absence_counter = delta.saturating_sub(1).max(0) as u32;
    }

    // 2. Completion trends.
    let trends = CompletionTrends {
        last_7_days: round2(mean_completion_rate(doc, today, 7)),
        last_30_days: round2(mean_completion_rate(doc, today, 30)),
    };
    doc.analytics.completion_trends = trends;

    // 3. Dedication, reading the counter updated in step 1.
    let dedication = dedication_percentage(doc, today);
    doc.analytics.dedication_percentage = dedication;

    // 4. Burnout risk, reading steps 2 and 3.
    doc.analytics.burnout_risk = burnout_risk(
        doc.analytics.consecutive_high_intensity_days,
        doc.analytics.completion_trends.last_7_days,
        doc.analytics.dedication_percentage,
        doc.analytics.semester_phase,
        doc.analytics.absence_counter,
    );
}

/// Weighted blend of recent completion, absence consistency, and workload
/// intensity. Two decimals; each component is floored at zero.
fn dedication_percentage(doc: &Document, today: NaiveDate) -> f64 {
    let completion_rate_14d = mean_completion_rate(doc, today, DEDICATION_WINDOW_DAYS);

    let absences = f64::from(doc.analytics.absence_counter);
    let consistency_score = (1.0 - 0.2 * absences).max(0.0);

    let streak = doc.analytics.consecutive_high_intensity_days;
    let intensity_factor = if streak <= SUSTAINABLE_INTENSITY_DAYS {
        1.0
    } else {
        (1.0 - 0.25 * f64::from(streak - SUSTAINABLE_INTENSITY_DAYS)).max(0.0)
    };

    round2(0.5 * completion_rate_14d + 0.3 * consistency_score + 0.2 * intensity_factor)
}

/// Cumulative risk score mapped to a band.
///
/// The intensity contributions stack: a streak of five or more days scores
/// 0.5 total. The two phase bonuses are mutually exclusive by construction
/// of the enum.
pub fn burnout_risk(
    intensity_streak: u32,
    trend_7d: f64,
    dedication: f64,
    phase: Option<SemesterPhase>,
    absence_counter: u32,
) -> BurnoutRisk {
    let mut score = 0.0;
    if intensity_streak >= 3 {
        score += 0.3;
    }
    if intensity_streak >= 5 {
        score += 0.2;
    }
    if trend_7d < 0.6 {
        score += 0.2;
    }
    if dedication < 0.5 {
        score += 0.1;
    }
    match phase {
        Some(SemesterPhase::MidSemester) | Some(SemesterPhase::LateSemester) => score += 0.15,
        Some(SemesterPhase::FinalsPeriod) => score += 0.25,
        _ => {}
    }
    if absence_counter > 2 {
        score += 0.1;
    }
    BurnoutRisk::from_score(score)
}

/// Fresh analytics for a read-only consumer without touching `doc`.
pub fn projection(doc: &Document, today: NaiveDate) -> Analytics {
    let mut copy = doc.clone();
    recompute(&mut copy, today);
    copy.analytics
}
