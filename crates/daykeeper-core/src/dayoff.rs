//! Day-off permissibility scoring.
//!
//! Advisory only: the caller decides what to do with the score. Each rule
//! that fires is recorded with its signed contribution so the result can
//! explain itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::round2;
use crate::document::{Analytics, SemesterPhase};

/// Neutral starting score before any rule fires.
const BASE_SCORE: f64 = 0.5;

/// Days after a logged holiday during which another one is penalized.
const RECENT_HOLIDAY_DAYS: i64 = 4;

/// Scored day-off request with the trace of rules that fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOffAssessment {
    /// Final score in `[0, 1]`, two decimals.
    pub permissibility_score: f64,
    pub rules: Vec<FiredRule>,
}

/// One rule contribution, in firing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiredRule {
    pub label: String,
    pub delta: f64,
}

impl DayOffAssessment {
    /// Joined one-line reasoning, oldest rule first.
    pub fn reasoning(&self) -> String {
        self.rules
            .iter()
            .map(|rule| rule.label.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Score a day-off request against freshly recomputed analytics.
pub fn assess(analytics: &Analytics, today: NaiveDate) -> DayOffAssessment {
    let mut score = BASE_SCORE;
    let mut rules = Vec::new();
    let mut fire = |score: &mut f64, delta: f64, label: String| {
        *score += delta;
        rules.push(FiredRule {
            label,
            delta: round2(delta),
        });
    };

    let dedication = analytics.dedication_percentage;
    fire(
        &mut score,
        (dedication - 0.7) * 0.5,
        // Truncated, not rounded: 0.57 prints as 56%.
        format!("Dedication is at {}%.", (dedication * 100.0) as i64),
    );

    match analytics.semester_phase {
        Some(
            SemesterPhase::MidSemester | SemesterPhase::LateSemester | SemesterPhase::FinalsPeriod,
        ) => fire(
            &mut score,
            0.2,
            "The semester is in a critical phase; a day off is fine if it frees up academic work."
                .to_string(),
        ),
        Some(SemesterPhase::EarlySemester) => fire(
            &mut score,
            -0.2,
            "The semester has just started; a day off is not recommended.".to_string(),
        ),
        Some(SemesterPhase::SemesterBreak) => {
            fire(&mut score, 0.2, "It is currently a semester break.".to_string())
        }
        None => {}
    }

    if let Some(last) = analytics.holidays_log.last() {
        if (today - last.date).num_days() <= RECENT_HOLIDAY_DAYS {
            fire(
                &mut score,
                -0.4,
                "A day off was already taken in the last 4 days.".to_string(),
            );
        }
    }

    if analytics.burnout_risk.is_elevated() {
        fire(&mut score, 0.3, "Burnout risk is high.".to_string());
    }

    DayOffAssessment {
        permissibility_score: round2(score.clamp(0.0, 1.0)),
        rules,
    }
}
