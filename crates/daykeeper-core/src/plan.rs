//! Daily plan setting.
//!
//! A plan replaces the entire plan map: only the most recent day's plan is
//! ever retained, which is what lets the readiness gate treat "any past
//! plan without a report" as a single blocking date. Setting a plan also
//! advances `last_task_date`, clears the absence counter, and moves the
//! high-intensity streak; it does not rebuild trends or risk.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::document::{Document, Plan, PlanTask};
use crate::error::{CoreError, ValidationError};

/// A plan context that always counts as demanding.
pub const HIGH_INTENSITY_CONTEXT: &str = "hectic";

/// Total planned hours above which a day counts as demanding.
pub const HIGH_INTENSITY_HOURS: f64 = 5.0;

/// Caller input for one plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInput {
    pub date: NaiveDate,
    pub tasks: Vec<PlanTask>,
    pub context: String,
    pub energy_level: String,
}

impl Plan {
    /// Whether this plan counts toward the high-intensity streak.
    pub fn is_high_intensity(&self) -> bool {
        self.context == HIGH_INTENSITY_CONTEXT || self.total_time > HIGH_INTENSITY_HOURS
    }
}

/// Store a plan, replacing whatever plan map existed before.
pub fn apply(doc: &mut Document, input: PlanInput, now: DateTime<Utc>) -> Result<Plan, CoreError> {
    for task in &input.tasks {
        if !task.estimated_time.is_finite() || task.estimated_time < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "estimated_time".to_string(),
                message: format!("bad estimate for task '{}'", task.name),
            }
            .into());
        }
    }

    let total_time: f64 = input.tasks.iter().map(|task| task.estimated_time).sum();
    let plan = Plan {
        tasks: input.tasks,
        context: input.context,
        energy_level: input.energy_level,
        total_time,
        created_at: now,
    };

    doc.plan.clear();
    doc.plan.insert(input.date, plan.clone());

    let analytics = &mut doc.analytics;
    analytics.last_task_date = Some(input.date);
    analytics.absence_counter = 0;
    if plan.is_high_intensity() {
        analytics.consecutive_high_intensity_days += 1;
    } else {
        analytics.consecutive_high_intensity_days = 0;
    }

    Ok(plan)
}
