//! Document model for the planning journal.
//!
//! A single [`Document`] holds everything the engine knows about one user:
//! the active plan, the report history, the opaque `long_term_tasks`
//! section owned by external tooling, and the derived [`Analytics`] record.
//!
//! Everything except `last_task_date`, `consecutive_high_intensity_days`,
//! `problem_tasks`, the rest logs, and `semester_phase` is a pure function
//! of the rest of the document and is rebuilt by `analytics::recompute`
//! before any consumer-facing read.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Current journal schema version. Bumped whenever the stored layout
/// changes; pending layouts are upgraded in `storage::migrations`.
pub const DOCUMENT_VERSION: u32 = 2;

/// Root record of the journal, one per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default = "default_version")]
    pub version: u32,
    /// At most one entry in practice: `set_daily_plan` replaces the whole
    /// map rather than inserting into it.
    #[serde(default)]
    pub plan: BTreeMap<NaiveDate, Plan>,
    /// Append-only by date key; re-reporting a date overwrites its entry.
    #[serde(default)]
    pub reports: BTreeMap<NaiveDate, Report>,
    /// Owned by an external collaborator; the engine only round-trips it.
    #[serde(default = "empty_object")]
    pub long_term_tasks: serde_json::Value,
    #[serde(default)]
    pub analytics: Analytics,
}

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Document {
    /// Fresh journal for a new (or recovered) install.
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            plan: BTreeMap::new(),
            reports: BTreeMap::new(),
            long_term_tasks: empty_object(),
            analytics: Analytics {
                last_task_date: Some(today),
                ..Analytics::default()
            },
        }
    }
}

/// The set of tasks the user committed to for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub tasks: Vec<PlanTask>,
    pub context: String,
    pub energy_level: String,
    /// Sum of the tasks' `estimated_time`, in hours.
    pub total_time: f64,
    pub created_at: DateTime<Utc>,
}

/// One planned task. Callers may attach extra fields; they round-trip
/// untouched through `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTask {
    pub name: String,
    #[serde(default)]
    pub estimated_time: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PlanTask {
    pub fn new(name: impl Into<String>, estimated_time: f64) -> Self {
        Self {
            name: name.into(),
            estimated_time,
            extra: serde_json::Map::new(),
        }
    }
}

/// Recorded outcome for a previously planned date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub completed: Vec<String>,
    pub partial: Vec<TaskOutcome>,
    pub skipped: Vec<TaskOutcome>,
    /// `|completed| / |plan.tasks|`, 0.0 for an empty plan. Two decimals.
    pub completion_rate: f64,
    pub reported_at: DateTime<Utc>,
}

/// A partial or skipped task with its optional reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub name: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Derived behavioral state. Rebuilt by `analytics::recompute` except for
/// the incrementally maintained counters and logs noted per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    /// First-token grouping of skipped tasks; accumulates forever.
    #[serde(default)]
    pub problem_tasks: BTreeMap<String, ProblemTask>,
    #[serde(default)]
    pub completion_trends: CompletionTrends,
    #[serde(default = "default_dedication")]
    pub dedication_percentage: f64,
    /// Full days with no activity since `last_task_date`; recomputed.
    #[serde(default)]
    pub absence_counter: u32,
    /// Last date a plan was set for. Only `set_daily_plan` moves this.
    #[serde(default)]
    pub last_task_date: Option<NaiveDate>,
    /// Advisory input set by an explicit call, never derived.
    #[serde(default)]
    pub semester_phase: Option<SemesterPhase>,
    /// Streak of demanding plans; reset by rest events or a light plan.
    #[serde(default)]
    pub consecutive_high_intensity_days: u32,
    #[serde(default)]
    pub burnout_risk: BurnoutRisk,
    #[serde(default)]
    pub absence_log: Vec<RestEntry>,
    #[serde(default)]
    pub holidays_log: Vec<RestEntry>,
}

fn default_dedication() -> f64 {
    0.7
}

impl Default for Analytics {
    fn default() -> Self {
        Self {
            problem_tasks: BTreeMap::new(),
            completion_trends: CompletionTrends::default(),
            dedication_percentage: default_dedication(),
            absence_counter: 0,
            last_task_date: None,
            semester_phase: None,
            consecutive_high_intensity_days: 0,
            burnout_risk: BurnoutRisk::Low,
            absence_log: Vec::new(),
            holidays_log: Vec::new(),
        }
    }
}

/// Mean completion rate over trailing calendar windows, two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionTrends {
    #[serde(default)]
    pub last_7_days: f64,
    #[serde(default)]
    pub last_30_days: f64,
}

/// Skip history for one task group (keyed by the name's first token).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemTask {
    pub skip_count: u32,
    pub skip_reasons: Vec<String>,
}

/// One logged absence or holiday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestEntry {
    pub date: NaiveDate,
    pub reason: String,
    pub logged_at: NaiveDate,
}

/// Coarse burnout classification. Ordering follows severity so bands can
/// be compared directly.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BurnoutRisk {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl BurnoutRisk {
    /// Map a cumulative risk score to its band.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Critical
        } else if score >= 0.6 {
            Self::High
        } else if score >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl fmt::Display for BurnoutRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Academic phase, set explicitly by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemesterPhase {
    EarlySemester,
    MidSemester,
    LateSemester,
    FinalsPeriod,
    SemesterBreak,
}

impl SemesterPhase {
    pub const ALL: [SemesterPhase; 5] = [
        Self::EarlySemester,
        Self::MidSemester,
        Self::LateSemester,
        Self::FinalsPeriod,
        Self::SemesterBreak,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EarlySemester => "early_semester",
            Self::MidSemester => "mid_semester",
            Self::LateSemester => "late_semester",
            Self::FinalsPeriod => "finals_period",
            Self::SemesterBreak => "semester_break",
        }
    }
}

impl fmt::Display for SemesterPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemesterPhase {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|phase| phase.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownPhase {
                value: s.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Parse an ISO `YYYY-MM-DD` date from caller input.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| ValidationError::InvalidDate {
        value: value.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_document_defaults() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let doc = Document::fresh(today);

        assert_eq!(doc.version, DOCUMENT_VERSION);
        assert!(doc.plan.is_empty());
        assert!(doc.reports.is_empty());
        assert_eq!(doc.analytics.dedication_percentage, 0.7);
        assert_eq!(doc.analytics.absence_counter, 0);
        assert_eq!(doc.analytics.burnout_risk, BurnoutRisk::Low);
        assert_eq!(doc.analytics.last_task_date, Some(today));
    }

    #[test]
    fn document_roundtrip_is_key_order_independent() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let mut doc = Document::fresh(today);
        doc.plan.insert(
            today,
            Plan {
                tasks: vec![PlanTask::new("Math homework", 2.0)],
                context: "steady".to_string(),
                energy_level: "high".to_string(),
                total_time: 2.0,
                created_at: Utc::now(),
            },
        );

        let json = serde_json::to_string_pretty(&doc).unwrap();
        let reparsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, reparsed);

        // Same fields in a different order deserialize to the same document.
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let mut reordered = serde_json::Map::new();
        let obj = value.as_object().unwrap();
        for key in ["analytics", "long_term_tasks", "reports", "plan", "version"] {
            reordered.insert(key.to_string(), obj[key].clone());
        }
        let shuffled: Document =
            serde_json::from_value(serde_json::Value::Object(reordered)).unwrap();
        assert_eq!(doc, shuffled);
    }

    #[test]
    fn plan_task_extra_fields_roundtrip() {
        let json = r#"{"name": "Essay draft", "estimated_time": 1.5, "priority": "high"}"#;
        let task: PlanTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.name, "Essay draft");
        assert_eq!(task.extra["priority"], "high");

        let back = serde_json::to_value(&task).unwrap();
        assert_eq!(back["priority"], "high");
    }

    #[test]
    fn burnout_bands_are_ordered_by_severity() {
        assert!(BurnoutRisk::Low < BurnoutRisk::Medium);
        assert!(BurnoutRisk::Medium < BurnoutRisk::High);
        assert!(BurnoutRisk::High < BurnoutRisk::Critical);
    }

    #[test]
    fn burnout_band_thresholds() {
        assert_eq!(BurnoutRisk::from_score(0.0), BurnoutRisk::Low);
        assert_eq!(BurnoutRisk::from_score(0.39), BurnoutRisk::Low);
        assert_eq!(BurnoutRisk::from_score(0.4), BurnoutRisk::Medium);
        assert_eq!(BurnoutRisk::from_score(0.6), BurnoutRisk::High);
        assert_eq!(BurnoutRisk::from_score(0.8), BurnoutRisk::Critical);
    }

    #[test]
    fn semester_phase_parses_known_values_only() {
        assert_eq!(
            "finals_period".parse::<SemesterPhase>().unwrap(),
            SemesterPhase::FinalsPeriod
        );
        assert!("midterms".parse::<SemesterPhase>().is_err());
        assert!("N/A".parse::<SemesterPhase>().is_err());
    }

    #[test]
    fn parse_date_rejects_non_calendar_input() {
        assert!(parse_date("2025-02-01").is_ok());
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("yesterday").is_err());
    }
}
