//! Engine facade over the journal store.
//!
//! Every mutating operation is load → mutate → recompute (where the
//! operation calls for it) → save. Single user, single writer: concurrent
//! callers race with last-write-wins, which is acceptable under the
//! single-user assumption.
//!
//! `today` is always passed in by the caller. The engine never reads the
//! clock for calendar decisions, so every operation is replayable in
//! tests; only event timestamps (`created_at`, `reported_at`) come from
//! `Utc::now()`.

use chrono::{NaiveDate, Utc};

use crate::analytics;
use crate::dayoff::{self, DayOffAssessment};
use crate::document::{Analytics, Plan, Report, SemesterPhase};
use crate::error::{CoreError, Result, ValidationError};
use crate::plan::{self, PlanInput};
use crate::readiness::{self, Readiness};
use crate::report::{self, ReportAck, ReportInput};
use crate::storage::DocumentStore;

/// Default lookback for [`Engine::recent_reports`].
pub const DEFAULT_RECENT_DAYS: i64 = 4;

pub struct Engine {
    store: DocumentStore,
}

impl Engine {
    /// Engine over the configured journal location.
    pub fn open() -> Result<Self> {
        Ok(Self {
            store: DocumentStore::open()?,
        })
    }

    /// Engine over an explicit store, mainly for tests and embedding.
    pub fn with_store(store: DocumentStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Gate check for planning `today`. Read-only; the READY branch's
    /// recomputed analytics are a projection and are not persisted.
    pub fn check_readiness(&self, today: NaiveDate) -> Result<Readiness> {
        let doc = self.store.load(today)?;
        Ok(readiness::evaluate(&doc, today))
    }

    /// Store a plan for a date, replacing any previous plan.
    pub fn set_daily_plan(&self, input: PlanInput, today: NaiveDate) -> Result<Plan> {
        let mut doc = self.store.load(today)?;
        let stored = plan::apply(&mut doc, input, Utc::now())?;
        self.store.save(&doc)?;
        Ok(stored)
    }

    /// Record a day's outcome, or log a holiday/absence instead.
    pub fn report(&self, input: &ReportInput, today: NaiveDate) -> Result<ReportAck> {
        let mut doc = self.store.load(today)?;
        let ack = report::ingest(&mut doc, input, today, Utc::now())?;
        self.store.save(&doc)?;
        Ok(ack)
    }

    /// Recompute, persist, and return the analytics record.
    pub fn analytics_snapshot(&self, today: NaiveDate) -> Result<Analytics> {
        let mut doc = self.store.load(today)?;
        analytics::recompute(&mut doc, today);
        self.store.save(&doc)?;
        Ok(doc.analytics)
    }

    /// Reports from the trailing `days` calendar days, today inclusive.
    pub fn recent_reports(
        &self,
        today: NaiveDate,
        days: i64,
    ) -> Result<Vec<(NaiveDate, Report)>> {
        let doc = self.store.load(today)?;
        Ok(analytics::reports_within(&doc, today, days)
            .map(|(date, report)| (*date, report.clone()))
            .collect())
    }

    /// Set the advisory semester phase.
    pub fn set_semester_phase(&self, phase: SemesterPhase, today: NaiveDate) -> Result<()> {
        let mut doc = self.store.load(today)?;
        doc.analytics.semester_phase = Some(phase);
        self.store.save(&doc)?;
        Ok(())
    }

    /// The opaque long-term task section, as stored.
    pub fn long_term_tasks(&self, today: NaiveDate) -> Result<serde_json::Value> {
        let doc = self.store.load(today)?;
        Ok(doc.long_term_tasks)
    }

    /// Replace the long-term task section wholesale. The value must be a
    /// JSON object; the engine does not look inside it.
    pub fn replace_long_term_tasks(
        &self,
        value: serde_json::Value,
        today: NaiveDate,
    ) -> Result<serde_json::Value> {
        if !value.is_object() {
            return Err(CoreError::Validation(ValidationError::InvalidValue {
                field: "long_term_tasks".to_string(),
                message: "expected a JSON object".to_string(),
            }));
        }
        let mut doc = self.store.load(today)?;
        doc.long_term_tasks = value;
        self.store.save(&doc)?;
        Ok(doc.long_term_tasks)
    }

    /// Score a day-off request against fresh analytics. Advisory and
    /// read-only: the recomputation is not persisted.
    pub fn assess_day_off(&self, today: NaiveDate) -> Result<DayOffAssessment> {
        let mut doc = self.store.load(today)?;
        analytics::recompute(&mut doc, today);
        Ok(dayoff::assess(&doc.analytics, today))
    }
}
