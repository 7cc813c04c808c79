//! # Daykeeper Core Library
//!
//! Core business logic for Daykeeper, a single-user daily planning
//! accountability engine. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary; any richer shell
//! is a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Engine**: load-modify-save facade over one JSON journal; every
//!   operation is a pure function of `(document, today)` plus a final
//!   persist
//! - **Readiness gate**: the state machine that enforces "report
//!   yesterday before planning today"
//! - **Analytics**: deterministic recomputation of completion trends,
//!   dedication, and burnout risk
//! - **Storage**: flat JSON document store with default-initialization,
//!   versioned migrations, and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Engine`]: entry point for all five caller-facing operations
//! - [`Document`]: the journal's root record
//! - [`Readiness`]: gate verdict for a given day
//! - [`DocumentStore`] / [`Config`]: persistence and configuration

pub mod analytics;
pub mod dayoff;
pub mod document;
pub mod engine;
pub mod error;
pub mod plan;
pub mod readiness;
pub mod report;
pub mod storage;

pub use dayoff::{DayOffAssessment, FiredRule};
pub use document::{
    parse_date, Analytics, BurnoutRisk, CompletionTrends, Document, Plan, PlanTask, ProblemTask,
    Report, RestEntry, SemesterPhase, TaskOutcome,
};
pub use engine::Engine;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use plan::PlanInput;
pub use readiness::{Readiness, RestAdvice, RestRecommendation};
pub use report::{ReportAck, ReportInput};
pub use storage::{Config, DocumentStore};
