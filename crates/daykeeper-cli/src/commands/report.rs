//! Report commands: completion logs, holidays, absences, recent history.

use clap::Subcommand;
use daykeeper_core::{parse_date, Engine, ReportInput, TaskOutcome};

#[derive(Subcommand)]
pub enum ReportAction {
    /// Log the completion outcome for a planned date
    Log {
        /// Reported date (YYYY-MM-DD)
        date: String,
        /// Completed task name; repeatable
        #[arg(long = "completed", value_name = "NAME")]
        completed: Vec<String>,
        /// Partially done task as '<name>[=<reason>]'; repeatable
        #[arg(long = "partial", value_name = "NAME[=REASON]")]
        partial: Vec<String>,
        /// Skipped task as '<name>[=<reason>]'; repeatable
        #[arg(long = "skipped", value_name = "NAME[=REASON]")]
        skipped: Vec<String>,
        /// Act as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Log a holiday instead of a report
    Holiday {
        /// Holiday date (YYYY-MM-DD)
        date: String,
        #[arg(long, default_value = "")]
        reason: String,
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Log a legitimate absence instead of a report
    Absence {
        /// Absence date (YYYY-MM-DD)
        date: String,
        #[arg(long, default_value = "")]
        reason: String,
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Show reports from the trailing window
    Recent {
        /// Days to look back, today inclusive
        #[arg(long, default_value_t = daykeeper_core::engine::DEFAULT_RECENT_DAYS)]
        days: i64,
        #[arg(long)]
        as_of: Option<String>,
    },
}

pub fn run(action: ReportAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::open()?;

    match action {
        ReportAction::Log {
            date,
            completed,
            partial,
            skipped,
            as_of,
        } => {
            let today = super::resolve_today(as_of.as_deref())?;
            let input = ReportInput {
                date: parse_date(&date)?,
                completed,
                partial: partial.iter().map(|s| parse_outcome(s)).collect(),
                skipped: skipped.iter().map(|s| parse_outcome(s)).collect(),
                ..ReportInput::default()
            };
            super::print_json(&engine.report(&input, today)?)
        }
        ReportAction::Holiday { date, reason, as_of } => {
            let today = super::resolve_today(as_of.as_deref())?;
            let input = ReportInput {
                date: parse_date(&date)?,
                was_holiday: true,
                holiday_reason: Some(reason),
                ..ReportInput::default()
            };
            super::print_json(&engine.report(&input, today)?)
        }
        ReportAction::Absence { date, reason, as_of } => {
            let today = super::resolve_today(as_of.as_deref())?;
            let input = ReportInput {
                date: parse_date(&date)?,
                was_absent: true,
                absence_reason: Some(reason),
                ..ReportInput::default()
            };
            super::print_json(&engine.report(&input, today)?)
        }
        ReportAction::Recent { days, as_of } => {
            let today = super::resolve_today(as_of.as_deref())?;
            super::print_json(&engine.recent_reports(today, days)?)
        }
    }
}

fn parse_outcome(spec: &str) -> TaskOutcome {
    match spec.split_once('=') {
        Some((name, reason)) => TaskOutcome {
            name: name.trim().to_string(),
            reason: Some(reason.trim().to_string()),
        },
        None => TaskOutcome {
            name: spec.trim().to_string(),
            reason: None,
        },
    }
}
